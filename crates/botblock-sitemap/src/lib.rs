mod config;
mod error;
mod extract;
mod reader;
mod sitemap;

pub use config::OnError;
pub use error::SitemapError;
pub use extract::{extract_paths, Extraction, SkippedLoc};
pub use reader::{decode_sitemap, read_sitemap};
pub use sitemap::Sitemap;

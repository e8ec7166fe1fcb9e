use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Malformed sitemap XML: {0}")]
    Malformed(String),

    #[error("XPath error: {0}")]
    XPath(String),

    #[error("{count} invalid <loc> URL(s), first one: {first:?}")]
    InvalidUrls { count: usize, first: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

use std::fmt;

use sxd_document::dom;

/// Kind of sitemap document, read from its root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sitemap {
    Index,
    Urlset,
    Unknown,
}

impl<'a> From<dom::Root<'a>> for Sitemap {
    fn from(root: dom::Root<'a>) -> Self {
        let kind = root
            .children()
            .into_iter()
            .find_map(|child| child.element())
            .map(|element| element.name().local_part().to_string());

        match kind.as_deref() {
            Some("sitemapindex") => Self::Index,
            Some("urlset") => Self::Urlset,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Sitemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "sitemap index"),
            Self::Urlset => write!(f, "urlset"),
            Self::Unknown => write!(f, "unknown document"),
        }
    }
}

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use sxd_document::parser;
use url::Url;

use crate::config::OnError;
use crate::error::SitemapError;
use crate::sitemap::Sitemap;

lazy_static! {
    static ref XP_FACTORY: sxd_xpath::Factory = sxd_xpath::Factory::new();
}

/// Matches `<loc>` at any depth, whether or not the sitemap namespace is declared.
const LOC_XPATH: &str = "//*[local-name()='loc']";

/// Paths found in a sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub paths: BTreeSet<String>,
    /// Scheme and host of the first URL, e.g. `https://example.com`.
    pub origin: Option<String>,
    pub kind: Sitemap,
    pub skipped: Vec<SkippedLoc>,
}

/// A `<loc>` entry that was not a usable absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLoc {
    pub loc: String,
    pub reason: String,
}

impl Extraction {
    /// Logs skipped entries, or turns them into an error with [`OnError::Fail`].
    pub fn check(self, on_error: OnError) -> Result<Self, SitemapError> {
        if self.skipped.is_empty() {
            return Ok(self);
        }
        match on_error {
            OnError::SkipAndLog => {
                for SkippedLoc { loc, reason } in &self.skipped {
                    log::warn!("Skipping <loc> {loc:?} got: {reason}");
                }
                Ok(self)
            }
            OnError::Fail => Err(SitemapError::InvalidUrls {
                count: self.skipped.len(),
                first: self.skipped[0].loc.clone(),
            }),
        }
    }
}

/// Extracts the deduplicated paths of every `<loc>` URL of `xml`.
///
/// Only a document that is not well-formed XML is an error. Entries that are
/// not absolute URLs with a host end up in [`Extraction::skipped`], and the
/// root path is never part of the result.
pub fn extract_paths(xml: &str) -> Result<Extraction, SitemapError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let package = parser::parse(xml).map_err(|e| SitemapError::Malformed(e.to_string()))?;
    let document = package.as_document();

    let kind = Sitemap::from(document.root());

    let context = sxd_xpath::Context::new();
    let xpath = XP_FACTORY
        .build(LOC_XPATH)
        .map_err(|e| SitemapError::XPath(e.to_string()))?
        .ok_or_else(|| SitemapError::XPath(String::from("Missing XPath")))?;
    let value = xpath
        .evaluate(&context, document.root())
        .map_err(|e| SitemapError::XPath(format!("{xpath:?} got: {e}")))?;

    let mut extraction = Extraction {
        paths: BTreeSet::new(),
        origin: None,
        kind,
        skipped: vec![],
    };

    if let sxd_xpath::Value::Nodeset(nodes) = value {
        for node in nodes.document_order() {
            let loc = node.string_value();
            let url = match parse_loc(loc.trim()) {
                Ok(url) => url,
                Err(reason) => {
                    extraction.skipped.push(SkippedLoc { loc, reason });
                    continue;
                }
            };

            if extraction.origin.is_none() {
                extraction.origin = Some(url.origin().ascii_serialization());
            }

            match url.path() {
                "" | "/" => (),
                path => {
                    extraction.paths.insert(path.to_string());
                }
            }
        }
    }

    Ok(extraction)
}

fn parse_loc(loc: &str) -> Result<Url, String> {
    let url = Url::parse(loc).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err(String::from("URL has no hierarchical path"));
    }
    if !url.origin().is_tuple() {
        return Err(format!("URL has no host origin ({} scheme)", url.scheme()));
    }
    Ok(url)
}

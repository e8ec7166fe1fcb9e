use std::fs;
use std::io::prelude::*;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::SitemapError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BOM: char = '\u{feff}';

/// Reads a sitemap file, gunzipping it when needed.
pub fn read_sitemap<P: AsRef<Path>>(path: P) -> Result<String, SitemapError> {
    let bytes = fs::read(path)?;
    decode_sitemap(&bytes)
}

/// Decodes raw sitemap bytes, plain or gzip-compressed.
///
/// Invalid UTF-8 is replaced and a leading byte order mark is dropped.
pub fn decode_sitemap(bytes: &[u8]) -> Result<String, SitemapError> {
    let xml = if bytes.starts_with(&GZIP_MAGIC) {
        let mut gz = GzDecoder::new(bytes);
        let mut raw = vec![];
        gz.read_to_end(&mut raw)?;
        String::from_utf8_lossy(&raw).into_owned()
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };
    match xml.strip_prefix(BOM) {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(xml),
    }
}

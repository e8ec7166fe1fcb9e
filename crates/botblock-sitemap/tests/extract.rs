use std::io::prelude::*;

use botblock_sitemap::{
    decode_sitemap, extract_paths, read_sitemap, OnError, Sitemap, SitemapError,
};
use flate2::write::GzEncoder;
use flate2::Compression;

const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://ex.com/a</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://ex.com/b/</loc><priority>0.5</priority></url>
  <url><loc>not a url</loc></url>
</urlset>"#;

fn paths(extraction: &botblock_sitemap::Extraction) -> Vec<&str> {
    extraction.paths.iter().map(String::as_str).collect()
}

#[test]
fn extract_urlset() {
    let extraction = extract_paths(URLSET).unwrap();

    assert_eq!(vec!["/a", "/b/"], paths(&extraction));
    assert_eq!(Some("https://ex.com"), extraction.origin.as_deref());
    assert_eq!(Sitemap::Urlset, extraction.kind);
    assert_eq!(1, extraction.skipped.len());
    assert_eq!("not a url", extraction.skipped[0].loc);
}

#[test]
fn root_and_duplicates_are_dropped() {
    let xml = "<urlset>
        <url><loc>https://ex.com/</loc></url>
        <url><loc>https://ex.com</loc></url>
        <url><loc>https://ex.com/a?page=2#top</loc></url>
        <url><loc> https://ex.com/a </loc></url>
    </urlset>";
    let extraction = extract_paths(xml).unwrap();

    assert_eq!(vec!["/a"], paths(&extraction));
    assert_eq!(Some("https://ex.com"), extraction.origin.as_deref());
    assert!(extraction.skipped.is_empty());
}

#[test]
fn first_origin_is_kept() {
    let xml = "<urlset>
        <url><loc>bad</loc></url>
        <url><loc>http://first.org:8080/x</loc></url>
        <url><loc>https://second.org/y</loc></url>
    </urlset>";
    let extraction = extract_paths(xml).unwrap();

    assert_eq!(Some("http://first.org:8080"), extraction.origin.as_deref());
    assert_eq!(vec!["/x", "/y"], paths(&extraction));
}

#[test]
fn loc_at_any_depth() {
    let xml = "<root><group><deep><loc>https://ex.com/deep/page</loc></deep></group></root>";
    let extraction = extract_paths(xml).unwrap();

    assert_eq!(vec!["/deep/page"], paths(&extraction));
    assert_eq!(Sitemap::Unknown, extraction.kind);
}

#[test]
fn sitemap_index_is_not_followed() {
    let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
        <sitemap><loc>https://ex.com/sitemap-posts.xml</loc></sitemap>
    </sitemapindex>"#;
    let extraction = extract_paths(xml).unwrap();

    assert_eq!(Sitemap::Index, extraction.kind);
    assert_eq!(vec!["/sitemap-posts.xml"], paths(&extraction));
}

#[test]
fn no_url_at_all() {
    let extraction = extract_paths("<urlset><url><loc>mailto:me@ex.com</loc></url></urlset>")
        .unwrap();

    assert!(extraction.paths.is_empty());
    assert_eq!(None, extraction.origin);
    assert_eq!(1, extraction.skipped.len());
}

#[test]
fn malformed_xml() {
    assert!(matches!(
        extract_paths("<urlset><url><loc>https://ex.com/a</loc></url>"),
        Err(SitemapError::Malformed(_))
    ));
    assert!(matches!(
        extract_paths("definitely not xml"),
        Err(SitemapError::Malformed(_))
    ));
}

#[test]
fn check_policy() {
    let extraction = extract_paths(URLSET).unwrap();

    let kept = extraction.clone().check(OnError::SkipAndLog).unwrap();
    assert_eq!(extraction, kept);

    match extraction.check(OnError::Fail) {
        Err(SitemapError::InvalidUrls { count, first }) => {
            assert_eq!(1, count);
            assert_eq!("not a url", first);
        }
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn gzipped_sitemap() {
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(URLSET.as_bytes()).unwrap();
    let compressed = gz.finish().unwrap();

    assert_eq!(URLSET, decode_sitemap(&compressed).unwrap());
    assert_eq!(URLSET, decode_sitemap(URLSET.as_bytes()).unwrap());
}

#[test]
fn read_missing_file() {
    assert!(matches!(
        read_sitemap("/nonexistent/sitemap.xml"),
        Err(SitemapError::Io(_))
    ));
}

#[test]
fn byte_order_mark_is_dropped() {
    let bytes = b"\xEF\xBB\xBF<?xml version=\"1.0\"?><urlset><url><loc>https://ex.com/a</loc></url></urlset>";

    let xml = decode_sitemap(bytes).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert_eq!(vec!["/a"], paths(&extract_paths(&xml).unwrap()));

    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(bytes).unwrap();
    let xml = decode_sitemap(&gz.finish().unwrap()).unwrap();
    assert!(xml.starts_with("<?xml"));

    let with_bom = "\u{feff}<urlset><url><loc>https://ex.com/b</loc></url></urlset>";
    assert_eq!(vec!["/b"], paths(&extract_paths(with_bom).unwrap()));
}

#[test]
fn gzipped_invalid_utf8_is_lossy() {
    let bytes = b"<urlset><url><loc>https://ex.com/caf\xE9</loc></url></urlset>";
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(bytes).unwrap();

    let plain = decode_sitemap(bytes).unwrap();
    let gunzipped = decode_sitemap(&gz.finish().unwrap()).unwrap();
    assert_eq!(plain, gunzipped);
    assert!(plain.contains('\u{fffd}'));
}

#[test]
fn urls_without_host_origin_are_skipped() {
    let xml = "<urlset>
        <url><loc>file:///local/a</loc></url>
        <url><loc>https://other.org/b</loc></url>
    </urlset>";
    let extraction = extract_paths(xml).unwrap();

    assert_eq!(vec!["/b"], paths(&extraction));
    assert_eq!(Some("https://other.org"), extraction.origin.as_deref());
    assert_eq!(1, extraction.skipped.len());
    assert_eq!("file:///local/a", extraction.skipped[0].loc);
}

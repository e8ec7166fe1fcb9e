use std::collections::BTreeSet;

use botblock::{effective_path_rules, BulkAction, Rule, RuleStore};

fn store_with_paths(rules: &[(&str, Rule)]) -> RuleStore {
    let mut store = RuleStore::default();
    for (path, rule) in rules {
        store.path_rules.insert(path.to_string(), *rule);
    }
    store
}

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn empty_rules() {
    let store = RuleStore::default();
    assert_eq!(
        "# Generated by Botblock\n\n# General Rules for all other bots\nUser-agent: *\n",
        store.robots_txt().generate()
    );
}

#[test]
fn empty_rules_with_origin() {
    let store = RuleStore {
        origin: Some("https://ex.com".into()),
        ..Default::default()
    };
    assert_eq!(
        "# Generated by Botblock\n\
         # Domain: https://ex.com\n\
         \n\
         # General Rules for all other bots\n\
         User-agent: *\n\
         Sitemap: https://ex.com/sitemap.xml",
        store.robots_txt().generate()
    );
}

#[test]
fn full_document() {
    let mut store = store_with_paths(&[
        ("/admin", Rule::Block),
        ("/admin/public", Rule::Allow),
        ("/blog/", Rule::Block),
    ]);
    store.blocked_crawlers.insert("GPTBot".into());
    store.extension_rules.insert(".pdf".into(), Rule::Block);
    store.origin = Some("https://ex.com".into());

    let expected = "# Generated by Botblock
# Domain: https://ex.com

# Blocked Bots (1)
User-agent: GPTBot
Disallow: /

# General Rules for all other bots
User-agent: *
# Path Rules
Allow: /admin/public/
Disallow: /admin/
Disallow: /blog/

# File Type Rules
Disallow: /*.pdf$

Sitemap: https://ex.com/sitemap.xml";

    assert_eq!(expected, store.robots_txt().generate());
}

#[test]
fn generation_is_idempotent() {
    let mut store = store_with_paths(&[("/a", Rule::Block), ("/a/b", Rule::Allow)]);
    store.blocked_crawlers.insert("Bbot".into());
    store.extension_rules.insert(".zip".into(), Rule::Allow);

    let robots = store.robots_txt();
    assert_eq!(robots.generate(), robots.generate());
    assert_eq!(robots.generate(), store.clone().robots_txt().to_string());
}

#[test]
fn same_rule_child_is_redundant() {
    let store = store_with_paths(&[("/a", Rule::Block), ("/a/b", Rule::Block)]);
    let txt = store.robots_txt().generate();

    assert_eq!(
        1,
        lines(&txt).iter().filter(|l| **l == "Disallow: /a/").count()
    );
    assert!(!txt.contains("/a/b"));
}

#[test]
fn different_rules_are_kept() {
    let store = store_with_paths(&[("/a", Rule::Block), ("/a/b", Rule::Allow)]);
    let txt = store.robots_txt().generate();

    assert!(txt.contains("# Path Rules\nAllow: /a/b/\nDisallow: /a/\n\n"));
}

#[test]
fn only_closest_ancestor_counts() {
    let rules = store_with_paths(&[
        ("/", Rule::Block),
        ("/a", Rule::Allow),
        ("/a/b", Rule::Block),
    ])
    .path_rules;

    assert_eq!(
        vec![("/a", Rule::Allow), ("/a/b", Rule::Block), ("/", Rule::Block)],
        effective_path_rules(&rules)
    );
}

#[test]
fn root_rule_makes_same_rules_redundant() {
    let store = store_with_paths(&[
        ("/", Rule::Block),
        ("/a", Rule::Block),
        ("/b", Rule::Allow),
        ("/c/d", Rule::Block),
    ]);
    let txt = store.robots_txt().generate();

    assert!(txt.contains("# Path Rules\nAllow: /b/\nDisallow: /\n\n"));
}

#[test]
fn longer_paths_first() {
    let rules = store_with_paths(&[
        ("/x", Rule::Block),
        ("/longer", Rule::Block),
        ("/mid", Rule::Block),
        ("/abc", Rule::Block),
    ])
    .path_rules;

    assert_eq!(
        vec!["/longer", "/abc", "/mid", "/x"],
        effective_path_rules(&rules)
            .into_iter()
            .map(|(p, _)| p)
            .collect::<Vec<_>>()
    );
}

#[test]
fn file_like_paths_keep_no_trailing_slash() {
    let store = store_with_paths(&[("/docs/report.pdf", Rule::Block), ("/docs/", Rule::Allow)]);
    let txt = store.robots_txt().generate();

    assert!(txt.contains("Allow: /docs/\n"));
    assert!(txt.contains("Disallow: /docs/report.pdf\n"));
}

#[test]
fn blocked_crawlers_are_sorted() {
    let mut store = RuleStore::default();
    store.blocked_crawlers.insert("Bbot".into());
    store.blocked_crawlers.insert("Abot".into());
    let txt = store.robots_txt().generate();

    let abot = txt.find("User-agent: Abot\nDisallow: /\n\n").unwrap();
    let bbot = txt.find("User-agent: Bbot\nDisallow: /\n\n").unwrap();
    assert!(abot < bbot);
    assert!(txt.contains("# Blocked Bots (2)\n"));
}

#[test]
fn extension_rules() {
    let mut store = RuleStore::default();
    store.extension_rules.insert(".zip".into(), Rule::Block);
    store.extension_rules.insert(".pdf".into(), Rule::Block);
    store.extension_rules.insert(".jpg".into(), Rule::Allow);
    let txt = store.robots_txt().generate();

    assert!(txt.contains(
        "User-agent: *\n# File Type Rules\nAllow: /*.jpg$\nDisallow: /*.pdf$\nDisallow: /*.zip$\n\n"
    ));
}

#[test]
fn bulk_blocking_everything_emits_one_directive() {
    let paths = ["/a", "/b", "/c/d"]
        .iter()
        .map(|p| p.to_string())
        .collect::<BTreeSet<_>>();
    let store = RuleStore::default()
        .load_sitemap(paths.clone(), None)
        .toggle_path("/b", Some(Rule::Allow))
        .bulk_set_paths(&paths, BulkAction::Block);
    let txt = store.robots_txt().generate();

    assert!(txt.ends_with("User-agent: *\n# Path Rules\nDisallow: /\n\n"));
}

#[test]
fn stale_rule_keys_are_still_emitted() {
    let store = RuleStore::default()
        .toggle_path("/gone", Some(Rule::Block))
        .load_sitemap(BTreeSet::from(["/new".to_string()]), None);

    assert!(store
        .robots_txt()
        .generate()
        .contains("Disallow: /gone/\n"));
}

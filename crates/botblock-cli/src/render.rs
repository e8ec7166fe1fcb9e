use std::collections::BTreeSet;
use std::io::{self, Write};

use botblock::{CrawlerRecord, PathRules, Rule, RuleStore, ROOT_PATH};
use botblock_tree::{effective_status, PathTree, StatusSource};

/// Prints one line per node, indented by depth.
pub fn tree<W: Write>(w: &mut W, tree: &PathTree, rules: &PathRules) -> io::Result<()> {
    if tree.is_empty() {
        return writeln!(w, "No paths, import a sitemap first");
    }
    let rules = tree_rules(rules);
    for (depth, node) in tree.descendants() {
        let slash = if node.has_children() { "/" } else { "" };
        let status = effective_status(node.full_path(), &rules);
        let label = match status.source {
            StatusSource::Explicit => status.status.to_string(),
            StatusSource::Inherited => format!("{} (inherited)", status.status),
            StatusSource::Default => String::new(),
        };
        let name = format!("{}{}{slash}", "  ".repeat(depth), node.segment());
        writeln!(w, "{name:<48}{label}")?;
    }
    Ok(())
}

/// Rules keyed like tree nodes, `/blog/` being read as `/blog`.
///
/// A rule on the exact node path wins over its trailing slash variant.
fn tree_rules(rules: &PathRules) -> PathRules {
    let mut keyed = rules
        .iter()
        .filter(|(path, _)| path.as_str() != ROOT_PATH && path.ends_with('/'))
        .map(|(path, rule)| (path.trim_end_matches('/').to_string(), *rule))
        .filter(|(path, _)| !path.is_empty())
        .collect::<PathRules>();
    keyed.extend(
        rules
            .iter()
            .filter(|(path, _)| path.as_str() == ROOT_PATH || !path.ends_with('/'))
            .map(|(path, rule)| (path.clone(), *rule)),
    );
    keyed
}

pub fn crawlers<W: Write>(
    w: &mut W,
    crawlers: &[CrawlerRecord],
    blocked: &BTreeSet<String>,
) -> io::Result<()> {
    for crawler in crawlers {
        let mark = if blocked.contains(&crawler.user_agent) {
            "x"
        } else {
            " "
        };
        writeln!(
            w,
            "[{mark}] {:<28}{:<16}{}",
            crawler.user_agent, crawler.company, crawler.kind
        )?;
    }
    Ok(())
}

pub fn file_groups<W: Write>(w: &mut W, store: &RuleStore) -> io::Result<()> {
    for group in &store.file_groups {
        writeln!(w, "{}", group.category)?;
        for ext in &group.extensions {
            let label = match store.extension_rules.get(ext) {
                Some(Rule::Block) => "block",
                Some(Rule::Allow) => "allow",
                None => "",
            };
            writeln!(w, "  {ext:<12}{label}")?;
        }
    }
    Ok(())
}

pub fn summary<W: Write>(w: &mut W, store: &RuleStore) -> io::Result<()> {
    let summary = store.summary();
    writeln!(w, "Origin:           {}", store.origin.as_deref().unwrap_or("-"))?;
    writeln!(w, "Known paths:      {}", store.paths.len())?;
    writeln!(w, "Blocked rules:    {}", summary.blocked_rules)?;
    writeln!(w, "Allowed rules:    {}", summary.allowed_rules)?;
    writeln!(
        w,
        "Blocked crawlers: {}/{}",
        summary.blocked_crawlers,
        store.crawlers.len()
    )?;
    if !summary.is_modified() {
        writeln!(w, "Nothing is blocked, every crawler may visit every page")?;
    }
    Ok(())
}

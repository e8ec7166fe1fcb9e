use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use crate::rule::{ExtensionRules, PathRules, Rule};
use crate::store::RuleStore;

pub const ROBOTS_FILENAME: &str = "robots.txt";
pub const ROBOTS_MIME_TYPE: &str = "text/plain";

const GENERATOR: &str = "Botblock";

/// Snapshot of the rules a robots.txt is rendered from.
///
/// Rendering goes through [`fmt::Display`], so the same snapshot always
/// renders to the same bytes.
#[derive(Debug, Clone, Copy)]
pub struct RobotsTxt<'a> {
    pub blocked_crawlers: &'a BTreeSet<String>,
    pub path_rules: &'a PathRules,
    pub extension_rules: &'a ExtensionRules,
    pub origin: Option<&'a str>,
}

impl RuleStore {
    pub fn robots_txt(&self) -> RobotsTxt<'_> {
        RobotsTxt {
            blocked_crawlers: &self.blocked_crawlers,
            path_rules: &self.path_rules,
            extension_rules: &self.extension_rules,
            origin: self.origin.as_deref(),
        }
    }
}

impl RobotsTxt<'_> {
    pub fn generate(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RobotsTxt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by {GENERATOR}")?;
        if let Some(origin) = self.origin {
            writeln!(f, "# Domain: {origin}")?;
        }
        writeln!(f)?;

        if !self.blocked_crawlers.is_empty() {
            writeln!(f, "# Blocked Bots ({})", self.blocked_crawlers.len())?;
            for ua in self.blocked_crawlers {
                writeln!(f, "User-agent: {ua}")?;
                writeln!(f, "Disallow: /")?;
                writeln!(f)?;
            }
        }

        writeln!(f, "# General Rules for all other bots")?;
        writeln!(f, "User-agent: *")?;

        if !self.path_rules.is_empty() {
            writeln!(f, "# Path Rules")?;
            for (path, rule) in effective_path_rules(self.path_rules) {
                writeln!(f, "{}: {}", rule.directive(), directory_path(path))?;
            }
            writeln!(f)?;
        }

        if !self.extension_rules.is_empty() {
            writeln!(f, "# File Type Rules")?;
            for wanted in [Rule::Allow, Rule::Block] {
                for (ext, _) in self.extension_rules.iter().filter(|(_, r)| **r == wanted) {
                    writeln!(f, "{}: /*{ext}$", wanted.directive())?;
                }
            }
            writeln!(f)?;
        }

        if let Some(origin) = self.origin {
            write!(f, "Sitemap: {origin}/sitemap.xml")?;
        }

        Ok(())
    }
}

/// Path rules left once redundant ones are dropped, in output order.
///
/// A rule is redundant when its closest ancestor, the longest other key
/// prefixing it, carries the same rule. Allow rules come first, then longer
/// paths first.
pub fn effective_path_rules(rules: &PathRules) -> Vec<(&str, Rule)> {
    let mut kept = rules
        .iter()
        .filter(|(path, rule)| closest_ancestor(rules, path).map_or(true, |(_, r)| r != **rule))
        .map(|(path, rule)| (path.as_str(), *rule))
        .collect::<Vec<_>>();

    kept.sort_by(|(p1, r1), (p2, r2)| {
        (*r1 == Rule::Block)
            .cmp(&(*r2 == Rule::Block))
            .then_with(|| p2.len().cmp(&p1.len()))
            .then_with(|| p1.cmp(p2))
    });

    kept
}

fn closest_ancestor<'a>(rules: &'a PathRules, path: &str) -> Option<(&'a str, Rule)> {
    rules
        .iter()
        .filter(|(other, _)| other.as_str() != path && path.starts_with(other.as_str()))
        .max_by_key(|(other, _)| other.len())
        .map(|(other, rule)| (other.as_str(), *rule))
}

/// Appends `/` to paths whose last segment looks like a directory.
fn directory_path(path: &str) -> Cow<'_, str> {
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    if path.ends_with('/') || last_segment.contains('.') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::crawler::{CrawlerRecord, CrawlerType, SEED_CRAWLERS};
use crate::file_types::{default_file_groups, normalize_extension, FileTypeGroup};
use crate::rule::{get_state, set_state, BulkAction, ExtensionRules, PathRules, Rule, RuleState};

/// Rule key standing for every path of the site.
pub const ROOT_PATH: &str = "/";

/// Everything the user has configured so far.
///
/// Each mutation consumes the store and returns the next one, see
/// [`RuleStore::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleStore {
    pub crawlers: Vec<CrawlerRecord>,
    pub file_groups: Vec<FileTypeGroup>,
    pub paths: BTreeSet<String>,
    pub origin: Option<String>,
    pub path_rules: PathRules,
    pub extension_rules: ExtensionRules,
    pub blocked_crawlers: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadSitemap {
        paths: BTreeSet<String>,
        origin: Option<String>,
    },
    TogglePath {
        path: String,
        force: Option<Rule>,
    },
    BulkSetPaths {
        paths: BTreeSet<String>,
        action: BulkAction,
    },
    ToggleExtension(String),
    BulkSetExtensions {
        extensions: Vec<String>,
        action: BulkAction,
    },
    ToggleCrawler(String),
    BulkSetCrawlers {
        crawlers: Vec<CrawlerRecord>,
        action: BulkAction,
    },
    AllowSeoCrawlers,
    AddCrawler(CrawlerRecord),
    AddExtension {
        extension: String,
        category: String,
    },
}

/// Rule counters, as shown next to the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleSummary {
    pub blocked_rules: usize,
    pub allowed_rules: usize,
    pub blocked_crawlers: usize,
}

impl RuleSummary {
    /// Whether anything differs from a fully permissive robots.txt.
    pub fn is_modified(&self) -> bool {
        self.blocked_rules + self.allowed_rules + self.blocked_crawlers > 0
    }
}

impl RuleStore {
    /// Store holding the bundled crawlers and file groups.
    pub fn seeded(block_all_crawlers: bool) -> Self {
        let crawlers = SEED_CRAWLERS.to_vec();
        let blocked_crawlers = if block_all_crawlers {
            crawlers.iter().map(|c| c.user_agent.clone()).collect()
        } else {
            BTreeSet::new()
        };
        Self {
            crawlers,
            file_groups: default_file_groups(),
            blocked_crawlers,
            ..Default::default()
        }
    }

    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::LoadSitemap { paths, origin } => self.load_sitemap(paths, origin),
            Action::TogglePath { path, force } => self.toggle_path(&path, force),
            Action::BulkSetPaths { paths, action } => self.bulk_set_paths(&paths, action),
            Action::ToggleExtension(ext) => self.toggle_extension(&ext),
            Action::BulkSetExtensions { extensions, action } => {
                self.bulk_set_extensions(&extensions[..], action)
            }
            Action::ToggleCrawler(ua) => self.toggle_crawler(&ua),
            Action::BulkSetCrawlers { crawlers, action } => {
                self.bulk_set_crawlers(&crawlers, action)
            }
            Action::AllowSeoCrawlers => self.allow_seo_crawlers(),
            Action::AddCrawler(record) => self.add_crawler(record),
            Action::AddExtension {
                extension,
                category,
            } => self.add_extension(&extension, &category),
        }
    }

    /// Replaces the known paths, rules are kept even if their path vanished.
    pub fn load_sitemap(mut self, paths: BTreeSet<String>, origin: Option<String>) -> Self {
        self.paths = paths;
        if origin.is_some() {
            self.origin = origin;
        }
        self
    }

    /// Sets `force` on `path`, or clears it when already set to `force`.
    ///
    /// Without `force` the rule cycles through unset, block and allow.
    pub fn toggle_path(mut self, path: &str, force: Option<Rule>) -> Self {
        let current = get_state(&self.path_rules, path);
        let next = match force {
            Some(rule) if current == RuleState::from(Some(rule)) => RuleState::Unset,
            Some(rule) => RuleState::from(Some(rule)),
            None => current.cycle(),
        };
        set_state(&mut self.path_rules, path, next);
        self
    }

    /// Applies `action` to every path of `targets`.
    ///
    /// Targeting every known path collapses the rules into a single rule on
    /// [`ROOT_PATH`].
    pub fn bulk_set_paths(mut self, targets: &BTreeSet<String>, action: BulkAction) -> Self {
        if targets.is_empty() {
            return self;
        }

        if *targets == self.paths {
            self.path_rules.clear();
            if let Some(rule) = action.rule() {
                self.path_rules.insert(ROOT_PATH.to_string(), rule);
            }
            return self;
        }

        for path in targets {
            set_state(&mut self.path_rules, path, action.rule().into());
        }
        self
    }

    pub fn toggle_extension(mut self, ext: &str) -> Self {
        let next = get_state(&self.extension_rules, ext).cycle();
        set_state(&mut self.extension_rules, ext, next);
        self
    }

    pub fn bulk_set_extensions<S: AsRef<str>>(mut self, exts: &[S], action: BulkAction) -> Self {
        for ext in exts {
            set_state(&mut self.extension_rules, ext.as_ref(), action.rule().into());
        }
        self
    }

    pub fn toggle_crawler(mut self, user_agent: &str) -> Self {
        if !self.blocked_crawlers.remove(user_agent) {
            self.blocked_crawlers.insert(user_agent.to_string());
        }
        self
    }

    /// Blocks or allows the given crawlers, a reset unblocks every crawler.
    pub fn bulk_set_crawlers(mut self, crawlers: &[CrawlerRecord], action: BulkAction) -> Self {
        match action {
            BulkAction::Reset => self.blocked_crawlers.clear(),
            BulkAction::Block => {
                for crawler in crawlers {
                    self.blocked_crawlers.insert(crawler.user_agent.clone());
                }
            }
            BulkAction::Allow => {
                for crawler in crawlers {
                    self.blocked_crawlers.remove(&crawler.user_agent);
                }
            }
        }
        self
    }

    /// Unblocks every search engine crawler.
    pub fn allow_seo_crawlers(self) -> Self {
        let seo = self
            .crawlers
            .iter()
            .filter(|c| c.kind == CrawlerType::Seo)
            .cloned()
            .collect::<Vec<_>>();
        self.bulk_set_crawlers(&seo, BulkAction::Allow)
    }

    pub fn add_crawler(mut self, record: CrawlerRecord) -> Self {
        if record.user_agent.trim().is_empty() {
            log::info!("Ignoring crawler without user agent");
            return self;
        }
        self.crawlers.insert(0, record);
        self
    }

    pub fn add_extension(mut self, ext: &str, category: &str) -> Self {
        let ext = match normalize_extension(ext) {
            Some(ext) => ext,
            None => {
                log::info!("Ignoring empty extension");
                return self;
            }
        };

        match self.file_groups.iter_mut().find(|g| g.category == category) {
            Some(group) => {
                if !group.extensions.contains(&ext) {
                    group.extensions.push(ext);
                }
            }
            None => self.file_groups.push(FileTypeGroup {
                category: category.to_string(),
                extensions: vec![ext],
            }),
        }
        self
    }

    /// Crawlers whose company or user agent contains `search`, ignoring case.
    pub fn filter_crawlers(&self, search: &str, kind: Option<CrawlerType>) -> Vec<CrawlerRecord> {
        let search = search.to_lowercase();
        self.crawlers
            .iter()
            .filter(|c| {
                c.company.to_lowercase().contains(&search)
                    || c.user_agent.to_lowercase().contains(&search)
            })
            .filter(|c| kind.map_or(true, |k| c.kind == k))
            .cloned()
            .collect()
    }

    /// Known paths containing `search`, ignoring case.
    pub fn filter_paths(&self, search: &str) -> BTreeSet<String> {
        let search = search.to_lowercase();
        self.paths
            .iter()
            .filter(|p| p.to_lowercase().contains(&search))
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> RuleSummary {
        let rules = || self.path_rules.values().chain(self.extension_rules.values());
        RuleSummary {
            blocked_rules: rules().filter(|r| **r == Rule::Block).count(),
            allowed_rules: rules().filter(|r| **r == Rule::Allow).count(),
            blocked_crawlers: self.blocked_crawlers.len(),
        }
    }
}

mod crawler;
mod file_types;
pub mod prefs;
mod robots;
mod rule;
mod store;

pub use crawler::{parse_crawler_csv, CrawlerRecord, CrawlerType, SEED_CRAWLERS, SEED_CRAWLER_CSV};
pub use file_types::{default_file_groups, normalize_extension, FileTypeGroup};
pub use robots::{effective_path_rules, RobotsTxt, ROBOTS_FILENAME, ROBOTS_MIME_TYPE};
pub use rule::{BulkAction, ExtensionRules, PathRules, Rule, RuleState};
pub use store::{Action, RuleStore, RuleSummary, ROOT_PATH};

use std::mem;

use botblock::prefs::{self, FileStore, Preferences};
use botblock::{Action, RobotsTxt, RuleStore};

use crate::config::BotblockConfig;

/// The rule store persisted between invocations.
#[derive(Debug)]
pub struct Session {
    kv: FileStore,
    origin: Option<String>,
    pub store: RuleStore,
}

impl Session {
    /// Loads the saved session, or starts a new one from saved preferences.
    pub fn open(config: &BotblockConfig) -> Self {
        let kv = FileStore::new(&config.state_dir);
        let store = match prefs::load_session(&kv) {
            Some(store) => store,
            None => {
                log::info!("Starting a new session in {}", kv.dir().display());
                fresh_store(&kv, config)
            }
        };
        Self {
            kv,
            origin: config.origin.clone(),
            store,
        }
    }

    pub fn apply(&mut self, action: Action) {
        self.store = mem::take(&mut self.store).apply(action);
    }

    /// Blocks or unblocks `user_agent`, returning whether it is now blocked.
    ///
    /// Agents missing from the list can still be unblocked while blocked.
    pub fn toggle_crawler(&mut self, user_agent: &str) -> anyhow::Result<bool> {
        let known = self.store.blocked_crawlers.contains(user_agent)
            || self.store.crawlers.iter().any(|c| c.user_agent == user_agent);
        if !known {
            anyhow::bail!("Unknown crawler {user_agent:?}, see `botblock add-crawler`");
        }
        self.apply(Action::ToggleCrawler(user_agent.to_string()));
        Ok(self.store.blocked_crawlers.contains(user_agent))
    }

    /// Drops every rule and path, keeping saved preferences.
    pub fn reset(&mut self, config: &BotblockConfig) {
        self.store = fresh_store(&self.kv, config);
    }

    pub fn save(&mut self) -> anyhow::Result<()> {
        prefs::save_session(&mut self.kv, &self.store)?;
        Preferences::capture(&self.store).save(&mut self.kv)?;
        Ok(())
    }

    /// The robots.txt of the current rules, falling back to the configured origin.
    pub fn robots_txt(&self) -> RobotsTxt<'_> {
        let mut robots = self.store.robots_txt();
        if robots.origin.is_none() {
            robots.origin = self.origin.as_deref();
        }
        robots
    }
}

fn fresh_store(kv: &FileStore, config: &BotblockConfig) -> RuleStore {
    let store = RuleStore::seeded(config.block_seed_crawlers);
    match Preferences::load(kv) {
        Some(prefs) => prefs.restore(store),
        None => store,
    }
}

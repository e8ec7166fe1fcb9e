use std::fs::File;
use std::path::PathBuf;

use botblock_sitemap::OnError;
use serde::{Deserialize, Serialize};

use crate::Args;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotblockConfig {
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Used for the `Sitemap:` line until a sitemap provides one.
    #[serde(default)]
    pub origin: Option<String>,

    #[serde(default = "default_block_seed_crawlers")]
    pub block_seed_crawlers: bool,

    #[serde(default = "default_on_url_error")]
    pub on_url_error: OnError,

    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for BotblockConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            origin: None,
            block_seed_crawlers: default_block_seed_crawlers(),
            on_url_error: default_on_url_error(),
            output_file: default_output_file(),
        }
    }
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".botblock")
}

fn default_block_seed_crawlers() -> bool {
    true
}

fn default_on_url_error() -> OnError {
    OnError::SkipAndLog
}

fn default_output_file() -> PathBuf {
    PathBuf::from(botblock::ROBOTS_FILENAME)
}

impl TryFrom<&Args> for BotblockConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            BotblockConfig::default()
        };
        if let Some(state_dir) = &args.state_dir {
            conf.state_dir = state_dir.clone();
        }
        if let Some(origin) = &args.origin {
            conf.origin = Some(origin.trim_end_matches('/').to_string());
        }
        if args.allow_seed_crawlers {
            conf.block_seed_crawlers = false;
        }
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn defaults() {
        let conf: BotblockConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(PathBuf::from(".botblock"), conf.state_dir);
        assert_eq!(PathBuf::from("robots.txt"), conf.output_file);
        assert_eq!(OnError::SkipAndLog, conf.on_url_error);
        assert!(conf.block_seed_crawlers);
        assert_eq!(None, conf.origin);
    }

    #[test]
    fn yaml_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "stateDir: /tmp/from-file\norigin: https://file.org\nonUrlError: Fail\nblockSeedCrawlers: true"
        )
        .unwrap();

        let args = Args::parse_from([
            "botblock",
            "--config",
            file.path().to_str().unwrap(),
            "--origin",
            "https://flag.org/",
            "--allow-seed-crawlers",
            "status",
        ]);
        let conf = BotblockConfig::try_from(&args).unwrap();

        assert_eq!(PathBuf::from("/tmp/from-file"), conf.state_dir);
        assert_eq!(Some("https://flag.org"), conf.origin.as_deref());
        assert_eq!(OnError::Fail, conf.on_url_error);
        assert!(!conf.block_seed_crawlers);
    }

    #[test]
    fn missing_config_file() {
        let args = Args::parse_from(["botblock", "--config", "/nonexistent.yaml", "status"]);
        assert!(BotblockConfig::try_from(&args).is_err());
    }
}

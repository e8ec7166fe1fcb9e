use serde::{Deserialize, Serialize};

/// What to do with `<loc>` entries that are not absolute URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ArgEnum))]
pub enum OnError {
    Fail,
    SkipAndLog,
}

impl Default for OnError {
    fn default() -> Self {
        Self::SkipAndLog
    }
}

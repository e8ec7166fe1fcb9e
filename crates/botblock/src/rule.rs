use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rules keyed by site path (`/blog`, or `/` for the whole site).
pub type PathRules = BTreeMap<String, Rule>;

/// Rules keyed by file extension (`.pdf`).
pub type ExtensionRules = BTreeMap<String, Rule>;

/// An explicit directive attached to a path or an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Block,
    Allow,
}

impl Rule {
    /// The robots.txt directive emitting this rule.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Block => "Disallow",
            Self::Allow => "Allow",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Allow => write!(f, "allow"),
        }
    }
}

/// Tri-state view of a rule key, `Unset` meaning the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleState {
    #[default]
    Unset,
    Block,
    Allow,
}

impl RuleState {
    /// Next state of the toggle cycle: Unset -> Block -> Allow -> Unset.
    pub fn cycle(self) -> Self {
        match self {
            Self::Unset => Self::Block,
            Self::Block => Self::Allow,
            Self::Allow => Self::Unset,
        }
    }
}

impl From<Option<Rule>> for RuleState {
    fn from(rule: Option<Rule>) -> Self {
        match rule {
            None => Self::Unset,
            Some(Rule::Block) => Self::Block,
            Some(Rule::Allow) => Self::Allow,
        }
    }
}

impl From<RuleState> for Option<Rule> {
    fn from(state: RuleState) -> Self {
        match state {
            RuleState::Unset => None,
            RuleState::Block => Some(Rule::Block),
            RuleState::Allow => Some(Rule::Allow),
        }
    }
}

/// Action applied to many keys at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ArgEnum))]
pub enum BulkAction {
    Block,
    Allow,
    Reset,
}

impl BulkAction {
    /// The rule written by this action, `None` for a reset.
    pub fn rule(self) -> Option<Rule> {
        match self {
            Self::Block => Some(Rule::Block),
            Self::Allow => Some(Rule::Allow),
            Self::Reset => None,
        }
    }
}

/// Writes `state` at `key`, removing the key when the state is unset.
pub(crate) fn set_state(rules: &mut BTreeMap<String, Rule>, key: &str, state: RuleState) {
    match Option::<Rule>::from(state) {
        Some(rule) => {
            rules.insert(key.to_string(), rule);
        }
        None => {
            rules.remove(key);
        }
    }
}

/// Reads the tri-state value of `key`.
pub(crate) fn get_state(rules: &BTreeMap<String, Rule>, key: &str) -> RuleState {
    rules.get(key).copied().into()
}

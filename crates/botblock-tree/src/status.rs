use botblock::{PathRules, Rule, ROOT_PATH};

/// Where an effective status comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    Explicit,
    Inherited,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveStatus {
    pub status: Rule,
    pub source: StatusSource,
}

impl EffectiveStatus {
    fn new(status: Rule, source: StatusSource) -> Self {
        Self { status, source }
    }
}

/// Resolves the rule applying to `full_path`.
///
/// Checked in order: the path's own rule, the rule on `/`, then the closest
/// ancestor's rule. Paths nothing applies to are allowed.
pub fn effective_status(full_path: &str, rules: &PathRules) -> EffectiveStatus {
    if let Some(rule) = rules.get(full_path) {
        return EffectiveStatus::new(*rule, StatusSource::Explicit);
    }

    if let Some(rule) = rules.get(ROOT_PATH) {
        return EffectiveStatus::new(*rule, StatusSource::Inherited);
    }

    let segments = full_path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();
    for end in (1..segments.len()).rev() {
        let ancestor = format!("/{}", segments[..end].join("/"));
        if let Some(rule) = rules.get(&ancestor) {
            return EffectiveStatus::new(*rule, StatusSource::Inherited);
        }
    }

    EffectiveStatus::new(Rule::Allow, StatusSource::Default)
}

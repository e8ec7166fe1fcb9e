use botblock::{PathRules, Rule};
use botblock_tree::{effective_status, EffectiveStatus, StatusSource};

fn rules(entries: &[(&str, Rule)]) -> PathRules {
    entries
        .iter()
        .map(|(path, rule)| (path.to_string(), *rule))
        .collect()
}

#[test]
fn default_allow() {
    assert_eq!(
        EffectiveStatus {
            status: Rule::Allow,
            source: StatusSource::Default,
        },
        effective_status("/a/b", &PathRules::new())
    );
}

#[test]
fn explicit_wins() {
    let rules = rules(&[("/", Rule::Block), ("/a", Rule::Block), ("/a/b", Rule::Allow)]);
    assert_eq!(
        EffectiveStatus {
            status: Rule::Allow,
            source: StatusSource::Explicit,
        },
        effective_status("/a/b", &rules)
    );
}

#[test]
fn closest_ancestor_wins() {
    let rules = rules(&[("/a", Rule::Block), ("/a/b", Rule::Allow)]);
    assert_eq!(
        EffectiveStatus {
            status: Rule::Allow,
            source: StatusSource::Inherited,
        },
        effective_status("/a/b/c", &rules)
    );
    assert_eq!(
        EffectiveStatus {
            status: Rule::Block,
            source: StatusSource::Inherited,
        },
        effective_status("/a/x/y", &rules)
    );
}

#[test]
fn root_rule_before_ancestors() {
    let rules = rules(&[("/", Rule::Allow), ("/a", Rule::Block)]);
    assert_eq!(
        EffectiveStatus {
            status: Rule::Allow,
            source: StatusSource::Inherited,
        },
        effective_status("/a/b", &rules)
    );
}

#[test]
fn siblings_do_not_inherit() {
    let rules = rules(&[("/ab", Rule::Block)]);
    assert_eq!(StatusSource::Default, effective_status("/a/b", &rules).source);
}

//! Hook names a charm may implement.
//!
//! Unit hooks apply to every charm. Relation hooks are prefixed with the
//! relation name, e.g. `db-relation-joined`.

// Mirrors the unit hook kinds the Juju unit agent dispatches.
const UNIT_HOOKS: &[&str] = &["install", "start", "config-changed", "upgrade-charm", "stop"];

const RELATION_HOOKS: &[&str] = &[
    "relation-joined",
    "relation-changed",
    "relation-departed",
    "relation-broken",
];

/// Hooks every unit may implement.
pub fn unit_hooks() -> &'static [&'static str] {
    UNIT_HOOKS
}

/// Suffixes of the per-relation hooks.
pub fn relation_hooks() -> &'static [&'static str] {
    RELATION_HOOKS
}

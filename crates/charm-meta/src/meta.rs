//! # Charm Metadata Record
//!
//! The typed form of a `metadata.yaml` document: descriptive attributes,
//! the three relation mappings (provides, requires, peers) and storage
//! requirements.
//!
//! Records are built once by the decoder and never mutated afterwards;
//! [`Meta::check`] inspects them and [`crate::encode_meta`] derives a fresh
//! document tree.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::hooks;
use crate::storage::Storage;

/// Which side of a relation a charm plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationRole {
    /// Offers the interface (`provides`).
    Provider,
    /// Consumes the interface (`requires`).
    Requirer,
    /// Relates to other units of the same service (`peers`).
    Peer,
}

impl RelationRole {
    /// All roles, in the order their mappings are checked.
    pub fn all() -> &'static [RelationRole] {
        &[Self::Provider, Self::Requirer, Self::Peer]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Requirer => "requirer",
            Self::Peer => "peer",
        }
    }

    /// The top-level document key holding relations of this role.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Provider => "provides",
            Self::Requirer => "requires",
            Self::Peer => "peers",
        }
    }

    /// Limit applied when a relation does not state one: providers are
    /// unbounded, everything else accepts a single counterpart.
    pub fn default_limit(&self) -> Option<i64> {
        match self {
            Self::Provider => None,
            Self::Requirer | Self::Peer => Some(1),
        }
    }
}

impl fmt::Display for RelationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationScope {
    /// Visible across the whole model.
    #[default]
    Global,
    /// Visible only within the same container; used by subordinates.
    Container,
}

impl RelationScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for RelationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "container" => Ok(Self::Container),
            other => Err(format!("unknown relation scope {other:?}")),
        }
    }
}

/// A relation endpoint declared by a charm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    /// Endpoint name; equals its key in the owning mapping.
    pub name: String,
    /// Role matching the owning mapping.
    pub role: RelationRole,
    /// Name of the compatibility contract.
    pub interface: String,
    /// Whether the charm works without this relation established.
    pub optional: bool,
    /// Maximum number of counterparts; `None` is unbounded.
    pub limit: Option<i64>,
    /// Relation visibility.
    pub scope: RelationScope,
}

impl Relation {
    /// A relation with every attribute at its role default.
    pub fn new(name: impl Into<String>, role: RelationRole, interface: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            interface: interface.into(),
            optional: false,
            limit: role.default_limit(),
            scope: RelationScope::Global,
        }
    }

    /// Whether the relation is supplied by the platform itself rather
    /// than by a charm.
    pub fn is_implicit(&self) -> bool {
        self.name == "juju-info" && self.interface == "juju-info" && self.role == RelationRole::Provider
    }

    /// Whether `meta` declares an endpoint that satisfies this relation.
    pub fn implemented_by(&self, meta: &Meta) -> bool {
        if self.is_implicit() {
            return true;
        }
        let Some(rel) = meta.relations(self.role).get(&self.name) else {
            return false;
        };
        if rel.interface != self.interface {
            return false;
        }
        match self.scope {
            RelationScope::Global => rel.scope != RelationScope::Container,
            RelationScope::Container => true,
        }
    }

    /// True when every attribute equals the role default, so the relation
    /// can be written as its bare interface name.
    pub fn is_shorthand(&self) -> bool {
        !self.optional && self.scope == RelationScope::Global && self.limit == self.role.default_limit()
    }
}

/// `juju` and anything under `juju-` are reserved for the platform.
pub(crate) fn is_reserved_name(name: &str) -> bool {
    name == "juju" || name.starts_with("juju-")
}

/// Everything a charm's `metadata.yaml` declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub subordinate: bool,
    pub provides: BTreeMap<String, Relation>,
    pub requires: BTreeMap<String, Relation>,
    pub peers: BTreeMap<String, Relation>,
    /// Document format version; carried, not interpreted.
    pub format: i64,
    /// Obsolete `revision` field, kept for older documents.
    pub old_revision: Option<i64>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// Target series; empty when unspecified.
    pub series: String,
    pub storage: BTreeMap<String, Storage>,
}

impl Meta {
    /// A record with only the required descriptive fields set.
    pub fn new(
        name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            description: description.into(),
            subordinate: false,
            provides: BTreeMap::new(),
            requires: BTreeMap::new(),
            peers: BTreeMap::new(),
            format: 1,
            old_revision: None,
            categories: Vec::new(),
            tags: Vec::new(),
            series: String::new(),
            storage: BTreeMap::new(),
        }
    }

    /// The relation mapping for `role`.
    pub fn relations(&self, role: RelationRole) -> &BTreeMap<String, Relation> {
        match role {
            RelationRole::Provider => &self.provides,
            RelationRole::Requirer => &self.requires,
            RelationRole::Peer => &self.peers,
        }
    }

    /// Every relation across the three mappings, providers first.
    pub fn all_relations(&self) -> impl Iterator<Item = &Relation> {
        RelationRole::all()
            .iter()
            .flat_map(move |role| self.relations(*role).values())
    }

    /// All hook names the charm may implement: the unit hooks plus the
    /// relation hooks of every declared relation.
    pub fn hooks(&self) -> BTreeSet<String> {
        let mut all: BTreeSet<String> = hooks::unit_hooks().iter().map(|h| h.to_string()).collect();
        for relation in self.all_relations() {
            for suffix in hooks::relation_hooks() {
                all.insert(format!("{}-{}", relation.name, suffix));
            }
        }
        all
    }
}

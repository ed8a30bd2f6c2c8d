//! # Storage Requirements
//!
//! A charm declares named storage it needs attached: block devices or
//! filesystems, each with an instance-count range. Filesystem storage may
//! also name a mount location and an ordered list of preferred
//! filesystem types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The kind of storage a requirement asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// A raw block device.
    Block,
    /// A mounted filesystem.
    Filesystem,
}

impl StorageType {
    /// All storage types, in document order.
    pub fn all() -> &'static [StorageType] {
        &[Self::Block, Self::Filesystem]
    }

    /// The document spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Filesystem => "filesystem",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "filesystem" => Ok(Self::Filesystem),
            other => Err(format!("unknown storage type {other:?}")),
        }
    }
}

/// Upper bound on the number of storage instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMax {
    /// At most this many instances. Must be positive to be valid.
    Bounded(i64),
    /// No upper bound.
    Unbounded,
}

impl CountMax {
    /// The bound, or `None` when unbounded.
    pub fn bound(&self) -> Option<i64> {
        match self {
            Self::Bounded(n) => Some(*n),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for CountMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// A filesystem the charm is willing to have created for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filesystem {
    /// Filesystem type, e.g. `ext4`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Options passed to `mkfs`.
    pub mkfs_options: Vec<String>,
    /// Options passed to `mount`.
    pub mount_options: Vec<String>,
}

impl Filesystem {
    /// A filesystem of the given type with no options.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            mkfs_options: Vec::new(),
            mount_options: Vec::new(),
        }
    }

    /// True when no mkfs or mount options are set, so the entry can be
    /// written as a bare type name.
    pub fn is_bare(&self) -> bool {
        self.mkfs_options.is_empty() && self.mount_options.is_empty()
    }
}

/// A named storage requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Storage {
    /// Name of the requirement; equals its key in [`crate::Meta::storage`].
    pub name: String,

    /// Block device or filesystem.
    #[serde(rename = "type")]
    pub kind: StorageType,

    /// Shared between all units of a service.
    pub shared: bool,

    /// Should be made read-only if possible.
    pub read_only: bool,

    /// Should outlive the unit if possible.
    pub persistent: bool,

    /// Instances that must be attached before the charm installs.
    pub count_min: i64,

    /// Largest number of instances that may be attached.
    pub count_max: CountMax,

    /// Mount location for filesystem storage. With a maximum other than 1
    /// it is the parent directory of each mounted instance.
    pub location: Option<String>,

    /// Filesystems to try creating, most preferred first.
    pub filesystem: Vec<Filesystem>,
}

impl Storage {
    /// A single-instance, optional requirement of the given type.
    pub fn new(name: impl Into<String>, kind: StorageType) -> Self {
        Self {
            name: name.into(),
            kind,
            shared: false,
            read_only: false,
            persistent: false,
            count_min: 0,
            count_max: CountMax::Bounded(1),
            location: None,
            filesystem: Vec::new(),
        }
    }
}

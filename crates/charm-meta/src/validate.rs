//! # Validator
//!
//! Cross-field rules the schema cannot express. Checks run in a fixed
//! order and the first violation is returned:
//!
//! 1. Relations, mapping by mapping (provides, requires, peers): key and
//!    name agree, role matches the mapping, reserved names and interfaces
//!    are refused, names are unique across all three mappings.
//! 2. A subordinate charm has a container-scoped `requires` relation.
//! 3. A declared series is well formed.
//! 4. Storage: key and name agree, location and filesystem preferences
//!    only on filesystem storage, count range is sane.

use std::collections::{BTreeMap, HashSet};

use crate::error::ValidationError;
use crate::meta::{is_reserved_name, Meta, Relation, RelationRole, RelationScope};
use crate::series::is_valid_series;
use crate::storage::{CountMax, StorageType};

impl Meta {
    /// Check that the record is well formed.
    pub fn check(&self) -> Result<(), ValidationError> {
        let mut names = HashSet::new();
        for role in RelationRole::all() {
            self.check_relations(self.relations(*role), *role, &mut names)?;
        }

        if self.subordinate
            && !self
                .requires
                .values()
                .any(|r| r.scope == RelationScope::Container)
        {
            return Err(ValidationError::SubordinateWithoutContainerScope {
                charm: self.name.clone(),
            });
        }

        if !self.series.is_empty() && !is_valid_series(&self.series) {
            return Err(ValidationError::InvalidSeries {
                charm: self.name.clone(),
                series: self.series.clone(),
            });
        }

        self.check_storage()
    }

    fn check_relations<'a>(
        &self,
        relations: &'a BTreeMap<String, Relation>,
        role: RelationRole,
        names: &mut HashSet<&'a str>,
    ) -> Result<(), ValidationError> {
        for (name, rel) in relations {
            if rel.name != *name {
                return Err(ValidationError::MismatchedRelationName {
                    charm: self.name.clone(),
                    name: rel.name.clone(),
                    expected: name.clone(),
                });
            }
            if rel.role != role {
                return Err(ValidationError::MismatchedRole {
                    charm: self.name.clone(),
                    role: rel.role,
                    expected: role,
                });
            }
            // Subordinates may use the reserved namespace for container-scoped
            // requirer relations, e.g. to attach to a principal's juju-info.
            let reserved_allowed = rel.is_implicit()
                || (self.subordinate
                    && role == RelationRole::Requirer
                    && rel.scope == RelationScope::Container);
            if !reserved_allowed && is_reserved_name(name) {
                return Err(ValidationError::ReservedRelationName {
                    charm: self.name.clone(),
                    name: name.clone(),
                });
            }
            if role != RelationRole::Requirer && !rel.is_implicit() && is_reserved_name(&rel.interface) {
                return Err(ValidationError::ReservedInterface {
                    charm: self.name.clone(),
                    relation: name.clone(),
                    interface: rel.interface.clone(),
                });
            }
            if !names.insert(name.as_str()) {
                return Err(ValidationError::DuplicateRelationName {
                    charm: self.name.clone(),
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_storage(&self) -> Result<(), ValidationError> {
        for (name, store) in &self.storage {
            if store.name != *name {
                return Err(ValidationError::MismatchedStorageName {
                    charm: self.name.clone(),
                    name: store.name.clone(),
                    expected: name.clone(),
                });
            }
            let has_location = store.location.as_deref().is_some_and(|l| !l.is_empty());
            if has_location && store.kind != StorageType::Filesystem {
                return Err(ValidationError::LocationWithoutFilesystem {
                    charm: self.name.clone(),
                    storage: name.clone(),
                    kind: store.kind,
                });
            }
            if !store.filesystem.is_empty() && store.kind != StorageType::Filesystem {
                return Err(ValidationError::FilesystemWithoutFilesystem {
                    charm: self.name.clone(),
                    storage: name.clone(),
                    kind: store.kind,
                });
            }
            if store.count_min < 0 {
                return Err(ValidationError::InvalidCountMin {
                    charm: self.name.clone(),
                    storage: name.clone(),
                    min: store.count_min,
                });
            }
            if let CountMax::Bounded(max) = store.count_max {
                if max <= 0 {
                    return Err(ValidationError::InvalidCountMax {
                        charm: self.name.clone(),
                        storage: name.clone(),
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

//! # Document-Level Behaviour
//!
//! Whole `metadata.yaml` documents pushed through the public entry points:
//! shorthand expansion, storage counts, the cross-field rules and the
//! encode/decode round trip.

use charm_meta::{
    encode_meta, parse_meta, CountMax, Meta, MetaError, Relation, RelationRole, RelationScope,
    StorageType, ValidationError,
};

const HEADER: &str = "name: app\nsummary: An app\ndescription: It does things\n";

fn decode(body: &str) -> Result<Meta, MetaError> {
    parse_meta(format!("{HEADER}{body}").as_bytes())
}

fn validation_error(body: &str) -> ValidationError {
    match decode(body) {
        Err(MetaError::Validation(err)) => err,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Relations
// ---------------------------------------------------------------------------

#[test]
fn mysql_shorthand_expands_and_collapses() {
    let meta = parse_meta(
        b"name: mysql\nsummary: Database engine\ndescription: A pretty popular database\nprovides:\n  server: mysql\n",
    )
    .unwrap();
    assert_eq!(
        meta.provides["server"],
        Relation {
            name: "server".to_string(),
            role: RelationRole::Provider,
            interface: "mysql".to_string(),
            optional: false,
            limit: None,
            scope: RelationScope::Global,
        }
    );

    let yaml = meta.to_yaml().unwrap();
    assert!(yaml.contains("server: mysql"), "shorthand not restored:\n{yaml}");
}

#[test]
fn relation_names_must_be_unique_across_mappings() {
    let err = validation_error("provides:\n  db: mysql\npeers:\n  db: mysql-ha\n");
    assert_eq!(
        err,
        ValidationError::DuplicateRelationName {
            charm: "app".to_string(),
            name: "db".to_string(),
        }
    );
}

#[test]
fn reserved_relation_names() {
    let err = validation_error("provides:\n  juju-foo: http\n");
    assert!(matches!(err, ValidationError::ReservedRelationName { .. }));

    let meta = decode(concat!(
        "subordinate: true\n",
        "requires:\n",
        "  juju-foo:\n",
        "    interface: juju-info\n",
        "    scope: container\n",
    ))
    .unwrap();
    assert_eq!(meta.requires["juju-foo"].scope, RelationScope::Container);
}

#[test]
fn implicit_relation_may_be_declared() {
    let meta = decode("provides:\n  juju-info: juju-info\n").unwrap();
    assert!(meta.provides["juju-info"].is_implicit());
}

#[test]
fn reserved_interface_on_provider() {
    let err = validation_error("provides:\n  info: juju-info\n");
    assert!(matches!(err, ValidationError::ReservedInterface { .. }));
    assert!(decode("requires:\n  info: juju-info\n").is_ok());
}

#[test]
fn subordinate_requires_container_scope() {
    let err = validation_error("subordinate: true\nrequires:\n  logging: syslog\n");
    assert_eq!(
        err.to_string(),
        "subordinate charm \"app\" lacks \"requires\" relation with container scope"
    );
    assert!(decode("subordinate: true\nrequires:\n  logging:\n    interface: syslog\n    scope: container\n").is_ok());
}

#[test]
fn implemented_by_matches_declared_relation() {
    let meta = decode(concat!(
        "provides:\n  website: http\n",
        "requires:\n  host:\n    interface: juju-info\n    scope: container\n",
    ))
    .unwrap();

    assert!(Relation::new("website", RelationRole::Provider, "http").implemented_by(&meta));
    assert!(!Relation::new("website", RelationRole::Provider, "https").implemented_by(&meta));
    assert!(!Relation::new("host", RelationRole::Requirer, "juju-info").implemented_by(&meta));

    let mut container = Relation::new("host", RelationRole::Requirer, "juju-info");
    container.scope = RelationScope::Container;
    assert!(container.implemented_by(&meta));

    assert!(Relation::new("juju-info", RelationRole::Provider, "juju-info").implemented_by(&meta));
}

#[test]
fn hooks_cover_every_relation() {
    let meta = decode("provides:\n  website: http\npeers:\n  ring: raft\n").unwrap();
    let hooks = meta.hooks();
    for expected in [
        "install",
        "start",
        "stop",
        "upgrade-charm",
        "config-changed",
        "website-relation-joined",
        "website-relation-changed",
        "website-relation-departed",
        "website-relation-broken",
        "ring-relation-joined",
    ] {
        assert!(hooks.contains(expected), "missing hook {expected}");
    }
    assert_eq!(hooks.len(), 5 + 2 * 4);
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

fn count_of(entry: &str) -> (i64, CountMax) {
    let meta = decode(&format!("storage:\n  data:\n    type: block\n{entry}")).unwrap();
    let store = &meta.storage["data"];
    (store.count_min, store.count_max)
}

#[test]
fn storage_count_forms() {
    assert_eq!(count_of("    count: 2-4\n"), (2, CountMax::Bounded(4)));
    assert_eq!(count_of("    count: 5-\n"), (5, CountMax::Unbounded));
    assert_eq!(count_of("    count: 5\n    required: true\n"), (5, CountMax::Bounded(5)));
    assert_eq!(count_of("    count: 5\n"), (0, CountMax::Bounded(5)));
    assert_eq!(count_of(""), (0, CountMax::Bounded(1)));
}

#[test]
fn bad_storage_counts_are_schema_errors() {
    for count in ["0", "abc", "-1", "3-2-1"] {
        let err = decode(&format!("storage:\n  data:\n    type: block\n    count: {count}\n"))
            .unwrap_err();
        assert!(matches!(err, MetaError::Schema(_)), "count {count}: {err}");
        assert!(err.to_string().contains("storage.data.count"));
    }
}

#[test]
fn zero_maximum_range_fails_validation() {
    let err = validation_error("storage:\n  data:\n    type: block\n    count: 0-0\n");
    assert!(matches!(err, ValidationError::InvalidCountMax { max: 0, .. }));
}

#[test]
fn location_requires_filesystem_storage() {
    let err = validation_error("storage:\n  data:\n    type: block\n    location: /srv\n");
    assert!(matches!(
        err,
        ValidationError::LocationWithoutFilesystem { kind: StorageType::Block, .. }
    ));

    let meta = decode("storage:\n  data:\n    type: filesystem\n    location: /srv\n").unwrap();
    assert_eq!(meta.storage["data"].location.as_deref(), Some("/srv"));
}

#[test]
fn empty_location_on_block_storage_decodes() {
    let meta = decode("storage:\n  data:\n    type: block\n    location: ''\n").unwrap();
    let store = &meta.storage["data"];
    assert_eq!(store.kind, StorageType::Block);
    assert_eq!(store.location, None);
    assert_eq!(parse_meta(meta.to_yaml().unwrap().as_bytes()).unwrap(), meta);
}

#[test]
fn filesystem_preferences_require_filesystem_storage() {
    let err = validation_error("storage:\n  data:\n    type: block\n    filesystem: [ext4]\n");
    assert!(matches!(err, ValidationError::FilesystemWithoutFilesystem { .. }));
}

#[test]
fn unknown_storage_type_is_schema_error() {
    let err = decode("storage:\n  data:\n    type: tape\n").unwrap_err();
    assert!(matches!(err, MetaError::Schema(_)));
}

// ---------------------------------------------------------------------------
// Document level
// ---------------------------------------------------------------------------

#[test]
fn invalid_series_fails_validation() {
    let err = validation_error("series: Precise\n");
    assert!(matches!(err, ValidationError::InvalidSeries { .. }));
    assert_eq!(decode("series: precise\n").unwrap().series, "precise");
}

#[test]
fn floats_are_rejected_before_the_schema() {
    let err = decode("format: 1.5\n").unwrap_err();
    assert!(matches!(err, MetaError::UnsupportedValue { .. }));
}

#[test]
fn full_document_round_trips_through_yaml() {
    let meta = decode(concat!(
        "format: 2\n",
        "revision: 12\n",
        "series: xenial\n",
        "categories: [misc]\n",
        "tags: [web, proxy]\n",
        "provides:\n",
        "  website: http\n",
        "  stats:\n",
        "    interface: prometheus\n",
        "    limit: 1\n",
        "requires:\n",
        "  backend:\n",
        "    interface: http\n",
        "    limit: null\n",
        "    optional: true\n",
        "peers:\n",
        "  ring: raft\n",
        "storage:\n",
        "  cache:\n",
        "    type: filesystem\n",
        "    count: 0-3\n",
        "    location: /var/cache\n",
        "    shared: true\n",
        "    filesystem:\n",
        "      - type: ext4\n",
        "        mkfs-options: [-m, '0']\n",
        "  scratch:\n",
        "    type: block\n",
        "    required: true\n",
        "    count: 2\n",
        "    persistent: true\n",
        "    read-only: true\n",
    ))
    .unwrap();

    assert_eq!(charm_meta::decode_meta(&encode_meta(&meta)).unwrap(), meta);
    assert_eq!(parse_meta(meta.to_yaml().unwrap().as_bytes()).unwrap(), meta);
}

//! Property tests: every valid record survives encoding and decoding.

use std::collections::BTreeMap;

use charm_meta::{
    decode_meta, encode_meta, parse_meta, CountMax, Filesystem, Meta, Relation, RelationRole,
    RelationScope, Storage, StorageType,
};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,10}( [A-Za-z0-9]{1,8}){0,3}"
}

fn relations(
    role: RelationRole,
    names: &'static str,
) -> impl Strategy<Value = BTreeMap<String, Relation>> {
    let attrs = (
        "i[a-z0-9]{0,7}",
        any::<bool>(),
        prop::option::of(1..5_i64),
        any::<bool>(),
    );
    prop::collection::btree_map(names, attrs, 0..3).prop_map(move |entries| {
        entries
            .into_iter()
            .map(|(name, (interface, optional, limit, container))| {
                let rel = Relation {
                    name: name.clone(),
                    role,
                    interface,
                    optional,
                    limit,
                    scope: if container {
                        RelationScope::Container
                    } else {
                        RelationScope::Global
                    },
                };
                (name, rel)
            })
            .collect()
    })
}

fn filesystem() -> impl Strategy<Value = Filesystem> {
    (
        "[a-z][a-z0-9]{1,5}",
        prop::collection::vec("[a-z]{1,6}", 0..2),
        prop::collection::vec("[a-z]{1,6}(=[a-z0-9]{1,4})?", 0..3),
    )
        .prop_map(|(kind, mkfs_options, mount_options)| Filesystem {
            kind,
            mkfs_options,
            mount_options,
        })
}

fn storage() -> impl Strategy<Value = BTreeMap<String, Storage>> {
    let entry = (
        prop_oneof![Just(StorageType::Block), Just(StorageType::Filesystem)],
        (any::<bool>(), any::<bool>(), any::<bool>()),
        (0..4_i64, prop::option::of(0..4_i64)),
        prop::option::of("/[a-z]{1,8}(/[a-z]{1,8}){0,2}"),
        prop::collection::vec(filesystem(), 0..3),
    );
    prop::collection::btree_map("s[a-z]{0,6}", entry, 0..3).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(name, (kind, (shared, read_only, persistent), (min, extra), location, fs))| {
                let count_max = match extra {
                    Some(extra) => CountMax::Bounded(min.max(1) + extra),
                    None => CountMax::Unbounded,
                };
                let is_fs = kind == StorageType::Filesystem;
                let store = Storage {
                    name: name.clone(),
                    kind,
                    shared,
                    read_only,
                    persistent,
                    count_min: min,
                    count_max,
                    location: location.filter(|_| is_fs),
                    filesystem: if is_fs { fs } else { Vec::new() },
                };
                (name, store)
            })
            .collect()
    })
}

fn meta() -> impl Strategy<Value = Meta> {
    let header = (
        "[a-z][a-z0-9-]{0,12}",
        text(),
        text(),
        any::<i64>(),
        prop::option::of(any::<i64>()),
        prop::collection::vec("[a-z]{1,8}", 0..3),
        prop::collection::vec("[a-z]{1,8}", 0..3),
        prop_oneof![Just(String::new()), "[a-z]{1,6}[0-9]{0,2}"],
    );
    let endpoints = (
        any::<bool>(),
        relations(RelationRole::Provider, "p[a-z]{1,6}"),
        relations(RelationRole::Requirer, "r[a-z]{1,6}"),
        relations(RelationRole::Peer, "e[a-z]{1,6}"),
    );
    (header, endpoints, storage()).prop_map(
        |(
            (name, summary, description, format, old_revision, categories, tags, series),
            (subordinate, provides, mut requires, peers),
            storage,
        )| {
            if subordinate {
                let mut host = Relation::new("rhost", RelationRole::Requirer, "juju-info");
                host.scope = RelationScope::Container;
                requires.insert(host.name.clone(), host);
            }
            Meta {
                name,
                summary,
                description,
                subordinate,
                provides,
                requires,
                peers,
                format,
                old_revision,
                categories,
                tags,
                series,
                storage,
            }
        },
    )
}

proptest! {
    /// Generated records are valid to begin with.
    #[test]
    fn generated_records_pass_checks(meta in meta()) {
        prop_assert_eq!(meta.check(), Ok(()));
    }

    /// Decoding the encoded tree gives back the same record.
    #[test]
    fn decode_inverts_encode(meta in meta()) {
        let decoded = decode_meta(&encode_meta(&meta));
        prop_assert!(decoded.is_ok(), "decode failed: {:?}", decoded.err());
        prop_assert_eq!(decoded.unwrap(), meta);
    }

    /// The same holds through YAML text.
    #[test]
    fn yaml_text_round_trips(meta in meta()) {
        let yaml = meta.to_yaml().unwrap();
        let decoded = parse_meta(yaml.as_bytes());
        prop_assert!(decoded.is_ok(), "decode failed: {:?}\n{}", decoded.err(), yaml);
        prop_assert_eq!(decoded.unwrap(), meta);
    }

    /// Encoding a decoded record is stable.
    #[test]
    fn encoding_is_idempotent(meta in meta()) {
        let once = encode_meta(&meta);
        let twice = encode_meta(&decode_meta(&once).unwrap());
        prop_assert_eq!(once, twice);
    }
}

//! Property-based tests for bindcheck using proptest.
//!
//! These tests verify the invariants the engine promises for all inputs,
//! not just hand-picked examples: deterministic reports, exhaustive
//! field coverage, enumeration-order independence, and the store
//! coercion rules.

use proptest::prelude::*;

use bindcheck::{
    is_final_segment, validate, CandidateFailure, ConfigSource, FieldDescriptor, FieldReport,
    Lookup, MapSource, Outcome, PrefixTemplate, SchemaDescriptor, TypeTag, ValidationFailures,
    Value,
};
use stillwater::Semigroup;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Generate scalar values a flat store can hold.
fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        // Filter NaN and infinity since they have special equality semantics
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        "[a-zA-Z0-9_\\-]{0,20}".prop_map(Value::String),
    ]
}

/// Generate store values: scalars plus flat arrays of scalars.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_scalar_value(),
        prop::collection::vec(arb_scalar_value(), 0..4).prop_map(Value::Array),
    ]
}

/// Generate declared type tags, sequences one level deep.
fn arb_type_tag() -> impl Strategy<Value = TypeTag> {
    let leaf = prop_oneof![
        Just(TypeTag::String),
        Just(TypeTag::Boolean),
        Just(TypeTag::Numeric),
        Just(TypeTag::Opaque),
    ];
    prop_oneof![leaf.clone(), leaf.prop_map(TypeTag::sequence)]
}

/// Generate plain dotted prefixes, sometimes empty.
fn arb_plain_prefix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,6}",
        "[a-z]{1,6}\\.[a-z]{1,6}",
    ]
}

/// Generate a descriptor with a plain prefix and unique field names.
fn arb_plain_descriptor() -> impl Strategy<Value = SchemaDescriptor> {
    (
        arb_plain_prefix(),
        prop::collection::btree_map("[a-z]{1,6}", arb_type_tag(), 1..5),
    )
        .prop_map(|(prefix, fields)| {
            let mut descriptor = SchemaDescriptor::new("conf::GeneratedConfig", prefix);
            for (name, tag) in fields {
                descriptor = descriptor.with_field(FieldDescriptor::new(name, tag));
            }
            descriptor
        })
}

/// Generate a parameterized descriptor over a small shared field pool, so
/// generated stores actually produce candidate paths.
fn arb_env_descriptor() -> impl Strategy<Value = SchemaDescriptor> {
    prop::collection::btree_map(
        prop_oneof![Just("name"), Just("number"), Just("flag")],
        arb_type_tag(),
        1..4,
    )
    .prop_map(|fields| {
        let mut descriptor =
            SchemaDescriptor::new("conf::EnvConfig", "app.${env}").with_parameter("env");
        for (name, tag) in fields {
            descriptor = descriptor.with_field(FieldDescriptor::new(name, tag));
        }
        descriptor
    })
}

/// Generate a store keyed like the parameterized descriptors above.
fn arb_env_store() -> impl Strategy<Value = MapSource> {
    prop::collection::btree_map(
        ("[a-z]{2,4}", prop_oneof![Just("name"), Just("number"), Just("flag")]),
        arb_value(),
        0..8,
    )
    .prop_map(|entries| {
        let mut source = MapSource::new();
        for ((env, field), value) in entries {
            source.insert(format!("app.{}.{}", env, field), value);
        }
        source
    })
}

/// Generate a store over arbitrary dotted keys, biased toward the `app.`
/// namespace the parameterized generators probe.
fn arb_store() -> impl Strategy<Value = MapSource> {
    prop::collection::btree_map(
        "([a-z]{1,6}(\\.[a-z]{1,6}){0,2}|app\\.[a-z]{2,4}\\.[a-z]{1,6})",
        arb_value(),
        0..10,
    )
    .prop_map(|entries| {
        let mut source = MapSource::new();
        for (path, value) in entries {
            source.insert(path, value);
        }
        source
    })
}

fn arb_descriptors() -> impl Strategy<Value = Vec<SchemaDescriptor>> {
    prop::collection::vec(
        prop_oneof![arb_plain_descriptor(), arb_env_descriptor()],
        1..3,
    )
}

/// Generate field outcomes, including unsatisfiable ones with attempts.
fn arb_outcome() -> impl Strategy<Value = Outcome> {
    let actual = prop_oneof!["boolean", "integer", "float", "string", "array"];
    let rejection = prop_oneof![
        Just(Outcome::NotFound),
        (arb_type_tag(), actual).prop_map(|(expected, actual)| Outcome::TypeMismatch {
            expected,
            actual,
        }),
    ];

    prop_oneof![
        Just(Outcome::Success),
        rejection.clone(),
        prop::collection::vec(("[a-z.]{1,12}", rejection), 0..3).prop_map(|attempts| {
            Outcome::Unsatisfiable {
                attempts: attempts
                    .into_iter()
                    .map(|(path, outcome)| CandidateFailure { path, outcome })
                    .collect(),
            }
        }),
    ]
}

fn arb_field_report() -> impl Strategy<Value = FieldReport> {
    ("[A-Z][a-z]{2,8}", "[a-z]{1,6}", "[a-z.]{1,12}", arb_outcome()).prop_map(
        |(schema, field, path, outcome)| FieldReport {
            schema: format!("conf::{}", schema),
            field,
            path,
            outcome,
        },
    )
}

/// Generate non-empty failure collections.
fn arb_failures() -> impl Strategy<Value = ValidationFailures> {
    prop::collection::vec(arb_field_report(), 1..5)
        .prop_map(|reports| ValidationFailures::from_vec(reports).expect("non-empty vec"))
}

/// Source wrapper that reverses key enumeration, for order-independence
/// checks.
struct ReversedKeys<'a>(&'a MapSource);

impl ConfigSource for ReversedKeys<'_> {
    fn get(&self, expected: &TypeTag, path: &str) -> Lookup {
        self.0.get(expected, path)
    }

    fn get_raw(&self, path: &str) -> Lookup {
        self.0.get_raw(path)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys = self.0.keys_with_prefix(prefix);
        keys.reverse();
        keys
    }
}

// ============================================================================
// Engine Determinism Properties
// ============================================================================

mod engine_determinism {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: validation is a pure function of descriptors and store.
        #[test]
        fn same_inputs_same_report(
            descriptors in arb_descriptors(),
            store in arb_store(),
        ) {
            let first = validate(&descriptors, &store).unwrap();
            let second = validate(&descriptors, &store).unwrap();

            prop_assert_eq!(first, second);
        }

        /// Property: verdicts do not depend on the source's key enumeration
        /// order.
        #[test]
        fn enumeration_order_is_irrelevant(
            descriptor in arb_env_descriptor(),
            store in arb_env_store(),
        ) {
            let forward = validate(&[descriptor.clone()], &store).unwrap();
            let reversed = validate(&[descriptor], &ReversedKeys(&store)).unwrap();

            prop_assert_eq!(forward, reversed);
        }

        /// Property: unsatisfiable attempt lists come out sorted by path,
        /// whatever order the source enumerated candidates in.
        #[test]
        fn attempts_are_sorted(
            descriptor in arb_env_descriptor(),
            store in arb_env_store(),
        ) {
            let report = validate(&[descriptor], &ReversedKeys(&store)).unwrap();

            for field_report in report.reports() {
                if let Outcome::Unsatisfiable { attempts } = &field_report.outcome {
                    let paths: Vec<&str> =
                        attempts.iter().map(|a| a.path.as_str()).collect();
                    let mut sorted = paths.clone();
                    sorted.sort_unstable();
                    prop_assert_eq!(paths, sorted);
                }
            }
        }

        /// Property: adding a key the store did not have can only help.
        /// Every field that bound before still binds after.
        #[test]
        fn adding_a_key_never_unbinds(
            descriptor in arb_env_descriptor(),
            store in arb_env_store(),
            env in "[a-z]{2,4}",
            field in prop_oneof![Just("name"), Just("number"), Just("flag")],
            value in arb_value(),
        ) {
            let extra_key = format!("app.{}.{}", env, field);
            prop_assume!(!store.get_raw(&extra_key).is_found());

            let before = validate(&[descriptor.clone()], &store).unwrap();
            let grown = store.clone().with_value(extra_key, value);
            let after = validate(&[descriptor], &grown).unwrap();

            for (b, a) in before.reports().iter().zip(after.reports()) {
                if b.is_success() {
                    prop_assert!(
                        a.is_success(),
                        "field '{}' bound before the insert but not after",
                        b.field
                    );
                }
            }
        }
    }
}

// ============================================================================
// Report Shape Properties
// ============================================================================

mod report_shape {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: every non-parameter field yields exactly one report,
        /// in declaration order.
        #[test]
        fn one_report_per_field(
            descriptor in arb_plain_descriptor(),
            store in arb_store(),
        ) {
            let report = validate(&[descriptor.clone()], &store).unwrap();

            let expected: Vec<&str> = descriptor
                .fields()
                .iter()
                .filter(|f| !descriptor.is_parameter(f.name()))
                .map(|f| f.name())
                .collect();
            let probed: Vec<&str> =
                report.reports().iter().map(|r| r.field.as_str()).collect();

            prop_assert_eq!(probed, expected);
        }

        /// Property: plain prefixes resolve to `prefix.field`, or the bare
        /// field name when the prefix is empty.
        #[test]
        fn plain_paths_join_with_a_dot(
            descriptor in arb_plain_descriptor(),
            store in arb_store(),
        ) {
            let report = validate(&[descriptor.clone()], &store).unwrap();

            for field_report in report.reports() {
                let expected = if descriptor.prefix().is_empty() {
                    field_report.field.clone()
                } else {
                    format!("{}.{}", descriptor.prefix(), field_report.field)
                };
                prop_assert_eq!(&field_report.path, &expected);
            }
        }

        /// Property: parameterized reports carry the template-shaped path.
        #[test]
        fn parameterized_paths_keep_the_placeholder(
            descriptor in arb_env_descriptor(),
            store in arb_env_store(),
        ) {
            let report = validate(&[descriptor], &store).unwrap();

            for field_report in report.reports() {
                let expected = format!("app.${{env}}.{}", field_report.field);
                prop_assert_eq!(&field_report.path, &expected);
            }
        }

        /// Property: bindable and failing reports partition the total.
        #[test]
        fn counts_partition(
            descriptors in arb_descriptors(),
            store in arb_store(),
        ) {
            let report = validate(&descriptors, &store).unwrap();

            prop_assert_eq!(
                report.bindable_count() + report.failures().count(),
                report.len()
            );
        }

        /// Property: the stillwater bridge succeeds exactly when every
        /// field binds.
        #[test]
        fn validation_bridge_agrees_with_the_report(
            descriptors in arb_descriptors(),
            store in arb_store(),
        ) {
            let report = validate(&descriptors, &store).unwrap();
            let fully_bindable = report.is_fully_bindable();

            prop_assert_eq!(report.into_validation().is_success(), fully_bindable);
        }

        /// Property: serialized reports keep one entry per probed field.
        #[test]
        fn serialized_report_is_complete(
            descriptors in arb_descriptors(),
            store in arb_store(),
        ) {
            let report = validate(&descriptors, &store).unwrap();
            let json = serde_json::to_value(&report).unwrap();

            let entries = json["reports"].as_array().unwrap();
            prop_assert_eq!(entries.len(), report.len());
        }
    }
}

// ============================================================================
// Store Coercion Properties
// ============================================================================

mod coercion_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: any integer round-trips through its string spelling.
        #[test]
        fn numeric_strings_parse(n in any::<i64>()) {
            let source = MapSource::new().with_value("key", n.to_string());

            prop_assert_eq!(
                source.get(&TypeTag::Numeric, "key"),
                Lookup::Found(Value::Integer(n))
            );
        }

        /// Property: boolean spellings decode case-insensitively.
        #[test]
        fn boolean_spellings_decode(b in any::<bool>(), upper in any::<bool>()) {
            let word = if b { "true" } else { "false" };
            let spelled = if upper { word.to_uppercase() } else { word.to_string() };
            let source = MapSource::new().with_value("key", spelled);

            prop_assert_eq!(
                source.get(&TypeTag::Boolean, "key"),
                Lookup::Found(Value::Bool(b))
            );
        }

        /// Property: the string tag accepts every scalar.
        #[test]
        fn string_tag_accepts_scalars(value in arb_scalar_value()) {
            let source = MapSource::new().with_value("key", value);

            prop_assert!(source.get(&TypeTag::String, "key").is_found());
        }

        /// Property: comma-separated strings split into one string element
        /// per token.
        #[test]
        fn comma_strings_split(
            tokens in prop::collection::vec("[a-z]{1,8}", 1..6),
            spaced in any::<bool>(),
        ) {
            let separator = if spaced { ", " } else { "," };
            let joined = tokens.join(separator);
            let source = MapSource::new().with_value("key", joined);

            let expected: Vec<Value> = tokens
                .iter()
                .map(|t| Value::String(t.clone()))
                .collect();
            prop_assert_eq!(
                source.get(&TypeTag::sequence(TypeTag::String), "key"),
                Lookup::Found(Value::Array(expected))
            );
        }

        /// Property: opaque lookups always miss, but the raw value stays
        /// reachable.
        #[test]
        fn opaque_never_decodes(value in arb_value()) {
            let source = MapSource::new().with_value("key", value);

            prop_assert!(!source.get(&TypeTag::Opaque, "key").is_found());
            prop_assert!(source.get_raw("key").is_found());
        }

        /// Property: key enumeration returns sorted keys, each carrying the
        /// prefix and resolvable through the raw lookup.
        #[test]
        fn key_enumeration_contract(store in arb_store(), prefix in "[a-z]{0,3}") {
            let keys = store.keys_with_prefix(&prefix);

            let mut sorted = keys.clone();
            sorted.sort_unstable();
            prop_assert_eq!(&keys, &sorted);

            for key in &keys {
                prop_assert!(key.starts_with(&prefix));
                prop_assert!(store.get_raw(key).is_found());
            }
        }
    }
}

// ============================================================================
// Template Properties
// ============================================================================

mod template_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: well-formed placeholder names always parse, and the
        /// literal prefix stops at the placeholder.
        #[test]
        fn valid_placeholders_parse(name in "[A-Za-z0-9_]{1,12}") {
            let raw = format!("app.${{{}}}", name);
            let template = PrefixTemplate::parse(&raw).unwrap();

            prop_assert_eq!(template.placeholder_name(), Some(name.as_str()));
            prop_assert_eq!(template.literal_prefix(), "app.");
        }

        /// Property: plain dotted prefixes parse with no placeholder, the
        /// raw text round-trips, and the literal prefix is the whole text.
        #[test]
        fn plain_prefixes_round_trip(raw in "[a-z]{1,6}(\\.[a-z]{1,6}){0,3}") {
            let template = PrefixTemplate::parse(&raw).unwrap();

            prop_assert!(!template.has_placeholder());
            prop_assert_eq!(template.raw(), raw.as_str());
            prop_assert_eq!(template.literal_prefix(), raw.as_str());
        }

        /// Property: resolved paths append the field after a dot, except on
        /// the empty prefix.
        #[test]
        fn resolved_paths_append_the_field(
            raw in prop_oneof![Just(String::new()), "[a-z]{1,6}(\\.[a-z]{1,6}){0,2}"],
            field in "[a-z]{1,6}",
        ) {
            let template = PrefixTemplate::parse(&raw).unwrap();
            let resolved = template.resolved_path(&field);

            if raw.is_empty() {
                prop_assert_eq!(resolved, field);
            } else {
                prop_assert_eq!(resolved, format!("{}.{}", raw, field));
            }
        }

        /// Property: the final-segment test agrees with splitting the key
        /// on dots.
        #[test]
        fn final_segment_matches_rsplit(
            key in "[a-z]{1,5}(\\.[a-z]{1,5}){0,3}",
            field in "[a-z]{1,5}",
        ) {
            let by_split = key.rsplit('.').next() == Some(field.as_str());

            prop_assert_eq!(is_final_segment(&key, &field), by_split);
        }
    }
}

// ============================================================================
// Failure Collection Properties
// ============================================================================

mod failure_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: combining failure collections preserves every report.
        ///
        /// |a <> b| == |a| + |b|
        #[test]
        fn combine_preserves_count(a in arb_failures(), b in arb_failures()) {
            let a_len = a.len();
            let b_len = b.len();
            let combined = a.combine(b);

            prop_assert_eq!(combined.len(), a_len + b_len);
        }

        /// Property: combination is associative.
        ///
        /// (a <> b) <> c == a <> (b <> c)
        #[test]
        fn combine_is_associative(
            a in arb_failures(),
            b in arb_failures(),
            c in arb_failures(),
        ) {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));

            prop_assert_eq!(left, right);
        }

        /// Property: the left operand's head stays first.
        #[test]
        fn combine_keeps_left_head(a in arb_failures(), b in arb_failures()) {
            let head = a.first().clone();
            let combined = a.combine(b);

            prop_assert_eq!(combined.first(), &head);
        }

        /// Property: failure collections are never empty.
        #[test]
        fn failures_always_nonempty(failures in arb_failures()) {
            prop_assert!(!failures.is_empty());
            prop_assert!(failures.len() >= 1);
        }

        /// Property: from_vec returns None exactly for the empty vec.
        #[test]
        fn from_vec_empty_returns_none(_dummy in any::<bool>()) {
            let empty: Vec<FieldReport> = vec![];
            prop_assert!(ValidationFailures::from_vec(empty).is_none());
        }

        /// Property: from_vec keeps every report of a non-empty vec.
        #[test]
        fn from_vec_nonempty_returns_some(
            reports in prop::collection::vec(arb_field_report(), 1..5),
        ) {
            let len = reports.len();
            let result = ValidationFailures::from_vec(reports);

            prop_assert!(result.is_some());
            prop_assert_eq!(result.unwrap().len(), len);
        }
    }
}

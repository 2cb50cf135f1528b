//! Property-based testing for version stamps and event-id derivation.
//!
//! Uses proptest to generate arbitrary inputs and verify the invariants
//! the catalog relies on: stamp shape, determinism, and the
//! single-substitution event-id rule.

use chrono::{Local, TimeZone};
use proptest::prelude::*;

use hookcat::inference::{catalog_event_id, resolve_event_type};
use hookcat::version::run_version;

proptest! {
    #[test]
    fn version_stamp_has_fixed_shape(
        year in 2000i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        // Skip timestamps the local timezone cannot represent uniquely.
        let Some(ts) = Local
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
        else {
            return Ok(());
        };

        let stamp = run_version(Some(ts));
        let parts: Vec<&str> = stamp.split('-').collect();
        prop_assert_eq!(parts.len(), 3);
        let year_str = year.to_string();
        prop_assert_eq!(parts[0], year_str.as_str());
        prop_assert_eq!(parts[1].len(), 4);
        prop_assert_eq!(parts[2].len(), 6);
        prop_assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        prop_assert!(parts[2].chars().all(|c| c.is_ascii_digit()));

        // Same timestamp, same stamp.
        prop_assert_eq!(stamp, run_version(Some(ts)));
    }

    #[test]
    fn event_id_substitutes_at_most_one_dot(ty in ".{0,40}") {
        let id = catalog_event_id(&ty);
        let before = ty.matches('.').count();
        let after = id.matches('.').count();
        prop_assert_eq!(after, before.saturating_sub(1));
        // A one-character separator keeps the length unchanged.
        prop_assert_eq!(id.len(), ty.len());
    }

    #[test]
    fn dotless_event_types_are_unchanged(ty in "[a-z_:0-9]{0,40}") {
        prop_assert_eq!(catalog_event_id(&ty), ty);
    }

    #[test]
    fn typeless_bodies_fall_back_to_position(
        entity in "[a-z]{1,8}_[0-9]{1,4}",
        index in 0usize..500,
        key in "[a-su-z][a-z]{0,10}",
        value in "[a-z]{0,10}",
    ) {
        // Keys starting with anything but 't'..: never "type"/"eventType".
        let body = serde_json::json!({ key: value });
        let resolved = resolve_event_type(Some(&body), &entity, index);
        prop_assert_eq!(resolved, format!("{entity}:{index}"));
    }

    #[test]
    fn string_type_fields_win(
        entity in "[a-z]{1,8}",
        ty in "[a-z]+\\.[a-z]+",
    ) {
        let body = serde_json::json!({ "type": ty.clone() });
        prop_assert_eq!(resolve_event_type(Some(&body), &entity, 0), ty);
    }
}

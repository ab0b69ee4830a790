//! Normalization behaviour of the entity contracts, exercised through the
//! public engine API only.

use ballistics_contracts::model::{
    StandardBallisticInformation, StatusVector, Stretch, REDACTED_PASSWORD,
};
use ballistics_contracts::normalize::{round_angle, round_length};
use ballistics_contracts::{Engine, Policy, Precision};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

fn vector_json(x: f64, time: &str) -> Value {
    json!({
        "x": x,
        "y": -1520342.000001,
        "z": 6400123.5,
        "v_x": 1.0,
        "v_y": 7612.123456789,
        "v_z": -3.25,
        "time": time,
        "frame": "itrs",
        "comment": "from test"
    })
}

// =============================================================================
// ROUNDING
// =============================================================================

#[test]
fn test_default_digit_counts() {
    let precision = Precision::default();
    assert_eq!(round_length(Some(1.123456789), &precision), Some(1.12346));
    assert_eq!(round_angle(Some(0.1234567891234), &precision), Some(0.123456789));
    assert_eq!(round_length(None, &precision), None);
}

#[test]
fn test_equal_quantities_compare_equal() {
    let engine = Engine::default();
    let a: StatusVector = engine
        .validate(&vector_json(6778136.1234561, "2021-08-02T08:15:17Z"))
        .unwrap();
    let b: StatusVector = engine
        .validate(&vector_json(6778136.1234559, "2021-08-02T08:15:17Z"))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_configured_precision_applies() {
    let engine = Engine::new(Policy::new(Precision::new(1e-2, 1e-4).unwrap()));
    let sv: StatusVector = engine
        .validate(&vector_json(6778136.123456, "2021-08-02T08:15:17Z"))
        .unwrap();
    assert_eq!(sv.x, 6778136.12);
    assert_eq!(sv.v_y, Some(7612.12));
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

#[test]
fn test_label_coercion_keeps_wall_clock() {
    let sv: StatusVector = Engine::default()
        .validate(&vector_json(0.0, "2021-08-02T08:15:17+05:00"))
        .unwrap();
    assert_eq!(sv.time, Utc.with_ymd_and_hms(2021, 8, 2, 8, 15, 17).unwrap());

    let out = Engine::default().emit(&sv).unwrap();
    assert_eq!(out["time"], json!("2021-08-02T08:15:17Z"));
}

#[test]
fn test_naive_timestamp_read_as_utc() {
    let sv: StatusVector = Engine::default()
        .validate(&vector_json(0.0, "2021-08-02 08:15:17.250"))
        .unwrap();
    let out = Engine::default().emit(&sv).unwrap();
    assert_eq!(out["time"], json!("2021-08-02T08:15:17.250Z"));
}

#[test]
fn test_stretch_ends_label_coerced_creation_time_converted() {
    let stretch: Stretch = Engine::default()
        .validate(&json!({
            "name": "s",
            "space_object_id": 1,
            "project_id": 1,
            "user_id": 1,
            "begin_time": "2021-01-01T00:00:00-03:00",
            "creation_time": "2021-01-01T00:00:00.000000999-03:00"
        }))
        .unwrap();
    assert_eq!(
        stretch.begin_time,
        Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        stretch.creation_time,
        Some(Utc.with_ymd_and_hms(2021, 1, 1, 3, 0, 0).unwrap())
    );
}

// =============================================================================
// AGGREGATE ERRORS
// =============================================================================

#[test]
fn test_all_offending_paths_reported_together() {
    let mut vector = vector_json(0.0, "2021-08-02T08:15:17Z");
    vector.as_object_mut().unwrap().remove("x");

    let failure = Engine::default()
        .validate::<StandardBallisticInformation>(&json!({
            "status_vector": vector,
            "additional_ballistics": {"magnitude": -1.0}
        }))
        .unwrap_err();

    let mut paths = failure.paths();
    paths.sort();
    assert_eq!(
        paths,
        vec!["additional_ballistics.magnitude", "status_vector.x"]
    );
    assert_eq!(failure.descriptors().len(), 2);
}

#[test]
fn test_malformed_text_is_root_error() {
    let failure = Engine::default()
        .validate_str::<StatusVector>("{\"x\": 1.0,")
        .unwrap_err();
    assert_eq!(failure.paths(), vec!["$"]);
}

#[test]
fn test_frame_whitelist_is_opt_in() {
    let mut raw = vector_json(0.0, "2021-08-02T08:15:17Z");
    raw["frame"] = json!("TEME");

    let lax: StatusVector = Engine::default().validate(&raw).unwrap();
    assert_eq!(lax.frame, "TEME");

    let strict = Engine::new(Policy::default().with_frame_codes_enforced(true));
    let sv: StatusVector = strict.validate(&raw).unwrap();
    assert_eq!(sv.frame, "teme");

    raw["frame"] = json!("j2000");
    assert!(strict.validate::<StatusVector>(&raw).is_err());
    assert!(Engine::default().validate::<StatusVector>(&raw).is_ok());
}

#[test]
fn test_redaction_marker_is_fixed() {
    assert_eq!(REDACTED_PASSWORD, "hidden for security reasons");
}

// =============================================================================
// ROUND TRIP
// =============================================================================

proptest! {
    #[test]
    fn prop_emit_then_validate_is_identity(
        x in -1e8..1e8f64,
        v in -1e4..1e4f64,
        secs in 0i64..2_000_000_000,
        micros in 0u32..1_000_000,
    ) {
        let engine = Engine::default();
        let time = Utc.timestamp_opt(secs, micros * 1000).unwrap();
        let raw = json!({
            "x": x,
            "y": x / 3.0,
            "z": -x,
            "v_x": v,
            "time": time.to_rfc3339(),
            "frame": "gcrs"
        });

        let first: StatusVector = engine.validate(&raw).unwrap();
        let emitted = engine.emit(&first).unwrap();
        let second: StatusVector = engine.validate(&emitted).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_rounding_idempotent(v in -1e9..1e9f64) {
        let precision = Precision::default();
        let once = round_length(Some(v), &precision);
        prop_assert_eq!(round_length(once, &precision), once);
        let once = round_angle(Some(v / 1e9), &precision);
        prop_assert_eq!(round_angle(once, &precision), once);
    }
}

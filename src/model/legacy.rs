use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{FieldDef, Kind, Role, SchemaDef};

/// One row of the legacy state vector table, as exchanged by import and
/// export. Values are kept exactly as the legacy database stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LegacyOrbitRecord {
    pub n_nu: i64,
    pub num_sbros: Option<i64>,
    pub n_ka: Option<i64>,
    pub data: Option<DateTime<Utc>>,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub a: Option<f64>,
    pub e: Option<f64>,
    pub i: Option<f64>,
    pub ome: Option<f64>,
}

pub const LEGACY_ORBIT_RECORD: SchemaDef = SchemaDef {
    name: "LegacyOrbitRecord",
    role: Role::Entity,
    fields: &[
        FieldDef::required("n_nu", Kind::Integer),
        FieldDef::optional("num_sbros", Kind::Integer),
        FieldDef::optional("n_ka", Kind::Integer),
        FieldDef::optional("data", Kind::Timestamp),
        FieldDef::required("rx", Kind::Float),
        FieldDef::required("ry", Kind::Float),
        FieldDef::required("rz", Kind::Float),
        FieldDef::required("vx", Kind::Float),
        FieldDef::required("vy", Kind::Float),
        FieldDef::required("vz", Kind::Float),
        FieldDef::optional("a", Kind::Float),
        FieldDef::optional("e", Kind::Float),
        FieldDef::optional("i", Kind::Float),
        FieldDef::optional("ome", Kind::Float),
    ],
};

contract!(LegacyOrbitRecord => LEGACY_ORBIT_RECORD);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Engine;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_legacy_row_kept_verbatim() {
        let row: LegacyOrbitRecord = Engine::default()
            .validate(&json!({
                "n_nu": 101,
                "num_sbros": 3,
                "data": "2020-01-01 00:00:00",
                "rx": 6778136.123456789,
                "ry": 0.0,
                "rz": 0,
                "vx": 0.0,
                "vy": 7668.558123456789,
                "vz": 0.0,
                "i": 0.9005898940290001
            }))
            .unwrap();

        assert_eq!(row.rx, 6778136.123456789);
        assert_eq!(row.vy, 7668.558123456789);
        assert_eq!(row.i, Some(0.9005898940290001));
        assert_eq!(row.data, Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(row.n_ka, None);
    }

    #[test]
    fn test_legacy_row_time_truncated_to_microseconds() {
        let row: LegacyOrbitRecord = Engine::default()
            .validate(&json!({
                "n_nu": 7,
                "data": "2020-01-01T03:00:00.987654321+03:00",
                "rx": 1.0,
                "ry": 0.0,
                "rz": 0.0,
                "vx": 0.0,
                "vy": 0.0,
                "vz": 0.0
            }))
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::microseconds(987_654);
        assert_eq!(row.data, Some(expected));
    }

    #[test]
    fn test_legacy_row_requires_vector() {
        let failure = Engine::default()
            .validate::<LegacyOrbitRecord>(&json!({"n_nu": 1, "rx": 1.0}))
            .unwrap_err();
        let mut paths = failure.paths();
        paths.sort();
        assert_eq!(paths, vec!["ry", "rz", "vx", "vy", "vz"]);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{FieldDef, Kind, Role, SchemaDef};

/// A named interval of orbit propagation for one space object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stretch {
    pub stretch_id: Option<i64>,
    pub name: String,
    pub space_object_id: i64,
    /// Legacy database record number, for imported stretches.
    pub n_nu: Option<i64>,
    /// Legacy import batch the stretch came from.
    pub num_sbros: Option<i64>,
    pub project_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub is_processing: bool,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub creation_time: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl Stretch {
    pub fn is_imported(&self) -> bool {
        self.num_sbros.is_some()
    }

    /// `None` until both ends of the interval are known.
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.end_time? - self.begin_time?)
    }
}

pub const STRETCH: SchemaDef = SchemaDef {
    name: "Stretch",
    role: Role::Entity,
    fields: &[
        FieldDef::optional("stretch_id", Kind::Integer),
        FieldDef::required("name", Kind::String),
        FieldDef::required("space_object_id", Kind::Integer),
        FieldDef::optional("n_nu", Kind::Integer),
        FieldDef::optional("num_sbros", Kind::Integer),
        FieldDef::required("project_id", Kind::Integer),
        FieldDef::required("user_id", Kind::Integer),
        FieldDef::defaulted("is_processing", Kind::Boolean),
        FieldDef::optional("begin_time", Kind::Timestamp).canonical_utc(),
        FieldDef::optional("end_time", Kind::Timestamp).canonical_utc(),
        FieldDef::optional("creation_time", Kind::Timestamp),
        FieldDef::optional("comment", Kind::String),
    ],
};

contract!(Stretch => STRETCH);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Engine, Violation};
    use chrono::TimeZone;
    use serde_json::json;

    fn stretch_json() -> serde_json::Value {
        json!({
            "name": "ISS, August",
            "space_object_id": 25544,
            "project_id": 1,
            "user_id": 7,
            "begin_time": "2021-08-02T08:15:17+03:00",
            "end_time": "2021-08-03T08:15:17+05:00",
            "creation_time": "2021-08-01T12:00:00+03:00"
        })
    }

    #[test]
    fn test_interval_ends_coerced_independently() {
        let stretch: Stretch = Engine::default().validate(&stretch_json()).unwrap();

        assert_eq!(
            stretch.begin_time,
            Some(Utc.with_ymd_and_hms(2021, 8, 2, 8, 15, 17).unwrap())
        );
        assert_eq!(
            stretch.end_time,
            Some(Utc.with_ymd_and_hms(2021, 8, 3, 8, 15, 17).unwrap())
        );
        assert_eq!(stretch.duration(), Some(chrono::Duration::days(1)));
    }

    #[test]
    fn test_creation_time_converted_by_instant() {
        let stretch: Stretch = Engine::default().validate(&stretch_json()).unwrap();
        assert_eq!(
            stretch.creation_time,
            Some(Utc.with_ymd_and_hms(2021, 8, 1, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_is_processing_defaults_false() {
        let stretch: Stretch = Engine::default().validate(&stretch_json()).unwrap();
        assert!(!stretch.is_processing);
        assert!(!stretch.is_imported());

        let mut raw = stretch_json();
        raw["is_processing"] = json!(null);
        let failure = Engine::default().validate::<Stretch>(&raw).unwrap_err();
        assert_eq!(failure.find("is_processing").unwrap().violation, Violation::Null);
    }

    #[test]
    fn test_open_interval_has_no_duration() {
        let mut raw = stretch_json();
        raw.as_object_mut().unwrap().remove("end_time");
        let stretch: Stretch = Engine::default().validate(&raw).unwrap();
        assert_eq!(stretch.end_time, None);
        assert_eq!(stretch.duration(), None);
    }
}

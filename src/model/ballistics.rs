use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FrameCode;
use crate::schema::{FieldDef, Kind, Role, SchemaDef};

/// Position and optional velocity of an object at a given time, in a given
/// rectangular frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusVector {
    pub status_vector_id: Option<i64>,
    /// Radius vector components, metres.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Velocity components, metres per second.
    pub v_x: Option<f64>,
    pub v_y: Option<f64>,
    pub v_z: Option<f64>,
    /// Observation time; matters for rotating frames.
    pub time: DateTime<Utc>,
    pub frame: String,
    /// `false` when absent. An explicit null is kept as `None`.
    #[serde(default = "not_impulse")]
    pub is_impulse: Option<bool>,
    pub comment: Option<String>,
}

fn not_impulse() -> Option<bool> {
    Some(false)
}

impl StatusVector {
    pub fn frame_code(&self) -> Option<FrameCode> {
        self.frame.parse().ok()
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// `None` unless all three components are present.
    pub fn velocity(&self) -> Option<[f64; 3]> {
        Some([self.v_x?, self.v_y?, self.v_z?])
    }
}

pub const STATUS_VECTOR: SchemaDef = SchemaDef {
    name: "StatusVector",
    role: Role::Entity,
    fields: &[
        FieldDef::optional("status_vector_id", Kind::Integer),
        FieldDef::required("x", Kind::Float).length(),
        FieldDef::required("y", Kind::Float).length(),
        FieldDef::required("z", Kind::Float).length(),
        FieldDef::optional("v_x", Kind::Float).length(),
        FieldDef::optional("v_y", Kind::Float).length(),
        FieldDef::optional("v_z", Kind::Float).length(),
        FieldDef::required("time", Kind::Timestamp).canonical_utc(),
        FieldDef::required("frame", Kind::String).frame_code(),
        FieldDef::optional("is_impulse", Kind::Boolean),
        FieldDef::optional("comment", Kind::String),
    ],
};

contract!(StatusVector => STATUS_VECTOR);

/// Instantaneous change of velocity. Components are kept as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Impulse {
    pub delta_v_x: Option<f64>,
    pub delta_v_y: Option<f64>,
    pub delta_v_z: Option<f64>,
}

pub const IMPULSE: SchemaDef = SchemaDef {
    name: "Impulse",
    role: Role::Entity,
    fields: &[
        FieldDef::optional("delta_v_x", Kind::Float),
        FieldDef::optional("delta_v_y", Kind::Float),
        FieldDef::optional("delta_v_z", Kind::Float),
    ],
};

contract!(Impulse => IMPULSE);

/// Osculating orbit elements. Lengths in metres, angles in radians.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KeplerianElements {
    pub semilatus_rectum: Option<f64>,
    #[serde(rename = "semimajor_axe")]
    pub semimajor_axis: Option<f64>,
    #[serde(rename = "semiminor_axe")]
    pub semiminor_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination: Option<f64>,
    pub longitude_ascending_node: Option<f64>,
    pub argument_periapsis: Option<f64>,
    pub true_anomaly: Option<f64>,
    pub mean_anomaly: Option<f64>,
}

pub const KEPLERIAN_ELEMENTS: SchemaDef = SchemaDef {
    name: "KeplerianElements",
    role: Role::Entity,
    fields: &[
        FieldDef::optional("semilatus_rectum", Kind::Float).positive().length(),
        FieldDef::optional("semimajor_axe", Kind::Float).positive().length(),
        FieldDef::optional("semiminor_axe", Kind::Float).positive().length(),
        FieldDef::optional("eccentricity", Kind::Float).non_negative(),
        FieldDef::optional("inclination", Kind::Float).angle(),
        FieldDef::optional("longitude_ascending_node", Kind::Float).angle(),
        FieldDef::optional("argument_periapsis", Kind::Float).angle(),
        FieldDef::optional("true_anomaly", Kind::Float).angle(),
        FieldDef::optional("mean_anomaly", Kind::Float).angle(),
    ],
};

contract!(KeplerianElements => KEPLERIAN_ELEMENTS);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdditionalBallistics {
    /// Height above the Earth's surface, metres.
    pub height: Option<f64>,
    /// Length of the radius vector, metres.
    pub magnitude: Option<f64>,
    /// Revolution number at the epoch.
    pub revolution_number: Option<i64>,
}

pub const ADDITIONAL_BALLISTICS: SchemaDef = SchemaDef {
    name: "AdditionalBallistics",
    role: Role::Entity,
    fields: &[
        FieldDef::optional("height", Kind::Float).length(),
        FieldDef::optional("magnitude", Kind::Float).non_negative().length(),
        FieldDef::optional("revolution_number", Kind::Integer).non_negative(),
    ],
};

contract!(AdditionalBallistics => ADDITIONAL_BALLISTICS);

/// Standard ballistic information (SBI): a state vector with optional
/// derived descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StandardBallisticInformation {
    pub status_vector: StatusVector,
    pub keplerian_elements: Option<KeplerianElements>,
    pub additional_ballistics: Option<AdditionalBallistics>,
}

pub const STANDARD_BALLISTIC_INFORMATION: SchemaDef = SchemaDef {
    name: "StandardBallisticInformation",
    role: Role::Entity,
    fields: &[
        FieldDef::required("status_vector", Kind::Object(&STATUS_VECTOR)),
        FieldDef::optional("keplerian_elements", Kind::Object(&KEPLERIAN_ELEMENTS)),
        FieldDef::optional("additional_ballistics", Kind::Object(&ADDITIONAL_BALLISTICS)),
    ],
};

contract!(StandardBallisticInformation => STANDARD_BALLISTIC_INFORMATION);

//! Request/result pairs, one per RPC operation.
//!
//! Requests carry the opaque session `token` plus their payload. Results
//! carry their payload plus `errors`; the payload is optional on the Rust
//! side because a failed result leaves it empty.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::envelope::{envelope, ErrorDescriptor, Status};
use crate::model::{
    Frame, Impulse, SpaceObject, StandardBallisticInformation, StatusVector, Settings, Stretch,
    Tristate, User, FRAME, IMPULSE, SETTINGS, SPACE_OBJECT, STANDARD_BALLISTIC_INFORMATION,
    STATUS_VECTOR, STRETCH, USER,
};
use crate::schema::{FieldDef, Kind, Role, SchemaDef, ERRORS_FIELD, TOKEN_FIELD};

fn default_true() -> bool {
    true
}

/// Encodes and decodes an embedded user with its password hash replaced,
/// so no serializer path can carry the stored hash.
mod redacted_user {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::model::User;

    pub fn serialize<S: Serializer>(user: &Option<User>, serializer: S) -> Result<S::Ok, S::Error> {
        user.clone().map(User::redacted).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<User>, D::Error> {
        Ok(Option::<User>::deserialize(deserializer)?.map(User::redacted))
    }
}

const STATUS_FIELD: FieldDef = FieldDef::required("status", Kind::String).one_of(Status::WIRE);

// login

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub token: String,
    pub login: String,
    pub password: String,
}

pub const LOGIN_REQUEST: SchemaDef = SchemaDef {
    name: "LoginRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::required("login", Kind::String),
        FieldDef::required("password", Kind::String),
    ],
};

contract!(LoginRequest => LOGIN_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginResult {
    #[serde(default, with = "redacted_user")]
    user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

impl LoginResult {
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user.redacted()),
            errors: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn into_user(self) -> Option<User> {
        self.user
    }
}

pub const LOGIN_RESULT: SchemaDef = SchemaDef {
    name: "LoginResult",
    role: Role::Result,
    fields: &[FieldDef::on_success("user", Kind::Object(&USER)), ERRORS_FIELD],
};

contract!(LoginResult => LOGIN_RESULT);

envelope!(LoginResult { user });

// list_stretches

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StretchesRequest {
    pub token: String,
    pub user_id: Option<i64>,
    /// Only stretches imported from the legacy database.
    #[serde(default)]
    pub filter_imported: bool,
}

pub const STRETCHES_REQUEST: SchemaDef = SchemaDef {
    name: "StretchesRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::optional("user_id", Kind::Integer),
        FieldDef::defaulted("filter_imported", Kind::Boolean),
    ],
};

contract!(StretchesRequest => STRETCHES_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StretchesResult {
    pub stretches: Option<Vec<Stretch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const STRETCHES_RESULT: SchemaDef = SchemaDef {
    name: "StretchesResult",
    role: Role::Result,
    fields: &[FieldDef::on_success("stretches", Kind::ObjectList(&STRETCH)), ERRORS_FIELD],
};

contract!(StretchesResult => STRETCHES_RESULT);
envelope!(StretchesResult { stretches });

// edit_stretch

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StretchEditRequest {
    pub token: String,
    pub stretch: Stretch,
}

pub const STRETCH_EDIT_REQUEST: SchemaDef = SchemaDef {
    name: "StretchEditRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD, FieldDef::required("stretch", Kind::Object(&STRETCH))],
};

contract!(StretchEditRequest => STRETCH_EDIT_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StretchEditResult {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

impl StretchEditResult {
    pub fn passed() -> Self {
        Self {
            status: Status::Passed,
            errors: None,
        }
    }
}

pub const STRETCH_EDIT_RESULT: SchemaDef = SchemaDef {
    name: "StretchEditResult",
    role: Role::Result,
    fields: &[STATUS_FIELD, ERRORS_FIELD],
};

contract!(StretchEditResult => STRETCH_EDIT_RESULT);
envelope!(StretchEditResult { status });

// delete_stretch

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StretchDeleteRequest {
    pub token: String,
    pub stretch_id: i64,
}

pub const STRETCH_DELETE_REQUEST: SchemaDef = SchemaDef {
    name: "StretchDeleteRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD, FieldDef::required("stretch_id", Kind::Integer)],
};

contract!(StretchDeleteRequest => STRETCH_DELETE_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StretchDeleteResult {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

impl StretchDeleteResult {
    pub fn passed() -> Self {
        Self {
            status: Status::Passed,
            errors: None,
        }
    }
}

pub const STRETCH_DELETE_RESULT: SchemaDef = SchemaDef {
    name: "StretchDeleteResult",
    role: Role::Result,
    fields: &[STATUS_FIELD, ERRORS_FIELD],
};

contract!(StretchDeleteResult => STRETCH_DELETE_RESULT);
envelope!(StretchDeleteResult { status });

// list_frames

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FramesRequest {
    pub token: String,
}

pub const FRAMES_REQUEST: SchemaDef = SchemaDef {
    name: "FramesRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD],
};

contract!(FramesRequest => FRAMES_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FramesResult {
    pub frames: Option<Vec<Frame>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const FRAMES_RESULT: SchemaDef = SchemaDef {
    name: "FramesResult",
    role: Role::Result,
    fields: &[FieldDef::on_success("frames", Kind::ObjectList(&FRAME)), ERRORS_FIELD],
};

contract!(FramesResult => FRAMES_RESULT);
envelope!(FramesResult { frames });

// list_sbis

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SbisRequest {
    pub token: String,
    pub stretch_id: i64,
}

pub const SBIS_REQUEST: SchemaDef = SchemaDef {
    name: "SbisRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD, FieldDef::required("stretch_id", Kind::Integer)],
};

contract!(SbisRequest => SBIS_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SbisResult {
    pub sbis: Option<Vec<StandardBallisticInformation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const SBIS_RESULT: SchemaDef = SchemaDef {
    name: "SbisResult",
    role: Role::Result,
    fields: &[
        FieldDef::on_success("sbis", Kind::ObjectList(&STANDARD_BALLISTIC_INFORMATION)),
        ERRORS_FIELD,
    ],
};

contract!(SbisResult => SBIS_RESULT);
envelope!(SbisResult { sbis });

// compute_stretch

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoStretchRequest {
    pub token: String,
    pub stretch: Stretch,
    /// Initial conditions.
    pub status_vector: StatusVector,
    pub revolution_number: Option<i64>,
    /// Propagation span, seconds.
    pub period: i64,
    /// Integration step, seconds.
    pub timestep: i64,
    pub ascending_nodes_only: bool,
    /// Solar radio flux index.
    #[serde(default)]
    pub f81: f64,
    /// Geomagnetic index.
    #[serde(default)]
    pub kp: f64,
    #[serde(default = "default_true")]
    #[schema(default = true)]
    pub is_multiprocess_mode: bool,
}

pub const DO_STRETCH_REQUEST: SchemaDef = SchemaDef {
    name: "DoStretchRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::required("stretch", Kind::Object(&STRETCH)),
        FieldDef::required("status_vector", Kind::Object(&STATUS_VECTOR)),
        FieldDef::optional("revolution_number", Kind::Integer).non_negative(),
        FieldDef::required("period", Kind::Integer),
        FieldDef::required("timestep", Kind::Integer),
        FieldDef::required("ascending_nodes_only", Kind::Boolean),
        FieldDef::defaulted("f81", Kind::Float),
        FieldDef::defaulted("kp", Kind::Float),
        FieldDef::defaulted("is_multiprocess_mode", Kind::Boolean),
    ],
};

contract!(DoStretchRequest => DO_STRETCH_REQUEST);

/// Outcome of a stretch computation; shared with `glue_stretch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoStretchResult {
    pub status: Status,
    pub stretch_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

impl DoStretchResult {
    pub fn passed(stretch_id: i64) -> Self {
        Self {
            status: Status::Passed,
            stretch_id: Some(stretch_id),
            errors: None,
        }
    }
}

pub const DO_STRETCH_RESULT: SchemaDef = SchemaDef {
    name: "DoStretchResult",
    role: Role::Result,
    fields: &[
        STATUS_FIELD,
        FieldDef::on_success("stretch_id", Kind::Integer),
        ERRORS_FIELD,
    ],
};

contract!(DoStretchResult => DO_STRETCH_RESULT);
envelope!(DoStretchResult { status, stretch_id });

// glue_stretch

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GlueStretchRequest {
    pub token: String,
    pub stretch_id: i64,
    pub timestep: i64,
    pub period: i64,
    #[serde(default)]
    pub f81: f64,
    #[serde(default)]
    pub kp: f64,
    /// Applied at the junction, if any.
    pub impulse: Option<Impulse>,
    #[serde(default = "default_true")]
    #[schema(default = true)]
    pub is_multiprocess_mode: bool,
}

pub const GLUE_STRETCH_REQUEST: SchemaDef = SchemaDef {
    name: "GlueStretchRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::required("stretch_id", Kind::Integer),
        FieldDef::required("timestep", Kind::Integer),
        FieldDef::required("period", Kind::Integer),
        FieldDef::defaulted("f81", Kind::Float),
        FieldDef::defaulted("kp", Kind::Float),
        FieldDef::optional("impulse", Kind::Object(&IMPULSE)),
        FieldDef::defaulted("is_multiprocess_mode", Kind::Boolean),
    ],
};

contract!(GlueStretchRequest => GLUE_STRETCH_REQUEST);

pub type GlueStretchResult = DoStretchResult;

// list_space_objects

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpaceObjectsRequest {
    pub token: String,
}

pub const SPACE_OBJECTS_REQUEST: SchemaDef = SchemaDef {
    name: "SpaceObjectsRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD],
};

contract!(SpaceObjectsRequest => SPACE_OBJECTS_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpaceObjectsResult {
    pub space_objects: Option<Vec<SpaceObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const SPACE_OBJECTS_RESULT: SchemaDef = SchemaDef {
    name: "SpaceObjectsResult",
    role: Role::Result,
    fields: &[
        FieldDef::on_success("space_objects", Kind::ObjectList(&SPACE_OBJECT)),
        ERRORS_FIELD,
    ],
};

contract!(SpaceObjectsResult => SPACE_OBJECTS_RESULT);
envelope!(SpaceObjectsResult { space_objects });

// get_user

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRequest {
    pub token: String,
    pub user_id: i64,
}

pub const USER_REQUEST: SchemaDef = SchemaDef {
    name: "UserRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD, FieldDef::required("user_id", Kind::Integer)],
};

contract!(UserRequest => USER_REQUEST);

/// The embedded user never leaves with its password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResult {
    #[serde(default, with = "redacted_user")]
    user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

impl UserResult {
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user.redacted()),
            errors: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn into_user(self) -> Option<User> {
        self.user
    }
}

pub const USER_RESULT: SchemaDef = SchemaDef {
    name: "UserResult",
    role: Role::Result,
    fields: &[FieldDef::on_success("user", Kind::Object(&USER)), ERRORS_FIELD],
};

contract!(UserResult => USER_RESULT);

envelope!(UserResult { user });

// import

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportRequest {
    pub token: String,
    pub user_id: i64,
    /// Legacy batch to import.
    pub num_sbros: i64,
}

pub const IMPORT_REQUEST: SchemaDef = SchemaDef {
    name: "ImportRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::required("user_id", Kind::Integer),
        FieldDef::required("num_sbros", Kind::Integer),
    ],
};

contract!(ImportRequest => IMPORT_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportResult {
    pub stretch_id: Option<i64>,
    pub new_sbi_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const IMPORT_RESULT: SchemaDef = SchemaDef {
    name: "ImportResult",
    role: Role::Result,
    fields: &[
        FieldDef::on_success("stretch_id", Kind::Integer),
        FieldDef::on_success("new_sbi_number", Kind::Integer),
        ERRORS_FIELD,
    ],
};

contract!(ImportResult => IMPORT_RESULT);
envelope!(ImportResult { stretch_id, new_sbi_number });

// list_import_batches

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumSbrosRequest {
    pub token: String,
}

pub const NUM_SBROS_REQUEST: SchemaDef = SchemaDef {
    name: "NumSbrosRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD],
};

contract!(NumSbrosRequest => NUM_SBROS_REQUEST);

/// Distinct import batch numbers present in the legacy database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NumSbrosResult {
    pub num_sbros_list: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const NUM_SBROS_RESULT: SchemaDef = SchemaDef {
    name: "NumSbrosResult",
    role: Role::Result,
    fields: &[FieldDef::on_success("num_sbros_list", Kind::IntegerList), ERRORS_FIELD],
};

contract!(NumSbrosResult => NUM_SBROS_RESULT);
envelope!(NumSbrosResult { num_sbros_list });

// export

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExportRequest {
    pub token: String,
    pub stretch_id: i64,
}

pub const EXPORT_REQUEST: SchemaDef = SchemaDef {
    name: "ExportRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD, FieldDef::required("stretch_id", Kind::Integer)],
};

contract!(ExportRequest => EXPORT_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExportResult {
    pub num_sbros: Option<i64>,
    pub new_records_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const EXPORT_RESULT: SchemaDef = SchemaDef {
    name: "ExportResult",
    role: Role::Result,
    fields: &[
        FieldDef::on_success("num_sbros", Kind::Integer),
        FieldDef::on_success("new_records_number", Kind::Integer),
        ERRORS_FIELD,
    ],
};

contract!(ExportResult => EXPORT_RESULT);
envelope!(ExportResult { num_sbros, new_records_number });

// follow_the_sun

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FollowTheSunRequest {
    pub token: String,
    pub status_vector_sat_ascending_node: StatusVector,
    /// Modelling span, minutes.
    pub time_m: i64,
}

pub const FOLLOW_THE_SUN_REQUEST: SchemaDef = SchemaDef {
    name: "FollowTheSunRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::required("status_vector_sat_ascending_node", Kind::Object(&STATUS_VECTOR)),
        FieldDef::required("time_m", Kind::Integer),
    ],
};

contract!(FollowTheSunRequest => FOLLOW_THE_SUN_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FollowTheSunResult {
    pub sat_status_vectors: Option<Vec<StatusVector>>,
    pub sun_status_vectors: Option<Vec<StatusVector>>,
    /// Sun positions in the satellite's orbital frame.
    pub sun_status_vectors_ors: Option<Vec<StatusVector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const FOLLOW_THE_SUN_RESULT: SchemaDef = SchemaDef {
    name: "FollowTheSunResult",
    role: Role::Result,
    fields: &[
        FieldDef::optional("sat_status_vectors", Kind::ObjectList(&STATUS_VECTOR)),
        FieldDef::optional("sun_status_vectors", Kind::ObjectList(&STATUS_VECTOR)),
        FieldDef::optional("sun_status_vectors_ors", Kind::ObjectList(&STATUS_VECTOR)),
        ERRORS_FIELD,
    ],
};

contract!(FollowTheSunResult => FOLLOW_THE_SUN_RESULT);
envelope!(FollowTheSunResult {
    sat_status_vectors,
    sun_status_vectors,
    sun_status_vectors_ors,
});

// settings

/// Without `settings` (or with `null`) the request reads the current
/// settings; otherwise it is a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettingsRequest {
    pub token: String,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<Settings>)]
    pub settings: Tristate<Settings>,
}

impl SettingsRequest {
    pub fn is_read(&self) -> bool {
        self.settings.as_option().is_none()
    }
}

pub const SETTINGS_REQUEST: SchemaDef = SchemaDef {
    name: "SettingsRequest",
    role: Role::Request,
    fields: &[TOKEN_FIELD, FieldDef::optional("settings", Kind::Object(&SETTINGS))],
};

contract!(SettingsRequest => SETTINGS_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettingsResult {
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const SETTINGS_RESULT: SchemaDef = SchemaDef {
    name: "SettingsResult",
    role: Role::Result,
    fields: &[FieldDef::on_success("settings", Kind::Object(&SETTINGS)), ERRORS_FIELD],
};

contract!(SettingsResult => SETTINGS_RESULT);
envelope!(SettingsResult { settings });

// propagate

/// Propagates a single state vector without creating a stretch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PropagateRequest {
    pub token: String,
    #[schema(min_length = 1)]
    pub user_id: String,
    pub status_vector: StatusVector,
    /// Seconds.
    pub calculate_time: i64,
    /// Output step, seconds.
    pub dt: f64,
    pub ascending_nodes_only: bool,
}

pub const PROPAGATE_REQUEST: SchemaDef = SchemaDef {
    name: "PropagateRequest",
    role: Role::Request,
    fields: &[
        TOKEN_FIELD,
        FieldDef::required("user_id", Kind::String).min_length(1),
        FieldDef::required("status_vector", Kind::Object(&STATUS_VECTOR)),
        FieldDef::required("calculate_time", Kind::Integer).positive(),
        FieldDef::required("dt", Kind::Float).positive(),
        FieldDef::required("ascending_nodes_only", Kind::Boolean),
    ],
};

contract!(PropagateRequest => PROPAGATE_REQUEST);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PropagateResult {
    pub status_vectors: Option<Vec<StatusVector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

pub const PROPAGATE_RESULT: SchemaDef = SchemaDef {
    name: "PropagateResult",
    role: Role::Result,
    fields: &[
        FieldDef::on_success("status_vectors", Kind::ObjectList(&STATUS_VECTOR)),
        ERRORS_FIELD,
    ],
};

contract!(PropagateResult => PROPAGATE_RESULT);
envelope!(PropagateResult { status_vectors });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::REDACTED_PASSWORD;
    use crate::rpc::ResultEnvelope;
    use crate::schema::{Engine, Violation};
    use serde_json::{json, Value};

    fn user_json(password: &str) -> Value {
        json!({
            "user_id": 1,
            "role_id": 1,
            "department_id": 1,
            "login": "operator",
            "encrypted_password": password,
            "first_name": "Anna",
            "last_name": "Sidorova",
            "patronymic_name": "",
            "email": "anna@example.org",
            "is_valid": true
        })
    }

    fn vector_json() -> Value {
        json!({
            "x": 6778136.123456789,
            "y": 0.0,
            "z": 0.0,
            "v_x": 0.0,
            "v_y": 7668.558123456789,
            "v_z": 0.0,
            "time": "2021-08-02T08:15:17+05:00",
            "frame": "gcrs"
        })
    }

    #[test]
    fn test_user_result_always_redacted() {
        let result: UserResult = Engine::default()
            .validate(&json!({"user": user_json("$argon2id$secret")}))
            .unwrap();
        assert_eq!(result.user().unwrap().encrypted_password, REDACTED_PASSWORD);

        let login: LoginResult = Engine::default()
            .validate(&json!({"user": user_json("plain")}))
            .unwrap();
        assert!(login.into_user().unwrap().is_redacted());
    }

    #[test]
    fn test_result_constructors_redact() {
        let user: User = Engine::default().validate(&user_json("hash")).unwrap();
        assert!(UserResult::new(user.clone()).user().unwrap().is_redacted());
        assert!(LoginResult::new(user).into_user().unwrap().is_redacted());
    }

    #[test]
    fn test_plain_serde_never_carries_hash() {
        let user: User = Engine::default().validate(&user_json("SECRET")).unwrap();
        let direct = UserResult {
            user: Some(user.clone()),
            errors: None,
        };
        let out = serde_json::to_value(&direct).unwrap();
        assert_eq!(out["user"]["encrypted_password"], json!(REDACTED_PASSWORD));

        let decoded: LoginResult =
            serde_json::from_value(json!({"user": user_json("SECRET")})).unwrap();
        assert!(decoded.user().unwrap().is_redacted());
        let text = serde_json::to_string(&decoded).unwrap();
        assert!(!text.contains("SECRET"));

        let empty: UserResult = serde_json::from_value(json!({"errors": []})).unwrap();
        assert_eq!(empty.user(), None);
    }

    #[test]
    fn test_request_defaults() {
        let request: DoStretchRequest = Engine::default()
            .validate(&json!({
                "token": "t",
                "stretch": {
                    "name": "test",
                    "space_object_id": 1,
                    "project_id": 1,
                    "user_id": 1
                },
                "status_vector": vector_json(),
                "period": 86400,
                "timestep": 10,
                "ascending_nodes_only": false
            }))
            .unwrap();

        assert_eq!(request.f81, 0.0);
        assert_eq!(request.kp, 0.0);
        assert!(request.is_multiprocess_mode);
        assert_eq!(request.revolution_number, None);
        assert_eq!(request.status_vector.x, 6778136.12346);

        let glue: GlueStretchRequest = Engine::default()
            .validate(&json!({
                "token": "t",
                "stretch_id": 4,
                "timestep": 10,
                "period": 3600,
                "is_multiprocess_mode": false,
                "impulse": {"delta_v_x": 1.5}
            }))
            .unwrap();
        assert!(!glue.is_multiprocess_mode);
        assert_eq!(glue.impulse.unwrap().delta_v_x, Some(1.5));

        let list: StretchesRequest = Engine::default().validate(&json!({"token": "t"})).unwrap();
        assert!(!list.filter_imported);
        assert_eq!(list.user_id, None);
    }

    #[test]
    fn test_token_required_everywhere() {
        let failure = Engine::default()
            .validate::<FramesRequest>(&json!({}))
            .unwrap_err();
        assert_eq!(failure.paths(), vec!["token"]);
    }

    #[test]
    fn test_sbis_result_reports_indexed_paths() {
        let mut broken = vector_json();
        broken["x"] = json!("far");
        let failure = Engine::default()
            .validate::<SbisResult>(&json!({
                "sbis": [
                    {"status_vector": vector_json()},
                    {"status_vector": vector_json()},
                    {"status_vector": broken}
                ]
            }))
            .unwrap_err();
        assert_eq!(failure.paths(), vec!["sbis[2].status_vector.x"]);
    }

    #[test]
    fn test_envelope_exclusivity() {
        let raw = json!({
            "status": "passed",
            "stretch_id": 12,
            "errors": [{"field": "stretch", "message": "not found"}]
        });
        let failure = Engine::default().validate::<DoStretchResult>(&raw).unwrap_err();
        assert_eq!(failure.find("status").unwrap().violation, Violation::PassedWithErrors);
    }

    #[test]
    fn test_failed_result_may_omit_payload() {
        let result: GlueStretchResult = Engine::default()
            .validate(&json!({
                "status": "failed",
                "errors": [{"field": "stretch_id", "message": "stretch is being processed"}]
            }))
            .unwrap();
        assert!(!result.is_success());
        assert_eq!(result.stretch_id, None);
    }

    #[test]
    fn test_from_errors_builds_failed_result() {
        let errors = vec![ErrorDescriptor::new("token", "expired")];

        let result = DoStretchResult::from_errors(errors.clone());
        assert_eq!(result.status, Status::Failed);
        assert_eq!(result.errors(), errors.as_slice());

        let encoded = Engine::default().emit(&result).unwrap();
        assert_eq!(
            encoded,
            json!({"status": "failed", "stretch_id": null, "errors": [{"field": "token", "message": "expired"}]})
        );

        let frames = FramesResult::from_errors(errors);
        assert_eq!(frames.frames, None);
        assert!(Engine::default().emit(&frames).is_ok());
    }

    #[test]
    fn test_success_payload_required() {
        let failure = Engine::default()
            .validate::<ExportResult>(&json!({"num_sbros": 3, "errors": []}))
            .unwrap_err();
        assert_eq!(failure.paths(), vec!["new_records_number"]);

        let ok: ExportResult = Engine::default()
            .validate(&json!({"num_sbros": 3, "new_records_number": 120}))
            .unwrap();
        assert!(ok.is_success());
    }

    #[test]
    fn test_follow_the_sun_lists_optional() {
        let result: FollowTheSunResult = Engine::default()
            .validate(&json!({"sat_status_vectors": [vector_json()]}))
            .unwrap();
        assert_eq!(result.sat_status_vectors.unwrap().len(), 1);
        assert_eq!(result.sun_status_vectors, None);
    }

    #[test]
    fn test_num_sbros_list_integers_only() {
        let failure = Engine::default()
            .validate::<NumSbrosResult>(&json!({"num_sbros_list": [1, 2, "3"]}))
            .unwrap_err();
        assert_eq!(failure.paths(), vec!["num_sbros_list[2]"]);
    }

    #[test]
    fn test_settings_request_read_vs_update() {
        let engine = Engine::default();

        let read: SettingsRequest = engine.validate(&json!({"token": "t"})).unwrap();
        assert!(read.is_read());
        let read: SettingsRequest = engine.validate(&json!({"token": "t", "settings": null})).unwrap();
        assert!(read.is_read());
        assert!(read.settings.is_null());

        let update: SettingsRequest = engine
            .validate(&json!({"token": "t", "settings": {"listen_port": 8080}}))
            .unwrap();
        assert!(!update.is_read());
        let settings = update.settings.into_option().unwrap();
        assert_eq!(settings.listen_port, Tristate::Value(8080));
    }

    #[test]
    fn test_propagate_constraints() {
        let failure = Engine::default()
            .validate::<PropagateRequest>(&json!({
                "token": "t",
                "user_id": "",
                "status_vector": vector_json(),
                "calculate_time": 0,
                "dt": -1.0,
                "ascending_nodes_only": true
            }))
            .unwrap_err();

        let mut paths = failure.paths();
        paths.sort();
        assert_eq!(paths, vec!["calculate_time", "dt", "user_id"]);
        assert_eq!(failure.find("user_id").unwrap().violation, Violation::TooShort { min: 1 });
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::contracts::*;
use super::envelope::ResultEnvelope;
use crate::schema::{Engine, Schema, SchemaDef, ValidationFailure};

/// Typed binding of one RPC operation, implemented on its request type.
pub trait Rpc: Schema {
    type Result: ResultEnvelope;
    const OPERATION: Operation;
}

/// Validates `raw` as `T` and returns the canonical document, with
/// post-validation transforms applied.
fn canonical<T: Schema>(engine: &Engine, raw: &Value) -> Result<Value, ValidationFailure> {
    let value: T = engine.validate(raw)?;
    engine.emit(&value)
}

macro_rules! catalogue {
    ($($variant:ident => $request:ty, $result:ty, $endpoint:literal;)+) => {
        /// Every RPC operation the service exposes.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString,
            AsRefStr, Display,
        )]
        #[serde(rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum Operation {
            $($variant,)+
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$(Operation::$variant,)+];

            pub fn endpoint(&self) -> &'static str {
                match self {
                    $(Operation::$variant => $endpoint,)+
                }
            }

            pub fn request_schema(&self) -> &'static SchemaDef {
                match self {
                    $(Operation::$variant => <$request as Schema>::schema(),)+
                }
            }

            pub fn result_schema(&self) -> &'static SchemaDef {
                match self {
                    $(Operation::$variant => <$result as Schema>::schema(),)+
                }
            }

            /// Canonical form of a request document for this operation.
            pub fn canonical_request(
                &self,
                engine: &Engine,
                raw: &Value,
            ) -> Result<Value, ValidationFailure> {
                match self {
                    $(Operation::$variant => canonical::<$request>(engine, raw),)+
                }
            }

            /// Canonical form of a result document for this operation.
            pub fn canonical_result(
                &self,
                engine: &Engine,
                raw: &Value,
            ) -> Result<Value, ValidationFailure> {
                match self {
                    $(Operation::$variant => canonical::<$result>(engine, raw),)+
                }
            }

            /// The operation's own result shape carrying `failure` as errors.
            pub fn rejection(&self, failure: &ValidationFailure) -> Result<Value, serde_json::Error> {
                match self {
                    $(Operation::$variant => serde_json::to_value(<$result>::from_failure(failure)),)+
                }
            }
        }

        $(
            impl Rpc for $request {
                type Result = $result;
                const OPERATION: Operation = Operation::$variant;
            }
        )+
    };
}

catalogue! {
    Login => LoginRequest, LoginResult, "/api/v1/login.json";
    ListStretches => StretchesRequest, StretchesResult, "/api/v1/stretches.json";
    EditStretch => StretchEditRequest, StretchEditResult, "/api/v1/stretch_edit.json";
    DeleteStretch => StretchDeleteRequest, StretchDeleteResult, "/api/v1/stretch_delete.json";
    ListFrames => FramesRequest, FramesResult, "/api/v1/frames.json";
    ListSbis => SbisRequest, SbisResult, "/api/v1/sbis.json";
    ComputeStretch => DoStretchRequest, DoStretchResult, "/api/v1/do_stretch.json";
    GlueStretch => GlueStretchRequest, GlueStretchResult, "/api/v1/glue_stretch.json";
    ListSpaceObjects => SpaceObjectsRequest, SpaceObjectsResult, "/api/v1/space_objects.json";
    GetUser => UserRequest, UserResult, "/api/v1/user.json";
    Import => ImportRequest, ImportResult, "/api/v1/import.json";
    ListImportBatches => NumSbrosRequest, NumSbrosResult, "/api/v1/num_sbros.json";
    Export => ExportRequest, ExportResult, "/api/v1/export.json";
    FollowTheSun => FollowTheSunRequest, FollowTheSunResult, "/api/v1/follow_the_sun.json";
    Settings => SettingsRequest, SettingsResult, "/api/v1/settings.json";
    Propagate => PropagateRequest, PropagateResult, "/api/v1/propagate.json";
}

impl Operation {
    pub fn from_endpoint(path: &str) -> Option<Operation> {
        Operation::ALL.iter().copied().find(|op| op.endpoint() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::REDACTED_PASSWORD;
    use crate::schema::Role;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_is_complete_and_unique() {
        assert_eq!(Operation::ALL.len(), 16);
        let endpoints: HashSet<_> = Operation::ALL.iter().map(|op| op.endpoint()).collect();
        assert_eq!(endpoints.len(), Operation::ALL.len());
        for op in Operation::ALL {
            assert!(op.endpoint().starts_with("/api/v1/"));
            assert_eq!(op.request_schema().role, Role::Request);
            assert_eq!(op.result_schema().role, Role::Result);
            assert!(op.request_schema().field("token").is_some());
            assert!(op.result_schema().field("errors").is_some());
        }
    }

    #[test]
    fn test_operation_ids() {
        assert_eq!(Operation::ListSbis.to_string(), "list_sbis");
        assert_eq!("follow_the_sun".parse::<Operation>().unwrap(), Operation::FollowTheSun);
        assert_eq!(
            serde_json::to_value(Operation::ListImportBatches).unwrap(),
            json!("list_import_batches")
        );
        assert!("teleport".parse::<Operation>().is_err());
    }

    #[test]
    fn test_from_endpoint() {
        assert_eq!(
            Operation::from_endpoint("/api/v1/do_stretch.json"),
            Some(Operation::ComputeStretch)
        );
        assert_eq!(Operation::from_endpoint("/api/v1/unknown.json"), None);
    }

    #[test]
    fn test_glue_shares_compute_result_shape() {
        assert_eq!(
            Operation::GlueStretch.result_schema(),
            Operation::ComputeStretch.result_schema()
        );
        assert_eq!(<GlueStretchRequest as Rpc>::OPERATION, Operation::GlueStretch);
    }

    #[test]
    fn test_canonical_result_applies_redaction() {
        let raw = json!({
            "user": {
                "user_id": 3,
                "role_id": 1,
                "department_id": 1,
                "login": "admin",
                "encrypted_password": "$argon2id$secret",
                "first_name": "A",
                "last_name": "B",
                "patronymic_name": "C",
                "email": "a@b.c",
                "is_valid": true
            }
        });
        let out = Operation::GetUser.canonical_result(&Engine::default(), &raw).unwrap();
        assert_eq!(out["user"]["encrypted_password"], json!(REDACTED_PASSWORD));
    }

    #[test]
    fn test_rejection_uses_result_shape() {
        let failure = Engine::default()
            .validate::<StretchDeleteRequest>(&json!({"token": "t"}))
            .unwrap_err();
        let rejection = Operation::DeleteStretch.rejection(&failure).unwrap();
        assert_eq!(
            rejection,
            json!({
                "status": "failed",
                "errors": [{"field": "stretch_id", "message": "field required"}]
            })
        );
    }
}

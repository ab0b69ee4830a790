use utoipa::OpenApi;

use super::error::ErrorResponse;
use crate::model::{
    AdditionalBallistics, Frame, FrameCode, Impulse, KeplerianElements, LegacyOrbitRecord,
    Settings, SpaceObject, StandardBallisticInformation, StatusVector, Stretch, User,
};
use crate::rpc::*;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            StatusVector,
            Impulse,
            KeplerianElements,
            AdditionalBallistics,
            StandardBallisticInformation,
            User,
            Frame,
            FrameCode,
            SpaceObject,
            Stretch,
            Settings,
            LegacyOrbitRecord,
            ErrorDescriptor,
            Status,
            Operation,
            ErrorResponse,
            LoginRequest,
            LoginResult,
            StretchesRequest,
            StretchesResult,
            StretchEditRequest,
            StretchEditResult,
            StretchDeleteRequest,
            StretchDeleteResult,
            FramesRequest,
            FramesResult,
            SbisRequest,
            SbisResult,
            DoStretchRequest,
            DoStretchResult,
            GlueStretchRequest,
            SpaceObjectsRequest,
            SpaceObjectsResult,
            UserRequest,
            UserResult,
            ImportRequest,
            ImportResult,
            NumSbrosRequest,
            NumSbrosResult,
            ExportRequest,
            ExportResult,
            FollowTheSunRequest,
            FollowTheSunResult,
            SettingsRequest,
            SettingsResult,
            PropagateRequest,
            PropagateResult,
        )
    ),
    info(
        title = "Ballistics Service Contracts",
        description = "Request and result documents of the ballistics RPC API",
        version = "0.1.0"
    ),
    tags(
        (name = "contracts", description = "Canonical data contracts")
    )
)]
pub struct ApiDoc;

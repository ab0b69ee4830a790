use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::schema::{FieldDef, Kind, Role, SchemaDef};

/// Replaces the stored password hash in every user returned to a client.
pub const REDACTED_PASSWORD: &str = "hidden for security reasons";

/// Reference frames known to the service, by their astropy code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FrameCode {
    /// International Terrestrial Reference System: rotating with the Earth.
    Itrs,
    /// Geocentric Celestial Reference System.
    Gcrs,
    /// Barycentric International Celestial Reference System.
    Icrs,
    /// True equator, mean equinox. Used for TLE propagation.
    Teme,
    /// Heliocentric Celestial Reference System.
    Hcrs,
    /// Orbital frame centred on the spacecraft.
    Ors,
}

impl FrameCode {
    pub const ALL: [FrameCode; 6] = [
        FrameCode::Itrs,
        FrameCode::Gcrs,
        FrameCode::Icrs,
        FrameCode::Teme,
        FrameCode::Hcrs,
        FrameCode::Ors,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: i64,
    pub role_id: i64,
    pub department_id: i64,
    pub login: String,
    pub encrypted_password: String,
    pub first_name: String,
    pub last_name: String,
    pub patronymic_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_valid: bool,
    pub comment: Option<String>,
}

impl User {
    pub fn redacted(self) -> Self {
        Self {
            encrypted_password: REDACTED_PASSWORD.to_string(),
            ..self
        }
    }

    pub fn is_redacted(&self) -> bool {
        self.encrypted_password == REDACTED_PASSWORD
    }
}

pub const USER: SchemaDef = SchemaDef {
    name: "User",
    role: Role::Entity,
    fields: &[
        FieldDef::required("user_id", Kind::Integer),
        FieldDef::required("role_id", Kind::Integer),
        FieldDef::required("department_id", Kind::Integer),
        FieldDef::required("login", Kind::String),
        FieldDef::required("encrypted_password", Kind::String),
        FieldDef::required("first_name", Kind::String),
        FieldDef::required("last_name", Kind::String),
        FieldDef::required("patronymic_name", Kind::String),
        FieldDef::required("email", Kind::String),
        FieldDef::optional("phone", Kind::String),
        FieldDef::required("is_valid", Kind::Boolean),
        FieldDef::optional("comment", Kind::String),
    ],
};

contract!(User => USER);

/// Catalogue entry for a reference frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Frame {
    pub frame_id: i64,
    pub code_astropy: String,
    pub name_ru: String,
    pub name_ru_short: String,
    pub name_en: String,
    pub name_en_short: String,
    pub comment: Option<String>,
}

impl Frame {
    pub fn code(&self) -> Option<FrameCode> {
        self.code_astropy.parse().ok()
    }
}

pub const FRAME: SchemaDef = SchemaDef {
    name: "Frame",
    role: Role::Entity,
    fields: &[
        FieldDef::required("frame_id", Kind::Integer),
        FieldDef::required("code_astropy", Kind::String),
        FieldDef::required("name_ru", Kind::String),
        FieldDef::required("name_ru_short", Kind::String),
        FieldDef::required("name_en", Kind::String),
        FieldDef::required("name_en_short", Kind::String),
        FieldDef::optional("comment", Kind::String),
    ],
};

contract!(Frame => FRAME);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpaceObject {
    pub space_object_id: i64,
    pub norad_catalog_id: Option<String>,
    pub nssdc_catalog_id: Option<String>,
    pub rus_catalog_id: Option<String>,
    pub n_ka: Option<i64>,
    pub name_ru: String,
    pub name_en: String,
    pub name_ru_short: String,
    pub name_en_short: String,
    /// Kilograms.
    pub mass: f64,
    /// Square metres.
    pub effective_cross_sectional_area: f64,
    pub comment: Option<String>,
}

pub const SPACE_OBJECT: SchemaDef = SchemaDef {
    name: "SpaceObject",
    role: Role::Entity,
    fields: &[
        FieldDef::required("space_object_id", Kind::Integer),
        FieldDef::optional("norad_catalog_id", Kind::String),
        FieldDef::optional("nssdc_catalog_id", Kind::String),
        FieldDef::optional("rus_catalog_id", Kind::String),
        FieldDef::optional("n_ka", Kind::Integer),
        FieldDef::required("name_ru", Kind::String),
        FieldDef::required("name_en", Kind::String),
        FieldDef::required("name_ru_short", Kind::String),
        FieldDef::required("name_en_short", Kind::String),
        FieldDef::required("mass", Kind::Float),
        FieldDef::required("effective_cross_sectional_area", Kind::Float),
        FieldDef::optional("comment", Kind::String),
    ],
};

contract!(SpaceObject => SPACE_OBJECT);

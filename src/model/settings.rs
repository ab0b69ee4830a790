//! Service settings, exchanged as partial documents.
//!
//! A settings document distinguishes "not mentioned" from "explicitly
//! cleared": an update only touches the fields it names, and a field set to
//! `null` is reset.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::schema::{FieldDef, Kind, Role, SchemaDef};

/// A field that may be absent, explicitly null, or carry a value.
///
/// Use with `#[serde(default, skip_serializing_if = "Tristate::is_unset")]`
/// so absence survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tristate<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Tristate<T> {
    fn default() -> Self {
        Tristate::Unset
    }
}

impl<T> Tristate<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Tristate::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Tristate::Null)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Tristate::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Tristate::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `update` wins unless it leaves the field unset.
    pub fn overlay(self, update: Tristate<T>) -> Tristate<T> {
        match update {
            Tristate::Unset => self,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for Tristate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Tristate::Value(v),
            None => Tristate::Null,
        }
    }
}

impl<T: Serialize> Serialize for Tristate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tristate::Value(v) => serializer.serialize_some(v),
            Tristate::Unset | Tristate::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tristate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Tristate::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub logging_level: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<i64>, minimum = 1)]
    pub max_log_files_size_mb: Tristate<i64>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<i64>, minimum = 1)]
    pub max_log_files_back_up_count: Tristate<i64>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub protocol: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<i64>)]
    pub listen_port: Tristate<i64>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub ode_solver: Tristate<String>,
    /// Account for atmosphere and geopotential.
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<bool>)]
    pub calculate_perturbations: Tristate<bool>,

    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub workdb_host: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<i64>, minimum = 1)]
    pub workdb_port: Tristate<i64>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub workdb_username: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub workdb_password: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub workdb_base: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub workdb_schema: Tristate<String>,

    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub olddb_host: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<i64>, minimum = 1)]
    pub olddb_port: Tristate<i64>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub olddb_username: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub olddb_password: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub olddb_base: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    #[schema(value_type = Option<String>)]
    pub olddb_schema: Tristate<String>,
}

impl Settings {
    /// Applies a partial update: fields the update leaves unset keep their
    /// current state.
    pub fn overlay(self, update: Settings) -> Settings {
        Settings {
            logging_level: self.logging_level.overlay(update.logging_level),
            max_log_files_size_mb: self.max_log_files_size_mb.overlay(update.max_log_files_size_mb),
            max_log_files_back_up_count: self
                .max_log_files_back_up_count
                .overlay(update.max_log_files_back_up_count),
            protocol: self.protocol.overlay(update.protocol),
            listen_port: self.listen_port.overlay(update.listen_port),
            ode_solver: self.ode_solver.overlay(update.ode_solver),
            calculate_perturbations: self
                .calculate_perturbations
                .overlay(update.calculate_perturbations),
            workdb_host: self.workdb_host.overlay(update.workdb_host),
            workdb_port: self.workdb_port.overlay(update.workdb_port),
            workdb_username: self.workdb_username.overlay(update.workdb_username),
            workdb_password: self.workdb_password.overlay(update.workdb_password),
            workdb_base: self.workdb_base.overlay(update.workdb_base),
            workdb_schema: self.workdb_schema.overlay(update.workdb_schema),
            olddb_host: self.olddb_host.overlay(update.olddb_host),
            olddb_port: self.olddb_port.overlay(update.olddb_port),
            olddb_username: self.olddb_username.overlay(update.olddb_username),
            olddb_password: self.olddb_password.overlay(update.olddb_password),
            olddb_base: self.olddb_base.overlay(update.olddb_base),
            olddb_schema: self.olddb_schema.overlay(update.olddb_schema),
        }
    }
}

pub const SETTINGS: SchemaDef = SchemaDef {
    name: "Settings",
    role: Role::Entity,
    fields: &[
        FieldDef::optional("logging_level", Kind::String),
        FieldDef::optional("max_log_files_size_mb", Kind::Integer).positive(),
        FieldDef::optional("max_log_files_back_up_count", Kind::Integer).positive(),
        FieldDef::optional("protocol", Kind::String),
        FieldDef::optional("listen_port", Kind::Integer),
        FieldDef::optional("ode_solver", Kind::String),
        FieldDef::optional("calculate_perturbations", Kind::Boolean),
        FieldDef::optional("workdb_host", Kind::String),
        FieldDef::optional("workdb_port", Kind::Integer).positive(),
        FieldDef::optional("workdb_username", Kind::String),
        FieldDef::optional("workdb_password", Kind::String),
        FieldDef::optional("workdb_base", Kind::String),
        FieldDef::optional("workdb_schema", Kind::String),
        FieldDef::optional("olddb_host", Kind::String),
        FieldDef::optional("olddb_port", Kind::Integer).positive(),
        FieldDef::optional("olddb_username", Kind::String),
        FieldDef::optional("olddb_password", Kind::String),
        FieldDef::optional("olddb_base", Kind::String),
        FieldDef::optional("olddb_schema", Kind::String),
    ],
};

contract!(Settings => SETTINGS);

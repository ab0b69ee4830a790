//! Descriptor-driven validation.
//!
//! The walk never stops at the first problem: every offending field of the
//! document is reported in one `ValidationFailure`. A document that passes is
//! rewritten into its canonical form (rounded numbers, UTC timestamps,
//! undeclared keys dropped) and only then decoded into the typed value.

use chrono::SecondsFormat;
use serde_json::{Map, Value};

use super::descriptor::{Constraint, FieldDef, Kind, Normalizer, Presence, Role, Schema, SchemaDef};
use super::error::{FieldError, FieldPath, ValidationFailure, Violation};
use crate::model::FrameCode;
use crate::normalize::{parse_timestamp, round_to_digits, to_canonical_utc, to_instant_utc};
use crate::precision::Policy;

/// Stateless apart from its policy; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    policy: Policy,
}

impl Engine {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Validates `raw` against `def` and returns its canonical JSON form.
    pub fn normalize(&self, def: &SchemaDef, raw: &Value) -> Result<Value, ValidationFailure> {
        let mut walk = Walk {
            policy: &self.policy,
            errors: Vec::new(),
        };
        let normalized = walk.document(def, raw, &FieldPath::root());

        if walk.errors.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationFailure {
                schema: def.name,
                errors: walk.errors,
            })
        }
    }

    pub fn validate<T: Schema>(&self, raw: &Value) -> Result<T, ValidationFailure> {
        let def = T::schema();
        let normalized = self.normalize(def, raw)?;
        serde_json::from_value::<T>(normalized).map_err(|e| malformed(def, e))
    }

    pub fn validate_str<T: Schema>(&self, json: &str) -> Result<T, ValidationFailure> {
        let raw: Value = serde_json::from_str(json).map_err(|e| malformed(T::schema(), e))?;
        self.validate(&raw)
    }

    /// Outgoing path: re-validates a typed value built elsewhere and returns
    /// the canonical document to hand to the transport.
    pub fn emit<T: Schema>(&self, value: &T) -> Result<Value, ValidationFailure> {
        let def = T::schema();
        let raw = serde_json::to_value(value).map_err(|e| malformed(def, e))?;
        let canonical: T = self.validate(&raw)?;
        serde_json::to_value(&canonical).map_err(|e| malformed(def, e))
    }
}

fn malformed(def: &SchemaDef, err: serde_json::Error) -> ValidationFailure {
    ValidationFailure {
        schema: def.name,
        errors: vec![FieldError::new(
            FieldPath::root(),
            Violation::Malformed(err.to_string()),
            None,
        )],
    }
}

struct Walk<'a> {
    policy: &'a Policy,
    errors: Vec<FieldError>,
}

impl Walk<'_> {
    fn reject(&mut self, path: FieldPath, violation: Violation, value: Option<&Value>) {
        self.errors.push(FieldError::new(path, violation, value));
    }

    fn wrong_type(&mut self, path: &FieldPath, expected: &'static str, value: &Value) {
        self.reject(
            path.clone(),
            Violation::WrongType {
                expected,
                actual: json_type_name(value),
            },
            Some(value),
        );
    }

    fn document(&mut self, def: &SchemaDef, raw: &Value, path: &FieldPath) -> Value {
        match raw.as_object() {
            Some(obj) => Value::Object(self.object(def, obj, path)),
            None => {
                self.wrong_type(path, "object", raw);
                Value::Null
            }
        }
    }

    fn object(
        &mut self,
        def: &SchemaDef,
        obj: &Map<String, Value>,
        path: &FieldPath,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        let mut absent_payload = Vec::new();

        for field in def.fields {
            let field_path = path.key(field.name);

            match (obj.get(field.name), field.presence) {
                (None, Presence::Required) => self.reject(field_path, Violation::Missing, None),
                (None, Presence::OnSuccess) | (Some(Value::Null), Presence::OnSuccess) => {
                    absent_payload.push(field_path)
                }
                (None, _) => {}
                (Some(Value::Null), Presence::Optional) => {
                    out.insert(field.name.to_string(), Value::Null);
                }
                (Some(Value::Null), _) => {
                    self.reject(field_path, Violation::Null, Some(&Value::Null))
                }
                (Some(value), _) => {
                    if let Some(normalized) = self.field(field, value, &field_path) {
                        out.insert(field.name.to_string(), normalized);
                    }
                }
            }
        }

        if def.role == Role::Result {
            self.envelope(obj, absent_payload, path);
        }

        out
    }

    /// Result payload must be present on success, and a result that reports
    /// errors cannot also claim to have passed.
    fn envelope(&mut self, obj: &Map<String, Value>, absent_payload: Vec<FieldPath>, path: &FieldPath) {
        let errors_reported = obj
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty());

        if !errors_reported {
            for field_path in absent_payload {
                self.reject(field_path, Violation::Missing, None);
            }
            return;
        }

        if let Some(status) = obj.get("status") {
            if status.as_str() == Some("passed") {
                self.reject(path.key("status"), Violation::PassedWithErrors, Some(status));
            }
        }
    }

    fn field(&mut self, field: &FieldDef, value: &Value, path: &FieldPath) -> Option<Value> {
        match field.kind {
            Kind::Integer => {
                let n = self.integer(value, path)?;
                self.check_sign(field, n as f64, value, path)?;
                Some(Value::from(n))
            }
            Kind::Float => {
                let Some(n) = value.as_f64() else {
                    self.wrong_type(path, "number", value);
                    return None;
                };
                self.check_sign(field, n, value, path)?;
                Some(Value::from(self.round(field.normalizer, n)))
            }
            Kind::Boolean => match value.as_bool() {
                Some(b) => Some(Value::Bool(b)),
                None => {
                    self.wrong_type(path, "boolean", value);
                    None
                }
            },
            Kind::String => {
                let Some(s) = value.as_str() else {
                    self.wrong_type(path, "string", value);
                    return None;
                };
                self.string(field, s, value, path)
            }
            Kind::Timestamp => self.timestamp(field, value, path),
            Kind::Object(def) => match value.as_object() {
                Some(obj) => Some(Value::Object(self.object(def, obj, path))),
                None => {
                    self.wrong_type(path, "object", value);
                    None
                }
            },
            Kind::ObjectList(def) => {
                let items = self.array(value, path)?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = path.index(i);
                    match item {
                        Value::Object(obj) => out.push(Value::Object(self.object(def, obj, &item_path))),
                        Value::Null => self.reject(item_path, Violation::Null, Some(item)),
                        other => self.wrong_type(&item_path, "object", other),
                    }
                }
                Some(Value::Array(out))
            }
            Kind::IntegerList => {
                let items = self.array(value, path)?;
                let out = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| self.integer(item, &path.index(i)))
                    .map(Value::from)
                    .collect();
                Some(Value::Array(out))
            }
        }
    }

    fn array<'v>(&mut self, value: &'v Value, path: &FieldPath) -> Option<&'v Vec<Value>> {
        let items = value.as_array();
        if items.is_none() {
            self.wrong_type(path, "array", value);
        }
        items
    }

    fn integer(&mut self, value: &Value, path: &FieldPath) -> Option<i64> {
        if let Some(n) = value.as_i64() {
            return Some(n);
        }
        if value.is_u64() {
            self.reject(path.clone(), Violation::IntegerOutOfRange, Some(value));
        } else {
            self.wrong_type(path, "integer", value);
        }
        None
    }

    fn check_sign(&mut self, field: &FieldDef, n: f64, value: &Value, path: &FieldPath) -> Option<()> {
        let violation = match field.constraint {
            Some(Constraint::Positive) if n <= 0.0 => Violation::NotPositive,
            Some(Constraint::NonNegative) if n < 0.0 => Violation::Negative,
            _ => return Some(()),
        };
        self.reject(path.clone(), violation, Some(value));
        None
    }

    fn round(&self, normalizer: Option<Normalizer>, n: f64) -> f64 {
        let precision = &self.policy.precision;
        match normalizer {
            Some(Normalizer::Length) => round_to_digits(n, precision.length_digits()),
            Some(Normalizer::Angle) => round_to_digits(n, precision.angle_digits()),
            Some(Normalizer::CanonicalUtc) | None => n,
        }
    }

    fn string(&mut self, field: &FieldDef, s: &str, value: &Value, path: &FieldPath) -> Option<Value> {
        match field.constraint {
            Some(Constraint::MinLength(min)) if s.chars().count() < min => {
                self.reject(path.clone(), Violation::TooShort { min }, Some(value));
                None
            }
            Some(Constraint::OneOf(allowed)) if !allowed.iter().any(|a| *a == s) => {
                self.reject(path.clone(), Violation::NotOneOf { allowed }, Some(value));
                None
            }
            Some(Constraint::FrameCode) if self.policy.enforce_frame_codes => {
                match s.parse::<FrameCode>() {
                    Ok(code) => Some(Value::String(code.as_ref().to_string())),
                    Err(_) => {
                        self.reject(path.clone(), Violation::UnknownFrame, Some(value));
                        None
                    }
                }
            }
            _ => Some(Value::String(s.to_string())),
        }
    }

    fn timestamp(&mut self, field: &FieldDef, value: &Value, path: &FieldPath) -> Option<Value> {
        let Some(s) = value.as_str() else {
            self.wrong_type(path, "timestamp", value);
            return None;
        };
        let Some(parsed) = parse_timestamp(s) else {
            self.reject(path.clone(), Violation::InvalidTimestamp, Some(value));
            return None;
        };
        let utc = match field.normalizer {
            Some(Normalizer::CanonicalUtc) => to_canonical_utc(&parsed),
            _ => to_instant_utc(&parsed),
        };
        Some(Value::String(utc.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

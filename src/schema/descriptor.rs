//! Static schema descriptors.
//!
//! Every contract type owns one `SchemaDef`, built at compile time. Field
//! normalizers are registered here by name rather than discovered at runtime.

/// Primitive shape a field must have on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Integer,
    /// Any JSON number; integers are widened.
    Float,
    String,
    Boolean,
    /// RFC 3339 text, or ISO 8601 without an offset (read as UTC).
    Timestamp,
    Object(&'static SchemaDef),
    ObjectList(&'static SchemaDef),
    IntegerList,
}

impl Kind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Float => "number",
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Timestamp => "timestamp",
            Kind::Object(_) => "object",
            Kind::ObjectList(_) | Kind::IntegerList => "array",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// May be absent or null.
    Optional,
    /// May be absent (the typed default applies) but not null.
    Defaulted,
    /// Result payload: required unless the envelope carries errors.
    OnSuccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Positive,
    NonNegative,
    MinLength(usize),
    /// String must be one of the listed literals.
    OneOf(&'static [&'static str]),
    /// One of the known reference frame codes, when the policy enforces it.
    FrameCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    Length,
    Angle,
    CanonicalUtc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: Kind,
    pub presence: Presence,
    pub constraint: Option<Constraint>,
    pub normalizer: Option<Normalizer>,
}

impl FieldDef {
    const fn new(name: &'static str, kind: Kind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            constraint: None,
            normalizer: None,
        }
    }

    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::Required)
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::Optional)
    }

    pub const fn defaulted(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::Defaulted)
    }

    pub const fn on_success(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::OnSuccess)
    }

    pub const fn positive(self) -> Self {
        Self {
            constraint: Some(Constraint::Positive),
            ..self
        }
    }

    pub const fn non_negative(self) -> Self {
        Self {
            constraint: Some(Constraint::NonNegative),
            ..self
        }
    }

    pub const fn min_length(self, min: usize) -> Self {
        Self {
            constraint: Some(Constraint::MinLength(min)),
            ..self
        }
    }

    pub const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self {
            constraint: Some(Constraint::OneOf(allowed)),
            ..self
        }
    }

    pub const fn frame_code(self) -> Self {
        Self {
            constraint: Some(Constraint::FrameCode),
            ..self
        }
    }

    pub const fn length(self) -> Self {
        Self {
            normalizer: Some(Normalizer::Length),
            ..self
        }
    }

    pub const fn angle(self) -> Self {
        Self {
            normalizer: Some(Normalizer::Angle),
            ..self
        }
    }

    pub const fn canonical_utc(self) -> Self {
        Self {
            normalizer: Some(Normalizer::CanonicalUtc),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Entity,
    Request,
    /// Carries `errors` and gets the envelope cross-field checks.
    Result,
}

#[derive(Debug, PartialEq)]
pub struct SchemaDef {
    pub name: &'static str,
    pub role: Role,
    pub fields: &'static [FieldDef],
}

impl SchemaDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Wire shape of one entry in a result's `errors` list.
pub const ERROR_DESCRIPTOR: SchemaDef = SchemaDef {
    name: "ErrorDescriptor",
    role: Role::Entity,
    fields: &[
        FieldDef::required("field", Kind::String),
        FieldDef::required("message", Kind::String),
    ],
};

/// The `errors` field shared by every result schema.
pub const ERRORS_FIELD: FieldDef = FieldDef::optional("errors", Kind::ObjectList(&ERROR_DESCRIPTOR));

/// The `token` field shared by every request schema.
pub const TOKEN_FIELD: FieldDef = FieldDef::required("token", Kind::String);

/// Implemented by every contract type; ties the typed value to its descriptor.
pub trait Schema: serde::Serialize + serde::de::DeserializeOwned {
    fn schema() -> &'static SchemaDef;
}

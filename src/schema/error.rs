use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::rpc::ErrorDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a field inside a document, e.g. `sbis[2].status_vector.x`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(name.to_string()));
        Self(segments)
    }

    pub fn index(&self, i: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(i));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("field required")]
    Missing,
    #[error("null is not an allowed value")]
    Null,
    #[error("expected {expected}, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("integer out of range")]
    IntegerOutOfRange,
    #[error("not a valid timestamp")]
    InvalidTimestamp,
    #[error("must be greater than 0")]
    NotPositive,
    #[error("must be greater than or equal to 0")]
    Negative,
    #[error("must contain at least {min} character(s)")]
    TooShort { min: usize },
    #[error("must be one of: {}", .allowed.join(", "))]
    NotOneOf { allowed: &'static [&'static str] },
    #[error("unknown reference frame code")]
    UnknownFrame,
    #[error("status must not be \"passed\" while errors are reported")]
    PassedWithErrors,
    #[error("malformed document: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub path: FieldPath,
    pub violation: Violation,
    /// Raw offending value, when there was one.
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(path: FieldPath, violation: Violation, value: Option<&Value>) -> Self {
        Self {
            path,
            violation,
            value: value.cloned(),
        }
    }

    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor::new(self.path.to_string(), self.violation.to_string())
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.violation)?;
        if let Some(value) = &self.value {
            write!(f, " (got {})", value)?;
        }
        Ok(())
    }
}

/// Every offending field of one document, collected in a single pass.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{schema}: {} invalid field(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationFailure {
    pub schema: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn paths(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.path.to_string()).collect()
    }

    pub fn descriptors(&self) -> Vec<ErrorDescriptor> {
        self.errors.iter().map(FieldError::descriptor).collect()
    }

    pub fn find(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path.to_string() == path)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A typed property value.
///
/// A stored property row populates exactly one of the three value columns;
/// the populated variant is the discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Double(f64),
    String(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        if let Self::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        if let Self::Double(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Int(_) => PropertyType::Int,
            Self::Double(_) => PropertyType::Double,
            Self::String(_) => PropertyType::String,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &'a str) -> Self {
        Self::String(v.to_owned())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("type kind {value} is undefined")]
    UndefinedTypeKind { value: i64 },

    #[error("property type {value} is undefined")]
    UndefinedPropertyType { value: i64 },

    #[error("artifact state {value} is undefined")]
    UndefinedArtifactState { value: i64 },

    #[error("execution state {value} is undefined")]
    UndefinedExecutionState { value: i64 },
}

/// The kind of a Type row; also selects the entity table a type id governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Execution = 0,
    Artifact = 1,
    Context = 2,
}

impl TypeKind {
    pub fn from_i64(v: i64) -> Result<Self, ConvertError> {
        match v {
            0 => Ok(Self::Execution),
            1 => Ok(Self::Artifact),
            2 => Ok(Self::Context),
            _ => Err(ConvertError::UndefinedTypeKind { value: v }),
        }
    }

    pub fn item_table_name(self) -> &'static str {
        match self {
            Self::Execution => "Execution",
            Self::Artifact => "Artifact",
            Self::Context => "Context",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Execution => write!(f, "execution"),
            Self::Artifact => write!(f, "artifact"),
            Self::Context => write!(f, "context"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Unknown = 0,
    Int = 1,
    Double = 2,
    String = 3,
}

impl PropertyType {
    pub fn from_i64(v: i64) -> Result<Self, ConvertError> {
        match v {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Int),
            2 => Ok(Self::Double),
            3 => Ok(Self::String),
            _ => Err(ConvertError::UndefinedPropertyType { value: v }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactState {
    Unknown = 0,
    Pending = 1,
    Live = 2,
    MarkedForDeletion = 3,
    Deleted = 4,
}

impl ArtifactState {
    pub fn from_i64(v: i64) -> Result<Self, ConvertError> {
        match v {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Live),
            3 => Ok(Self::MarkedForDeletion),
            4 => Ok(Self::Deleted),
            _ => Err(ConvertError::UndefinedArtifactState { value: v }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    Unknown = 0,
    New = 1,
    Running = 2,
    Complete = 3,
    Failed = 4,
    Cached = 5,
    Canceled = 6,
}

impl ExecutionState {
    pub fn from_i64(v: i64) -> Result<Self, ConvertError> {
        match v {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::New),
            2 => Ok(Self::Running),
            3 => Ok(Self::Complete),
            4 => Ok(Self::Failed),
            5 => Ok(Self::Cached),
            6 => Ok(Self::Canceled),
            _ => Err(ConvertError::UndefinedExecutionState { value: v }),
        }
    }
}

/// The role an artifact plays for an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Unknown = 0,
    DeclaredOutput = 1,
    DeclaredInput = 2,
    Input = 3,
    Output = 4,
    InternalInput = 5,
    InternalOutput = 6,
}

/// One step of an event path: either a positional index or a named key.
#[derive(Debug, Clone, PartialEq)]
pub enum EventStep {
    Index(i64),
    Key(String),
}

/// Structural schema document attached to an execution type's input or
/// output signature. Stored as its JSON serialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArtifactStructType {
    /// A single artifact type, referenced by name.
    Simple(String),
    Union(Vec<ArtifactStructType>),
    Intersection(Vec<ArtifactStructType>),
    List(Box<ArtifactStructType>),
    None,
    Any,
    Tuple(Vec<ArtifactStructType>),
    Dict(BTreeMap<String, ArtifactStructType>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_values_are_stable() {
        assert_eq!(TypeKind::Execution as i64, 0);
        assert_eq!(TypeKind::Artifact as i64, 1);
        assert_eq!(TypeKind::Context as i64, 2);
        assert_eq!(PropertyType::String as i64, 3);
        assert_eq!(ArtifactState::Deleted as i64, 4);
        assert_eq!(ExecutionState::Canceled as i64, 6);
    }

    #[test]
    fn value_discriminates() {
        assert_eq!(Value::from(3i64).property_type(), PropertyType::Int);
        assert_eq!(Value::from(0.25).property_type(), PropertyType::Double);
        assert_eq!(Value::from("s").property_type(), PropertyType::String);
        assert_eq!(Value::from("s").as_string(), Some("s"));
        assert_eq!(Value::from("s").as_int(), None);
    }
}

use std::fmt;

/// Validation failures raised by registry operations.
///
/// Every variant is detected before any state is touched, so a failed
/// call leaves the registry exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// A flag with this id is already registered.
    Duplicate { id: String },
    /// A declared parent has not been registered yet.
    UnknownParent { id: String, parent: String },
    /// No flag with this id is registered.
    Unknown { id: String },
    /// Flag ids must be non-empty.
    EmptyId,
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate { id } => write!(f, "flag {id:?} is already registered"),
            Self::UnknownParent { id, parent } => {
                write!(f, "flag {id:?} declares unknown parent {parent:?}")
            }
            Self::Unknown { id } => write!(f, "unknown flag {id:?}"),
            Self::EmptyId => write!(f, "flag id must be non-empty"),
        }
    }
}

impl std::error::Error for FlagError {}

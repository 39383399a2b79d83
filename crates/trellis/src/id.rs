use compact_str::CompactString;
use std::borrow::Borrow;

use crate::FlagError;

/// Textual flag identifier, non-empty by construction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlagId(CompactString);

impl FlagId {
    pub fn new(id: impl Into<CompactString>) -> Result<Self, FlagError> {
        let id = id.into();
        if id.is_empty() {
            return Err(FlagError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Lets id-keyed maps and sets answer plain `&str` lookups.
impl Borrow<str> for FlagId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for FlagId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_the_empty_id() {
        assert_eq!(FlagId::new(""), Err(FlagError::EmptyId));
    }

    #[test]
    fn keeps_the_source_text() {
        let id = FlagId::new("face_detect").unwrap();
        assert_eq!(id.as_str(), "face_detect");
    }
}

use crate::FlagId;

/// One flag as it stood when the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSnapshot {
    pub id: FlagId,
    pub value: bool,
    /// Declared parents, in declaration order.
    pub parents: Vec<FlagId>,
    /// Flags that declared this one as a parent, in registration order.
    pub children: Vec<FlagId>,
}

/// All flags at one point in time, in registration order.
///
/// Owned data with no ties to the registry it came from, so it can move
/// across threads or be serialized by a caller that replays registrations
/// at the next startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub flags: Vec<FlagSnapshot>,
}

impl RegistrySnapshot {
    /// Looks up one flag by id.
    pub fn flag(&self, id: &str) -> Option<&FlagSnapshot> {
        self.flags.iter().find(|flag| flag.id.as_str() == id)
    }

    /// Ids of the flags that were on.
    pub fn enabled(&self) -> impl Iterator<Item = &FlagId> {
        self.flags.iter().filter(|flag| flag.value).map(|flag| &flag.id)
    }
}

#[cfg(test)]
mod tests {
    use crate::FlagRegistry;

    #[test]
    fn lookup_and_enabled_views() {
        let mut flags = FlagRegistry::new();
        flags.register("camera", true, &[]).unwrap();
        flags.register("face_detect", false, &["camera"]).unwrap();

        let snapshot = flags.snapshot();
        assert!(!snapshot.flag("face_detect").unwrap().value);
        assert!(snapshot.flag("ghost").is_none());

        let on: Vec<&str> = snapshot.enabled().map(|id| id.as_str()).collect();
        assert_eq!(on, ["camera"]);
    }
}

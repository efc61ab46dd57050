use std::fmt;

/// Declares an integer record identifier.
///
/// Ids are assigned by the store on insert and start at 1; `0` is the unset
/// value carried by records that were never wired to a parent.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u64);

        impl $name {
            /// Placeholder for a reference that has not been assigned yet.
            pub const UNSET: Self = Self(0);

            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }

            #[inline]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

record_id!(
    /// Identity of a user on the host platform.
    UserId,
    "user"
);
record_id!(CharacterId, "character");
record_id!(BattleId, "battle");
record_id!(MonsterId, "monster");
record_id!(ItemId, "item");
record_id!(
    /// One row of a character's inventory.
    InventoryItemId,
    "inventory"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        assert_eq!(BattleId(7).to_string(), "battle#7");
        assert_eq!(UserId(3).to_string(), "user#3");
    }

    #[test]
    fn zero_is_unset() {
        assert!(CharacterId::UNSET.is_unset());
        assert!(CharacterId::default().is_unset());
        assert!(!CharacterId(1).is_unset());
    }
}

use crate::combat::apply_damage;
use crate::events::{EventError, XpGained};
use crate::progression::LevelTable;

use super::common::{CharacterId, UserId};

/// A character that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewCharacter {
    pub userid: UserId,
    pub xp: u64,
    pub hp: u32,
    pub timecreated: i64,
}

impl NewCharacter {
    /// A fresh level-1 character at full health.
    pub fn for_user(userid: UserId, timecreated: i64) -> Self {
        Self {
            userid,
            xp: 0,
            hp: LevelTable::max_hp_from_level(1),
            timecreated,
        }
    }

    pub fn into_persisted(self, id: CharacterId) -> Character {
        Character {
            id,
            userid: self.userid,
            xp: self.xp,
            hp: self.hp,
            timecreated: self.timecreated,
        }
    }
}

/// A user's persistent avatar.
///
/// XP only ever grows and HP stays within `0..=max_hp(level)`. Both fields
/// are private so that every change goes through the operations below.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    id: CharacterId,
    userid: UserId,
    xp: u64,
    hp: u32,
    timecreated: i64,
}

impl Character {
    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn userid(&self) -> UserId {
        self.userid
    }

    #[inline]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn timecreated(&self) -> i64 {
        self.timecreated
    }

    pub fn level(&self, levels: &LevelTable) -> u32 {
        levels.level_from_xp(self.xp)
    }

    pub fn max_hp(&self, levels: &LevelTable) -> u32 {
        LevelTable::max_hp_from_level(self.level(levels))
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Subtract hitpoints, clamping at zero.
    ///
    /// Does not check for death; callers inspect [`Character::is_dead`].
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = apply_damage(self.hp, amount);
    }

    /// Heal to the maximum for the current level.
    pub fn restore_max_hp(&mut self, levels: &LevelTable) {
        self.hp = self.max_hp(levels);
    }

    /// Add XP, fully healing on level-up.
    ///
    /// Returns the validated `XpGained` payload, or `None` for a zero grant.
    /// The record is left untouched when the payload fails validation.
    pub fn gain_xp(
        &mut self,
        amount: u64,
        levels: &LevelTable,
    ) -> Result<Option<XpGained>, EventError> {
        if amount == 0 {
            return Ok(None);
        }

        let old_level = self.level(levels);
        let new_xp = self.xp.saturating_add(amount);
        let new_level = levels.level_from_xp(new_xp);
        let event = XpGained::new(self.clone(), old_level, new_level, amount, new_xp)?;

        self.xp = new_xp;
        if event.leveled_up {
            self.hp = LevelTable::max_hp_from_level(new_level);
        }

        Ok(Some(event))
    }
}

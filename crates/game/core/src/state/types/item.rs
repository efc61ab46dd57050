use crate::combat::StackLoss;
use crate::state::StateError;

use super::common::{CharacterId, InventoryItemId, ItemId};

/// How rare an item is.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    VeryCommon,
    #[default]
    Common,
    Uncommon,
    Rare,
    UltraRare,
    Legendary,
}

/// What kind of thing an item is.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum ItemType {
    Food,
    Potion,
    Weapon,
    Tool,
    #[default]
    Other,
}

/// Item definition that has not been persisted yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewItemDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub item_type: ItemType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
}

impl NewItemDefinition {
    pub fn into_persisted(self, id: ItemId) -> ItemDefinition {
        ItemDefinition {
            id,
            name: self.name,
            rarity: self.rarity,
            item_type: self.item_type,
            stackable: self.stackable,
        }
    }
}

/// Administrator-managed item reference data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub item_type: ItemType,
    pub stackable: bool,
}

/// Inventory row that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewInventoryItem {
    pub item_id: ItemId,
    pub character_id: CharacterId,
    pub stack: u32,
    pub timecreated: i64,
}

impl NewInventoryItem {
    /// A single unit of `item_id` for `character_id`.
    pub fn single(item_id: ItemId, character_id: CharacterId, timecreated: i64) -> Self {
        Self {
            item_id,
            character_id,
            stack: 1,
            timecreated,
        }
    }

    pub fn into_persisted(self, id: InventoryItemId) -> Result<InventoryItem, StateError> {
        if self.stack == 0 {
            return Err(StateError::InvalidStack(self.stack));
        }
        Ok(InventoryItem {
            id,
            item_id: self.item_id,
            character_id: self.character_id,
            stack: self.stack,
            timecreated: self.timecreated,
        })
    }
}

/// Units of one item held by one character. `stack` is at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    id: InventoryItemId,
    item_id: ItemId,
    character_id: CharacterId,
    #[cfg_attr(feature = "serde", serde(default = "single_unit"))]
    stack: u32,
    timecreated: i64,
}

#[cfg(feature = "serde")]
fn single_unit() -> u32 {
    1
}

impl InventoryItem {
    #[inline]
    pub fn id(&self) -> InventoryItemId {
        self.id
    }

    #[inline]
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    #[inline]
    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    #[inline]
    pub fn stack(&self) -> u32 {
        self.stack
    }

    #[inline]
    pub fn timecreated(&self) -> i64 {
        self.timecreated
    }

    pub fn increment_stack(&mut self) {
        self.stack = self.stack.saturating_add(1);
    }

    /// Work out what a defeat costs this row; see [`StackLoss::for_stack`].
    pub fn defeat_loss(&self) -> StackLoss {
        StackLoss::for_stack(self.stack)
    }

    /// Apply a partial loss. A [`StackLoss::Remove`] must be handled by
    /// deleting the row instead.
    pub fn apply_loss(&mut self, loss: StackLoss) -> Result<(), StateError> {
        match loss {
            StackLoss::Reduce { remaining, .. } if remaining > 0 => {
                self.stack = remaining;
                Ok(())
            }
            StackLoss::Reduce { remaining, .. } => Err(StateError::InvalidStack(remaining)),
            StackLoss::Remove => Err(StateError::InvalidStack(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rarity_and_type_use_platform_names() {
        assert_eq!(Rarity::VeryCommon.to_string(), "verycommon");
        assert_eq!(Rarity::from_str("ultrarare"), Ok(Rarity::UltraRare));
        assert_eq!(ItemType::from_str("potion"), Ok(ItemType::Potion));
        assert!(ItemType::from_str("armor").is_err());
        assert_eq!(Rarity::default(), Rarity::Common);
    }

    #[test]
    fn zero_stack_is_rejected() {
        let mut new = NewInventoryItem::single(ItemId(1), CharacterId(1), 0);
        new.stack = 0;
        assert_eq!(
            new.into_persisted(InventoryItemId(1)),
            Err(StateError::InvalidStack(0))
        );
    }

    #[test]
    fn loss_reduces_stack() {
        let mut row = NewInventoryItem {
            item_id: ItemId(4),
            character_id: CharacterId(2),
            stack: 10,
            timecreated: 0,
        }
        .into_persisted(InventoryItemId(8))
        .unwrap();

        let loss = row.defeat_loss();
        row.apply_loss(loss).unwrap();
        assert_eq!(row.stack(), 2);

        assert!(row.apply_loss(StackLoss::Remove).is_err());
        assert_eq!(row.stack(), 2);
    }
}

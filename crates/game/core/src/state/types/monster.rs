use crate::state::StateError;

use super::common::MonsterId;

/// Monster template that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewMonsterTemplate {
    pub name: String,
    pub max_hp: u32,
    pub level: u32,
}

impl NewMonsterTemplate {
    pub fn new(name: impl Into<String>, max_hp: u32, level: u32) -> Result<Self, StateError> {
        let template = Self {
            name: name.into(),
            max_hp,
            level,
        };
        template.validate()?;
        Ok(template)
    }

    pub fn validate(&self) -> Result<(), StateError> {
        validate_stats(self.max_hp, self.level)
    }

    pub fn into_persisted(self, id: MonsterId) -> MonsterTemplate {
        MonsterTemplate {
            id,
            name: self.name,
            max_hp: self.max_hp,
            level: self.level,
        }
    }
}

impl Default for NewMonsterTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_hp: 100,
            level: 3,
        }
    }
}

/// Reference definition battles spawn monsters from.
///
/// Battles copy `max_hp` at creation, so editing a template never affects a
/// fight in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: MonsterId,
    pub name: String,
    pub max_hp: u32,
    pub level: u32,
}

impl MonsterTemplate {
    pub fn validate(&self) -> Result<(), StateError> {
        validate_stats(self.max_hp, self.level)
    }
}

fn validate_stats(max_hp: u32, level: u32) -> Result<(), StateError> {
    if max_hp == 0 || level == 0 {
        return Err(StateError::InvalidMonsterTemplate { max_hp, level });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template() {
        let template = NewMonsterTemplate::default();
        assert_eq!(template.name, "");
        assert_eq!(template.max_hp, 100);
        assert_eq!(template.level, 3);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn rejects_zero_stats() {
        assert_eq!(
            NewMonsterTemplate::new("Ghost", 0, 2),
            Err(StateError::InvalidMonsterTemplate { max_hp: 0, level: 2 })
        );
        assert!(NewMonsterTemplate::new("Slime", 10, 0).is_err());
        assert!(NewMonsterTemplate::new("Imp", 200, 5).is_ok());
    }
}

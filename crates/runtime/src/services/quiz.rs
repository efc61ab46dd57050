//! XP and item rewards for quiz activity on the host platform.

use rpg_core::{Character, InventoryItem, XpGained};
use serde::{Deserialize, Serialize};

use super::character::grant_xp;
use super::reward::grant_random_item;
use crate::api::Result;
use crate::context::RpgContext;

/// Flat XP rates for quiz activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRewards {
    /// XP per question slot saved while the attempt is in progress.
    pub xp_per_answer: u64,
    /// XP per correctly answered question on submission.
    pub xp_per_correct: u64,
}

impl QuizRewards {
    pub const DEFAULT_XP_PER_ANSWER: u64 = 4;
    pub const DEFAULT_XP_PER_CORRECT: u64 = 19;

    /// An in-progress attempt saved `answered_slots` questions.
    pub fn attempt_updated(
        &self,
        ctx: &RpgContext,
        character: &mut Character,
        answered_slots: usize,
    ) -> Result<Option<XpGained>> {
        let xp = self.xp_per_answer.saturating_mul(answered_slots as u64);
        grant_xp(ctx, character, xp)
    }

    /// An attempt was submitted; `answers[i]` is whether question `i` was
    /// answered correctly.
    ///
    /// An attempt with no wrong answer also earns a random item; an empty
    /// attempt counts as perfect.
    pub fn attempt_submitted(
        &self,
        ctx: &RpgContext,
        character: &mut Character,
        answers: &[bool],
    ) -> Result<QuizOutcome> {
        let correct = answers.iter().filter(|&&correct| correct).count();
        let xp = self.xp_per_correct.saturating_mul(correct as u64);
        let xp_event = grant_xp(ctx, character, xp)?;

        let item = if correct == answers.len() {
            grant_random_item(ctx, character)?
        } else {
            None
        };

        Ok(QuizOutcome {
            xp_gained: xp,
            xp_event,
            item,
        })
    }
}

impl Default for QuizRewards {
    fn default() -> Self {
        Self {
            xp_per_answer: Self::DEFAULT_XP_PER_ANSWER,
            xp_per_correct: Self::DEFAULT_XP_PER_CORRECT,
        }
    }
}

/// What a submitted attempt earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub xp_gained: u64,
    pub xp_event: Option<XpGained>,
    pub item: Option<InventoryItem>,
}

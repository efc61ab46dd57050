//! Quiz callbacks as the platform would fire them.

use anyhow::{Result, ensure};
use clap::Parser;
use rpg_core::UserId;
use rpg_runtime::Runtime;
use serde::Serialize;

use super::{OutputFormat, emit};

/// Report question slots saved in an unfinished quiz attempt
#[derive(Parser)]
pub struct QuizUpdate {
    #[arg(value_name = "USERID")]
    userid: u64,

    /// Number of question slots answered so far
    #[arg(value_name = "SLOTS")]
    slots: usize,
}

impl QuizUpdate {
    pub fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let event = runtime.quiz_attempt_updated(UserId(self.userid), self.slots)?;
        emit(format, &event, || match &event {
            Some(event) => vec![format!(
                "+{} XP (level {} -> {})",
                event.xp_gained, event.old_level, event.new_level
            )],
            None => vec!["No XP earned".to_owned()],
        })
    }
}

/// Report a submitted quiz attempt
#[derive(Parser)]
pub struct QuizSubmit {
    #[arg(value_name = "USERID")]
    userid: u64,

    /// Correctly answered questions
    #[arg(value_name = "CORRECT")]
    correct: usize,

    /// Questions in the attempt
    #[arg(value_name = "TOTAL")]
    total: usize,
}

#[derive(Serialize)]
struct SubmitSummary {
    xp_gained: u64,
    leveled_up: bool,
    item: Option<rpg_core::ItemId>,
}

impl QuizSubmit {
    pub fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        ensure!(
            self.correct <= self.total,
            "{} correct answers out of {} questions",
            self.correct,
            self.total
        );

        let answers: Vec<bool> = (0..self.total).map(|i| i < self.correct).collect();
        let outcome = runtime.quiz_attempt_submitted(UserId(self.userid), &answers)?;
        let summary = SubmitSummary {
            xp_gained: outcome.xp_gained,
            leveled_up: outcome.xp_event.as_ref().is_some_and(|e| e.leveled_up),
            item: outcome.item.as_ref().map(|row| row.item_id()),
        };

        emit(format, &summary, || {
            let mut lines = vec![format!("+{} XP", summary.xp_gained)];
            if summary.leveled_up {
                lines.push("Level up!".to_owned());
            }
            if let Some(item) = summary.item {
                lines.push(format!("Found {item}"));
            }
            lines
        })
    }
}

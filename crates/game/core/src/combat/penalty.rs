//! Inventory loss applied to the loser of a battle.

/// Outcome of a defeat for one inventory row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackLoss {
    /// Keep the row with fewer units.
    Reduce { lost: u32, remaining: u32 },
    /// Drop the row entirely.
    Remove,
}

impl StackLoss {
    /// Units lost from a stack of `stack`.
    ///
    /// # Formula
    ///
    /// ```text
    /// stack <= 1:  remove the row
    /// otherwise:   lost      = min(stack - 1, floor(stack * 0.8))
    ///              remaining = stack - lost            (always >= 1)
    /// ```
    pub fn for_stack(stack: u32) -> Self {
        if stack <= 1 {
            return Self::Remove;
        }

        let four_fifths = (u64::from(stack) * 4 / 5) as u32;
        let lost = (stack - 1).min(four_fifths);
        Self::Reduce {
            lost,
            remaining: stack - lost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_units_are_removed() {
        assert_eq!(StackLoss::for_stack(1), StackLoss::Remove);
        assert_eq!(StackLoss::for_stack(0), StackLoss::Remove);
    }

    #[test]
    fn ten_units_drop_to_two() {
        assert_eq!(
            StackLoss::for_stack(10),
            StackLoss::Reduce {
                lost: 8,
                remaining: 2
            }
        );
    }

    #[test]
    fn small_stacks_keep_one_unit() {
        assert_eq!(
            StackLoss::for_stack(2),
            StackLoss::Reduce {
                lost: 1,
                remaining: 1
            }
        );
        assert_eq!(
            StackLoss::for_stack(3),
            StackLoss::Reduce {
                lost: 2,
                remaining: 1
            }
        );
    }

    #[test]
    fn remaining_never_below_one() {
        for stack in 2..500 {
            match StackLoss::for_stack(stack) {
                StackLoss::Reduce { lost, remaining } => {
                    assert!(remaining >= 1);
                    assert!(lost <= stack - 1);
                    assert_eq!(lost + remaining, stack);
                }
                StackLoss::Remove => panic!("stack {stack} should be reduced"),
            }
        }
    }
}

//! Operating-system seeded [`RngOracle`].

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpg_core::RngOracle;

/// `StdRng` seeded from OS entropy, shared behind a mutex.
#[derive(Debug)]
pub struct OsRngOracle {
    inner: Mutex<StdRng>,
}

impl OsRngOracle {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl Default for OsRngOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl RngOracle for OsRngOracle {
    fn next_u32(&self) -> u32 {
        match self.inner.lock() {
            Ok(mut rng) => rng.r#gen(),
            Err(poisoned) => poisoned.into_inner().r#gen(),
        }
    }

    fn range(&self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        match self.inner.lock() {
            Ok(mut rng) => rng.gen_range(min..=max),
            Err(poisoned) => poisoned.into_inner().gen_range(min..=max),
        }
    }
}

//! Fixed-point traversal costs.
//!
//! Every cost in this subsystem is a multiple of a tenth of a step, so costs are
//! stored as integer tenths and compare exactly.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PathCost(u32);

impl PathCost {
    pub const ZERO: PathCost = PathCost(0);
    /// One step onto open ground.
    pub const STEP: PathCost = PathCost(10);
    /// Static weight of an edge entering a destructible obstacle.
    pub const DESTRUCTIBLE_EDGE: PathCost = PathCost(100);

    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    pub const fn from_steps(steps: u32) -> Self {
        Self(steps * 10)
    }

    pub const fn tenths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Add for PathCost {
    type Output = PathCost;

    fn add(self, rhs: PathCost) -> PathCost {
        PathCost(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for PathCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Cost of stepping into a destructible obstacle with `health` left: one step plus a
/// tenth per attack tick needed to clear it.
pub fn destructible_step_cost(health: i32, enemy_attack: i32) -> PathCost {
    let health = health.max(0) as u32;
    let attack = enemy_attack.max(1) as u32;
    PathCost::STEP + PathCost(health.div_ceil(attack))
}

//! Drip step policy
//!
//! Per-campaign delays, in days, for steps 1 through [`MAX_STEPS`]. The delay
//! for step `n` is how long to wait after step `n - 1` went out (or after
//! enrollment, for step 1) before step `n` is due.

use serde::{Deserialize, Serialize};

/// Number of steps in every drip sequence
pub const MAX_STEPS: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct StepPolicy(Vec<u32>);

impl StepPolicy {
    pub fn new(delays: Vec<u32>) -> Result<Self, StepPolicyError> {
        if delays.is_empty() {
            return Err(StepPolicyError::Empty);
        }
        if delays.len() > usize::from(MAX_STEPS) {
            return Err(StepPolicyError::TooManySteps(delays.len()));
        }
        Ok(Self(delays))
    }

    /// Delay before 1-based `step`, if the policy defines that step
    pub fn delay_for(&self, step: u8) -> Option<u32> {
        let index = usize::from(step).checked_sub(1)?;
        self.0.get(index).copied()
    }

    pub fn delays(&self) -> &[u32] {
        &self.0
    }

    pub fn steps(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<Vec<u32>> for StepPolicy {
    type Error = StepPolicyError;

    fn try_from(delays: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(delays)
    }
}

impl From<StepPolicy> for Vec<u32> {
    fn from(policy: StepPolicy) -> Self {
        policy.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepPolicyError {
    #[error("a campaign needs at least one step delay")]
    Empty,

    #[error("{0} step delays given, at most {MAX_STEPS} allowed")]
    TooManySteps(usize),
}

//! Recharge state machine.
//!
//! ```text
//! Idle -> Validating -> Rejected
//!                    -> Failed
//!                    -> Debiting -> Persisted
//!                                -> Failed
//! Rejected | Persisted | Failed -> Idle
//! ```

use crate::domain::transaction::Transaction;
use crate::error::DomainError;

/// Where a recharge submission currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RechargeState {
    /// Waiting for input
    #[default]
    Idle,
    /// Checking amount, mobile number and balance
    Validating,
    /// Validation failed; nothing was written
    Rejected(DomainError),
    /// Writing balance and transaction locally, then pushing to the remote
    Debiting,
    /// Local commit done; `synced` is the remote push outcome
    Persisted {
        transaction: Transaction,
        synced: bool,
    },
    /// A local read or write failed; earlier writes were not rolled back
    Failed(String),
}

impl RechargeState {
    /// Short name used in logs and transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Rejected(_) => "rejected",
            Self::Debiting => "debiting",
            Self::Persisted { .. } => "persisted",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns true for states that end a submission.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected(_) | Self::Persisted { .. } | Self::Failed(_)
        )
    }

    /// Returns true if moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: &RechargeState) -> bool {
        use RechargeState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Rejected(_))
                | (Validating, Debiting)
                | (Validating, Failed(_))
                | (Debiting, Persisted { .. })
                | (Debiting, Failed(_))
                | (Rejected(_), Idle)
                | (Persisted { .. }, Idle)
                | (Failed(_), Idle)
        )
    }

    /// Moves to `next`, or reports the illegal transition.
    pub fn transition(self, next: RechargeState) -> Result<RechargeState, DomainError> {
        if self.can_transition_to(&next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidStateTransition {
                from: self.name(),
                to: next.name(),
            })
        }
    }

    /// Connection indicator derived from the last submission.
    ///
    /// `None` when the state says nothing about the remote endpoint.
    pub fn connection_status(&self) -> Option<bool> {
        match self {
            Self::Persisted { synced, .. } => Some(*synced),
            Self::Failed(_) => Some(false),
            _ => None,
        }
    }
}

//! # Phase State Machine
//!
//! The pure transition function of the custody pipeline. It owns no state: given the
//! current [`Phase`], the [`Role`] of whoever is acting and the [`Outcome`] they
//! report, it returns the next phase or the reason there is none.
//!
//! ## Pipeline
//!
//! ```text
//!            accept             accept               accept
//! Init ──────────────► Started ─────────► Completed ─────────► next stage ...
//!                       │   ▲
//!                reject │   │ accept (retry)
//!                       ▼   │
//!                       Failed
//! ```
//!
//! Extraction, Supply and Distribution have a `Failed` side state. Manufacturing and
//! Retail do not, so reject from those phases is an [`TransitionError::NoFailedCounterpart`].
//! `Sold` is absorbing.
//!
//! The same role both starts and completes its own stage; no second actor is needed.

use crate::model::{Phase, Role};
use thiserror::Error;

/// What the acting role reports about the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accept,
    Reject,
}

/// Reasons a transition does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("phase {0} is terminal")]
    Terminal(Phase),
    #[error("phase {phase} requires {required}, not {acting}")]
    WrongRole {
        phase: Phase,
        required: Role,
        acting: Role,
    },
    #[error("phase {0} has no failed counterpart")]
    NoFailedCounterpart(Phase),
}

/// The only role allowed to act on a product in `phase`, or `None` once sold.
pub fn required_role(phase: Phase) -> Option<Role> {
    match phase {
        Phase::Init | Phase::ExtractionStarted | Phase::ExtractionFailed => Some(Role::Provider),
        Phase::ExtractionCompleted | Phase::SupplyStarted | Phase::SupplyFailed => {
            Some(Role::Supplier)
        }
        Phase::SupplyCompleted | Phase::ManufacturingStarted => Some(Role::Manufacturer),
        Phase::ManufacturingCompleted | Phase::DistributionStarted | Phase::DistributionFailed => {
            Some(Role::Distributor)
        }
        Phase::DistributionCompleted | Phase::Retail => Some(Role::Retailer),
        Phase::Sold => None,
    }
}

fn accept(phase: Phase) -> Option<Phase> {
    let next = match phase {
        Phase::Init => Phase::ExtractionStarted,
        Phase::ExtractionStarted => Phase::ExtractionCompleted,
        Phase::ExtractionFailed => Phase::ExtractionStarted,
        Phase::ExtractionCompleted => Phase::SupplyStarted,
        Phase::SupplyStarted => Phase::SupplyCompleted,
        Phase::SupplyFailed => Phase::SupplyStarted,
        Phase::SupplyCompleted => Phase::ManufacturingStarted,
        Phase::ManufacturingStarted => Phase::ManufacturingCompleted,
        Phase::ManufacturingCompleted => Phase::DistributionStarted,
        Phase::DistributionStarted => Phase::DistributionCompleted,
        Phase::DistributionFailed => Phase::DistributionStarted,
        Phase::DistributionCompleted => Phase::Retail,
        Phase::Retail => Phase::Sold,
        Phase::Sold => return None,
    };
    Some(next)
}

fn reject(phase: Phase) -> Option<Phase> {
    match phase {
        Phase::ExtractionStarted => Some(Phase::ExtractionFailed),
        Phase::SupplyStarted => Some(Phase::SupplyFailed),
        Phase::DistributionStarted => Some(Phase::DistributionFailed),
        _ => None,
    }
}

/// Computes the phase that follows `current` when `acting` reports `outcome`.
///
/// Checks run in order: terminal phase, role, then the outcome table.
pub fn transition(
    current: Phase,
    acting: Role,
    outcome: Outcome,
) -> Result<Phase, TransitionError> {
    let required = required_role(current).ok_or(TransitionError::Terminal(current))?;
    if acting != required {
        return Err(TransitionError::WrongRole {
            phase: current,
            required,
            acting,
        });
    }
    match outcome {
        Outcome::Accept => accept(current).ok_or(TransitionError::Terminal(current)),
        Outcome::Reject => reject(current).ok_or(TransitionError::NoFailedCounterpart(current)),
    }
}

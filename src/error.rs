//! Error types for the custody ledger.

use crate::model::{ActorId, Phase, Principal, ProductId, Role};
use std::fmt::Display;
use thiserror::Error;

/// Who may perform an operation that a caller was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// Owner-only management operation.
    Owner,
    /// The role required by a product's current phase.
    Role(Role),
}

impl Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authority::Owner => f.write_str("owner"),
            Authority::Role(role) => write!(f, "{role}"),
        }
    }
}

/// The record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product(ProductId),
    Actor { role: Role, id: ActorId },
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Product(id) => write!(f, "{id}"),
            Resource::Actor { role, id } => write!(f, "{role} {id}"),
        }
    }
}

/// Errors that can occur during ledger operations.
///
/// Every failure is detected before any state is written, so receiving one of
/// these means the ledger is exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SupplyChainError {
    /// The caller is not the owner, or not the role the product's phase requires.
    #[error("{caller} lacks {required} authority")]
    Unauthorized {
        caller: Principal,
        required: Authority,
    },

    /// Unknown product, or unknown (role, id) actor pair.
    #[error("{0} not found")]
    NotFound(Resource),

    /// The principal is already registered, possibly under another role.
    #[error("{principal} is already registered as {existing}")]
    DuplicatePrincipal { principal: Principal, existing: Role },

    /// The role argument is not one of the five custody roles.
    #[error("invalid role: {0:?}")]
    InvalidRole(String),

    /// The product has been sold; no further transitions exist.
    #[error("{0} is sold and cannot change phase")]
    TerminalPhase(ProductId),

    /// Reject attempted from a phase that has no failed counterpart.
    #[error("{product} cannot be rejected from phase {phase}")]
    InvalidTransition { product: ProductId, phase: Phase },

    /// A required text field was empty.
    #[error("{field} must not be empty")]
    ValidationError { field: &'static str },

    /// The ledger task is gone or dropped the reply.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

impl SupplyChainError {
    /// Text suitable for showing to an end user.
    ///
    /// `Display` carries diagnostic detail (principals, internal ids) for logs.
    /// This normalizes each failure into a short, stable sentence instead.
    pub fn user_message(&self) -> String {
        match self {
            SupplyChainError::Unauthorized {
                required: Authority::Owner,
                ..
            } => "Only the owner can perform this operation.".to_string(),
            SupplyChainError::Unauthorized {
                required: Authority::Role(role),
                ..
            } => format!(
                "You don't have the right to modify the product at this stage (a {role} is required)."
            ),
            SupplyChainError::NotFound(Resource::Product(id)) => {
                format!("Product N{} does not exist.", id.0)
            }
            SupplyChainError::NotFound(Resource::Actor { role, id }) => {
                format!("{role} N{} does not exist.", id.0)
            }
            SupplyChainError::DuplicatePrincipal { existing, .. } => {
                format!("This account is already registered as a {existing}.")
            }
            SupplyChainError::InvalidRole(_) => format!(
                "Unknown role. Expected one of: {}.",
                Role::ALL.map(Role::as_str).join(", ")
            ),
            SupplyChainError::TerminalPhase(_) => {
                "This product has been sold and can no longer change.".to_string()
            }
            SupplyChainError::InvalidTransition { phase, .. } => {
                format!("The current phase ({phase}) cannot be rejected.")
            }
            SupplyChainError::ValidationError { field } => {
                format!("Please provide a {field}.")
            }
            SupplyChainError::LedgerUnavailable(_) => {
                "The ledger is unavailable. Please try again later.".to_string()
            }
        }
    }
}

//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait, and error types
//! that form the vocabulary of the club billing domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::{DomainError, ErrorCode};
pub use ids::{MemberId, SubscriptionId};
pub use state_machine::StateMachine;

//! Warning escalation for group moderation.
//!
//! The engine turns a single "warn this user" request into one persisted
//! [`WarningRecord`] and, once the configured threshold is reached, exactly
//! one ban attempt through a [`ModerationGateway`]. Persistence and the
//! platform API are injected through the [`WarningStore`] and
//! [`ModerationGateway`] traits.

pub mod engine;
pub mod error;
pub mod gateway;
pub mod locks;
pub mod model;
pub mod store;

pub use engine::{DEFAULT_GATEWAY_TIMEOUT, DEFAULT_MAX_WARNINGS, EscalationEngine, EscalationPolicy};
pub use error::EscalationError;
pub use gateway::{ModerationGateway, dispatch};
pub use model::{
    DEFAULT_WARNING_REASON, ModerationAction, Pair, WarningOutcome, WarningRecord, WarningRequest,
};
pub use store::{MemoryWarningStore, WarningStore};

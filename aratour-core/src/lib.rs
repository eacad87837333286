//! AraTour Quote Engine
//!
//! Transport-agnostic dialogue and pricing logic for the excursion quote
//! bot. The crate collects a tour, a tourist headcount, and a guide tier
//! through a short state machine, then prices the answers against the
//! excursion catalog and guide-rate table. Chat connectivity lives in
//! adapter crates; the only surface they need is
//! [`session::QuoteService`] and the [`dialog::OutboundMessage`] it emits.

pub mod catalog;
pub mod dialog;
pub mod pricing;
pub mod rates;
pub mod session;

// Re-export commonly used types
pub use catalog::{Catalog, Excursion, GuideTier};
pub use dialog::{
    ConversationState, DialogStep, InputError, MAX_TOURISTS, MIN_TOURISTS, OutboundMessage, Phase,
    advance, cancellation, greeting,
};
pub use pricing::{format_dram, quote_total, round_to_thousand};
pub use rates::{BracketRates, GuideLevel, GuideRateTable};
pub use session::{ConversationId, QuoteService};

//! Conversation-keyed session store: the transport-facing surface.
//!
//! The transport routes its start command to [`QuoteService::on_start`], its
//! cancel command to [`QuoteService::on_cancel`], and plain text to
//! [`QuoteService::on_input`], then renders whatever [`OutboundMessage`]
//! comes back. Nothing else crosses the boundary.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::dialog::{self, ConversationState, DialogStep, OutboundMessage};
use crate::rates::GuideRateTable;

/// Identifies one conversation at the transport (chat id, session id, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

/// Dialogue service: immutable reference data shared by every conversation,
/// plus the per-conversation states it exclusively owns. Each conversation
/// is sequential; the transport may interleave different conversations
/// freely.
#[derive(Debug, Default)]
pub struct QuoteService {
    catalog: Catalog,
    rates: GuideRateTable,
    sessions: HashMap<ConversationId, ConversationState>,
}

impl QuoteService {
    #[must_use]
    pub fn new(catalog: Catalog, rates: GuideRateTable) -> Self {
        Self {
            catalog,
            rates,
            sessions: HashMap::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn rates(&self) -> &GuideRateTable {
        &self.rates
    }

    /// Number of conversations currently mid-dialogue.
    #[must_use]
    pub fn active_conversations(&self) -> usize {
        self.sessions.len()
    }

    /// Start (or restart) a conversation. Any earlier state for `id` is
    /// discarded; the reply is the greeting with the tour list.
    pub fn on_start(&mut self, id: ConversationId) -> OutboundMessage {
        log::debug!("conversation {} started", id.0);
        self.sessions.insert(id, ConversationState::default());
        dialog::greeting(&self.catalog)
    }

    /// Feed one text input to the conversation.
    ///
    /// Returns `None` when no conversation is active for `id`; such inputs
    /// are ignored rather than answered. Invalid input inside an active
    /// conversation is answered with a re-prompt and never advances state.
    pub fn on_input(&mut self, id: ConversationId, text: &str) -> Option<OutboundMessage> {
        let state = self.sessions.get_mut(&id)?;
        match dialog::advance(state, text, &self.catalog, &self.rates) {
            Ok(DialogStep::Continue(msg)) => Some(msg),
            Ok(DialogStep::Finished { total, reply }) => {
                log::info!("conversation {} quoted {total} dram", id.0);
                self.sessions.remove(&id);
                Some(reply)
            }
            Err(err) => Some(OutboundMessage::text(err.to_string())),
        }
    }

    /// Cancel the conversation and discard its state. Idempotent; cancelling
    /// a conversation that never started still acknowledges.
    pub fn on_cancel(&mut self, id: ConversationId) -> OutboundMessage {
        if self.sessions.remove(&id).is_some() {
            log::debug!("conversation {} cancelled", id.0);
        }
        dialog::cancellation()
    }
}

//! Conversation state machine for the quote dialogue.
//!
//! The transition function is pure and total: every input either advances
//! the conversation or returns the matching [`InputError`] and leaves the
//! state untouched. Invalid input is always recovered by re-prompting in the
//! same phase; nothing here panics or drops a conversation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Excursion, GuideTier};
use crate::pricing::{format_dram, quote_total};
use crate::rates::GuideRateTable;

pub const MIN_TOURISTS: u32 = 1;
pub const MAX_TOURISTS: u32 = 9;

const PROMPT_GREETING: &str = "Привет! 👋\nВыберите экскурсию:";
const PROMPT_COUNT: &str = "Сколько туристов? (1–9)";
const PROMPT_GUIDE: &str = "Выберите тип гида:";
const REPLY_CANCELLED: &str = "Расчёт отменён.";

/// Which input the conversation currently waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    AwaitingTour,
    AwaitingCount,
    AwaitingGuide,
}

/// Answers collected so far. Fields fill strictly in phase order; the
/// available-guide view is always re-derived from the selected tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub phase: Phase,
    pub tour: Option<String>,
    pub tourists: Option<u32>,
}

/// One message handed back to the transport for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    /// Suggested one-time reply choices; empty means plain text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl OutboundMessage {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_choices(text: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}

/// Recoverable input problems. `Display` is the user-facing re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// The text did not match any catalog tour name.
    #[error("Выберите экскурсию из списка!")]
    InvalidSelection,
    /// The text was not an integer in [1, 9].
    #[error("Введите число от 1 до 9")]
    InvalidCount,
    /// The text did not match a tier available for the selected tour.
    #[error("Выберите тип гида из доступных вариантов")]
    InvalidGuideChoice,
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogStep {
    /// Conversation continues; send the prompt and keep the state.
    Continue(OutboundMessage),
    /// Conversation reached a quote; the caller discards the state.
    Finished { total: i64, reply: OutboundMessage },
}

/// The greeting with the tour list, emitted on the start trigger.
#[must_use]
pub fn greeting(catalog: &Catalog) -> OutboundMessage {
    let mut text = String::from(PROMPT_GREETING);
    for name in catalog.names() {
        text.push_str("\n- ");
        text.push_str(name);
    }
    OutboundMessage::text(text)
}

/// The acknowledgement emitted on the cancel trigger.
#[must_use]
pub fn cancellation() -> OutboundMessage {
    OutboundMessage::text(REPLY_CANCELLED)
}

/// Advance the conversation by one user input.
///
/// # Errors
///
/// Returns the [`InputError`] matching the current phase when the input does
/// not validate; `state` is left exactly as it was.
pub fn advance(
    state: &mut ConversationState,
    input: &str,
    catalog: &Catalog,
    rates: &GuideRateTable,
) -> Result<DialogStep, InputError> {
    match state.phase {
        Phase::AwaitingTour => select_tour(state, input, catalog),
        Phase::AwaitingCount => enter_count(state, input, catalog, rates),
        Phase::AwaitingGuide => select_guide(state, input, catalog, rates),
    }
}

fn select_tour(
    state: &mut ConversationState,
    input: &str,
    catalog: &Catalog,
) -> Result<DialogStep, InputError> {
    let tour = catalog.find(input).ok_or(InputError::InvalidSelection)?;
    log::debug!("tour selected: {}", tour.name);
    state.tour = Some(tour.name.clone());
    state.phase = Phase::AwaitingCount;
    Ok(DialogStep::Continue(OutboundMessage::text(PROMPT_COUNT)))
}

fn enter_count(
    state: &mut ConversationState,
    input: &str,
    catalog: &Catalog,
    rates: &GuideRateTable,
) -> Result<DialogStep, InputError> {
    let count = input
        .parse::<u32>()
        .ok()
        .filter(|c| (MIN_TOURISTS..=MAX_TOURISTS).contains(c))
        .ok_or(InputError::InvalidCount)?;
    let tour = selected_tour(state, catalog)?;

    // A tour with a single tier offers no real choice; quote immediately.
    if let Some(tier) = tour.single_guide() {
        state.tourists = Some(count);
        return Ok(finish(tour, count, tier, rates));
    }

    let labels = tour.guide_labels();
    state.tourists = Some(count);
    state.phase = Phase::AwaitingGuide;
    Ok(DialogStep::Continue(OutboundMessage::with_choices(
        PROMPT_GUIDE,
        labels,
    )))
}

fn select_guide(
    state: &mut ConversationState,
    input: &str,
    catalog: &Catalog,
    rates: &GuideRateTable,
) -> Result<DialogStep, InputError> {
    let tour = selected_tour(state, catalog)?;
    let tier = GuideTier::from_label(input)
        .filter(|t| tour.supports(*t))
        .ok_or(InputError::InvalidGuideChoice)?;
    let count = state.tourists.ok_or(InputError::InvalidCount)?;
    Ok(finish(tour, count, tier, rates))
}

// Phase order guarantees a stored tour past AwaitingTour; the lookup stays
// fallible so the transition function is total even on a corrupted state.
fn selected_tour<'a>(
    state: &ConversationState,
    catalog: &'a Catalog,
) -> Result<&'a Excursion, InputError> {
    state
        .tour
        .as_deref()
        .and_then(|name| catalog.find(name))
        .ok_or(InputError::InvalidSelection)
}

fn finish(tour: &Excursion, count: u32, tier: GuideTier, rates: &GuideRateTable) -> DialogStep {
    let total = quote_total(tour, count, tier, rates);
    log::debug!("quote for {} x{count} ({tier}): {total} dram", tour.name);
    DialogStep::Finished {
        total,
        reply: OutboundMessage::text(format!("Итоговая стоимость: {} драм", format_dram(total))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Catalog, GuideRateTable) {
        (Catalog::default(), GuideRateTable::default())
    }

    #[test]
    fn greeting_lists_every_tour() {
        let (catalog, _) = fixtures();
        let msg = greeting(&catalog);
        assert!(msg.text.starts_with("Привет!"));
        for name in catalog.names() {
            assert!(msg.text.contains(name), "missing {name}");
        }
        assert!(msg.choices.is_empty());
    }

    #[test]
    fn tour_selection_advances_phase() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState::default();
        let step = advance(&mut state, "Царская прогулка по Арагацу", &catalog, &rates).unwrap();
        assert_eq!(state.phase, Phase::AwaitingCount);
        assert_eq!(state.tour.as_deref(), Some("Царская прогулка по Арагацу"));
        match step {
            DialogStep::Continue(msg) => assert_eq!(msg.text, PROMPT_COUNT),
            DialogStep::Finished { .. } => panic!("must not finish on tour selection"),
        }
    }

    #[test]
    fn unknown_tour_self_loops() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState::default();
        let err = advance(&mut state, "Полёт на Луну", &catalog, &rates).unwrap_err();
        assert_eq!(err, InputError::InvalidSelection);
        assert_eq!(state, ConversationState::default());
    }

    #[test]
    fn bad_count_leaves_state_untouched() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState {
            phase: Phase::AwaitingCount,
            tour: Some("Царская прогулка по Арагацу".to_string()),
            tourists: None,
        };
        for bad in ["", "abc", "0", "10", "-3", "2.5"] {
            let before = state.clone();
            let err = advance(&mut state, bad, &catalog, &rates).unwrap_err();
            assert_eq!(err, InputError::InvalidCount, "input {bad:?}");
            assert_eq!(state, before, "state mutated on {bad:?}");
        }
    }

    #[test]
    fn multi_tier_tour_prompts_for_guide() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState::default();
        advance(&mut state, "Царская прогулка по Арагацу", &catalog, &rates).unwrap();
        let step = advance(&mut state, "3", &catalog, &rates).unwrap();
        assert_eq!(state.phase, Phase::AwaitingGuide);
        assert_eq!(state.tourists, Some(3));
        match step {
            DialogStep::Continue(msg) => {
                assert_eq!(msg.text, PROMPT_GUIDE);
                assert_eq!(msg.choices, vec!["Без", "Гид", "Эксперт"]);
            }
            DialogStep::Finished { .. } => panic!("guide choice expected"),
        }
    }

    #[test]
    fn single_tier_tour_skips_guide_prompt() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState::default();
        advance(&mut state, "Трансфер в Ереван", &catalog, &rates).unwrap();
        let step = advance(&mut state, "4", &catalog, &rates).unwrap();
        match step {
            DialogStep::Finished { total, reply } => {
                assert_eq!(total, 17_000);
                assert_eq!(reply.text, "Итоговая стоимость: 17,000 драм");
            }
            DialogStep::Continue(msg) => panic!("unexpected prompt: {}", msg.text),
        }
    }

    #[test]
    fn guide_selection_finishes_with_quote() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState::default();
        advance(&mut state, "Царская прогулка по Арагацу", &catalog, &rates).unwrap();
        advance(&mut state, "3", &catalog, &rates).unwrap();
        let step = advance(&mut state, "Гид", &catalog, &rates).unwrap();
        match step {
            DialogStep::Finished { total, reply } => {
                assert_eq!(total, 109_000);
                assert_eq!(reply.text, "Итоговая стоимость: 109,000 драм");
            }
            DialogStep::Continue(_) => panic!("quote expected"),
        }
    }

    #[test]
    fn unavailable_tier_is_rejected() {
        let (catalog, rates) = fixtures();
        let mut state = ConversationState::default();
        advance(&mut state, "Экскурсия в Музей вина", &catalog, &rates).unwrap();
        advance(&mut state, "2", &catalog, &rates).unwrap();
        // The wine museum offers no expert guide.
        let before = state.clone();
        let err = advance(&mut state, "Эксперт", &catalog, &rates).unwrap_err();
        assert_eq!(err, InputError::InvalidGuideChoice);
        assert_eq!(state, before);
        let err = advance(&mut state, "кто-нибудь", &catalog, &rates).unwrap_err();
        assert_eq!(err, InputError::InvalidGuideChoice);
    }

    #[test]
    fn error_display_is_the_reprompt() {
        assert_eq!(
            InputError::InvalidSelection.to_string(),
            "Выберите экскурсию из списка!"
        );
        assert_eq!(InputError::InvalidCount.to_string(), "Введите число от 1 до 9");
        assert_eq!(
            InputError::InvalidGuideChoice.to_string(),
            "Выберите тип гида из доступных вариантов"
        );
    }
}

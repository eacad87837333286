//! Line-oriented transport: routes commands and free text into the service
//! and renders its replies the way a chat client would.
use std::io::{self, BufRead, Write};

use aratour_core::{ConversationId, OutboundMessage, QuoteService};

pub const START_COMMAND: &str = "/start";
pub const CANCEL_COMMAND: &str = "/cancel";

// A terminal session is a single conversation.
const LOCAL_CONVERSATION: ConversationId = ConversationId(0);

/// Route one input line. `None` for lines the engine ignores (blank input,
/// text outside an active conversation).
pub fn dispatch(service: &mut QuoteService, line: &str) -> Option<OutboundMessage> {
    match line.trim() {
        "" => None,
        START_COMMAND => Some(service.on_start(LOCAL_CONVERSATION)),
        CANCEL_COMMAND => Some(service.on_cancel(LOCAL_CONVERSATION)),
        text => service.on_input(LOCAL_CONVERSATION, text),
    }
}

/// Render a reply: the text, then the one-time keyboard row if any.
#[must_use]
pub fn render(msg: &OutboundMessage) -> String {
    if msg.choices.is_empty() {
        msg.text.clone()
    } else {
        format!("{}\n[{}]", msg.text, msg.choices.join("] ["))
    }
}

/// Drive the service from a line source, writing every reply to `out`.
///
/// # Errors
///
/// Returns an error when reading a line or writing a reply fails.
pub fn run<R: BufRead, W: Write>(
    service: &mut QuoteService,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        log::debug!("input line: {line:?}");
        if let Some(reply) = dispatch(service, &line) {
            writeln!(out, "{}", render(&reply))?;
        }
    }
    Ok(())
}

use botdesk_core::config::LayoutMode;
use botdesk_core::conversation::Message;
use botdesk_core::panel::PanelState;
use serde::{Deserialize, Serialize};

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The text was empty or whitespace only.
    EmptyInput,
    /// A previous round has not completed yet.
    Busy,
}

/// State-change notifications published by the session.
///
/// Presentation layers subscribe to these instead of polling; each event is
/// sent after the corresponding state change is visible in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    AssistantSelected {
        assistant_id: String,
    },
    /// A message was appended to `assistant_id`'s conversation, which is not
    /// necessarily the currently selected one.
    MessageAppended {
        assistant_id: String,
        message: Message,
    },
    AwaitingChanged {
        awaiting: bool,
    },
    PanelChanged {
        state: PanelState,
    },
    /// Filters, name, or mobile overlay of the report changed.
    ReportChanged,
    LayoutChanged {
        mode: LayoutMode,
    },
    SubmissionRejected {
        reason: RejectionReason,
    },
}

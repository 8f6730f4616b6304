use botdesk_core::assistant::Assistant;
use botdesk_core::config::LayoutMode;
use botdesk_core::conversation::{ConversationStore, Message};
use botdesk_core::panel::{PanelState, PanelVisibility};
use botdesk_core::report::ReportTemplate;
use serde::Serialize;

use super::layout::LayoutState;
use crate::drawer::DrawerState;

/// Mutable session state. Only the orchestrator touches it, always under
/// its lock.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub selected: Assistant,
    pub conversations: ConversationStore,
    /// True from a user message being appended until its reply or error is.
    pub awaiting_response: bool,
    pub panel: PanelVisibility,
    pub report: ReportTemplate,
    pub layout: LayoutState,
}

impl SessionState {
    pub fn view(&self, drawer: DrawerState) -> SessionView {
        let panel = self.panel.state();
        SessionView {
            assistant: self.selected.clone(),
            messages: self.conversations.history(&self.selected.id).to_vec(),
            awaiting_response: self.awaiting_response,
            panel,
            report: panel.is_visible().then(|| self.report.clone()),
            drawer,
            overlay_visible: drawer.is_open(),
            layout: self.layout.mode(),
            report_expanded: self.layout.report_expanded(panel.is_visible()),
        }
    }
}

/// Everything a renderer needs to draw the dashboard at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub assistant: Assistant,
    /// Conversation of the selected assistant, oldest first.
    pub messages: Vec<Message>,
    /// Disables input and shows a typing indicator.
    pub awaiting_response: bool,
    pub panel: PanelState,
    /// Present while the panel is visible.
    pub report: Option<ReportTemplate>,
    pub drawer: DrawerState,
    /// Dimmed backdrop behind the open drawer.
    pub overlay_visible: bool,
    pub layout: LayoutMode,
    /// Mobile only: the report overlay covers the screen.
    pub report_expanded: bool,
}

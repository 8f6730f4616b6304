//! The session orchestrator.
//!
//! Owns the selection, every conversation, the panel, the report template and
//! the layout behind a single lock, and runs message rounds against the
//! injected [`Responder`]. At most one round is in flight per session.

use std::sync::Arc;
use std::time::Duration;

use botdesk_core::assistant::{Assistant, AssistantRegistry};
use botdesk_core::config::{LayoutMode, RootConfig};
use botdesk_core::conversation::{ConversationStore, Message};
use botdesk_core::directive::{ParsedReply, parse_reply};
use botdesk_core::error::{DeskError, Result};
use botdesk_core::panel::{PanelState, PanelVisibility};
use botdesk_core::report::{LoggingReportHook, ParameterAdjustment, ReportHook, ReportTemplate};
use botdesk_core::responder::Responder;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;

use super::event::{RejectionReason, SessionEvent};
use super::layout::LayoutState;
use super::state::{SessionState, SessionView};
use crate::drawer::{DrawerState, EntrySelector, NavigationDrawer};

/// Text shown in place of a reply when the responder fails.
pub const RESPONDER_FAILURE_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Construction parameters for a [`SessionOrchestrator`].
#[derive(Clone)]
pub struct SessionOptions {
    pub initial_assistant_id: String,
    pub drawer_close_delay: Duration,
    pub layout: LayoutMode,
    pub report_hook: Arc<dyn ReportHook>,
}

impl SessionOptions {
    pub fn new(initial_assistant_id: impl Into<String>) -> Self {
        Self {
            initial_assistant_id: initial_assistant_id.into(),
            drawer_close_delay: NavigationDrawer::default().close_delay(),
            layout: LayoutMode::default(),
            report_hook: Arc::new(LoggingReportHook),
        }
    }

    /// Reads the startup selection, drawer delay and layout from `config`.
    pub fn from_config(config: &RootConfig, registry: &AssistantRegistry) -> Result<Self> {
        Ok(Self {
            initial_assistant_id: config.initial_assistant_id(registry)?,
            drawer_close_delay: config.drawer_close_delay(),
            layout: config.desk.layout,
            report_hook: Arc::new(LoggingReportHook),
        })
    }

    pub fn with_report_hook(mut self, hook: Arc<dyn ReportHook>) -> Self {
        self.report_hook = hook;
        self
    }

    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_drawer_close_delay(mut self, delay: Duration) -> Self {
        self.drawer_close_delay = delay;
        self
    }
}

/// A dispatched round. Awaiting it is optional; the reply is appended
/// whether or not anyone waits.
#[derive(Debug)]
pub struct RoundHandle {
    assistant_id: String,
    handle: JoinHandle<()>,
}

impl RoundHandle {
    /// The assistant the reply will be appended to.
    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    /// Waits until the reply (or the failure message) has been appended.
    pub async fn join(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| DeskError::internal(format!("round task failed: {}", e)))
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Dispatched(RoundHandle),
    Rejected(RejectionReason),
}

impl SubmitOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Dispatched(_) => None,
        }
    }

    pub fn into_handle(self) -> Option<RoundHandle> {
        match self {
            Self::Dispatched(handle) => Some(handle),
            Self::Rejected(_) => None,
        }
    }
}

struct SessionInner {
    registry: Arc<AssistantRegistry>,
    responder: Arc<dyn Responder>,
    report_hook: Arc<dyn ReportHook>,
    drawer: NavigationDrawer,
    events: broadcast::Sender<SessionEvent>,
    state: Mutex<SessionState>,
}

impl SessionInner {
    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn hide_panel(&self, state: &mut SessionState) {
        if state.panel.discard() {
            state.layout.minimize_report();
            self.emit(SessionEvent::PanelChanged {
                state: PanelState::Hidden,
            });
        }
    }

    async fn run_round(self: Arc<Self>, assistant: Assistant, prompt: String) {
        let responder = Arc::clone(&self.responder);
        let target = assistant.clone();
        // A panicking responder surfaces as a JoinError and counts as failure.
        let outcome =
            tokio::spawn(async move { responder.respond(&target, &prompt).await }).await;

        let reply = match outcome {
            Ok(Ok(raw)) => Some(parse_reply(&raw)),
            Ok(Err(e)) => {
                tracing::warn!(
                    assistant_id = %assistant.id,
                    retryable = e.is_retryable(),
                    "responder failed: {}",
                    e
                );
                None
            }
            Err(e) => {
                tracing::warn!(assistant_id = %assistant.id, "responder task failed: {}", e);
                None
            }
        };

        let mut state = self.state.lock().await;
        let text = match reply {
            Some(ParsedReply {
                display_text,
                panel_requested,
            }) => {
                if state.panel.on_round_completed(panel_requested) {
                    self.emit(SessionEvent::PanelChanged {
                        state: PanelState::Visible,
                    });
                }
                display_text
            }
            None => RESPONDER_FAILURE_MESSAGE.to_string(),
        };

        let id = state.conversations.next_message_id();
        let message = Message::from_assistant(id, &assistant.id, text);
        state.conversations.append(&assistant.id, message.clone());
        state.awaiting_response = false;
        self.emit(SessionEvent::MessageAppended {
            assistant_id: assistant.id.clone(),
            message,
        });
        self.emit(SessionEvent::AwaitingChanged { awaiting: false });
        tracing::info!(assistant_id = %assistant.id, "round completed");
    }
}

/// Coordinates one user's dashboard session.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionOrchestrator {
    inner: Arc<SessionInner>,
}

impl SessionOrchestrator {
    /// Creates a session with every conversation seeded from the registry.
    ///
    /// The panel starts visible iff the initial assistant is the reporting one.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::NotFound` if `options.initial_assistant_id` is not
    /// registered.
    pub fn new(
        registry: Arc<AssistantRegistry>,
        responder: Arc<dyn Responder>,
        options: SessionOptions,
    ) -> Result<Self> {
        let selected = registry
            .get_assistant(&options.initial_assistant_id)?
            .clone();
        let mut panel = PanelVisibility::default();
        panel.on_assistant_selected(registry.is_reporting(&selected.id));

        let state = SessionState {
            selected,
            conversations: ConversationStore::seeded(&registry),
            awaiting_response: false,
            panel,
            report: ReportTemplate::default(),
            layout: LayoutState::new(options.layout),
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            inner: Arc::new(SessionInner {
                registry,
                responder,
                report_hook: options.report_hook,
                drawer: NavigationDrawer::new(options.drawer_close_delay),
                events,
                state: Mutex::new(state),
            }),
        })
    }

    pub fn registry(&self) -> &AssistantRegistry {
        &self.inner.registry
    }

    pub fn drawer(&self) -> &NavigationDrawer {
        &self.inner.drawer
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionView {
        let state = self.inner.state.lock().await;
        state.view(self.inner.drawer.state())
    }

    pub async fn current_assistant(&self) -> Assistant {
        self.inner.state.lock().await.selected.clone()
    }

    pub async fn is_awaiting_response(&self) -> bool {
        self.inner.state.lock().await.awaiting_response
    }

    pub async fn panel_state(&self) -> PanelState {
        self.inner.state.lock().await.panel.state()
    }

    /// Conversation for any assistant, not only the selected one.
    pub async fn history(&self, assistant_id: &str) -> Vec<Message> {
        let state = self.inner.state.lock().await;
        state.conversations.history(assistant_id).to_vec()
    }

    /// Selects `id` and closes the drawer.
    ///
    /// The panel is reset on every selection, including reselecting the
    /// current assistant.
    pub async fn select_assistant(&self, id: &str) -> Result<()> {
        let assistant = match self.inner.registry.get_assistant(id) {
            Ok(assistant) => assistant.clone(),
            Err(e) => {
                tracing::error!(assistant_id = id, "cannot select assistant: {}", e);
                return Err(e);
            }
        };
        let is_reporting = self.inner.registry.is_reporting(&assistant.id);

        {
            let mut state = self.inner.state.lock().await;
            state.selected = assistant;
            let changed = state.panel.on_assistant_selected(is_reporting);
            if changed && !state.panel.state().is_visible() {
                state.layout.minimize_report();
            }
            self.inner.emit(SessionEvent::AssistantSelected {
                assistant_id: id.to_string(),
            });
            if changed {
                self.inner.emit(SessionEvent::PanelChanged {
                    state: state.panel.state(),
                });
            }
        }
        tracing::info!(assistant_id = id, is_reporting, "assistant selected");

        self.inner.drawer.request_close().await;
        Ok(())
    }

    /// Appends `text` as a user message and asks the responder for a reply.
    ///
    /// Blank input and submissions while a round is in flight are rejected
    /// without touching any state.
    pub async fn submit_message(&self, text: &str) -> SubmitOutcome {
        let mut state = self.inner.state.lock().await;
        let rejection = if text.trim().is_empty() {
            Some(RejectionReason::EmptyInput)
        } else if state.awaiting_response {
            Some(RejectionReason::Busy)
        } else {
            None
        };
        if let Some(reason) = rejection {
            tracing::debug!(?reason, "submission rejected");
            self.inner.emit(SessionEvent::SubmissionRejected { reason });
            return SubmitOutcome::Rejected(reason);
        }

        let assistant = state.selected.clone();
        let id = state.conversations.next_message_id();
        let message = Message::from_user(id, text);
        state.conversations.append(&assistant.id, message.clone());
        state.awaiting_response = true;
        self.inner.emit(SessionEvent::MessageAppended {
            assistant_id: assistant.id.clone(),
            message,
        });
        self.inner.emit(SessionEvent::AwaitingChanged { awaiting: true });
        drop(state);

        tracing::info!(assistant_id = %assistant.id, "round dispatched");
        let assistant_id = assistant.id.clone();
        let inner = Arc::clone(&self.inner);
        let prompt = text.to_string();
        let handle = tokio::spawn(inner.run_round(assistant, prompt));

        SubmitOutcome::Dispatched(RoundHandle {
            assistant_id,
            handle,
        })
    }

    /// Current report template, whether or not the panel is shown.
    pub async fn report(&self) -> ReportTemplate {
        self.inner.state.lock().await.report.clone()
    }

    /// Hands the template to the report hook. The panel stays as it is.
    pub async fn save_report(&self) {
        let template = self.report().await;
        tracing::info!(name = %template.name, "report template saved");
        self.inner.report_hook.on_save(&template).await;
    }

    /// Hides the panel and notifies the report hook.
    pub async fn discard_report(&self) {
        let template = {
            let mut state = self.inner.state.lock().await;
            self.inner.hide_panel(&mut state);
            state.report.clone()
        };
        self.inner.report_hook.on_discard(&template).await;
    }

    pub async fn rename_report(&self, name: &str) {
        let mut state = self.inner.state.lock().await;
        state.report.rename(name);
        self.inner.emit(SessionEvent::ReportChanged);
    }

    /// Adjusts filter parameter `index` (zero-based) and returns its new value.
    pub async fn adjust_report_parameter(
        &self,
        index: usize,
        adjustment: ParameterAdjustment,
    ) -> Result<u32> {
        let mut state = self.inner.state.lock().await;
        let value = state.report.adjust(index, adjustment)?;
        self.inner.emit(SessionEvent::ReportChanged);
        Ok(value)
    }

    pub async fn reset_report_filters(&self) {
        let mut state = self.inner.state.lock().await;
        state.report.reset_filters();
        self.inner.emit(SessionEvent::ReportChanged);
    }

    pub async fn apply_report_filters(&self) -> Vec<u32> {
        let mut state = self.inner.state.lock().await;
        let values = state.report.apply_filters();
        self.inner.emit(SessionEvent::ReportChanged);
        values
    }

    pub async fn set_layout(&self, mode: LayoutMode) {
        let mut state = self.inner.state.lock().await;
        if state.layout.set_mode(mode) {
            tracing::info!(%mode, "layout changed");
            self.inner.emit(SessionEvent::LayoutChanged { mode });
        }
    }

    /// Mobile only. Returns whether the overlay was expanded.
    pub async fn expand_report(&self) -> bool {
        let mut state = self.inner.state.lock().await;
        let visible = state.panel.state().is_visible();
        let changed = state.layout.expand_report(visible);
        if changed {
            self.inner.emit(SessionEvent::ReportChanged);
        }
        changed
    }

    pub async fn minimize_report(&self) -> bool {
        let mut state = self.inner.state.lock().await;
        let changed = state.layout.minimize_report();
        if changed {
            self.inner.emit(SessionEvent::ReportChanged);
        }
        changed
    }

    /// Opens the drawer. Ignored outside desktop layout.
    pub async fn hover_enter(&self) {
        if self.hover_enabled().await {
            self.inner.drawer.enter_hover_zone().await;
        }
    }

    /// Schedules the drawer to close. Ignored outside desktop layout.
    pub async fn hover_leave(&self) {
        if self.hover_enabled().await {
            self.inner.drawer.leave_hover_zone().await;
        }
    }

    pub async fn toggle_drawer(&self) -> DrawerState {
        self.inner.drawer.toggle().await
    }

    pub async fn close_drawer(&self) {
        self.inner.drawer.request_close().await;
    }

    /// Selects an assistant from the drawer list. The drawer closes even if
    /// the id is unknown.
    pub async fn select_from_drawer(&self, id: &str) -> Result<()> {
        self.inner.drawer.select_entry(id, self).await
    }

    async fn hover_enabled(&self) -> bool {
        self.inner.state.lock().await.layout.hover_enabled()
    }
}

#[async_trait::async_trait]
impl EntrySelector for SessionOrchestrator {
    async fn select_entry(&self, id: &str) -> Result<()> {
        self.select_assistant(id).await
    }
}

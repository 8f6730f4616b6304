//! Session coordination.
//!
//! # Module Structure
//!
//! - `orchestrator`: The session entry point (`SessionOrchestrator`)
//! - `state`: Session-owned state and the renderable snapshot (`SessionView`)
//! - `layout`: Responsive layout rules (`LayoutState`)
//! - `event`: Notifications for the presentation layer (`SessionEvent`)

mod event;
mod layout;
mod orchestrator;
mod state;

// Re-export public API
pub use event::{RejectionReason, SessionEvent};
pub use layout::LayoutState;
pub use orchestrator::{
    RESPONDER_FAILURE_MESSAGE, RoundHandle, SessionOptions, SessionOrchestrator, SubmitOutcome,
};
pub use state::SessionView;

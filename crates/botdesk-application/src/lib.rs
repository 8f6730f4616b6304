//! Application layer for BotDesk.
//!
//! This crate coordinates the domain types from `botdesk-core` into one
//! interactive session: assistant selection, message rounds against a
//! responder, report panel visibility, the navigation drawer, and the
//! responsive layout.

pub mod drawer;
pub mod session;

pub use drawer::{DrawerState, EntrySelector, NavigationDrawer};
pub use session::{
    RejectionReason, RoundHandle, SessionEvent, SessionOptions, SessionOrchestrator, SessionView,
    SubmitOutcome,
};

//! Responder implementations for BotDesk.
//!
//! - `personas`: system instructions chosen by assistant role
//! - `gemini_responder`: Gemini REST responder with per-assistant chat context

pub mod gemini_responder;
pub mod personas;

pub use gemini_responder::GeminiResponder;
pub use personas::system_instruction_for;

//! Input plumbing: a dedicated thread turning terminal events into messages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────────────────┐
//! │ Input Thread │ ─────────────────▶  │ Main loop                │
//! └──────────────┘  crossbeam channel  │  EditorContext::         │
//!                                      │    handle_input → render │
//!                                      └──────────────────────────┘
//! ```

mod input;
mod messages;

pub use input::{translate, InputActor};
pub use messages::{InputEvent, KeyCode, KeyModifiers, PointerAction, PointerEvent};

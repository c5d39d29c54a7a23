//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`code`]: Source and generated C++ with syntax highlighting and
//!   statement/error line indicators
//! - [`tokens`]: The token stream as a table
//! - [`status`]: Status bar with keybindings and statement position
//!
//! Each pane module exports a primary `render_*` function; panes hold no
//! state beyond the scroll offsets the app passes in.

pub mod code;
pub mod status;
pub mod tokens;

pub use code::{render_code_pane, render_message_pane, CodeView, Syntax};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;

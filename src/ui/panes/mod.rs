//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with token-based highlighting and the lexical error line
//! - [`tokens`]: Token list with kinds and byte spans
//! - [`tree`]: Syntax tree outline
//! - [`findings`]: Semantic findings colored by level
//! - [`status`]: Status bar with phase badges and keybindings
//! - `utils`: Shared block, scroll and placeholder helpers
//!
//! Each pane module exports a single stateless `render_*` function; scroll
//! offsets live in [`crate::ui::App`] and are passed in by mutable reference.

mod utils;

pub mod findings;
pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use findings::render_findings_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;

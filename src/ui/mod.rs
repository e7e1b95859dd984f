//! Terminal output.
//!
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] writing styled text to the terminal
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use platform_probe::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("gcc found");
//! assert!(ui.successes().contains(&"gcc found".to_string()));
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ProbeTheme};

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Show a plain message.
    fn message(&mut self, msg: &str);

    /// Show a success message.
    fn success(&mut self, msg: &str);

    /// Show a warning message.
    fn warning(&mut self, msg: &str);

    /// Show an error message.
    fn error(&mut self, msg: &str);

    /// Show a section header.
    fn show_header(&mut self, title: &str);

    /// Show secondary text, such as remediation advice.
    fn show_hint(&mut self, hint: &str);
}

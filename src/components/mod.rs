//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod filter_dialog;
pub mod guide;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod table;

pub use filter_dialog::FilterDialog;
pub use guide::{draw_guide_screen, GuideComponent, GuideRenderContext};
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;

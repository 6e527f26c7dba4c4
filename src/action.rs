//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key and mouse events, and the
//! App processes them. Actions that change the table are turned into
//! `GuideEvent`s for the binder.

use crate::model::filter::FilterPreference;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    FirstRow,
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the header cursor to the next sortable column
    NextHeader,
    /// Move the header cursor to the previous sortable column
    PrevHeader,
    /// Activate the header under the cursor
    ActivateHeader,
    /// Activate a header by column index (mouse click, digit key)
    SortColumn(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Filter
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the plantable filter dialog
    OpenFilterDialog,
    /// Change the filter control value
    SetFilter(FilterPreference),
    /// Step the filter control to its next value
    CycleFilter,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
    ModalUp,
    ModalDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::NextHeader => write!(f, "NextHeader"),
            Action::PrevHeader => write!(f, "PrevHeader"),
            Action::ActivateHeader => write!(f, "ActivateHeader"),
            Action::SortColumn(column) => write!(f, "SortColumn({})", column),
            Action::OpenFilterDialog => write!(f, "OpenFilterDialog"),
            Action::SetFilter(preference) => write!(f, "SetFilter({})", preference),
            Action::CycleFilter => write!(f, "CycleFilter"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(Action::SortColumn(3).to_string(), "SortColumn(3)");
        assert_eq!(
            Action::SetFilter(FilterPreference::Negative).to_string(),
            "SetFilter(nao)"
        );
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
    }
}

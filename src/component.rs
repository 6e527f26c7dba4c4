//! Component trait - interface shared by the screen and its dialogs

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// A piece of the terminal front-end
///
/// Event handlers only translate input into an `Action`; state changes
/// happen in `update` (or in the App, which owns the binder).
pub trait Component {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Apply an action, optionally producing a follow-up action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`; no state changes beyond render bookkeeping
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}

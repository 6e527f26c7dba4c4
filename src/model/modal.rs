//! Modal stack for managing overlays
//!
//! Only the top modal receives input events.

/// An overlay displayed on top of the guide table
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Plantable filter selection
    Filter { selected_index: usize },
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: usize },
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Filter { selected_index: 0 });
        stack.push(Modal::QuitConfirm);
        assert_eq!(stack.top(), Some(&Modal::QuitConfirm));

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert_eq!(stack.pop(), Some(Modal::Filter { selected_index: 0 }));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_help_modal_equality() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Help { scroll_offset: 3 });
        assert_eq!(stack.top(), Some(&Modal::Help { scroll_offset: 3 }));
        assert_ne!(stack.top(), Some(&Modal::Help { scroll_offset: 0 }));
    }
}

//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Table state lives in the `GuideBinder`; the App only turns actions into
//! guide events and reports what they did.

use crate::action::Action;
use crate::binder::{GuideBinder, GuideEvent, GuideOutcome};
use crate::component::Component;
use crate::components::{
    draw_guide_screen, FilterDialog, GuideComponent, GuideRenderContext, HelpDialog, QuitDialog,
};
use crate::model::filter::FilterPreference;
use crate::model::modal::{Modal, ModalStack};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

const PAGE_SIZE: usize = 10;

/// Main application state - coordinates between components
pub struct App {
    /// Table, filter control and sort state
    pub binder: GuideBinder,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub guide: GuideComponent,
    pub filter_dialog: FilterDialog,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

impl App {
    pub fn new(binder: GuideBinder, error: Option<String>) -> App {
        let sortable: Vec<usize> = binder
            .sort_states()
            .columns()
            .iter()
            .map(|c| c.index)
            .collect();

        App {
            guide: GuideComponent::new(&sortable),
            binder,
            modals: ModalStack::new(),
            should_quit: false,
            error,
            status_message: None,
            filter_dialog: FilterDialog::new(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        }
    }

    fn visible_count(&self) -> usize {
        self.binder.table().map_or(0, |t| t.visible().count())
    }

    fn dispatch(&mut self, event: GuideEvent) {
        let outcome = self.binder.dispatch(event);
        self.report(outcome);
    }

    /// Turn an outcome into a status line message
    fn report(&mut self, outcome: GuideOutcome) {
        match outcome {
            GuideOutcome::Filtered {
                preference,
                visible: Some(visible),
            } => {
                self.guide.clamp_scroll(visible);
                self.status_message =
                    Some(format!("{}: {} linhas visíveis", preference.label(), visible));
            }
            GuideOutcome::Filtered { visible: None, .. } => {
                self.status_message = Some("Tabela sem linhas".to_string());
            }
            GuideOutcome::Sorted { column, ascending } => {
                let name = self
                    .binder
                    .table()
                    .and_then(|t| t.headers.get(column).cloned())
                    .unwrap_or_else(|| format!("coluna {}", column + 1));
                let direction = if ascending { "crescente" } else { "decrescente" };
                self.status_message = Some(format!("{} ({})", name, direction));
            }
            GuideOutcome::Ignored => {}
        }
    }

    fn current_filter(&self) -> Option<FilterPreference> {
        self.binder.filter_control().map(|c| c.value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.guide.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.modals.is_empty() {
            self.guide.handle_mouse_event(mouse)
        } else {
            Ok(None)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Scrolling and header cursor (delegate to GuideComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollDown => {
                let total = self.visible_count();
                self.guide.scroll_down(total, 1);
            }
            Action::PageDown => {
                let total = self.visible_count();
                self.guide.scroll_down(total, PAGE_SIZE);
            }
            Action::LastRow => {
                let total = self.visible_count();
                self.guide.scroll_to_end(total);
            }
            Action::ScrollUp
            | Action::PageUp
            | Action::FirstRow
            | Action::NextHeader
            | Action::PrevHeader
            | Action::ActivateHeader => {
                return self.guide.update(action);
            }

            // ─────────────────────────────────────────────────────────────────
            // Guide events
            // ─────────────────────────────────────────────────────────────────
            Action::SortColumn(column) => {
                self.dispatch(GuideEvent::HeaderClicked(column));
            }
            Action::SetFilter(preference) => {
                if matches!(self.modals.top(), Some(Modal::Filter { .. })) {
                    self.modals.pop();
                }
                self.dispatch(GuideEvent::FilterChanged(preference));
            }
            Action::CycleFilter => {
                if let Some(current) = self.current_filter() {
                    return Ok(Some(Action::SetFilter(current.next())));
                }
                self.status_message = Some("Filtro indisponível".to_string());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilterDialog => match self.current_filter() {
                Some(current) => {
                    self.filter_dialog.open(current);
                    self.modals.push(Modal::Filter {
                        selected_index: self.filter_dialog.selected_index,
                    });
                }
                None => {
                    self.status_message = Some("Filtro indisponível".to_string());
                }
            },
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {
                let selected = self.filter_dialog.selected_index;
                if let Some(Modal::Filter { selected_index }) = self.modals.top_mut() {
                    *selected_index = selected;
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = GuideRenderContext {
            table: self.binder.table(),
            classifier: self.binder.classifier(),
            sort_states: self.binder.sort_states(),
            last_sort: self.binder.last_sort(),
            filter: self.binder.active_filter(),
            has_filter_control: self.binder.filter_control().is_some(),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };
        draw_guide_screen(frame, area, &mut self.guide, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Filter { .. } => self.filter_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                let action = self.help_dialog.handle_key_event(key)?;
                let offset = self.help_dialog.scroll_offset;
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = offset;
                }
                Ok(action)
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Filter { .. } => self.filter_dialog.draw(frame, area)?,
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::store::MemoryStore;
    use crate::services::{default_table, PreferenceStore};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app_with(config: Config) -> App {
        let table = default_table().ok();
        let store = PreferenceStore::new(Box::new(MemoryStore::new()));
        let mut binder = GuideBinder::new(table, &config, store);
        binder.initialize();
        App::new(binder, None)
    }

    fn app() -> App {
        app_with(Config::default())
    }

    /// Run an action and every follow-up it produces
    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(action) = app.handle_key_event(key).unwrap() {
            run(app, action);
        }
    }

    #[test]
    fn test_filter_dialog_applies_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.modals.top(), Some(&Modal::Filter { selected_index: 0 }));

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.modals.top(), Some(&Modal::Filter { selected_index: 1 }));

        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.binder.active_filter(), FilterPreference::Positive);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Plantável")));
    }

    #[test]
    fn test_cycle_filter_goes_through_all_values() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.binder.active_filter(), FilterPreference::Positive);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.binder.active_filter(), FilterPreference::Negative);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.binder.active_filter(), FilterPreference::All);
    }

    #[test]
    fn test_filter_unavailable_without_control() {
        let config = Config {
            filter_control: false,
            ..Config::default()
        };
        let mut app = app_with(config);
        press(&mut app, KeyCode::Char('f'));
        assert!(app.modals.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Filtro indisponível"));

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.binder.active_filter(), FilterPreference::All);
    }

    #[test]
    fn test_header_keys_sort_and_toggle() {
        let mut app = app();
        // Cursor starts on the first sortable column (Stack)
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.binder.last_sort(), Some((2, true)));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.binder.last_sort(), Some((2, false)));

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.binder.last_sort(), Some((3, true)));

        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.binder.last_sort(), Some((4, true)));
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("crescente")));
    }

    #[test]
    fn test_modal_keys_do_not_reach_table() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.binder.last_sort(), None);

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_missing_table_still_runs() {
        let store = PreferenceStore::new(Box::new(MemoryStore::new()));
        let mut binder = GuideBinder::new(None, &Config::default(), store);
        binder.initialize();
        let mut app = App::new(binder, Some("falha".to_string()));

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.binder.last_sort(), None);
        assert_eq!(app.guide.scroll, 0);
    }
}

//! Plantable filter dialog
//!
//! Lists the three filter values with the active one marked.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::filter::FilterPreference;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct FilterDialog {
    pub selected_index: usize,
    pub list_state: ListState,
    /// Value of the filter control when the dialog was opened
    pub current: FilterPreference,
}

impl Default for FilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
            current: FilterPreference::default(),
        }
    }

    /// Reset the dialog to point at the active value
    pub fn open(&mut self, current: FilterPreference) {
        self.current = current;
        self.selected_index = FilterPreference::all()
            .iter()
            .position(|p| *p == current)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    pub fn selected(&self) -> FilterPreference {
        FilterPreference::all()
            .get(self.selected_index)
            .copied()
            .unwrap_or_default()
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < FilterPreference::all().len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetFilter(self.selected())),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(
            area,
            44u16.min(area.width.saturating_sub(4)),
            12u16.min(area.height.saturating_sub(2)),
        );
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Options
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(Span::styled(
            format!("Atual: {}", self.current.label()),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filtrar por Plantável ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = FilterPreference::all()
            .iter()
            .map(|preference| {
                let is_current = *preference == self.current;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        preference.label(),
                        if is_current {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Aplicar  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navegar  "),
            Span::styled(" Esc/f ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancelar"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut FilterDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_open_selects_current_value() {
        let mut dialog = FilterDialog::new();
        dialog.open(FilterPreference::Negative);
        assert_eq!(dialog.selected_index, 2);
        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SetFilter(FilterPreference::Negative))
        );
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut dialog = FilterDialog::new();
        dialog.open(FilterPreference::All);
        press(&mut dialog, KeyCode::Char('k'));
        assert_eq!(dialog.selected(), FilterPreference::All);

        press(&mut dialog, KeyCode::Char('j'));
        assert_eq!(dialog.selected(), FilterPreference::Positive);
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Down);
        assert_eq!(dialog.selected(), FilterPreference::Negative);
    }

    #[test]
    fn test_escape_closes() {
        let mut dialog = FilterDialog::new();
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, KeyCode::Char('f')), Some(Action::CloseModal));
    }
}

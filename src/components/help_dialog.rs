//! Help dialog listing the keyboard and mouse shortcuts

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let margin = 3;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Atalhos ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.chars().count() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Navegação");
    add_shortcut(&mut lines, "j / ↓", "Descer uma linha");
    add_shortcut(&mut lines, "k / ↑", "Subir uma linha");
    add_shortcut(&mut lines, "Ctrl+d", "Descer uma página");
    add_shortcut(&mut lines, "Ctrl+u", "Subir uma página");
    add_shortcut(&mut lines, "g / G", "Primeira / última linha");

    add_section(&mut lines, "Ordenação");
    add_shortcut(&mut lines, "h / l", "Coluna ordenável anterior / seguinte");
    add_shortcut(&mut lines, "s / Enter", "Ordenar pela coluna selecionada");
    add_shortcut(&mut lines, "1-9", "Ordenar pela coluna de número N");
    add_shortcut(&mut lines, "clique", "Ordenar pelo cabeçalho clicado");
    add_shortcut(&mut lines, "", "Cada ativação inverte a direção");

    add_section(&mut lines, "Filtro");
    add_shortcut(&mut lines, "f", "Escolher filtro de plantável");
    add_shortcut(&mut lines, "p", "Alternar Todos / Plantável / Não plantável");

    add_section(&mut lines, "Geral");
    add_shortcut(&mut lines, "?", "Mostrar esta ajuda");
    add_shortcut(&mut lines, "q", "Sair");
    add_shortcut(&mut lines, "Ctrl+c", "Sair sem confirmar");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  q, Esc ou ? para fechar",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_close_and_scroll_keys() {
        let mut dialog = HelpDialog::default();
        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(down).unwrap(), None);
        assert_eq!(dialog.scroll_offset, 1);

        let close = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(close).unwrap(), Some(Action::CloseModal));
    }

    #[test]
    fn test_help_mentions_every_binding() {
        let text: String = build_help_content()
            .iter()
            .flat_map(|line| line.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for key in ["j / ↓", "s / Enter", "1-9", "f", "p", "Ctrl+c"] {
            assert!(text.contains(key), "missing {}", key);
        }
    }
}

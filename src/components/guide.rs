//! Guide component - the main screen
//!
//! Shows the table with its sortable headers, a status line with the
//! active filter and visible-row count, and a help bar. Owns scrolling,
//! the header cursor and the on-screen header positions used for mouse
//! clicks. Table state itself lives in the binder.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::components::table::{
    build_body_lines, build_header_lines, column_at, column_widths, header_regions,
    HeaderRegion, HeaderState,
};
use crate::model::classify::RowClassifier;
use crate::model::filter::FilterPreference;
use crate::model::sort::SortStates;
use crate::model::table::{Table, VISIBLE_ROWS_ATTRIBUTE};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const PAGE_SIZE: usize = 10;

pub struct GuideComponent {
    /// First visible body line
    pub scroll: usize,
    /// Position in `sortable` of the highlighted header
    pub header_cursor: usize,
    /// Sortable column indices, in header order
    sortable: Vec<usize>,
    /// Header cells as last drawn, relative to `header_origin`
    header_hits: Vec<HeaderRegion>,
    /// Screen position of the header line as last drawn
    header_origin: Option<(u16, u16)>,
}

impl GuideComponent {
    pub fn new(sortable: &[usize]) -> Self {
        let mut sortable = sortable.to_vec();
        sortable.sort_unstable();
        sortable.dedup();
        Self {
            scroll: 0,
            header_cursor: 0,
            sortable,
            header_hits: Vec::new(),
            header_origin: None,
        }
    }

    /// Column index under the header cursor
    pub fn cursor_column(&self) -> Option<usize> {
        self.sortable.get(self.header_cursor).copied()
    }

    pub fn next_header(&mut self) {
        if self.header_cursor + 1 < self.sortable.len() {
            self.header_cursor += 1;
        }
    }

    pub fn prev_header(&mut self) {
        self.header_cursor = self.header_cursor.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, total: usize, step: usize) {
        let max_scroll = total.saturating_sub(1);
        self.scroll = (self.scroll + step).min(max_scroll);
    }

    pub fn scroll_up(&mut self, step: usize) {
        self.scroll = self.scroll.saturating_sub(step);
    }

    pub fn scroll_to_end(&mut self, total: usize) {
        self.scroll = total.saturating_sub(1);
    }

    /// Keep the scroll position inside a body that may have shrunk
    pub fn clamp_scroll(&mut self, total: usize) {
        self.scroll = self.scroll.min(total.saturating_sub(1));
    }

    fn is_sortable(&self, column: usize) -> bool {
        self.sortable.contains(&column)
    }

    /// Column whose header cell is at screen position (x, y)
    pub fn header_at(&self, x: u16, y: u16) -> Option<usize> {
        let (origin_x, origin_y) = self.header_origin?;
        if y != origin_y || x < origin_x {
            return None;
        }
        column_at(&self.header_hits, x - origin_x)
    }
}

impl Component for GuideComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Scrolling
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),

            // Sorting
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextHeader),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevHeader),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::ActivateHeader),
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                self.is_sortable(column).then_some(Action::SortColumn(column))
            }

            // Filter
            KeyCode::Char('f') => Some(Action::OpenFilterDialog),
            KeyCode::Char('p') => Some(Action::CycleFilter),

            // Modals
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .header_at(mouse.column, mouse.row)
                .filter(|column| self.is_sortable(*column))
                .map(Action::SortColumn),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextHeader => self.next_header(),
            Action::PrevHeader => self.prev_header(),
            Action::ScrollUp => self.scroll_up(1),
            Action::PageUp => self.scroll_up(PAGE_SIZE),
            Action::FirstRow => self.scroll = 0,
            Action::ActivateHeader => {
                return Ok(self.cursor_column().map(Action::SortColumn));
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the table, see draw_guide_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything the screen shows that lives outside the component
pub struct GuideRenderContext<'a> {
    pub table: Option<&'a Table>,
    pub classifier: RowClassifier,
    pub sort_states: &'a SortStates,
    pub last_sort: Option<(usize, bool)>,
    pub filter: FilterPreference,
    pub has_filter_control: bool,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_guide_screen(
    frame: &mut Frame,
    area: Rect,
    guide: &mut GuideComponent,
    ctx: &GuideRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    match ctx.table {
        Some(table) => render_table(frame, layout.table, guide, table, ctx),
        None => {
            guide.header_origin = None;
            render_missing_table(frame, layout.table, ctx.error);
        }
    }
    render_status_bar(frame, layout.status, guide, ctx);
    render_help_bar(frame, layout.help, ctx);

    Ok(())
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    guide: &mut GuideComponent,
    table: &Table,
    ctx: &GuideRenderContext,
) {
    let visible = table
        .attribute(VISIBLE_ROWS_ATTRIBUTE)
        .unwrap_or_else(|| table.visible().count().to_string());
    let title = format!(
        " {} ({}/{}) ",
        table.title.as_deref().unwrap_or("Guia do Lenhador"),
        visible,
        table.row_count()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = HeaderState {
        sort_states: ctx.sort_states,
        last_sort: ctx.last_sort,
        cursor: guide.cursor_column(),
    };
    let widths = column_widths(table, &header);

    let header_area = Rect::new(inner.x, inner.y, inner.width, inner.height.min(2));
    frame.render_widget(
        Paragraph::new(build_header_lines(table, &widths, &header)),
        header_area,
    );
    guide.header_hits = header_regions(&widths);
    guide.header_origin = Some((inner.x, inner.y));

    let body_area = Rect::new(
        inner.x,
        inner.y.saturating_add(2),
        inner.width,
        inner.height.saturating_sub(2),
    );
    let body = build_body_lines(table, &widths, &ctx.classifier);
    let total = body.len();
    guide.clamp_scroll(total);

    let content = if table.body.is_none() {
        vec![Line::from(Span::styled(
            "Tabela sem linhas",
            Style::default().fg(Color::DarkGray),
        ))]
    } else if body.is_empty() {
        vec![Line::from(Span::styled(
            "Nenhuma madeira corresponde ao filtro",
            Style::default().fg(Color::Yellow),
        ))]
    } else {
        body
    };

    frame.render_widget(
        Paragraph::new(content).scroll((guide.scroll as u16, 0)),
        body_area,
    );

    // Render scrollbar if content exceeds visible area
    let visible_height = body_area.height as usize;
    if total > visible_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_height)).position(guide.scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_missing_table(frame: &mut Frame, area: Rect, error: Option<&str>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Nenhuma tabela carregada",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(error) = error {
        for line in error.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Guia do Lenhador ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    guide: &GuideComponent,
    ctx: &GuideRenderContext,
) {
    let mut spans = vec![Span::styled(
        " Guia do Lenhador ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];

    if ctx.has_filter_control {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" Filtro: {} ", ctx.filter.label()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
    }

    if let (Some(table), Some((column, ascending))) = (ctx.table, ctx.last_sort) {
        let name = table.headers.get(column).map(String::as_str).unwrap_or("?");
        let arrow = if ascending { "▲" } else { "▼" };
        spans.push(Span::styled(
            format!(" Ordenado por {} {} ", name, arrow),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let (Some(table), Some(column)) = (ctx.table, guide.cursor_column()) {
        if let Some(name) = table.headers.get(column) {
            // Direction the next activation will use
            let next = match ctx.sort_states.next_ascending(column) {
                Some(false) => "▼",
                _ => "▲",
            };
            spans.push(Span::styled(
                format!(" [{} {}] ", name, next),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, ctx: &GuideRenderContext) {
    let key = |k: &str, color: Color| {
        Span::styled(
            format!(" {} ", k),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![key("q", Color::Yellow), Span::raw("Sair ")];
    if ctx.has_filter_control {
        spans.push(key("f", Color::Green));
        spans.push(Span::raw("Filtro "));
        spans.push(key("p", Color::Green));
        spans.push(Span::raw("Alternar "));
    }
    spans.extend([
        key("h/l", Color::Cyan),
        Span::raw("Coluna "),
        key("s", Color::Cyan),
        Span::raw("Ordenar "),
        key("j/k", Color::Cyan),
        Span::raw("Rolar "),
        key("?", Color::White),
        Span::raw("Ajuda"),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_digit_keys_only_sort_sortable_columns() {
        let mut guide = GuideComponent::new(&[2, 3, 4]);
        assert_eq!(
            guide.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SortColumn(2))
        );
        assert_eq!(guide.handle_key_event(key(KeyCode::Char('1'))).unwrap(), None);
    }

    #[test]
    fn test_header_cursor_moves_across_sortable_columns() {
        let mut guide = GuideComponent::new(&[4, 2, 3]);
        assert_eq!(guide.cursor_column(), Some(2));
        guide.next_header();
        guide.next_header();
        guide.next_header();
        assert_eq!(guide.cursor_column(), Some(4));
        guide.prev_header();
        assert_eq!(guide.cursor_column(), Some(3));

        let follow_up = guide.update(Action::ActivateHeader).unwrap();
        assert_eq!(follow_up, Some(Action::SortColumn(3)));
    }

    #[test]
    fn test_no_sortable_columns() {
        let mut guide = GuideComponent::new(&[]);
        assert_eq!(guide.cursor_column(), None);
        assert_eq!(guide.update(Action::ActivateHeader).unwrap(), None);
    }

    #[test]
    fn test_mouse_click_on_headers() {
        let mut guide = GuideComponent::new(&[2]);
        guide.header_hits = header_regions(&[8, 10, 7]);
        guide.header_origin = Some((1, 1));

        assert_eq!(guide.handle_mouse_event(click(26, 1)).unwrap(), Some(Action::SortColumn(2)));
        // Non-sortable header and body clicks do nothing
        assert_eq!(guide.handle_mouse_event(click(2, 1)).unwrap(), None);
        assert_eq!(guide.handle_mouse_event(click(26, 4)).unwrap(), None);
        assert_eq!(guide.handle_mouse_event(click(0, 1)).unwrap(), None);
    }

    #[test]
    fn test_mouse_before_first_draw() {
        let mut guide = GuideComponent::new(&[2]);
        assert_eq!(guide.handle_mouse_event(click(26, 1)).unwrap(), None);
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut guide = GuideComponent::new(&[2]);
        guide.scroll_down(5, 10);
        assert_eq!(guide.scroll, 4);
        guide.clamp_scroll(2);
        assert_eq!(guide.scroll, 1);
        guide.scroll_up(10);
        assert_eq!(guide.scroll, 0);
        guide.scroll_to_end(0);
        assert_eq!(guide.scroll, 0);
    }
}

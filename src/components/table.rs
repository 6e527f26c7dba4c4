//! Table rendering for the guide
//!
//! Builds the header and body lines for the visible rows and records where
//! each header cell lands on screen so mouse clicks can be mapped back to a
//! column.

use crate::model::classify::RowClassifier;
use crate::model::sort::SortStates;
use crate::model::table::{Row, Table};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may get before its content is truncated
const MAX_COLUMN_WIDTH: usize = 40;
/// Separator drawn between columns
const COLUMN_SEPARATOR: &str = " │ ";

/// Horizontal extent of one header cell, relative to the table's left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRegion {
    pub column: usize,
    pub start: u16,
    pub end: u16,
}

/// What the header needs to know to draw sort affordances
pub struct HeaderState<'a> {
    pub sort_states: &'a SortStates,
    pub last_sort: Option<(usize, bool)>,
    pub cursor: Option<usize>,
}

fn sort_indicator(column: usize, header: &HeaderState<'_>) -> Option<&'static str> {
    if !header.sort_states.is_sortable(column) {
        return None;
    }
    match header.last_sort {
        Some((sorted, true)) if sorted == column => Some(" ▲"),
        Some((sorted, false)) if sorted == column => Some(" ▼"),
        _ => Some(" ↕"),
    }
}

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `text` with spaces up to `width` display columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let fill = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(fill))
}

/// Column widths over the header labels and the visible rows
pub fn column_widths(table: &Table, header: &HeaderState<'_>) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| h.width() + sort_indicator(i, header).map_or(0, |s| s.width()))
        .collect();

    for row in table.visible() {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.display_text().width());
            }
        }
    }

    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    widths
}

/// Where each header cell starts and ends
pub fn header_regions(widths: &[usize]) -> Vec<HeaderRegion> {
    let separator = COLUMN_SEPARATOR.width() as u16;
    let mut regions = Vec::with_capacity(widths.len());
    let mut x: u16 = 0;
    for (column, width) in widths.iter().enumerate() {
        let end = x.saturating_add(*width as u16);
        regions.push(HeaderRegion {
            column,
            start: x,
            end,
        });
        x = end.saturating_add(separator);
    }
    regions
}

/// Column under horizontal offset `x`, if any
pub fn column_at(regions: &[HeaderRegion], x: u16) -> Option<usize> {
    regions
        .iter()
        .find(|r| x >= r.start && x < r.end)
        .map(|r| r.column)
}

/// Header line plus separator line
pub fn build_header_lines(
    table: &Table,
    widths: &[usize],
    header: &HeaderState<'_>,
) -> Vec<Line<'static>> {
    let spans: Vec<Span> = table
        .headers
        .iter()
        .enumerate()
        .flat_map(|(i, label)| {
            let width = widths.get(i).copied().unwrap_or(10);
            let indicator = sort_indicator(i, header);
            let text = format!("{}{}", label, indicator.unwrap_or(""));

            let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            if indicator.is_some() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if header.cursor == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }

            vec![
                Span::styled(pad_to_width(&text, width), style),
                Span::raw(COLUMN_SEPARATOR),
            ]
        })
        .collect();

    let separator: String = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");

    vec![
        Line::from(spans),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
    ]
}

fn row_line(row: &Row, widths: &[usize], classifier: &RowClassifier) -> Line<'static> {
    let class = classifier.classify(row);
    let spans: Vec<Span> = row
        .cells
        .iter()
        .enumerate()
        .flat_map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(10);
            let style = if i == classifier.column() {
                match (class.positive, class.negative) {
                    (true, false) => Style::default().fg(Color::Green),
                    (false, true) => Style::default().fg(Color::Red),
                    (true, true) => Style::default().fg(Color::Yellow),
                    (false, false) => Style::default().fg(Color::DarkGray),
                }
            } else {
                Style::default().fg(Color::White)
            };
            vec![
                Span::styled(pad_to_width(&cell.display_text(), width), style),
                Span::raw(COLUMN_SEPARATOR),
            ]
        })
        .collect();
    Line::from(spans)
}

/// One line per visible row, in table order
pub fn build_body_lines(
    table: &Table,
    widths: &[usize],
    classifier: &RowClassifier,
) -> Vec<Line<'static>> {
    table
        .visible()
        .map(|row| row_line(row, widths, classifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sort::SortableColumn;
    use crate::model::table::{Cell, Marker};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn table() -> Table {
        Table::new(
            vec!["Madeira".into(), "Plantável?".into(), "Stack".into()],
            vec![
                Row::new(vec![
                    Cell::text("Carvalho"),
                    Cell::marked("", Marker::Positive),
                    Cell::text("3.000"),
                ]),
                Row::new(vec![Cell::text("Ipê"), Cell::text("Não"), Cell::text("15,00")]),
            ],
        )
    }

    #[test]
    fn test_truncate_and_pad() {
        assert_eq!(truncate_to_width("Carvalho", 20), "Carvalho");
        assert_eq!(truncate_to_width("Carvalho", 5), "Carv…");
        assert_eq!(pad_to_width("Ipê", 5), "Ipê  ");
        assert_eq!(pad_to_width("Jacarandá", 4).width(), 4);
    }

    #[test]
    fn test_widths_include_sort_indicator() {
        let states = SortStates::new(&[SortableColumn::numeric(2)]);
        let header = HeaderState {
            sort_states: &states,
            last_sort: None,
            cursor: None,
        };
        let widths = column_widths(&table(), &header);
        assert_eq!(widths, vec![8, 10, 7]);
    }

    #[test]
    fn test_header_shows_direction_only_on_sortable_columns() {
        let states = SortStates::new(&[SortableColumn::numeric(2)]);
        let header = HeaderState {
            sort_states: &states,
            last_sort: Some((2, false)),
            cursor: Some(2),
        };
        let t = table();
        let widths = column_widths(&t, &header);
        let lines = build_header_lines(&t, &widths, &header);
        let text = line_text(&lines[0]);

        assert!(text.contains("Stack ▼"));
        assert!(!text.contains("Madeira ↕"));
        assert!(!text.contains("Plantável? ↕"));
    }

    #[test]
    fn test_body_skips_hidden_rows() {
        let mut t = table();
        if let Some(rows) = t.body.as_mut() {
            rows[1].visible = false;
        }
        let states = SortStates::default();
        let header = HeaderState {
            sort_states: &states,
            last_sort: None,
            cursor: None,
        };
        let widths = column_widths(&t, &header);
        let lines = build_body_lines(&t, &widths, &RowClassifier::new(1));

        assert_eq!(lines.len(), 1);
        let text = line_text(&lines[0]);
        assert!(text.starts_with("Carvalho"));
        assert!(text.contains('✓'));
    }

    #[test]
    fn test_header_regions_and_hit_test() {
        let regions = header_regions(&[8, 10, 7]);
        assert_eq!(regions[0], HeaderRegion { column: 0, start: 0, end: 8 });
        assert_eq!(regions[1], HeaderRegion { column: 1, start: 11, end: 21 });
        assert_eq!(regions[2], HeaderRegion { column: 2, start: 24, end: 31 });

        assert_eq!(column_at(&regions, 0), Some(0));
        assert_eq!(column_at(&regions, 9), None);
        assert_eq!(column_at(&regions, 24), Some(2));
        assert_eq!(column_at(&regions, 31), None);
    }
}

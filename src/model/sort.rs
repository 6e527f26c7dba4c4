//! Column sorting
//!
//! Rows are reordered in place with a stable sort. Numeric columns accept
//! Brazilian formatting ("3.000", "15,00"); text columns use a collation
//! that ignores case and accents and compares digit runs by value.

use super::table::Table;
use crate::error::GuideError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;
use tracing::debug;

// ═══════════════════════════════════════════════════════════════════════════════
// Value parsing and collation
// ═══════════════════════════════════════════════════════════════════════════════

/// Parse a numeric cell: "3.000" -> 3000, "15,00" -> 15, garbage -> 0
///
/// Every `.` is a thousands separator and the first `,` is the decimal
/// point. Like a lenient float parser, trailing text after the number is
/// ignored ("12 kg" -> 12).
pub fn parse_numeric(text: &str) -> f64 {
    let normalized = text.replace('.', "").replacen(',', ".", 1);
    match parse_float_prefix(&normalized) {
        Some(value) if !value.is_nan() => value,
        _ => {
            if !text.trim().is_empty() {
                let err = GuideError::UnparsableValue(text.to_string());
                debug!(error = %err, "using 0");
            }
            0.0
        }
    }
}

/// Longest leading float in `text` after leading whitespace
fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Lowercase and strip the accents used in Portuguese and its neighbours
fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Case- and accent-insensitive comparison with numeric digit runs
///
/// "item2" sorts before "item10" and "Ipê" equals "ipe".
pub fn collate(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = fold_char(l).cmp(&fold_char(r));
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sorter
// ═══════════════════════════════════════════════════════════════════════════════

/// Reorders table rows by one column
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnSorter;

impl ColumnSorter {
    pub fn sort(&self, table: &mut Table, column: usize, ascending: bool, numeric: bool) {
        let Some(rows) = table.body.as_mut() else {
            debug!(column, error = %GuideError::MissingElement("tbody"), "sort skipped");
            return;
        };

        rows.sort_by(|a, b| {
            let a_text = a.cell_content(column);
            let b_text = b.cell_content(column);

            if numeric {
                let a_num = parse_numeric(a_text);
                let b_num = parse_numeric(b_text);
                let ord = a_num.partial_cmp(&b_num).unwrap_or(Ordering::Equal);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            } else if ascending {
                collate(a_text, b_text)
            } else {
                collate(b_text, a_text)
            }
        });

        debug!(column, ascending, numeric, rows = rows.len(), "sorted table");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Per-column direction state
// ═══════════════════════════════════════════════════════════════════════════════

fn default_numeric() -> bool {
    true
}

/// A column that reacts to header activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableColumn {
    pub index: usize,
    #[serde(default = "default_numeric")]
    pub numeric: bool,
}

impl SortableColumn {
    pub fn numeric(index: usize) -> Self {
        Self {
            index,
            numeric: true,
        }
    }
}

/// Toggling direction for each sortable column, for the current session only
#[derive(Debug, Clone, Default)]
pub struct SortStates {
    columns: Vec<SortableColumn>,
    next_ascending: BTreeMap<usize, bool>,
}

impl SortStates {
    pub fn new(columns: &[SortableColumn]) -> Self {
        let next_ascending = columns.iter().map(|c| (c.index, true)).collect();
        Self {
            columns: columns.to_vec(),
            next_ascending,
        }
    }

    pub fn columns(&self) -> &[SortableColumn] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<SortableColumn> {
        self.columns.iter().find(|c| c.index == index).copied()
    }

    pub fn is_sortable(&self, index: usize) -> bool {
        self.column(index).is_some()
    }

    /// Direction the next activation of `index` will use
    pub fn next_ascending(&self, index: usize) -> Option<bool> {
        self.next_ascending.get(&index).copied()
    }

    /// Take the direction for this activation and flip the stored one
    pub fn activate(&mut self, index: usize) -> Option<(SortableColumn, bool)> {
        let column = self.column(index)?;
        let state = self.next_ascending.entry(index).or_insert(true);
        let ascending = *state;
        *state = !ascending;
        Some((column, ascending))
    }
}

//! Row classification for the plantable column

use super::table::{Marker, Row};
use regex::Regex;
use std::sync::LazyLock;

/// Affirmative text: check marks or "sim", any case
static POSITIVE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)✓|✅|sim").unwrap()
});

/// Negative text: crosses or "não"/"nao", any case
static NEGATIVE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)✕|❌|não|nao").unwrap()
});

/// Outcome of classifying a row
///
/// Both flags can be set at once when a cell carries both markers, or when
/// its text matches both patterns. Such a row passes either filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub positive: bool,
    pub negative: bool,
}

impl Classification {
    pub const UNKNOWN: Classification = Classification {
        positive: false,
        negative: false,
    };

    pub const POSITIVE: Classification = Classification {
        positive: true,
        negative: false,
    };

    pub const NEGATIVE: Classification = Classification {
        positive: false,
        negative: true,
    };

    pub fn is_unknown(&self) -> bool {
        !self.positive && !self.negative
    }
}

/// Decides whether a row is plantable by inspecting one fixed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClassifier {
    column: usize,
}

impl RowClassifier {
    pub fn new(column: usize) -> Self {
        Self { column }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn classify(&self, row: &Row) -> Classification {
        let Some(cell) = row.cell(self.column) else {
            return Classification::UNKNOWN;
        };

        let mut result = Classification {
            positive: cell.has_marker(Marker::Positive),
            negative: cell.has_marker(Marker::Negative),
        };

        if result.is_unknown() {
            let text = cell.content();
            result.positive = POSITIVE_TEXT.is_match(text);
            result.negative = NEGATIVE_TEXT.is_match(text);
        }

        result
    }
}

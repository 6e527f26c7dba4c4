//! Plantable filter - preference values and the engine that applies them

use super::classify::RowClassifier;
use super::table::Table;
use crate::error::GuideError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Filter value chosen by the user
///
/// The tokens (`todos`, `sim`, `nao`) are what the filter control offers and
/// what gets persisted; they must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterPreference {
    #[default]
    #[serde(rename = "todos")]
    All,
    #[serde(rename = "sim")]
    Positive,
    #[serde(rename = "nao")]
    Negative,
}

impl FilterPreference {
    pub fn all() -> [FilterPreference; 3] {
        [
            FilterPreference::All,
            FilterPreference::Positive,
            FilterPreference::Negative,
        ]
    }

    pub fn token(&self) -> &'static str {
        match self {
            FilterPreference::All => "todos",
            FilterPreference::Positive => "sim",
            FilterPreference::Negative => "nao",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterPreference::All => "Todos",
            FilterPreference::Positive => "Plantável",
            FilterPreference::Negative => "Não plantável",
        }
    }

    /// Next value in control order, wrapping around
    pub fn next(&self) -> FilterPreference {
        match self {
            FilterPreference::All => FilterPreference::Positive,
            FilterPreference::Positive => FilterPreference::Negative,
            FilterPreference::Negative => FilterPreference::All,
        }
    }
}

impl fmt::Display for FilterPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for FilterPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todos" => Ok(FilterPreference::All),
            "sim" => Ok(FilterPreference::Positive),
            "nao" => Ok(FilterPreference::Negative),
            other => Err(format!("unknown filter value: {}", other)),
        }
    }
}

/// Applies a filter preference to every row of a table
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    classifier: RowClassifier,
}

impl FilterEngine {
    pub fn new(classifier: RowClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> RowClassifier {
        self.classifier
    }

    /// Set row visibility for `preference` and return the visible count
    ///
    /// Returns `None` without touching anything when the table has no body.
    pub fn apply_filter(&self, table: &mut Table, preference: FilterPreference) -> Option<usize> {
        let Some(rows) = table.body.as_mut() else {
            debug!(error = %GuideError::MissingElement("tbody"), "filter skipped");
            return None;
        };

        let mut visible_count = 0;
        for row in rows.iter_mut() {
            let class = self.classifier.classify(row);
            let show = match preference {
                FilterPreference::All => true,
                FilterPreference::Positive => class.positive,
                FilterPreference::Negative => class.negative,
            };
            row.visible = show;
            if show {
                visible_count += 1;
            }
        }

        table.visible_rows = Some(visible_count);
        info!(
            filter = preference.token(),
            visible = visible_count,
            "[Guia do Lenhador] linhas visíveis: {}",
            visible_count
        );

        Some(visible_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{Cell, Marker, Row, VISIBLE_ROWS_ATTRIBUTE};

    fn sample_table() -> Table {
        Table::new(
            vec!["Madeira".into(), "Plantável?".into(), "Stack".into()],
            vec![
                Row::new(vec![
                    Cell::text("Carvalho"),
                    Cell::marked("", Marker::Positive),
                    Cell::text("3.000"),
                ]),
                Row::new(vec![Cell::text("Ipê"), Cell::text("não"), Cell::text("15,00")]),
                Row::new(vec![Cell::text("Bambu"), Cell::text(""), Cell::text("100")]),
                Row::new(vec![Cell::text("Pinheiro"), Cell::text("Sim")]),
                Row::new(vec![Cell::text("Mogno"), Cell::marked("", Marker::Negative)]),
            ],
        )
    }

    fn engine() -> FilterEngine {
        FilterEngine::new(RowClassifier::new(1))
    }

    fn visible_names(table: &Table) -> Vec<&str> {
        table.visible().map(|r| r.cell_content(0)).collect()
    }

    #[test]
    fn test_all_shows_every_row() {
        let mut table = sample_table();
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::All), Some(5));
        assert_eq!(table.visible().count(), table.row_count());
        assert_eq!(table.attribute(VISIBLE_ROWS_ATTRIBUTE), Some("5".to_string()));
    }

    #[test]
    fn test_positive_shows_plantable_rows() {
        let mut table = sample_table();
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Positive), Some(2));
        assert_eq!(visible_names(&table), vec!["Carvalho", "Pinheiro"]);
    }

    #[test]
    fn test_negative_shows_non_plantable_rows() {
        let mut table = sample_table();
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Negative), Some(2));
        assert_eq!(visible_names(&table), vec!["Ipê", "Mogno"]);
    }

    #[test]
    fn test_unknown_rows_only_visible_under_all() {
        let mut table = sample_table();
        let engine = engine();

        engine.apply_filter(&mut table, FilterPreference::Positive);
        assert!(!table.rows()[2].visible);
        engine.apply_filter(&mut table, FilterPreference::Negative);
        assert!(!table.rows()[2].visible);
        engine.apply_filter(&mut table, FilterPreference::All);
        assert!(table.rows()[2].visible);
    }

    #[test]
    fn test_ambiguous_row_visible_under_both_filters() {
        let mut table = Table::new(
            vec!["Madeira".into(), "Plantável?".into()],
            vec![Row::new(vec![Cell::text("Cedro"), Cell::text("sim? não")])],
        );
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Positive), Some(1));
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Negative), Some(1));
    }

    #[test]
    fn test_count_matches_classification() {
        let mut table = sample_table();
        let classifier = RowClassifier::new(1);
        let positives = table.rows().iter().filter(|r| classifier.classify(r).positive).count();
        let negatives = table.rows().iter().filter(|r| classifier.classify(r).negative).count();

        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Positive), Some(positives));
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Negative), Some(negatives));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut table = sample_table();
        engine().apply_filter(&mut table, FilterPreference::Negative);
        let first = table.clone();
        engine().apply_filter(&mut table, FilterPreference::Negative);
        assert_eq!(first, table);
    }

    #[test]
    fn test_missing_body_is_noop() {
        let mut table = Table::without_body(vec!["Madeira".into()]);
        assert_eq!(engine().apply_filter(&mut table, FilterPreference::Positive), None);
        assert_eq!(table.visible_rows, None);
    }

    #[test]
    fn test_preference_tokens() {
        for pref in FilterPreference::all() {
            assert_eq!(pref.token().parse::<FilterPreference>(), Ok(pref));
        }
        assert!("Sim".parse::<FilterPreference>().is_err());
        assert!("all".parse::<FilterPreference>().is_err());
        assert_eq!(FilterPreference::default(), FilterPreference::All);
    }

    #[test]
    fn test_preference_cycles() {
        let pref = FilterPreference::All;
        assert_eq!(pref.next(), FilterPreference::Positive);
        assert_eq!(pref.next().next(), FilterPreference::Negative);
        assert_eq!(pref.next().next().next(), FilterPreference::All);
    }
}

//! Guide binder - wires filter and header events to the table
//!
//! `GuideBinder` is the single context object built at start-up. It owns
//! the table, the filter control state, the preference store and the
//! per-column sort directions. Front-ends never touch those directly; they
//! send a `GuideEvent` and read back the outcome.

use crate::config::Config;
use crate::error::GuideError;
use crate::model::classify::RowClassifier;
use crate::model::filter::{FilterEngine, FilterPreference};
use crate::model::sort::{ColumnSorter, SortStates};
use crate::model::table::Table;
use crate::services::PreferenceStore;
use tracing::{debug, info};

/// Events a front-end can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideEvent {
    /// The filter control now shows this value
    FilterChanged(FilterPreference),
    /// A header cell was activated
    HeaderClicked(usize),
}

/// What handling an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOutcome {
    /// Filter applied; `None` visible count when there is no table body
    Filtered {
        preference: FilterPreference,
        visible: Option<usize>,
    },
    /// Rows reordered by `column`
    Sorted { column: usize, ascending: bool },
    /// Nothing listens for this event
    Ignored,
}

/// Select-style control offering the three filter values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterControl {
    pub value: FilterPreference,
}

pub struct GuideBinder {
    table: Option<Table>,
    control: Option<FilterControl>,
    preferences: PreferenceStore,
    filter: FilterEngine,
    sorter: ColumnSorter,
    sort_states: SortStates,
    active_filter: FilterPreference,
    last_sort: Option<(usize, bool)>,
}

impl GuideBinder {
    pub fn new(table: Option<Table>, config: &Config, preferences: PreferenceStore) -> Self {
        let control = config.filter_control.then(FilterControl::default);
        Self {
            table,
            control,
            preferences,
            filter: FilterEngine::new(RowClassifier::new(config.plantable_column)),
            sorter: ColumnSorter,
            sort_states: SortStates::new(&config.sortable_columns),
            active_filter: FilterPreference::All,
            last_sort: None,
        }
    }

    /// One-time setup: restore the preference and filter once
    ///
    /// Without a filter control nothing can undo a restored filter, so every
    /// row is shown.
    pub fn initialize(&mut self) -> GuideOutcome {
        let preference = match self.control.as_mut() {
            Some(control) => {
                control.value = self.preferences.load().unwrap_or_default();
                control.value
            }
            None => FilterPreference::All,
        };
        info!(filter = preference.token(), "restored filter preference");
        self.run_filter(preference)
    }

    pub fn dispatch(&mut self, event: GuideEvent) -> GuideOutcome {
        match event {
            GuideEvent::FilterChanged(preference) => self.on_filter_change(preference),
            GuideEvent::HeaderClicked(column) => self.on_header_click(column),
        }
    }

    /// Filter control changed: re-filter, then remember the value
    pub fn on_filter_change(&mut self, preference: FilterPreference) -> GuideOutcome {
        let Some(control) = self.control.as_mut() else {
            debug!(error = %GuideError::MissingElement("filter control"), "filter change ignored");
            return GuideOutcome::Ignored;
        };
        control.value = preference;

        let outcome = self.run_filter(preference);
        self.preferences.save(preference);
        outcome
    }

    /// Header activated: sort sortable columns, toggling direction
    pub fn on_header_click(&mut self, column: usize) -> GuideOutcome {
        let Some((sortable, ascending)) = self.sort_states.activate(column) else {
            return GuideOutcome::Ignored;
        };
        let Some(table) = self.table.as_mut() else {
            return GuideOutcome::Ignored;
        };

        self.sorter.sort(table, column, ascending, sortable.numeric);
        self.last_sort = Some((column, ascending));
        GuideOutcome::Sorted { column, ascending }
    }

    fn run_filter(&mut self, preference: FilterPreference) -> GuideOutcome {
        self.active_filter = preference;
        let visible = self
            .table
            .as_mut()
            .and_then(|table| self.filter.apply_filter(table, preference));
        GuideOutcome::Filtered {
            preference,
            visible,
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn filter_control(&self) -> Option<&FilterControl> {
        self.control.as_ref()
    }

    pub fn active_filter(&self) -> FilterPreference {
        self.active_filter
    }

    /// Classifier deciding plantable rows
    pub fn classifier(&self) -> RowClassifier {
        self.filter.classifier()
    }

    pub fn sort_states(&self) -> &SortStates {
        &self.sort_states
    }

    /// Column and direction of the most recent sort
    pub fn last_sort(&self) -> Option<(usize, bool)> {
        self.last_sort
    }
}

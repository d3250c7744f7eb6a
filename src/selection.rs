use crate::coins::{SortKey, FIRST_YEAR, LAST_YEAR};
use crate::data::DataStore;

/// What the user has picked so far
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    pub selected_year: u16,
    pub selected_country: String,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
}

impl SelectionState {
    /// Start on `year` and `country`, newest coins first
    pub fn new(year: u16, country: &str) -> Self {
        Self {
            selected_year: year.clamp(FIRST_YEAR, LAST_YEAR),
            selected_country: country.to_string(),
            sort_key: SortKey::Year,
            sort_ascending: false,
        }
    }
}

/// User intent, decoded from terminal input
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SelectYear(u16),
    SelectCountry(String),
    SetSort { key: SortKey, ascending: bool },
}

/// Views that must be redrawn after a command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Refresh {
    /// Country fills and tooltips
    pub map: bool,
    /// Jointly issued coin panel
    pub joint: bool,
    /// Year marking in the table, rows untouched
    pub year_highlight: bool,
    /// Table rows (filter and sort)
    pub table: bool,
    /// Selected-country outline
    pub outline: bool,
}

impl Refresh {
    /// Everything, used once after loading
    pub fn all() -> Self {
        Self {
            map: true,
            joint: true,
            year_highlight: true,
            table: true,
            outline: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Owns the selection and decides what each command invalidates
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new(state: SelectionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn apply(&mut self, store: &DataStore, command: Command) -> Refresh {
        match command {
            Command::SelectYear(year) => {
                if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
                    log::debug!("Ignoring year {} outside timeline", year);
                    return Refresh::default();
                }
                self.state.selected_year = year;
                Refresh {
                    map: true,
                    joint: true,
                    year_highlight: true,
                    ..Refresh::default()
                }
            }
            Command::SelectCountry(country) => {
                if !store.is_eurozone(&country) {
                    log::debug!("Ignoring selection of {}, not in the Eurozone", country);
                    return Refresh::default();
                }
                self.state.selected_country = country;
                Refresh {
                    table: true,
                    outline: true,
                    ..Refresh::default()
                }
            }
            Command::SetSort { key, ascending } => {
                self.state.sort_key = key;
                self.state.sort_ascending = ascending;
                Refresh {
                    table: true,
                    ..Refresh::default()
                }
            }
        }
    }
}

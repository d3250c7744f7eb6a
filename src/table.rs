use crate::coins::{any_record_for_country, country_records, sort_records, CoinRecord, SortKey};
use crate::data::DataStore;
use crate::selection::SelectionState;

/// Rows of the coin table for one country, already sorted
#[derive(Clone, Debug)]
pub struct TableView {
    /// Display name of the country
    pub country: String,
    pub flag_path: String,
    pub rows: Vec<CoinRecord>,
    pub highlight_year: u16,
    pub sort_key: SortKey,
    pub ascending: bool,
    /// First visible row
    pub scroll: usize,
}

impl TableView {
    /// Table for the selected country, `None` when it issues no coins
    pub fn build(store: &DataStore, state: &SelectionState) -> Option<Self> {
        let first = any_record_for_country(store.coins(), &state.selected_country)?;
        let rows = sort_records(
            country_records(store.coins(), &state.selected_country),
            state.sort_key,
            state.sort_ascending,
        )
        .into_iter()
        .cloned()
        .collect();

        Some(Self {
            country: first.country.clone(),
            flag_path: first.flag_path(),
            rows,
            highlight_year: state.selected_year,
            sort_key: state.sort_key,
            ascending: state.sort_ascending,
            scroll: 0,
        })
    }

    pub fn set_highlight_year(&mut self, year: u16) {
        self.highlight_year = year;
    }

    pub fn is_highlighted(&self, row: &CoinRecord) -> bool {
        row.mintage_year == self.highlight_year
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.rows.len().saturating_sub(1);
        self.scroll = (self.scroll as i64 + delta as i64).clamp(0, max as i64) as usize;
    }
}

use ratatui::style::Color;

use super::{any_record_for_country, color_for, max_price_entry, normalize, CoinRecord};
use super::{NON_PARTICIPANT_COLOR, NO_COIN_COLOR};
use crate::data::DataStore;

/// How a country shows up on the map for one year
#[derive(Clone, Debug, PartialEq)]
pub enum CountryStatus<'a> {
    /// Not a euro user; aggregation is skipped
    NonParticipant { name: &'a str },
    /// Euro user that issued no commemorative coin that year
    NoCoin { display_name: &'a str },
    /// Most valuable coin issued that year
    Issued(&'a CoinRecord),
}

impl<'a> CountryStatus<'a> {
    pub fn classify(store: &'a DataStore, name: &'a str, year: u16) -> Self {
        if !store.is_eurozone(name) {
            return CountryStatus::NonParticipant { name };
        }
        match max_price_entry(store.coins(), name, year) {
            Some(record) => CountryStatus::Issued(record),
            None => CountryStatus::NoCoin {
                display_name: any_record_for_country(store.coins(), name)
                    .map(|r| r.country.as_str())
                    .unwrap_or(name),
            },
        }
    }

    pub fn fill(&self) -> Color {
        match self {
            CountryStatus::NonParticipant { .. } => NON_PARTICIPANT_COLOR,
            CountryStatus::NoCoin { .. } => NO_COIN_COLOR,
            CountryStatus::Issued(record) => color_for(normalize(record.price)),
        }
    }

    /// Three-line summary: country, price, description
    pub fn tooltip(&self) -> String {
        match self {
            CountryStatus::NonParticipant { name } => format!("{name}\nNot in the Eurozone"),
            CountryStatus::NoCoin { display_name } => {
                format!("{display_name}\nNo coin issued this year")
            }
            CountryStatus::Issued(record) => format!(
                "{}\n{}€\n{}",
                record.country, record.price_text, record.description
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::coin;

    fn store() -> DataStore {
        let mut slovakia = coin("Slovakia", 2023, 10.0, 1000);
        slovakia.country_map_name = "Slovensko".to_string();
        let mut slovakia_top = coin("Slovakia", 2023, 25.0, 1000);
        slovakia_top.country_map_name = "Slovensko".to_string();
        slovakia_top.description = "Slovak Academy of Sciences".to_string();
        DataStore::new(
            vec![slovakia, slovakia_top, coin("Malta", 2019, 2.5, 10)],
            Vec::new(),
        )
    }

    #[test]
    fn test_non_participant_any_year() {
        let store = store();
        for year in [2004, 2015, 2023] {
            let status = CountryStatus::classify(&store, "Polska", year);
            assert_eq!(status, CountryStatus::NonParticipant { name: "Polska" });
            assert_eq!(status.fill(), NON_PARTICIPANT_COLOR);
            assert_eq!(status.tooltip(), "Polska\nNot in the Eurozone");
        }
    }

    #[test]
    fn test_no_coin_uses_display_name() {
        let store = store();
        let status = CountryStatus::classify(&store, "Slovensko", 2011);
        assert_eq!(status.fill(), NO_COIN_COLOR);
        assert_eq!(status.tooltip(), "Slovakia\nNo coin issued this year");
    }

    #[test]
    fn test_issued_uses_max_price() {
        let store = store();
        let status = CountryStatus::classify(&store, "Slovensko", 2023);
        assert_eq!(status.fill(), color_for(normalize(25.0)));
        assert_eq!(
            status.tooltip(),
            "Slovakia\n25€\nSlovak Academy of Sciences"
        );
    }

    #[test]
    fn test_fractional_price_in_tooltip() {
        let store = store();
        let tooltip = CountryStatus::classify(&store, "Malta", 2019).tooltip();
        assert!(tooltip.starts_with("Malta\n2.5€\n"));
    }

    #[test]
    fn test_price_shown_as_written() {
        let mut record = coin("Malta", 2020, 25.0, 10);
        record.price_text = "25.00".to_string();
        let store = DataStore::new(vec![record], Vec::new());
        let tooltip = CountryStatus::classify(&store, "Malta", 2020).tooltip();
        assert_eq!(tooltip, "Malta\n25.00€\nMalta 2020 25");
    }
}

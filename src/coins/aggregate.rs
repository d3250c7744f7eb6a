use super::CoinRecord;

/// Highest-priced coin of `country` in `year`.
/// Ties go to the record that appears first in `records`.
pub fn max_price_entry<'a>(
    records: &'a [CoinRecord],
    country: &str,
    year: u16,
) -> Option<&'a CoinRecord> {
    records
        .iter()
        .filter(|r| r.country_map_name == country && r.mintage_year == year)
        .fold(None, |best: Option<&CoinRecord>, record| match best {
            Some(current) if record.price <= current.price => Some(current),
            _ => Some(record),
        })
}

/// Any record of `country`, used to recover its display name
pub fn any_record_for_country<'a>(records: &'a [CoinRecord], country: &str) -> Option<&'a CoinRecord> {
    records.iter().find(|r| r.country_map_name == country)
}

/// All coins of `country` in source order
pub fn country_records<'a>(records: &'a [CoinRecord], country: &str) -> Vec<&'a CoinRecord> {
    records
        .iter()
        .filter(|r| r.country_map_name == country)
        .collect()
}

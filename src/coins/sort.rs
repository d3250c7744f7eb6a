use std::cmp::Ordering;

use super::CoinRecord;

/// Column the coin table is ordered by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Year,
    Price,
    Mintage,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Year => "year",
            SortKey::Price => "price",
            SortKey::Mintage => "mintage",
        }
    }

    fn compare(self, a: &CoinRecord, b: &CoinRecord) -> Ordering {
        match self {
            SortKey::Year => a.mintage_year.cmp(&b.mintage_year),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Mintage => a.mint_count.cmp(&b.mint_count),
        }
    }
}

/// Stable ascending sort on `key`, reversed as a whole for descending order.
/// Equal entries keep their input order before the reversal, so the two
/// directions are exact mirrors of each other.
pub fn sort_records<'a>(
    mut records: Vec<&'a CoinRecord>,
    key: SortKey,
    ascending: bool,
) -> Vec<&'a CoinRecord> {
    records.sort_by(|a, b| key.compare(a, b));
    if !ascending {
        records.reverse();
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::coin;

    fn tagged(year: u16, price: f64, mint: u64, tag: &str) -> CoinRecord {
        let mut record = coin("Ireland", year, price, mint);
        record.year_id = tag.to_string();
        record
    }

    fn tags(records: &[&CoinRecord]) -> Vec<String> {
        records.iter().map(|r| r.year_id.clone()).collect()
    }

    #[test]
    fn test_sort_by_each_key() {
        let data = vec![
            tagged(2016, 10.0, 2_000, "a"),
            tagged(2008, 45.0, 500, "b"),
            tagged(2012, 2.5, 90_000, "c"),
        ];
        let refs: Vec<&CoinRecord> = data.iter().collect();

        assert_eq!(tags(&sort_records(refs.clone(), SortKey::Year, true)), ["b", "c", "a"]);
        assert_eq!(tags(&sort_records(refs.clone(), SortKey::Price, false)), ["b", "a", "c"]);
        assert_eq!(tags(&sort_records(refs, SortKey::Mintage, true)), ["b", "a", "c"]);
    }

    #[test]
    fn test_numeric_not_lexical() {
        // "9" > "10" as text
        let data = vec![tagged(2010, 9.0, 9, "nine"), tagged(2011, 10.0, 10, "ten")];
        let refs: Vec<&CoinRecord> = data.iter().collect();
        assert_eq!(tags(&sort_records(refs.clone(), SortKey::Price, true)), ["nine", "ten"]);
        assert_eq!(tags(&sort_records(refs, SortKey::Mintage, true)), ["nine", "ten"]);
    }

    #[test]
    fn test_descending_mirrors_ascending() {
        let data = vec![
            tagged(2010, 5.0, 1, "a"),
            tagged(2011, 3.0, 1, "b"),
            tagged(2012, 5.0, 1, "c"),
            tagged(2013, 8.0, 1, "d"),
        ];
        let refs: Vec<&CoinRecord> = data.iter().collect();

        let asc = sort_records(refs.clone(), SortKey::Price, true);
        let desc = sort_records(refs, SortKey::Price, false);
        assert_eq!(tags(&asc), ["b", "a", "c", "d"]);
        assert_eq!(tags(&desc), ["d", "c", "a", "b"]);
    }

    #[test]
    fn test_same_input_same_order() {
        let data = vec![
            tagged(2019, 5.0, 300, "a"),
            tagged(2019, 7.0, 100, "b"),
            tagged(2005, 5.0, 300, "c"),
        ];
        let refs: Vec<&CoinRecord> = data.iter().collect();

        for key in [SortKey::Year, SortKey::Price, SortKey::Mintage] {
            let asc = sort_records(refs.clone(), key, true);
            assert_eq!(tags(&sort_records(asc.clone(), key, true)), tags(&asc));

            let desc = sort_records(refs.clone(), key, false);
            assert_eq!(tags(&sort_records(refs.clone(), key, false)), tags(&desc));
            let mut mirrored = tags(&asc);
            mirrored.reverse();
            assert_eq!(tags(&desc), mirrored);
        }
    }
}

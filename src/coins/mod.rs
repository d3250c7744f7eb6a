mod aggregate;
mod color;
mod sort;
mod status;

pub use aggregate::{any_record_for_country, country_records, max_price_entry};
pub use color::{color_for, legend, mintage_width, normalize, NO_COIN_COLOR, NON_PARTICIPANT_COLOR};
pub use sort::{sort_records, SortKey};
pub use status::CountryStatus;

/// First year covered by the dataset (and the timeline)
pub const FIRST_YEAR: u16 = 2004;
/// Last year covered by the dataset (and the timeline)
pub const LAST_YEAR: u16 = 2023;

/// One commemorative coin issued by a country in a given year
#[derive(Clone, Debug, PartialEq)]
pub struct CoinRecord {
    /// Display name ("Slovakia")
    pub country: String,
    /// Name used by the boundary file, the join key for map features
    pub country_map_name: String,
    pub mintage_year: u16,
    /// Collector price in euro
    pub price: f64,
    /// Price as written in the source file, used for display
    pub price_text: String,
    pub description: String,
    pub mint_count: u64,
    /// Disambiguates several coins of one country in one year
    pub year_id: String,
}

impl CoinRecord {
    /// Relative path of the coin picture
    pub fn image_path(&self) -> String {
        format!(
            "images/{}_{}_{}.jpg",
            self.country, self.mintage_year, self.year_id
        )
    }

    /// Relative path of the country's flag icon
    pub fn flag_path(&self) -> String {
        format!("Flags/{}-icon.png", self.country.replacen(' ', "-", 1))
    }
}

/// A coin issued jointly by all Eurozone members
#[derive(Clone, Debug, PartialEq)]
pub struct JointCoinRecord {
    pub mintage_year: u16,
    pub description: String,
}

/// What the joint-coin panel shows for one year
#[derive(Clone, Debug, PartialEq)]
pub struct JointCoinView {
    pub description: String,
    pub image_path: String,
}

impl JointCoinView {
    pub const NO_COIN: &'static str = "No coin this year";
    pub const DUMMY_IMAGE: &'static str = "images/dummy.png";

    pub fn for_year(record: Option<&JointCoinRecord>, year: u16) -> Self {
        match record {
            Some(joint) => Self {
                description: joint.description.clone(),
                image_path: format!("images/eu_{}.jpg", year),
            },
            None => Self {
                description: Self::NO_COIN.to_string(),
                image_path: Self::DUMMY_IMAGE.to_string(),
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn coin(country: &str, year: u16, price: f64, mint_count: u64) -> CoinRecord {
    CoinRecord {
        country: country.to_string(),
        country_map_name: country.to_string(),
        mintage_year: year,
        price,
        price_text: price.to_string(),
        description: format!("{country} {year} {price}"),
        mint_count,
        year_id: "1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        let mut record = coin("San Marino", 2015, 40.0, 100_000);
        record.year_id = "2".to_string();
        assert_eq!(record.image_path(), "images/San Marino_2015_2.jpg");
        assert_eq!(record.flag_path(), "Flags/San-Marino-icon.png");
    }

    #[test]
    fn test_joint_coin_fallback() {
        let view = JointCoinView::for_year(None, 2010);
        assert_eq!(view.description, "No coin this year");
        assert_eq!(view.image_path, "images/dummy.png");

        let joint = JointCoinRecord {
            mintage_year: 2012,
            description: "Ten years of euro cash".to_string(),
        };
        let view = JointCoinView::for_year(Some(&joint), 2012);
        assert_eq!(view.description, "Ten years of euro cash");
        assert_eq!(view.image_path, "images/eu_2012.jpg");
    }
}

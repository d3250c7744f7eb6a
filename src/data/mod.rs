use crate::coins::{CoinRecord, JointCoinRecord, JointCoinView};
use crate::error::LoadError;
use crate::map::{CountryFeature, LineString};
use csv::{ReaderBuilder, Trim};
use geojson::{GeoJson, Geometry, Value};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;

pub const COINS_FILE: &str = "dataset.csv";
pub const JOINT_COINS_FILE: &str = "datasetAreaCoins.csv";
pub const MAP_FILE: &str = "myMap.json";

/// Feature properties that may carry the country name, in lookup order
const NAME_PROPERTIES: [&str; 3] = ["na", "name", "NAME"];

/// Loaded coin tables plus the derived set of euro users
#[derive(Default)]
pub struct DataStore {
    coins: Vec<CoinRecord>,
    joint_coins: Vec<JointCoinRecord>,
    eurozone: BTreeSet<String>,
}

impl DataStore {
    pub fn new(coins: Vec<CoinRecord>, joint_coins: Vec<JointCoinRecord>) -> Self {
        let eurozone = coins.iter().map(|c| c.country_map_name.clone()).collect();
        Self {
            coins,
            joint_coins,
            eurozone,
        }
    }

    pub fn coins(&self) -> &[CoinRecord] {
        &self.coins
    }

    pub fn is_eurozone(&self, country: &str) -> bool {
        self.eurozone.contains(country)
    }

    pub fn eurozone(&self) -> impl Iterator<Item = &str> {
        self.eurozone.iter().map(String::as_str)
    }

    /// Joint coin for `year`; the first record wins if the input repeats a year
    pub fn joint_for_year(&self, year: u16) -> JointCoinView {
        let record = self.joint_coins.iter().find(|j| j.mintage_year == year);
        JointCoinView::for_year(record, year)
    }
}

/// Everything read from the data directory
pub struct Dataset {
    pub store: DataStore,
    pub countries: Vec<CountryFeature>,
}

/// Load all input files. A missing or broken file leaves its table empty.
pub fn load_all(data_dir: &Path) -> Dataset {
    let coins = load_coins(&data_dir.join(COINS_FILE)).unwrap_or_else(|e| {
        log::warn!("Failed to load {}: {}", COINS_FILE, e);
        Vec::new()
    });

    let joint_coins = load_joint_coins(&data_dir.join(JOINT_COINS_FILE)).unwrap_or_else(|e| {
        log::warn!("Failed to load {}: {}", JOINT_COINS_FILE, e);
        Vec::new()
    });

    let countries = load_countries(&data_dir.join(MAP_FILE)).unwrap_or_else(|e| {
        log::warn!("Failed to load {}: {}", MAP_FILE, e);
        Vec::new()
    });

    log::info!(
        "Loaded {} coins, {} joint coins, {} map features",
        coins.len(),
        joint_coins.len(),
        countries.len()
    );

    Dataset {
        store: DataStore::new(coins, joint_coins),
        countries,
    }
}

#[derive(Deserialize)]
struct CoinRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Country_map_name")]
    country_map_name: String,
    #[serde(rename = "Mintage_year")]
    mintage_year: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Mint_count")]
    mint_count: String,
    #[serde(rename = "YearID")]
    year_id: String,
}

#[derive(Deserialize)]
struct JointCoinRow {
    #[serde(rename = "Mintage_year")]
    mintage_year: String,
    #[serde(rename = "Description")]
    description: String,
}

fn invalid(row: usize, field: &'static str, value: &str) -> LoadError {
    LoadError::InvalidField {
        row,
        field,
        value: value.to_string(),
    }
}

fn parse_year(row: usize, value: &str) -> Result<u16, LoadError> {
    value.parse().map_err(|_| invalid(row, "Mintage_year", value))
}

fn parse_price(row: usize, value: &str) -> Result<f64, LoadError> {
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(invalid(row, "Price", value)),
    }
}

/// Accepts "1500000", "1,500,000" and "1500000.0"; empty means unknown (0)
fn parse_mint_count(row: usize, value: &str) -> Result<u64, LoadError> {
    let digits: String = value.chars().filter(|c| !matches!(c, ',' | ' ' | '_')).collect();
    if digits.is_empty() {
        return Ok(0);
    }
    if let Ok(count) = digits.parse::<u64>() {
        return Ok(count);
    }
    match digits.parse::<f64>() {
        Ok(count) if count.is_finite() && count >= 0.0 => Ok(count.round() as u64),
        _ => Err(invalid(row, "Mint_count", value)),
    }
}

impl CoinRow {
    fn into_record(self, row: usize) -> Result<CoinRecord, LoadError> {
        Ok(CoinRecord {
            mintage_year: parse_year(row, &self.mintage_year)?,
            price: parse_price(row, &self.price)?,
            price_text: self.price,
            mint_count: parse_mint_count(row, &self.mint_count)?,
            country: self.country,
            country_map_name: self.country_map_name,
            description: self.description,
            year_id: self.year_id,
        })
    }
}

/// Parse coin records; rows that fail coercion are logged and skipped
pub fn parse_coins<R: Read>(reader: R) -> Result<Vec<CoinRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (idx, result) in rdr.deserialize::<CoinRow>().enumerate() {
        // Header is line 1
        let row = idx + 2;
        match result.map_err(LoadError::from).and_then(|r| r.into_record(row)) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping coin: {}", e),
        }
    }

    Ok(records)
}

/// Parse joint-coin records; rows that fail coercion are logged and skipped
pub fn parse_joint_coins<R: Read>(reader: R) -> Result<Vec<JointCoinRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (idx, result) in rdr.deserialize::<JointCoinRow>().enumerate() {
        let row = idx + 2;
        let parsed = result.map_err(LoadError::from).and_then(|r| {
            Ok(JointCoinRecord {
                mintage_year: parse_year(row, &r.mintage_year)?,
                description: r.description,
            })
        });
        match parsed {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping joint coin: {}", e),
        }
    }

    Ok(records)
}

fn open(path: &Path) -> Result<fs::File, LoadError> {
    fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_coins(path: &Path) -> Result<Vec<CoinRecord>, LoadError> {
    parse_coins(open(path)?)
}

pub fn load_joint_coins(path: &Path) -> Result<Vec<JointCoinRecord>, LoadError> {
    parse_joint_coins(open(path)?)
}

/// Load country boundaries from GeoJSON
pub fn load_countries(path: &Path) -> Result<Vec<CountryFeature>, LoadError> {
    let mut bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_countries(&mut bytes)
}

/// Parse a FeatureCollection of country polygons. The buffer is used as
/// scratch space by the parser.
pub fn parse_countries(bytes: &mut [u8]) -> Result<Vec<CountryFeature>, LoadError> {
    let value: serde_json::Value = simd_json::serde::from_slice(bytes)?;
    let fc = match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(fc) => fc,
        _ => return Err(LoadError::NotAFeatureCollection),
    };

    let mut countries = Vec::with_capacity(fc.features.len());
    for feature in fc.features {
        let props = feature.properties.as_ref();

        let name = NAME_PROPERTIES
            .iter()
            .find_map(|key| props.and_then(|p| p.get(*key)).and_then(|v| v.as_str()));
        let Some(name) = name else {
            log::debug!("Skipping unnamed feature");
            continue;
        };

        let mut polygons = Vec::new();
        if let Some(ref geometry) = feature.geometry {
            collect_polygons(geometry, &mut polygons);
        }

        countries.push(CountryFeature {
            name: name.to_string(),
            polygons,
        });
    }

    Ok(countries)
}

fn to_ring(coords: &[Vec<f64>]) -> LineString {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

fn collect_polygons(geometry: &Geometry, polygons: &mut Vec<Vec<LineString>>) {
    match &geometry.value {
        Value::Polygon(rings) => {
            polygons.push(rings.iter().map(|r| to_ring(r)).collect());
        }
        Value::MultiPolygon(parts) => {
            for rings in parts {
                polygons.push(rings.iter().map(|r| to_ring(r)).collect());
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, polygons);
            }
        }
        _ => {}
    }
}

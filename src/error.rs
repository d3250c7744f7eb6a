use std::path::PathBuf;

/// Failure while reading one of the input files
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json: {0}")]
    Json(#[from] simd_json::Error),

    #[error("geojson: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a FeatureCollection")]
    NotAFeatureCollection,

    #[error("row {row}: invalid {field} {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Shipped WA HT class rates. All amounts are in dollars.
pub const DEFAULT_RATES: RateConfig = RateConfig {
    gst_rate: dec!(0.10),
    duty_rate: dec!(0.03),
    duty_cap: dec!(12000),
    licence_per_axle: dec!(572),
    recording_fee: dec!(10.45),
    plate_fee: dec!(32.00),
    insurance_base: dec!(14.59),
    insurance_gst_rate: dec!(0.10),
    insurance_duty_rate: dec!(0.11),
    inspection_initial: dec!(284.00),
    inspection_reinspection: dec!(172.00),
};

/// Rates and fees used by the calculator.
///
/// A rate file only needs the fields it overrides; everything else falls back
/// to [`DEFAULT_RATES`]. Amounts are written out as decimal strings so no
/// precision is lost, but plain JSON numbers are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RateConfig {
    /// GST rate added to the price when GST is dutiable (fraction)
    #[schemars(with = "String")]
    pub gst_rate: Decimal,
    /// Stamp duty rate applied to the dutiable value (fraction)
    #[schemars(with = "String")]
    pub duty_rate: Decimal,
    /// Maximum stamp duty when the cap applies
    #[schemars(with = "String")]
    pub duty_cap: Decimal,
    /// Licence fee charged per axle
    #[schemars(with = "String")]
    pub licence_per_axle: Decimal,
    /// Recording fee, first-time licensing only
    #[schemars(with = "String")]
    pub recording_fee: Decimal,
    /// Plate fee, first-time licensing only
    #[schemars(with = "String")]
    pub plate_fee: Decimal,
    /// Optional insurance base charge
    #[schemars(with = "String")]
    pub insurance_base: Decimal,
    /// GST on the insurance base (fraction)
    #[schemars(with = "String")]
    pub insurance_gst_rate: Decimal,
    /// Duty on the insurance base (fraction)
    #[schemars(with = "String")]
    pub insurance_duty_rate: Decimal,
    /// Initial inspection fee
    #[schemars(with = "String")]
    pub inspection_initial: Decimal,
    /// Re-inspection fee
    #[schemars(with = "String")]
    pub inspection_reinspection: Decimal,
}

impl Default for RateConfig {
    fn default() -> Self {
        DEFAULT_RATES
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RatesError {
    #[error("failed to read rate file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid rate file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl RateConfig {
    /// Parse a JSON rate file. Missing fields take their shipped defaults.
    pub fn from_json<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Load rates from a JSON file
    pub fn load(path: &Path) -> Result<Self, RatesError> {
        let file = File::open(path).map_err(|source| RatesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rates = Self::from_json(BufReader::new(file)).map_err(|source| RatesError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded rates from {}", path.display());
        Ok(rates)
    }

    /// Load rates from `path` if given, otherwise use the shipped rates.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, RatesError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(DEFAULT_RATES),
        }
    }
}

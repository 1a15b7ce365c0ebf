//! Calculation input and the sanitizing boundary that builds it.
//!
//! Raw values arrive as text (CLI arguments, CSV cells). They are coerced
//! here rather than rejected: malformed numbers become zero, the axle count is
//! clamped, and unrecognised toggles fall back to their defaults. The
//! calculator itself never clamps or validates.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

pub const MIN_AXLES: u32 = 1;
pub const MAX_AXLES: u32 = 9;

/// Vehicle inspection charged with the licence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionType {
    #[default]
    None,
    Initial,
    Reinspection,
}

impl InspectionType {
    pub fn from_str(s: &str) -> Option<InspectionType> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Some(InspectionType::None),
            "initial" => Some(InspectionType::Initial),
            "reinspection" | "re-inspection" => Some(InspectionType::Reinspection),
            _ => None,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            InspectionType::None => "none",
            InspectionType::Initial => "initial",
            InspectionType::Reinspection => "reinspection",
        }
    }
}

/// One calculation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationInput {
    /// Price before GST, in dollars
    pub price_ex_gst: Decimal,
    pub axles: u32,
    /// Add GST to the price before duty is worked out
    pub include_gst_in_duty: bool,
    pub apply_duty_cap: bool,
    /// Recording and plate fees apply
    pub first_time_licensing: bool,
    pub include_insurance_lines: bool,
    pub inspection: InspectionType,
}

impl Default for CalculationInput {
    fn default() -> Self {
        CalculationInput {
            price_ex_gst: Decimal::ZERO,
            axles: MIN_AXLES,
            include_gst_in_duty: true,
            apply_duty_cap: true,
            first_time_licensing: true,
            include_insurance_lines: false,
            inspection: InspectionType::None,
        }
    }
}

/// Parse a dollar amount, tolerating `$`, thousands separators and
/// surrounding whitespace. Anything else unparseable becomes zero.
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| {
            log::warn!("Malformed amount '{}', using 0", text);
            Decimal::ZERO
        })
}

/// Parse an axle count and clamp it to the supported range.
pub fn parse_axles(text: &str) -> u32 {
    let trimmed = text.trim();
    let count = if trimmed.is_empty() {
        0
    } else {
        trimmed.parse::<i64>().unwrap_or_else(|_| {
            // "3.0" from spreadsheets, or counts too large for i64
            match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
                Ok(d) => {
                    if !d.fract().is_zero() {
                        log::warn!("Fractional axle count '{}' truncated", text);
                    }
                    d.trunc().to_i64().unwrap_or(if d.is_sign_negative() {
                        i64::MIN
                    } else {
                        i64::MAX
                    })
                }
                Err(_) => {
                    log::warn!("Malformed axle count '{}', using 0", text);
                    0
                }
            }
        })
    };
    clamp_axles(count)
}

pub fn clamp_axles(count: i64) -> u32 {
    let clamped = count.clamp(MIN_AXLES as i64, MAX_AXLES as i64);
    if clamped != count {
        log::warn!("Axle count {} clamped to {}", count, clamped);
    }
    clamped as u32
}

/// Parse a yes/no toggle. Blank or unrecognised text gives `default`.
pub fn parse_flag(text: &str, default: bool) -> bool {
    match text.trim().to_lowercase().as_str() {
        "" => default,
        "true" | "yes" | "y" | "1" => true,
        "false" | "no" | "n" | "0" => false,
        _ => {
            log::warn!("Unrecognised toggle '{}', using {}", text, default);
            default
        }
    }
}

pub fn parse_inspection(text: &str) -> InspectionType {
    InspectionType::from_str(text).unwrap_or_else(|| {
        log::warn!("Unrecognised inspection type '{}', using none", text);
        InspectionType::None
    })
}

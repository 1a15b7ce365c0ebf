use super::fees::{calculate, FeeBreakdown};
use super::input::{parse_amount, parse_axles, parse_flag, parse_inspection, CalculationInput};
use super::rates::RateConfig;
use htcalc_derive::CsvSchema;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Column metadata generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One quote request in a batch CSV. Values are raw text and are coerced on
/// conversion.
#[derive(Debug, Clone, Default, Deserialize, CsvSchema)]
pub struct QuoteRecord {
    /// Reference copied to the output row
    pub id: Option<String>,
    /// Price excluding GST in dollars (malformed values are treated as 0)
    #[serde(default)]
    pub price: String,
    /// Number of axles (clamped to 1-9)
    #[serde(default)]
    pub axles: String,
    /// Add GST to the dutiable value: true/false (default true)
    pub gst_in_duty: Option<String>,
    /// Cap stamp duty: true/false (default true)
    pub duty_cap: Option<String>,
    /// First-time licensing, adds recording and plate fees (default true)
    pub first_time: Option<String>,
    /// Include insurance lines (default false)
    pub insurance: Option<String>,
    /// none, initial or reinspection (default none)
    pub inspection: Option<String>,
}

impl QuoteRecord {
    pub fn to_input(&self) -> CalculationInput {
        let defaults = CalculationInput::default();
        let flag = |value: &Option<String>, default: bool| {
            value.as_deref().map_or(default, |v| parse_flag(v, default))
        };
        CalculationInput {
            price_ex_gst: parse_amount(&self.price),
            axles: parse_axles(&self.axles),
            include_gst_in_duty: flag(&self.gst_in_duty, defaults.include_gst_in_duty),
            apply_duty_cap: flag(&self.duty_cap, defaults.apply_duty_cap),
            first_time_licensing: flag(&self.first_time, defaults.first_time_licensing),
            include_insurance_lines: flag(&self.insurance, defaults.include_insurance_lines),
            inspection: self
                .inspection
                .as_deref()
                .map_or(defaults.inspection, parse_inspection),
        }
    }
}

/// Output row: the sanitized input followed by every breakdown figure
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownRecord {
    pub id: String,
    pub price: String,
    pub axles: u32,
    pub inspection: &'static str,
    pub gst: String,
    pub dutiable: String,
    pub duty: String,
    pub licence_fee: String,
    pub insurance_base: String,
    pub insurance_gst: String,
    pub insurance_duty: String,
    pub recording_fee: String,
    pub plate_fee: String,
    pub inspection_fee: String,
    pub road_rego_subtotal: String,
    pub total_on_road: String,
}

impl BreakdownRecord {
    pub fn new(id: Option<&str>, input: &CalculationInput, b: &FeeBreakdown) -> Self {
        BreakdownRecord {
            id: id.unwrap_or_default().to_string(),
            price: format!("{:.2}", input.price_ex_gst),
            axles: input.axles,
            inspection: input.inspection.display(),
            gst: format!("{:.2}", b.gst),
            dutiable: format!("{:.2}", b.dutiable),
            duty: format!("{:.2}", b.duty),
            licence_fee: format!("{:.2}", b.licence_fee),
            insurance_base: format!("{:.2}", b.insurance_base),
            insurance_gst: format!("{:.2}", b.insurance_gst),
            insurance_duty: format!("{:.2}", b.insurance_duty),
            recording_fee: format!("{:.2}", b.recording_fee),
            plate_fee: format!("{:.2}", b.plate_fee),
            inspection_fee: format!("{:.2}", b.inspection_fee),
            road_rego_subtotal: format!("{:.2}", b.road_rego_subtotal),
            total_on_road: format!("{:.2}", b.total_on_road),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read row {row}: {source}")]
    Read { row: usize, source: csv::Error },
    #[error("failed to write output: {0}")]
    Write(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Quote every row of `reader`, writing one breakdown row per input row.
/// Returns the number of rows quoted.
pub fn run_batch<R, W>(reader: R, writer: W, rates: &RateConfig) -> Result<usize, BatchError>
where
    R: Read,
    W: Write,
{
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut wtr = csv::Writer::from_writer(writer);

    let mut count = 0;
    for (i, result) in rdr.deserialize::<QuoteRecord>().enumerate() {
        // header is line 1
        let record = result.map_err(|source| BatchError::Read { row: i + 2, source })?;
        let input = record.to_input();
        let breakdown = calculate(&input, rates);
        wtr.serialize(BreakdownRecord::new(record.id.as_deref(), &input, &breakdown))?;
        count += 1;
    }
    wtr.flush()?;

    log::info!("Quoted {} batch rows", count);
    Ok(count)
}

//! Quote command - on-road cost breakdown for a single trailer

use crate::core::{
    calculate, format_aud, parse_amount, parse_axles, render_text, report_lines,
    CalculationInput, FeeBreakdown, InspectionType, RateConfig,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct QuoteCommand {
    /// Price excluding GST in dollars (e.g. 75000 or $75,000)
    #[arg(short, long, allow_hyphen_values = true)]
    price: String,

    /// Number of axles, clamped to 1-9
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    axles: String,

    /// Do not add GST to the dutiable value
    #[arg(long)]
    exclude_gst: bool,

    /// Do not cap stamp duty
    #[arg(long)]
    no_cap: bool,

    /// Licence renewal: no recording or plate fee
    #[arg(long)]
    renewal: bool,

    /// Include the insurance lines
    #[arg(long)]
    insurance: bool,

    /// Inspection to include
    #[arg(long, value_enum, default_value_t = InspectionArg::None)]
    inspection: InspectionArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = QuoteFormat::Table)]
    format: QuoteFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum InspectionArg {
    #[default]
    None,
    Initial,
    Reinspection,
}

impl From<InspectionArg> for InspectionType {
    fn from(arg: InspectionArg) -> Self {
        match arg {
            InspectionArg::None => InspectionType::None,
            InspectionArg::Initial => InspectionType::Initial,
            InspectionArg::Reinspection => InspectionType::Reinspection,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum QuoteFormat {
    /// Formatted table
    Table,
    /// Plain text lines for pasting into an email or note
    Text,
    /// JSON with the input and every breakdown figure
    Json,
}

#[derive(Debug, Serialize)]
struct QuoteOutput<'a> {
    input: &'a CalculationInput,
    breakdown: &'a FeeBreakdown,
}

#[derive(Debug, Clone, Tabled)]
struct QuoteRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl QuoteCommand {
    pub fn exec(&self, rates: &RateConfig) -> anyhow::Result<()> {
        let input = self.to_input();
        let breakdown = calculate(&input, rates);

        match self.format {
            QuoteFormat::Table => self.print_table(&input, &breakdown),
            QuoteFormat::Text => print!("{}", render_text(&input, &breakdown)),
            QuoteFormat::Json => self.print_json(&input, &breakdown)?,
        }
        Ok(())
    }

    fn to_input(&self) -> CalculationInput {
        CalculationInput {
            price_ex_gst: parse_amount(&self.price),
            axles: parse_axles(&self.axles),
            include_gst_in_duty: !self.exclude_gst,
            apply_duty_cap: !self.no_cap,
            first_time_licensing: !self.renewal,
            include_insurance_lines: self.insurance,
            inspection: self.inspection.into(),
        }
    }

    fn print_table(&self, input: &CalculationInput, breakdown: &FeeBreakdown) {
        let rows: Vec<QuoteRow> = report_lines(input, breakdown)
            .into_iter()
            .map(|line| QuoteRow {
                item: line.label,
                amount: format_aud(line.amount),
            })
            .collect();

        println!();
        println!("HT ON-ROAD COSTS");
        println!();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
    }

    fn print_json(&self, input: &CalculationInput, breakdown: &FeeBreakdown) -> anyhow::Result<()> {
        let output = QuoteOutput { input, breakdown };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        quote: QuoteCommand,
    }

    fn parse(args: &[&str]) -> QuoteCommand {
        let mut argv = vec!["htcalc"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).quote
    }

    #[test]
    fn defaults_are_first_time_capped_with_gst() {
        let input = parse(&["--price", "75000", "--axles", "3"]).to_input();
        assert_eq!(input.price_ex_gst, dec!(75000));
        assert_eq!(input.axles, 3);
        assert!(input.include_gst_in_duty);
        assert!(input.apply_duty_cap);
        assert!(input.first_time_licensing);
        assert!(!input.include_insurance_lines);
        assert_eq!(input.inspection, InspectionType::None);
    }

    #[test]
    fn toggles_map_to_input() {
        let input = parse(&[
            "--price",
            "$50,000",
            "--axles",
            "2",
            "--exclude-gst",
            "--no-cap",
            "--renewal",
            "--insurance",
            "--inspection",
            "reinspection",
        ])
        .to_input();
        assert_eq!(input.price_ex_gst, dec!(50000));
        assert!(!input.include_gst_in_duty);
        assert!(!input.apply_duty_cap);
        assert!(!input.first_time_licensing);
        assert!(input.include_insurance_lines);
        assert_eq!(input.inspection, InspectionType::Reinspection);
    }

    #[test]
    fn out_of_range_axles_clamped_at_boundary() {
        assert_eq!(parse(&["--price", "1", "--axles", "20"]).to_input().axles, 9);
        assert_eq!(parse(&["--price", "1", "--axles", "-2"]).to_input().axles, 1);
    }

    #[test]
    fn malformed_price_is_zero() {
        let input = parse(&["--price", "n/a"]).to_input();
        assert_eq!(input.price_ex_gst, dec!(0));
    }
}

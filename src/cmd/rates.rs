//! Rates command - show the rates a quote will use

use crate::core::{format_aud, RateConfig};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// Output as JSON (usable as a rate file) instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct RateRow {
    #[tabled(rename = "Rate")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl RatesCommand {
    pub fn exec(&self, rates: &RateConfig) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(rates)?);
        } else {
            self.print_table(rates);
        }
        Ok(())
    }

    fn print_table(&self, rates: &RateConfig) {
        let rows = vec![
            pct("GST", rates.gst_rate),
            pct("Stamp duty", rates.duty_rate),
            aud("Stamp duty cap", rates.duty_cap),
            aud("Licence fee per axle", rates.licence_per_axle),
            aud("Recording fee", rates.recording_fee),
            aud("Plate fee", rates.plate_fee),
            aud("Insurance", rates.insurance_base),
            pct("Insurance GST", rates.insurance_gst_rate),
            pct("Insurance duty", rates.insurance_duty_rate),
            aud("Initial inspection", rates.inspection_initial),
            aud("Re-inspection", rates.inspection_reinspection),
        ];

        println!();
        println!("HT LICENSING RATES");
        println!();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
    }
}

fn pct(name: &'static str, rate: Decimal) -> RateRow {
    RateRow {
        name,
        value: format_pct(rate),
    }
}

fn aud(name: &'static str, amount: Decimal) -> RateRow {
    RateRow {
        name,
        value: format_aud(amount),
    }
}

fn format_pct(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_drop_trailing_zeros() {
        assert_eq!(format_pct(dec!(0.10)), "10%");
        assert_eq!(format_pct(dec!(0.03)), "3%");
        assert_eq!(format_pct(dec!(0.0875)), "8.75%");
    }
}

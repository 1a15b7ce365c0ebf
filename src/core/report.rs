use super::fees::FeeBreakdown;
use super::input::{CalculationInput, InspectionType};
use super::money::format_aud;
use rust_decimal::Decimal;
use std::fmt::Write;

/// A single labelled figure in a quote report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: String,
    pub amount: Decimal,
}

impl ReportLine {
    fn new(label: impl Into<String>, amount: Decimal) -> Self {
        ReportLine {
            label: label.into(),
            amount,
        }
    }
}

/// Lines for a quote, in display order.
///
/// Figures are taken from `breakdown` as computed; `input` only decides which
/// lines appear and how they are labelled.
pub fn report_lines(input: &CalculationInput, breakdown: &FeeBreakdown) -> Vec<ReportLine> {
    let mut lines = vec![ReportLine::new("Price (ex GST)", input.price_ex_gst)];

    if input.include_gst_in_duty {
        lines.push(ReportLine::new("GST", breakdown.gst));
    }
    lines.push(ReportLine::new("Dutiable value", breakdown.dutiable));

    lines.push(ReportLine::new("Stamp duty", breakdown.duty));

    let axle_word = if input.axles == 1 { "axle" } else { "axles" };
    lines.push(ReportLine::new(
        format!("Licence fee ({} {})", input.axles, axle_word),
        breakdown.licence_fee,
    ));

    if input.include_insurance_lines {
        lines.push(ReportLine::new("Insurance", breakdown.insurance_base));
        lines.push(ReportLine::new("Insurance GST", breakdown.insurance_gst));
        lines.push(ReportLine::new("Insurance duty", breakdown.insurance_duty));
    }

    if input.first_time_licensing {
        lines.push(ReportLine::new("Recording fee", breakdown.recording_fee));
        lines.push(ReportLine::new("Plate fee", breakdown.plate_fee));
    }

    match input.inspection {
        InspectionType::None => {}
        InspectionType::Initial => {
            lines.push(ReportLine::new("Inspection (initial)", breakdown.inspection_fee))
        }
        InspectionType::Reinspection => lines.push(ReportLine::new(
            "Inspection (re-inspection)",
            breakdown.inspection_fee,
        )),
    }

    lines.push(ReportLine::new(
        "Road registration subtotal",
        breakdown.road_rego_subtotal,
    ));
    lines.push(ReportLine::new("Total on-road", breakdown.total_on_road));
    lines
}

/// Plain-text quote, one `label: amount` per line, for pasting elsewhere.
pub fn render_text(input: &CalculationInput, breakdown: &FeeBreakdown) -> String {
    let lines = report_lines(input, breakdown);
    let width = lines.iter().map(|l| l.label.len()).max().unwrap_or(0) + 1;

    let mut out = String::from("HT on-road cost estimate\n");
    for line in lines {
        // writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:<width$} {}",
            format!("{}:", line.label),
            format_aud(line.amount),
            width = width
        );
    }
    out
}

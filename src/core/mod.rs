pub mod batch;
pub mod fees;
pub mod input;
pub mod money;
pub mod rates;
pub mod report;

// Flat public surface for domain types and functions.
pub use batch::{run_batch, CsvColumn, QuoteRecord};
pub use fees::{calculate, FeeBreakdown};
pub use input::{parse_amount, parse_axles, CalculationInput, InspectionType};
pub use money::format_aud;
pub use rates::RateConfig;
pub use report::{render_text, report_lines};

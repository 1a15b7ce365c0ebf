//! Schema command - print expected input formats

use crate::core::{QuoteRecord, RateConfig};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema (rate file), csv-header or csv-fields (batch input)
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the rate file
    JsonSchema,
    /// CSV header row for batch input
    CsvHeader,
    /// Batch CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(RateConfig);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", QuoteRecord::csv_header().join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Batch CSV Input Format");
        println!("======================");
        println!();
        for column in QuoteRecord::csv_schema() {
            let req = if column.required { "required" } else { "optional" };
            println!("{:12} ({:8})  {}", column.name, req, column.description);
        }
        println!();
        println!("Blank or malformed values fall back to their defaults; prices to 0.");
        Ok(())
    }
}

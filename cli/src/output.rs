//! Output formatting

use clap::ValueEnum;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render<T: Serialize + Tabled>(&self, rows: &[T]) -> String {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_default(),
            OutputFormat::Yaml => serde_yaml::to_string(rows).unwrap_or_default(),
            OutputFormat::Table => Table::new(rows).with(Style::rounded()).to_string(),
        }
    }
}

/// One matched circuit as shown before confirmation
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MatchRow {
    #[tabled(rename = "Site")]
    pub site: String,
    #[tabled(rename = "Circuit Name")]
    pub circuit: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "BFD Mode")]
    pub bfd_mode: String,
    #[tabled(rename = "LQM Enabled")]
    pub lqm_enabled: String,
    #[tabled(rename = "BWM Mode")]
    pub bwm_mode: String,
}

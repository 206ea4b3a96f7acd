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
    /// Print `data` as JSON or YAML, or as a table of the rows `to_rows` builds
    pub fn print<T, R, F>(&self, data: &T, to_rows: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        R: Tabled,
        F: FnOnce(&T) -> Vec<R>,
    {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
            OutputFormat::Table => {
                let rows = to_rows(data);
                if rows.is_empty() {
                    println!("(none)");
                } else {
                    println!("{}", Table::new(rows).with(Style::rounded()));
                }
            }
        }
        Ok(())
    }

    /// Print a status line; structured formats get it as `{"message": ...}`
    pub fn message(&self, message: &str) -> anyhow::Result<()> {
        match self {
            OutputFormat::Table => println!("{message}"),
            _ => self.print(&serde_json::json!({ "message": message }), |_| Vec::<Field>::new())?,
        }
        Ok(())
    }
}

/// Two-column row for single records
#[derive(Tabled)]
pub struct Field {
    pub field: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }

    pub fn optional<T: ToString>(field: &'static str, value: Option<T>) -> Self {
        Self::new(field, value.map(|v| v.to_string()).unwrap_or_else(|| "-".into()))
    }
}

pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

/// Serialized name of a unit enum variant, e.g. `in_progress`
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "?".into(),
    }
}

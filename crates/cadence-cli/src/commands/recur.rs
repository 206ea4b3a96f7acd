//! Recurrence commands

use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

use cadence_tasks::{RecurrenceCalculator, RecurrenceSpec};

use crate::output::OutputFormat;
use crate::{RecurCommands, RecurrenceArgs};

#[derive(Clone, Serialize, Tabled)]
struct DateRow {
    #[tabled(rename = "#")]
    n: usize,
    date: NaiveDate,
    weekday: String,
}

pub fn handle(action: RecurCommands, today: NaiveDate, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        RecurCommands::Preview {
            kind,
            recurrence,
            start,
            count,
        } => {
            let policy = spec(kind, &recurrence).to_policy()?;
            let dates = RecurrenceCalculator::preview(start.unwrap_or(today), &policy, count)?;
            let rows: Vec<DateRow> = dates
                .into_iter()
                .enumerate()
                .map(|(i, date)| DateRow {
                    n: i + 1,
                    date,
                    weekday: date.format("%a").to_string(),
                })
                .collect();
            format.print(&rows, |rows| rows.to_vec())?;
        }
    }
    Ok(())
}

pub(crate) fn spec(kind: String, args: &RecurrenceArgs) -> RecurrenceSpec {
    RecurrenceSpec {
        weekdays: args.weekdays.clone(),
        end_date: args.until,
        occurrence_limit: args.limit,
        ..RecurrenceSpec::new(kind, args.interval)
    }
}

//! Attendance marking CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_entity::AttendanceStatus;
use schoolhub_entity::attendance::BulkAttendance;

use super::Context;
use crate::output;

/// Arguments for attendance commands
#[derive(Debug, Args)]
pub struct AttendanceArgs {
    /// Attendance subcommand
    #[command(subcommand)]
    pub command: AttendanceCommand,
}

/// Attendance subcommands
#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Mark every listed student of a class with the same status
    MarkClass {
        /// Class name
        #[arg(long = "class")]
        class_name: String,
        /// Day of the marks (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// present, absent, late, or excused
        #[arg(long, default_value = "present")]
        status: AttendanceStatus,
        /// Student IDs, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        students: Vec<String>,
    },
}

/// Execute attendance commands
pub async fn execute(args: &AttendanceArgs, ctx: &Context) -> AppResult<()> {
    let api = ctx.http("Bulk attendance")?;

    match &args.command {
        AttendanceCommand::MarkClass {
            class_name,
            date,
            status,
            students,
        } => {
            if students.iter().any(|s| s.trim().is_empty()) {
                return Err(AppError::validation("Student IDs must not be blank"));
            }
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let bulk = BulkAttendance::uniform(class_name.as_str(), date, students.iter().cloned(), *status);
            let marked = api.mark_bulk_attendance(&bulk).await?;
            output::print_success(&format!(
                "Marked {} students of class {class_name} {status} on {date}",
                marked.len()
            ));
        }
    }

    Ok(())
}

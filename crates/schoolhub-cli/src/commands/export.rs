//! Export CLI command.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::Resource;
use schoolhub_view::export;

use super::{Context, FilterArgs, Module, with_resource};
use crate::output;

/// File format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Arguments for `export`
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Module to export
    #[arg(value_enum)]
    pub module: Module,

    /// File format
    #[arg(long = "as", value_enum, default_value = "csv")]
    pub export_format: ExportFormat,

    /// Destination file; `-` writes to stdout. Defaults to
    /// `{resource}-{date}.{ext}` in the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Search and filters; every matching record is exported, not one page
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute `export`
pub async fn execute(args: &ExportArgs, ctx: &Context) -> AppResult<()> {
    with_resource!(args.module, R => export_records::<R>(args, ctx).await)
}

async fn export_records<R: Resource>(args: &ExportArgs, ctx: &Context) -> AppResult<()> {
    let mut screen = ctx.screen::<R>()?;
    screen.refresh().await?;
    args.filter.apply(&mut screen)?;

    let body = match args.export_format {
        ExportFormat::Csv => screen.export_csv()?,
        ExportFormat::Json => screen.export_json()?,
    };
    let count = screen.view().filtered.len();

    let path = args.output.clone().unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive().to_string();
        PathBuf::from(export::file_name(R::RESOURCE, &today, args.export_format.extension()))
    });

    if path.as_os_str() == "-" {
        print!("{body}");
        return Ok(());
    }

    tokio::fs::write(&path, body).await?;
    output::print_success(&format!("Exported {count} {} records to {}", R::LABEL, path.display()));
    Ok(())
}

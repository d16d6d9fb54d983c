//! Listing CLI commands.

use clap::Args;

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::Resource;

use super::{Context, FilterArgs, Module, with_resource};
use crate::output::{self, OutputFormat};

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Module to list
    #[arg(value_enum)]
    pub module: Module,

    /// Search and filters
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page number; out-of-range pages clamp to the nearest page
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,
}

/// Arguments for `options`
#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Module to inspect
    #[arg(value_enum)]
    pub module: Module,
}

/// Execute `list`
pub async fn execute(args: &ListArgs, ctx: &Context) -> AppResult<()> {
    with_resource!(args.module, R => list_records::<R>(args, ctx).await)
}

/// Execute `options`
pub async fn options(args: &OptionsArgs, ctx: &Context) -> AppResult<()> {
    with_resource!(args.module, R => filter_options::<R>(ctx).await)
}

async fn list_records<R: Resource>(args: &ListArgs, ctx: &Context) -> AppResult<()> {
    let mut screen = ctx.screen::<R>()?;
    screen.refresh().await?;
    args.filter.apply(&mut screen)?;
    let page = screen.go_to_page(args.page);
    if page != args.page && ctx.format == OutputFormat::Table {
        output::print_warning(&format!("Page {} does not exist; showing page {page}", args.page));
    }
    output::print_page(&screen.view().page, ctx.format)
}

async fn filter_options<R: Resource>(ctx: &Context) -> AppResult<()> {
    let mut screen = ctx.screen::<R>()?;
    screen.refresh().await?;
    for field in R::FILTER_FIELDS {
        output::print_kv(field, &screen.filter_options(field).join(", "));
    }
    Ok(())
}

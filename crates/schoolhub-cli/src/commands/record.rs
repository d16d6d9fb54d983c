//! Record create/edit/delete CLI commands.

use clap::Args;

use schoolhub_core::form::Form;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Resource, ResourceApi};
use schoolhub_view::ListScreen;

use super::{Context, Module, parse_key_val, with_resource};
use crate::output;
use crate::prompt;

/// Field values given on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Field value as `field=value`; repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_val)]
    pub values: Vec<(String, String)>,

    /// Do not prompt; use `--set` values and defaults only
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for `add`
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Module to add to
    #[arg(value_enum)]
    pub module: Module,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `edit`
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Module of the record
    #[arg(value_enum)]
    pub module: Module,

    /// Record ID
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `delete`
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Module of the record
    #[arg(value_enum)]
    pub module: Module,

    /// Record ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute `add`
pub async fn add(args: &AddArgs, ctx: &Context) -> AppResult<()> {
    with_resource!(args.module, R => add_record::<R>(&args.fields, ctx).await)
}

/// Execute `edit`
pub async fn edit(args: &EditArgs, ctx: &Context) -> AppResult<()> {
    with_resource!(args.module, R => edit_record::<R>(&args.id, &args.fields, ctx).await)
}

/// Execute `delete`
pub async fn delete(args: &DeleteArgs, ctx: &Context) -> AppResult<()> {
    with_resource!(args.module, R => delete_record::<R>(args, ctx).await)
}

async fn add_record<R: Resource>(fields: &FieldArgs, ctx: &Context) -> AppResult<()> {
    let mut screen = ctx.screen::<R>()?;
    screen.open_create();
    submit_dialog(&mut screen, fields, ctx).await
}

async fn edit_record<R: Resource>(id: &str, fields: &FieldArgs, ctx: &Context) -> AppResult<()> {
    let mut screen = ctx.screen::<R>()?;
    screen.refresh().await?;
    screen.open_edit(id)?;
    submit_dialog(&mut screen, fields, ctx).await
}

/// Fill the open dialog from `--set` values and prompts, then submit it.
async fn submit_dialog<R: Resource>(
    screen: &mut ListScreen<R, dyn ResourceApi<R>>,
    fields: &FieldArgs,
    ctx: &Context,
) -> AppResult<()> {
    for (field, value) in &fields.values {
        screen.set_field(field, value.as_str())?;
    }
    if !fields.no_input {
        let answers = prompt::fill(<R::Draft as Form>::FIELDS, &screen.dialog().values)?;
        for (field, value) in answers.iter() {
            screen.set_field(field, value)?;
        }
    }

    let record = screen.submit().await?;
    output::print_item(&record, ctx.format)
}

async fn delete_record<R: Resource>(args: &DeleteArgs, ctx: &Context) -> AppResult<()> {
    if !args.yes && !prompt::confirm(&format!("Delete {} '{}'?", R::LABEL, args.id))? {
        output::print_warning("Cancelled");
        return Ok(());
    }
    let mut screen = ctx.screen::<R>()?;
    screen.delete(&args.id).await
}

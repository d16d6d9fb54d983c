//! CLI command definitions and dispatch.

pub mod attendance;
pub mod export;
pub mod library;
pub mod list;
pub mod overview;
pub mod record;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use schoolhub_client::{HttpApi, SeedData};
use schoolhub_core::config::AppConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Resource, ResourceApi};
use schoolhub_view::{CollectingNotifier, ListScreen};

use crate::output::{self, OutputFormat};

/// SchoolHub administration console
#[derive(Debug, Parser)]
#[command(name = "schoolhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Serve records from a JSON seed file instead of the API.
    /// Changes are not saved.
    #[arg(long, value_name = "SEED_JSON")]
    pub offline: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List a module's records with search, filters, and paging
    List(list::ListArgs),
    /// Show the filter values available for a module
    Options(list::OptionsArgs),
    /// Add a record
    Add(record::AddArgs),
    /// Edit a record
    Edit(record::EditArgs),
    /// Delete a record
    Delete(record::DeleteArgs),
    /// Export filtered records as CSV or JSON
    Export(export::ExportArgs),
    /// Show headline figures of every module
    Overview,
    /// Library lending
    Library(library::LibraryArgs),
    /// Attendance marking
    Attendance(attendance::AttendanceArgs),
}

/// The console's modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Module {
    Students,
    Attendance,
    Library,
    Hostel,
    Inventory,
    Accounts,
    Alumni,
    Sports,
    Notices,
}

/// Run `$body` with `$r` bound to the record type of `$module`.
macro_rules! with_resource {
    ($module:expr, $r:ident => $body:expr) => {{
        match $module {
            $crate::commands::Module::Students => {
                type $r = schoolhub_entity::Student;
                $body
            }
            $crate::commands::Module::Attendance => {
                type $r = schoolhub_entity::AttendanceRecord;
                $body
            }
            $crate::commands::Module::Library => {
                type $r = schoolhub_entity::Book;
                $body
            }
            $crate::commands::Module::Hostel => {
                type $r = schoolhub_entity::HostelRoom;
                $body
            }
            $crate::commands::Module::Inventory => {
                type $r = schoolhub_entity::InventoryItem;
                $body
            }
            $crate::commands::Module::Accounts => {
                type $r = schoolhub_entity::Transaction;
                $body
            }
            $crate::commands::Module::Alumni => {
                type $r = schoolhub_entity::Alumnus;
                $body
            }
            $crate::commands::Module::Sports => {
                type $r = schoolhub_entity::SportsEvent;
                $body
            }
            $crate::commands::Module::Notices => {
                type $r = schoolhub_entity::Notice;
                $body
            }
        }
    }};
}

pub(crate) use with_resource;

/// Search and filter options shared by listing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive text to look for in the searchable fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field filter as `field=value`; repeatable
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,
}

impl FilterArgs {
    /// Apply search and filters to a screen.
    pub fn apply<R, A>(&self, screen: &mut ListScreen<R, A>) -> AppResult<()>
    where
        R: Resource,
        A: ResourceApi<R> + ?Sized,
    {
        if let Some(term) = &self.search {
            screen.set_search(term.as_str());
        }
        for (field, value) in &self.filters {
            screen.set_filter(field, value.as_str())?;
        }
        Ok(())
    }
}

/// Parse `key=value`.
pub fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Where records come from.
#[derive(Debug)]
pub enum Backend {
    /// The REST API.
    Http(Arc<HttpApi>),
    /// Seeded in-memory stores.
    Offline(SeedData),
}

/// Everything a command needs.
#[derive(Debug)]
pub struct Context {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub backend: Backend,
    pub notifier: Arc<CollectingNotifier>,
}

impl Context {
    /// A record API for `R`.
    pub fn api<R: Resource>(&self) -> AppResult<Arc<dyn ResourceApi<R>>> {
        match &self.backend {
            Backend::Http(api) => Ok(api.clone()),
            Backend::Offline(seed) => Ok(Arc::new(seed.api::<R>()?)),
        }
    }

    /// A list screen for `R` using the configured page size.
    pub fn screen<R: Resource>(&self) -> AppResult<ListScreen<R, dyn ResourceApi<R>>> {
        Ok(ListScreen::from_config(
            self.api::<R>()?,
            self.notifier.clone(),
            &self.config.console,
        ))
    }

    /// The HTTP client, for actions the offline store does not support.
    pub fn http(&self, action: &str) -> AppResult<&HttpApi> {
        match &self.backend {
            Backend::Http(api) => Ok(api),
            Backend::Offline(_) => Err(AppError::validation(format!(
                "{action} needs the API; drop --offline"
            ))),
        }
    }

    /// Print and clear queued toasts.
    pub fn flush_toasts(&self) {
        output::print_toasts(self.notifier.drain());
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let ctx = self.context().await?;
        debug!(command = ?self.command, offline = self.offline.is_some(), "Dispatching command");
        let result = match &self.command {
            Commands::List(args) => list::execute(args, &ctx).await,
            Commands::Options(args) => list::options(args, &ctx).await,
            Commands::Add(args) => record::add(args, &ctx).await,
            Commands::Edit(args) => record::edit(args, &ctx).await,
            Commands::Delete(args) => record::delete(args, &ctx).await,
            Commands::Export(args) => export::execute(args, &ctx).await,
            Commands::Overview => overview::execute(&ctx).await,
            Commands::Library(args) => library::execute(args, &ctx).await,
            Commands::Attendance(args) => attendance::execute(args, &ctx).await,
        };
        ctx.flush_toasts();
        if let Err(e) = &result {
            debug!(kind = %e.kind, error = %e.message, "Command failed");
        }
        result
    }

    async fn context(&self) -> AppResult<Context> {
        let config = load_config(&self.config, &self.env)?;
        let backend = match &self.offline {
            Some(path) => {
                output::print_warning("Offline mode: changes are not saved");
                Backend::Offline(SeedData::load(path).await?)
            }
            None => Backend::Http(Arc::new(HttpApi::new(&config.api)?)),
        };
        Ok(Context {
            config,
            format: self.format,
            backend,
            notifier: Arc::new(CollectingNotifier::new()),
        })
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, env)
}

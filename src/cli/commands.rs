use crate::dispatcher::{Dispatcher, RenderOptions};
use crate::handlers::HandlerRegistry;
use crate::result::{CatalogTranslator, Format, Translator};
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use crate::table::{load_table, EndpointTable};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface for brrtapi
///
/// Inspects endpoint tables and dispatches requests against them with the
/// built-in handler kinds.
#[derive(Parser, Debug)]
#[command(name = "brrtapi")]
#[command(about = "brrtapi endpoint table CLI", long_about = None)]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, default_value = "warn", env = "BRRTAPI_LOG_LEVEL")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the endpoints of a table in priority order
    Routes {
        /// Endpoint table file (YAML or JSON)
        #[arg(short, long, env = "BRRTAPI_TABLE")]
        table: PathBuf,
    },
    /// Show how a request resolves without executing it
    Resolve {
        /// Endpoint table file (YAML or JSON)
        #[arg(short, long, env = "BRRTAPI_TABLE")]
        table: PathBuf,

        /// HTTP method, matched exactly
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Raw request path
        #[arg(short, long)]
        path: String,
    },
    /// Dispatch a request and print the JSON response
    Dispatch {
        /// Endpoint table file (YAML or JSON)
        #[arg(short, long, env = "BRRTAPI_TABLE")]
        table: PathBuf,

        /// HTTP method, matched exactly
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Raw request path
        #[arg(short, long)]
        path: String,

        /// Language code for rendering (overrides BRRTAPI_LANG)
        #[arg(long)]
        lang: Option<String>,

        /// Render format (overrides BRRTAPI_RENDER_FORMAT)
        #[arg(long)]
        format: Option<String>,

        /// Translation catalog file (overrides BRRTAPI_CATALOG)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Treat every protected endpoint as allowed
        #[arg(long, default_value_t = false)]
        allow_protected: bool,
    },
}

fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.as_bytes()).map_err(|_| anyhow!("Invalid HTTP method '{method}'"))
}

fn open_table(path: &Path) -> Result<EndpointTable> {
    load_table(path, &HandlerRegistry::with_builtins())
}

/// Run a parsed command line.
pub fn run_cli(cli: Cli) -> Result<()> {
    let config = RuntimeConfig::from_env();

    match cli.command {
        Commands::Routes { table } => {
            open_table(&table)?.dump_routes();
            Ok(())
        }
        Commands::Resolve {
            table,
            method,
            path,
        } => {
            let table = open_table(&table)?;
            let router = Router::new(&table, parse_method(&method)?, &path);
            let summary = serde_json::json!({
                "resolved": router.is_resolved(),
                "kind": router.handler_kind(),
                "callback": router.callback_name(),
                "protected": router.is_protected(),
                "segments": router.segments(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Commands::Dispatch {
            table,
            method,
            path,
            lang,
            format,
            catalog,
            allow_protected,
        } => {
            let mut options = RenderOptions::from_config(&config);
            if let Some(lang) = lang {
                options.lang = lang;
            }
            if let Some(format) = format {
                options.format = Format::parse(&format);
            }

            let mut dispatcher = Dispatcher::new(open_table(&table)?).with_options(options);
            if let Some(catalog) = catalog.or(config.catalog_path) {
                let translator: Arc<dyn Translator> = Arc::new(
                    CatalogTranslator::load(&catalog)
                        .with_context(|| format!("Cannot use catalog {}", catalog.display()))?,
                );
                dispatcher = dispatcher.with_translator(translator);
            }
            if allow_protected {
                dispatcher = dispatcher.with_gate(Arc::new(|_: &crate::router::RequestContext| true));
            }

            let response = dispatcher.dispatch(parse_method(&method)?, &path);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

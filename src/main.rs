//! Command-line lookup against an application's translation setup.
//!
//! ```text
//! translation-center <ROOT> <ENVIRONMENT> <LOCALE> <KEY> [NAME=VALUE]... \
//!     [--count N] [--scope a.b] [--default TEXT] [--static]
//! ```

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use translation_center::backend::{
    BackendError,
    TranslationBackend,
};
use translation_center::config::ConfigManager;
use translation_center::input::StaticCatalog;
use translation_center::store::MemoryStore;
use translation_center::types::{
    LookupOptions,
    TranslationValue,
};

/// Locale files relative to the application root.
const LOCALES_DIR: &str = "config/locales";

/// Looks up one translation key the way the application would.
#[derive(Parser, Debug)]
#[command(name = "translation-center", version, about)]
struct Cli {
    /// Application root containing `config/translation_center.yml`
    root: PathBuf,

    /// Section of the config file to use
    environment: String,

    /// Locale to translate into
    locale: String,

    /// Translation key, e.g. `customer.home.title`
    key: String,

    /// Interpolation variables
    #[arg(value_name = "NAME=VALUE", value_parser = parse_variable)]
    variables: Vec<(String, String)>,

    /// Count used for pluralization and `%{count}`
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    /// Dotted scope prepended to the key
    #[arg(long, value_delimiter = '.')]
    scope: Vec<String>,

    /// Value used when the key has no translation
    #[arg(long)]
    default: Option<String>,

    /// Read from the static locale files even for store-backed keys
    #[arg(long = "static")]
    prefer_static: bool,
}

impl Cli {
    /// Lookup options described by the flags and variables.
    fn options(&self) -> Result<LookupOptions, String> {
        let mut seen = BTreeSet::new();
        if let Some((name, _)) = self.variables.iter().find(|(name, _)| !seen.insert(name)) {
            return Err(format!("variable '{name}' given more than once"));
        }

        let mut options = LookupOptions::new();
        if !self.scope.is_empty() {
            options = options.with_scope(self.scope.iter().cloned());
        }
        if let Some(count) = self.count {
            options = options.with_count(count);
        }
        if let Some(default) = &self.default {
            options = options.with_default(default.as_str());
        }
        if self.prefer_static {
            options = options.preferring_static();
        }
        for (name, value) in &self.variables {
            options = options.with_variable(name.as_str(), value.as_str());
        }
        Ok(options)
    }
}

/// Parses a `name=value` variable.
fn parse_variable(pair: &str) -> Result<(String, String), String> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{pair}'")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Looks the key up and writes the result to stdout.
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options()?;

    let mut config = ConfigManager::new();
    config.load_settings(Some(cli.root.clone()), &cli.environment)?;

    let locales_dir = cli.root.join(LOCALES_DIR);
    let catalog = if locales_dir.is_dir() {
        StaticCatalog::load_dir(&locales_dir)?
    } else {
        tracing::warn!("{} not found, static lookups will miss", locales_dir.display());
        StaticCatalog::new()
    };

    let backend = TranslationBackend::new(config.into_settings(), catalog, MemoryStore::new());
    let output = match backend.translate(&cli.locale, &cli.key, &options) {
        Ok(TranslationValue::Text(text)) => serde_json::to_string(&text)?,
        Ok(map @ TranslationValue::Map(_)) => serde_json::to_string_pretty(&map)?,
        Err(BackendError::Missing(missing)) => backend.render_missing(&missing)?,
        Err(e) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

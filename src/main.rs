//! Command line entry point.

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use dashboard_i18n::EdgeRedirect;
use dashboard_i18n::audit::audit;
use dashboard_i18n::config::{
    ConfigError,
    ConfigManager,
    I18nSettings,
    MatcherError,
};
use dashboard_i18n::dashboard::{
    Trend,
    localized_cards,
};
use dashboard_i18n::format::{
    Currency,
    DateFormatOptions,
    DateStyle,
    NumberFormatOptions,
    NumberStyle,
};
use dashboard_i18n::routing::with_locale;
use dashboard_i18n::store::{
    HeadlessHost,
    LocaleStore,
    StoreError,
    UrlPathStrategy,
};
use dashboard_i18n::types::Locale;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dashboard-i18n")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Directory containing `.dashboard-i18n.json` (defaults to the working directory)
    #[arg(long, global = true, env = "DASHBOARD_I18N_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// URL path of the current page, used by the urlPath strategy
    #[arg(long, global = true, default_value = "/")]
    path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a translation key
    Translate {
        key: String,
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Show what the edge filter does with a request path
    Redirect {
        /// Request target, query string included
        target: String,
        #[arg(long)]
        accept_language: Option<String>,
    },

    /// Format a number with locale conventions
    FormatNumber {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long)]
        locale: Option<Locale>,
        #[arg(long, value_enum, default_value_t = NumberStyleArg::Decimal)]
        style: NumberStyleArg,
        /// Currency code for `--style currency`
        #[arg(long, default_value = "USD")]
        currency: Currency,
        #[arg(long)]
        min_fraction_digits: Option<usize>,
        #[arg(long)]
        max_fraction_digits: Option<usize>,
        #[arg(long)]
        no_grouping: bool,
    },

    /// Format a calendar date (YYYY-MM-DD) with locale conventions
    FormatDate {
        date: NaiveDate,
        #[arg(long)]
        locale: Option<Locale>,
        #[arg(long, value_enum, default_value_t = DateStyleArg::Short)]
        style: DateStyleArg,
    },

    /// Check that every translation table defines the same keys
    Check,

    /// Print the dashboard summary cards
    Cards {
        #[arg(long)]
        locale: Option<Locale>,
        #[arg(long)]
        json: bool,
    },

    /// Switch the current locale through the configured strategy
    SetLocale { code: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NumberStyleArg {
    Decimal,
    Percent,
    Currency,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyleArg {
    Short,
    Medium,
    Long,
    Full,
}

impl From<DateStyleArg> for DateStyle {
    fn from(value: DateStyleArg) -> Self {
        match value {
            DateStyleArg::Short => Self::Short,
            DateStyleArg::Medium => Self::Medium,
            DateStyleArg::Long => Self::Long,
            DateStyleArg::Full => Self::Full,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Invalid request: {0}")]
    Http(#[from] http::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Locale watcher failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{0} translation table(s) are missing keys")]
    Divergent(usize),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            let _ = writeln!(io::stderr(), "error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` でフィルタ可能、デフォルトは warn
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_target(false).init();
    guard
}

fn load_settings(config_dir: Option<PathBuf>) -> Result<I18nSettings, ConfigError> {
    let root = config_dir.or_else(|| std::env::current_dir().ok());
    let mut manager = ConfigManager::new();
    manager.load_settings(root)?;
    tracing::debug!("Configuration root: {:?}", manager.config_root());
    Ok(manager.get_settings().clone())
}

/// Store for reading in a fixed locale without touching the configured strategy.
fn pinned_store(store: &LocaleStore, locale: Locale) -> Arc<LocaleStore> {
    LocaleStore::new(
        Arc::new(store.translations().clone()),
        Box::new(UrlPathStrategy),
        Arc::new(HeadlessHost::new(None, &with_locale("/", locale))),
        store.key_separator(),
    )
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config_dir)?;
    let store = LocaleStore::from_settings(&settings, Arc::new(HeadlessHost::detect(&cli.path)))?;
    store.mount();

    let view = |locale: Option<Locale>| match locale {
        Some(locale) => pinned_store(&store, locale),
        None => Arc::clone(&store),
    };

    // 書き込みごとにロックする。await をまたいで保持しない
    let mut out = io::stdout();

    match cli.command {
        Command::Translate { key, locale } => {
            writeln!(out, "{}", view(locale).translate(&key))?;
        }
        Command::Redirect { target, accept_language } => {
            let mut request = http::Request::builder().uri(target.as_str());
            if let Some(value) = accept_language {
                request = request.header(http::header::ACCEPT_LANGUAGE, value);
            }
            let request = request.body(())?;

            match EdgeRedirect::new(&settings.edge)?.handle(&request)? {
                Some(response) => {
                    let location = response
                        .headers()
                        .get(http::header::LOCATION)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    writeln!(out, "{} {location}", response.status().as_u16())?;
                }
                None => writeln!(out, "pass-through")?,
            }
        }
        Command::FormatNumber {
            value,
            locale,
            style,
            currency,
            min_fraction_digits,
            max_fraction_digits,
            no_grouping,
        } => {
            let options = NumberFormatOptions {
                style: match style {
                    NumberStyleArg::Decimal => NumberStyle::Decimal,
                    NumberStyleArg::Percent => NumberStyle::Percent,
                    NumberStyleArg::Currency => NumberStyle::Currency(currency),
                },
                minimum_fraction_digits: min_fraction_digits,
                maximum_fraction_digits: max_fraction_digits,
                use_grouping: !no_grouping,
            };
            writeln!(out, "{}", view(locale).format_number(value, &options))?;
        }
        Command::FormatDate { date, locale, style } => {
            let midnight = date.and_time(chrono::NaiveTime::default()).and_utc();
            let options = DateFormatOptions::new(style.into());
            writeln!(out, "{}", view(locale).format_date(&midnight, &options))?;
        }
        Command::Check => {
            let divergences = audit(store.translations(), store.key_separator());
            for divergence in &divergences {
                writeln!(out, "{divergence}")?;
            }
            if !divergences.is_empty() {
                return Err(CliError::Divergent(divergences.len()));
            }
            writeln!(out, "All translation tables define the same keys")?;
        }
        Command::Cards { locale, json } => {
            let cards = localized_cards(&view(locale));
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&cards)?)?;
            } else {
                for card in &cards {
                    let arrow = match card.trend {
                        Trend::Up => '↑',
                        Trend::Down => '↓',
                    };
                    writeln!(
                        out,
                        "{}: {} ({arrow}{}% {})",
                        card.label, card.value, card.percentage, card.change
                    )?;
                    let points: Vec<String> = card
                        .chart
                        .iter()
                        .map(|point| format!("{} {}", point.label, point.formatted))
                        .collect();
                    writeln!(out, "  {}", points.join(" | "))?;
                }
            }
        }
        Command::SetLocale { code } => {
            let mut subscriber = store.subscribe();
            let watcher = tokio::spawn(async move { subscriber.changed().await });

            if store.set_locale_code(&code)? {
                let locale = watcher.await??;
                writeln!(
                    out,
                    "{}: {}",
                    locale.native_name(),
                    store.translate("common.languageSwitcher.label")
                )?;
            } else {
                watcher.abort();
                writeln!(out, "Locale is already '{}'", store.locale())?;
            }
        }
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use wu_core::{
    Config, Credential, CredentialError, LogDiagnostics, Query, format_report, source_from_config,
};

pub const DEFAULT_KEY_FILE: &str = "secret.txt";
pub const DEFAULT_LOCATION: &str = "PA/Philadelphia";
pub const DEFAULT_FEATURE: &str = "conditions";
pub const DEFAULT_TEMPLATE: &str = "Current weather in [display_location_full]:\n    Weather:     [weather]\n    Temperature: [temp_f] F";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "wu",
    version,
    about = "Print current Weather Underground conditions through a template"
)]
pub struct Cli {
    /// Output template. Fields are identified by square brackets,
    /// e.g. "Temperature: [temp_f] °F". Defaults to a three-line summary.
    #[arg(short, long)]
    pub template: Option<String>,

    /// Location used for the weather query [default: PA/Philadelphia].
    #[arg(short, long)]
    pub location: Option<String>,

    /// Weather Underground API key file [default: secret.txt].
    #[arg(short = 'k', long)]
    pub key_file: Option<PathBuf>,

    /// Weather Underground API key. Takes precedence over --key-file when non-empty.
    /// Not recommended: the key ends up in your shell history.
    #[arg(short = 'K', long)]
    pub key: Option<String>,

    /// API feature to request; repeat for several [default: conditions].
    #[arg(short = 'f', long = "feature")]
    pub features: Vec<String>,

    /// Config file to read instead of the platform default.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase logging level. By default only warnings and errors are logged.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Values for one invocation after merging flags, config file and built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub template: String,
    pub location: String,
    pub key_file: PathBuf,
    pub features: Vec<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let features = if cli.features.is_empty() {
            config
                .features
                .clone()
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_FEATURE.to_string()])
        } else {
            cli.features.clone()
        };

        Self {
            template: cli
                .template
                .clone()
                .or_else(|| config.template.clone())
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            location: cli
                .location
                .clone()
                .or_else(|| config.location.clone())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            key_file: cli
                .key_file
                .clone()
                .or_else(|| config.key_file.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE)),
            features,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// A non-empty `--key` wins; otherwise the key file is read.
    pub fn credential(&self, settings: &Settings) -> Result<Credential, CredentialError> {
        match self.key.as_deref().filter(|key| !key.is_empty()) {
            Some(key) => Credential::new(key),
            None => Credential::load(&settings.key_file),
        }
    }

    /// Produce the text to print.
    ///
    /// Errors only when no usable API key is found or the config cannot be read. Failing
    /// to fetch or decode the weather is logged and the template is returned unmodified.
    pub async fn run(self) -> Result<String> {
        let config = self.load_config()?;
        let settings = Settings::resolve(&self, &config);
        log::debug!("Resolved settings: {settings:?}");

        let credential = self.credential(&settings).context(
            "Weather Underground API key not found! \
             Either save it in a file and point to the location with --key-file or supply it with --key",
        )?;

        let source = source_from_config(credential, &config);
        let query = Query::new(settings.features, settings.location);

        match format_report(source.as_ref(), &query, &settings.template, &LogDiagnostics).await {
            Ok(output) => Ok(output),
            Err(err) => {
                log::error!("{:#}", anyhow::Error::new(err));
                Ok(settings.template)
            }
        }
    }
}

pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

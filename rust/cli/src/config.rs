//! Layered configuration: built-in defaults, then the TOML file named by
//! `CROUPIER_CONFIG`, then `CROUPIER_*` environment variables. Command-line
//! flags are applied on top by each command.

use serde::{Deserialize, Serialize};
use std::fs;

use croupier_engine::rules::BlackjackRules;

pub const CONFIG_ENV: &str = "CROUPIER_CONFIG";
pub const MAX_DECKS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub iterations: u64,
    pub seed: Option<u64>,
    pub num_decks: usize,
    pub dealer_hits_soft_17: bool,
    pub blackjack_payout: f64,
    pub allow_double: bool,
    pub allow_split: bool,
    pub allow_resplit: bool,
    pub allow_surrender: bool,
    pub bet: f64,
}

impl Default for Config {
    fn default() -> Self {
        let rules = BlackjackRules::default();
        Self {
            iterations: 10_000,
            seed: None,
            num_decks: rules.num_decks,
            dealer_hits_soft_17: rules.dealer_hits_soft_17,
            blackjack_payout: rules.blackjack_payout,
            allow_double: rules.allow_double,
            allow_split: rules.allow_split,
            allow_resplit: rules.allow_resplit,
            allow_surrender: rules.allow_surrender,
            bet: 1.0,
        }
    }
}

impl Config {
    pub fn blackjack_rules(&self) -> BlackjackRules {
        BlackjackRules {
            num_decks: self.num_decks,
            dealer_hits_soft_17: self.dealer_hits_soft_17,
            blackjack_payout: self.blackjack_payout,
            allow_double: self.allow_double,
            allow_split: self.allow_split,
            allow_resplit: self.allow_resplit,
            allow_surrender: self.allow_surrender,
            ..BlackjackRules::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub iterations: ValueSource,
    pub seed: ValueSource,
    pub num_decks: ValueSource,
    pub dealer_hits_soft_17: ValueSource,
    pub blackjack_payout: ValueSource,
    pub allow_double: ValueSource,
    pub allow_split: ValueSource,
    pub allow_resplit: ValueSource,
    pub allow_surrender: ValueSource,
    pub bet: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            iterations: ValueSource::Default,
            seed: ValueSource::Default,
            num_decks: ValueSource::Default,
            dealer_hits_soft_17: ValueSource::Default,
            blackjack_payout: ValueSource::Default,
            allow_double: ValueSource::Default,
            allow_split: ValueSource::Default,
            allow_resplit: ValueSource::Default,
            allow_surrender: ValueSource::Default,
            bet: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "cannot parse {}: {}", CONFIG_ENV, e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(v) = env_value("CROUPIER_ITERATIONS") {
        cfg.iterations = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid iterations: {v}")))?;
        sources.iterations = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_SEED") {
        cfg.seed = Some(
            v.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {v}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_DECKS") {
        cfg.num_decks = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid decks: {v}")))?;
        sources.num_decks = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_HIT_SOFT_17") {
        cfg.dealer_hits_soft_17 = parse_bool(&v)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid hit_soft_17: {v}")))?;
        sources.dealer_hits_soft_17 = ValueSource::Env;
    }
    if let Some(v) = env_value("CROUPIER_BLACKJACK_PAYOUT") {
        cfg.blackjack_payout = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid blackjack_payout: {v}")))?;
        sources.blackjack_payout = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    iterations: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    num_decks: Option<usize>,
    #[serde(default)]
    dealer_hits_soft_17: Option<bool>,
    #[serde(default)]
    blackjack_payout: Option<f64>,
    #[serde(default)]
    allow_double: Option<bool>,
    #[serde(default)]
    allow_split: Option<bool>,
    #[serde(default)]
    allow_resplit: Option<bool>,
    #[serde(default)]
    allow_surrender: Option<bool>,
    #[serde(default)]
    bet: Option<f64>,
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    macro_rules! take {
        ($field:ident) => {
            if let Some(v) = f.$field {
                cfg.$field = v;
                sources.$field = ValueSource::File;
            }
        };
    }
    take!(iterations);
    take!(num_decks);
    take!(dealer_hits_soft_17);
    take!(blackjack_payout);
    take!(allow_double);
    take!(allow_split);
    take!(allow_resplit);
    take!(allow_surrender);
    take!(bet);
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.iterations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: iterations must be >=1".into(),
        ));
    }
    if cfg.num_decks == 0 || cfg.num_decks > MAX_DECKS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: num_decks must be between 1 and {MAX_DECKS}"
        )));
    }
    if !(cfg.blackjack_payout > 0.0 && cfg.blackjack_payout.is_finite()) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blackjack_payout must be >0".into(),
        ));
    }
    if !(cfg.bet > 0.0 && cfg.bet.is_finite()) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bet must be >0".into(),
        ));
    }
    Ok(())
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

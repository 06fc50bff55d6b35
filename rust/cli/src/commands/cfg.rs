//! Configuration command handler.
//!
//! Prints every configuration value with the layer it came from.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "iterations": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if the file or an environment value cannot be
/// used, `CliError::Io` if writing fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let entry = |value: serde_json::Value, source: config::ValueSource| {
        serde_json::json!({ "value": value, "source": source })
    };
    let display = serde_json::json!({
        "iterations": entry(config.iterations.into(), sources.iterations),
        "seed": entry(config.seed.into(), sources.seed),
        "num_decks": entry(config.num_decks.into(), sources.num_decks),
        "dealer_hits_soft_17": entry(config.dealer_hits_soft_17.into(), sources.dealer_hits_soft_17),
        "blackjack_payout": entry(config.blackjack_payout.into(), sources.blackjack_payout),
        "allow_double": entry(config.allow_double.into(), sources.allow_double),
        "allow_split": entry(config.allow_split.into(), sources.allow_split),
        "allow_resplit": entry(config.allow_resplit.into(), sources.allow_resplit),
        "allow_surrender": entry(config.allow_surrender.into(), sources.allow_surrender),
        "bet": entry(config.bet.into(), sources.bet),
    });
    super::write_json(out, &display)
}

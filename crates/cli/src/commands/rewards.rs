//! Rewards balance inspection.

use std::io::Write;
use std::path::Path;

use credshop_storefront::rewards::RewardsLedger;

use super::{CliError, durable_store};

/// Print the rewards balance.
pub fn show(data_dir: &Path) -> Result<(), CliError> {
    let ledger = RewardsLedger::restore(durable_store(data_dir));
    writeln!(std::io::stdout().lock(), "Rewards: {} pts", ledger.balance())?;
    Ok(())
}

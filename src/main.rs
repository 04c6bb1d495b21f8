//! opps-merge: merge Salesforce opportunity exports with Tubular channel metrics
//!
//! Joins an opportunity CSV to a metrics CSV on channel ID, optionally
//! resolving channel IDs from account names through a channel map.

use anyhow::Result;

fn main() -> Result<()> {
    opps_merge::cli::run()
}

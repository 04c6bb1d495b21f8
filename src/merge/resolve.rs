//! Join-key column discovery.

use crate::domain::{Table, ACCOUNT_COLUMN_CANDIDATES, CHANNEL_COLUMN_CANDIDATES};

/// First candidate present in `table`, in candidate order.
///
/// Candidate order decides ties: a later candidate is never chosen while an
/// earlier one exists, whatever the table's own column order.
pub fn first_present<'a>(table: &Table, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|candidate| table.has_column(candidate))
}

/// Opportunity column holding the channel ID.
pub fn resolve_channel_column(opps: &Table) -> Option<&'static str> {
    first_present(opps, CHANNEL_COLUMN_CANDIDATES)
}

/// Opportunity column holding the account name.
pub fn resolve_account_column(opps: &Table) -> Option<&'static str> {
    first_present(opps, ACCOUNT_COLUMN_CANDIDATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_priority_beats_column_order() {
        let opps = Table::from_strs(&["channel_id", "Account.YouTube_Channel_ID__c"], &[]);
        assert_eq!(resolve_channel_column(&opps), Some("Account.YouTube_Channel_ID__c"));
    }

    #[test]
    fn channel_falls_through_aliases() {
        let opps = Table::from_strs(&["Name", "Channel_ID__c", "YouTube_Channel_ID__c"], &[]);
        assert_eq!(resolve_channel_column(&opps), Some("YouTube_Channel_ID__c"));

        let opps = Table::from_strs(&["Name", "Channel_ID__c"], &[]);
        assert_eq!(resolve_channel_column(&opps), Some("Channel_ID__c"));
    }

    #[test]
    fn channel_not_found() {
        let opps = Table::from_strs(&["Account.Name", "Channel ID"], &[]);
        assert_eq!(resolve_channel_column(&opps), None);
    }

    #[test]
    fn account_priority() {
        let opps = Table::from_strs(&["Account", "account_name", "Account.Name"], &[]);
        assert_eq!(resolve_account_column(&opps), Some("Account.Name"));

        let opps = Table::from_strs(&["Account", "account_name"], &[]);
        assert_eq!(resolve_account_column(&opps), Some("account_name"));

        let opps = Table::from_strs(&["Id"], &[]);
        assert_eq!(resolve_account_column(&opps), None);
    }
}

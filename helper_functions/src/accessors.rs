use types::phase0::primitives::Gwei;

/// Sums effective balances, treating inactive validators as zero.
///
/// Fork choice receives balances with inactive validators already zeroed out, so the sum is the
/// total active balance of the state the balances were taken from.
#[must_use]
pub fn total_active_balance(effective_balances: &[Gwei]) -> Gwei {
    effective_balances
        .iter()
        .fold(0, |total, balance| total.saturating_add(*balance))
}

//! Deterministic fund distribution calculator
//!
//! Pure floor arithmetic from stake, fee percent and an accepted
//! distribution pair to per-party amounts. Floor-division remainders stay
//! with the platform as residual fee; that is the accepted rounding policy,
//! not an error. Must be testable without the oracle, so it takes plain
//! integers and returns a plan rather than touching the ledger itself.

use crate::error::{Error, Result};

/// Computed settlement for one resolved dispute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Platform fee, floor(stake * fee_percent / 100)
    pub fee_amount: u64,
    /// Stake remaining after the fee
    pub distributable: u64,
    /// floor(distributable * plaintiff_percent / 100)
    pub plaintiff_amount: u64,
    /// floor(distributable * defendant_percent / 100)
    pub defendant_amount: u64,
    /// Rounding remainder retained by the platform
    pub residual: u64,
}

/// Compute the settlement for a stake under an accepted distribution pair
///
/// The pair is validated upstream by the rule engine; the sum-to-100 check
/// here is a defensive guard against a rule gap and fails with
/// [`Error::Arithmetic`] rather than issuing any transfer.
pub fn settle(
    stake: u64,
    fee_percent: u64,
    plaintiff_percent: u8,
    defendant_percent: u8,
) -> Result<SettlementPlan> {
    if plaintiff_percent as u16 + defendant_percent as u16 != 100 {
        return Err(Error::Arithmetic(format!(
            "distribution pair ({plaintiff_percent}, {defendant_percent}) does not sum to 100"
        )));
    }
    if fee_percent > 100 {
        return Err(Error::Arithmetic(format!(
            "platform fee percent {fee_percent} exceeds 100"
        )));
    }

    let fee_amount = mul_pct(stake, fee_percent)?;
    let distributable = stake - fee_amount;
    let plaintiff_amount = mul_pct(distributable, plaintiff_percent as u64)?;
    let defendant_amount = mul_pct(distributable, defendant_percent as u64)?;
    let residual = distributable - plaintiff_amount - defendant_amount;

    Ok(SettlementPlan {
        fee_amount,
        distributable,
        plaintiff_amount,
        defendant_amount,
        residual,
    })
}

/// floor(amount * percent / 100) with overflow checking
fn mul_pct(amount: u64, percent: u64) -> Result<u64> {
    amount
        .checked_mul(percent)
        .map(|product| product / 100)
        .ok_or_else(|| Error::Arithmetic(format!("overflow computing {percent}% of {amount}")))
}

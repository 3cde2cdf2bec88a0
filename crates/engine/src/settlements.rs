//! Settlement of net balances.
//!
//! Greedy netting: debtors and creditors are each sorted by magnitude
//! (largest first) and matched with two cursors. Every step moves the smaller
//! of the two outstanding amounts, so at least one side is exhausted per
//! transfer and the result holds at most `debtors + creditors - 1` transfers.
//!
//! Balances within [`SETTLED_TOLERANCE`] of zero count as settled.

use crate::{Balance, MemberId, MoneyCents};

/// Balances and transfers at or below this magnitude are treated as noise.
pub const SETTLED_TOLERANCE: MoneyCents = MoneyCents::new(1);

/// A direct transfer: `from` pays `amount` to `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: MoneyCents,
}

struct Outstanding<'a> {
    member: &'a MemberId,
    remaining: MoneyCents,
}

/// Computes the transfers that bring every balance back to zero.
///
/// Ties in magnitude keep the input order, so the output is reproducible for
/// a given balance ordering.
pub fn compute_settlements(balances: &[Balance]) -> Vec<Settlement> {
    let mut debtors: Vec<Outstanding<'_>> = Vec::new();
    let mut creditors: Vec<Outstanding<'_>> = Vec::new();

    for balance in balances {
        if balance.net < -SETTLED_TOLERANCE {
            debtors.push(Outstanding {
                member: &balance.member,
                remaining: balance.net.abs(),
            });
        } else if balance.net > SETTLED_TOLERANCE {
            creditors.push(Outstanding {
                member: &balance.member,
                remaining: balance.net,
            });
        }
    }

    // Stable sorts: equal magnitudes stay in input order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut settlements = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];
        let transfer = debtor.remaining.min(creditor.remaining);

        if transfer > SETTLED_TOLERANCE {
            settlements.push(Settlement {
                from: debtor.member.clone(),
                to: creditor.member.clone(),
                amount: transfer,
            });
        }

        debtor.remaining -= transfer;
        creditor.remaining -= transfer;

        if debtor.remaining < SETTLED_TOLERANCE {
            i += 1;
        }
        if creditor.remaining < SETTLED_TOLERANCE {
            j += 1;
        }
    }

    tracing::debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = settlements.len(),
        "balances settled"
    );

    settlements
}

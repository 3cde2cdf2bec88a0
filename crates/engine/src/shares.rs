//! Share calculation for a single expense.
//!
//! Amounts are integer cents, so an exact split is not always representable.
//! Each participant gets the floor of its exact share and the leftover cents
//! go, one each, to the participants with the largest fractional remainder
//! (ties follow participant order). The shares therefore always add up to the
//! expense amount and each one is within a cent of the exact value.

use crate::{EngineError, Expense, MemberId, MoneyCents, ResultEngine, SplitPolicy};

/// What one participant owes for an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub member: MemberId,
    pub amount: MoneyCents,
}

/// Computes the amount owed by each participant of `expense`, in participant
/// order.
pub fn compute_shares(expense: &Expense) -> ResultEngine<Vec<Share>> {
    expense.validate()?;

    let weights: Vec<u32> = match &expense.split {
        SplitPolicy::Equal => vec![1; expense.participants.len()],
        SplitPolicy::Weighted(weights) => expense
            .participants
            .iter()
            .map(|member| weights.get(member).copied().unwrap_or_default())
            .collect(),
    };

    let total_weight: i128 = weights.iter().map(|w| i128::from(*w)).sum();
    if total_weight == 0 {
        return Err(EngineError::InvalidExpense(
            "total weight is zero".to_string(),
        ));
    }

    let amount = i128::from(expense.amount.cents());
    let mut floors = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for weight in &weights {
        let scaled = amount * i128::from(*weight);
        floors.push(scaled / total_weight);
        remainders.push(scaled % total_weight);
    }

    let allocated: i128 = floors.iter().sum();
    let leftover = usize::try_from(amount - allocated)
        .map_err(|_| EngineError::InvalidAmount("share allocation overflow".to_string()))?;

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|a, b| remainders[*b].cmp(&remainders[*a]));
    for idx in order.into_iter().take(leftover) {
        floors[idx] += 1;
    }

    expense
        .participants
        .iter()
        .zip(floors)
        .map(|(member, cents)| {
            let cents = i64::try_from(cents)
                .map_err(|_| EngineError::InvalidAmount("share too large".to_string()))?;
            Ok(Share {
                member: member.clone(),
                amount: MoneyCents::new(cents),
            })
        })
        .collect()
}

//! Net balances of a group.

use std::collections::{HashMap, HashSet};

use crate::{EngineError, Expense, Member, MemberId, MoneyCents, ResultEngine, compute_shares};

/// Net position of one member: what they paid minus what they owe.
///
/// Positive means the member is owed money, negative means they owe money.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub member: MemberId,
    pub net: MoneyCents,
}

impl Balance {
    #[must_use]
    pub fn new(member: impl Into<MemberId>, net: MoneyCents) -> Self {
        Self {
            member: member.into(),
            net,
        }
    }
}

/// Folds `expenses` into one balance per declared member, in `members` order.
///
/// Every member is reported, including those without any expense. Amounts
/// paid or owed by ids missing from `members` are still accumulated but not
/// returned. Shares reconcile to the cent, so the returned balances add up to
/// exactly zero whenever every referenced id is declared.
pub fn compute_balances(expenses: &[Expense], members: &[Member]) -> ResultEngine<Vec<Balance>> {
    let mut ledger: HashMap<&MemberId, MoneyCents> = members
        .iter()
        .map(|member| (&member.id, MoneyCents::ZERO))
        .collect();

    for expense in expenses {
        let shares = compute_shares(expense)?;
        tracing::debug!(
            payer = %expense.payer,
            amount = %expense.amount,
            participants = expense.participants.len(),
            "folding expense"
        );

        credit(&mut ledger, &expense.payer, expense.amount)?;
        for (participant, share) in expense.participants.iter().zip(&shares) {
            credit(&mut ledger, participant, -share.amount)?;
        }
    }

    let mut reported = HashSet::with_capacity(members.len());
    let balances: Vec<Balance> = members
        .iter()
        .filter(|member| reported.insert(&member.id))
        .map(|member| Balance {
            member: member.id.clone(),
            net: ledger.get(&member.id).copied().unwrap_or_default(),
        })
        .collect();

    if ledger.len() > reported.len() {
        let unknown: Vec<String> = ledger
            .keys()
            .filter(|id| !reported.contains(*id))
            .map(|id| id.to_string())
            .collect();
        tracing::debug!(?unknown, "expenses reference undeclared members");
    }

    Ok(balances)
}

fn credit<'a>(
    ledger: &mut HashMap<&'a MemberId, MoneyCents>,
    member: &'a MemberId,
    amount: MoneyCents,
) -> ResultEngine<()> {
    let entry = ledger.entry(member).or_default();
    // `i64::MIN` has no positive counterpart, so it cannot be settled.
    *entry = entry
        .checked_add(amount)
        .filter(|net| net.cents() != i64::MIN)
        .ok_or_else(|| EngineError::InvalidAmount(format!("balance of '{member}' overflows")))?;
    Ok(())
}

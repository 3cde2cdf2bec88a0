//! Group summary: totals, balances and the transfers that settle them.

use crate::{
    Balance, EngineError, Expense, Member, MoneyCents, ResultEngine, Settlement,
    compute_balances, compute_settlements,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total_amount: MoneyCents,
    pub expense_count: usize,
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,
}

/// Builds the full report for one snapshot of a group.
pub fn build_summary(expenses: &[Expense], members: &[Member]) -> ResultEngine<Summary> {
    let total_amount = expenses
        .iter()
        .try_fold(MoneyCents::ZERO, |total, expense| {
            total.checked_add(expense.amount)
        })
        .ok_or_else(|| EngineError::InvalidAmount("total amount overflows".to_string()))?;

    let balances = compute_balances(expenses, members)?;
    let settlements = compute_settlements(&balances);

    Ok(Summary {
        total_amount,
        expense_count: expenses.len(),
        balances,
        settlements,
    })
}

use std::collections::HashMap;

use pareggio_engine::{
    Balance, EngineError, Expense, Member, MoneyCents, SETTLED_TOLERANCE, Summary, build_summary,
    compute_balances, compute_settlements,
};
use proptest::prelude::*;

fn trio() -> Vec<Member> {
    vec![
        Member::new("a", "Anna"),
        Member::new("b", "Bruno"),
        Member::new("c", "Carla"),
    ]
}

fn nets(summary: &Summary) -> Vec<(&str, String)> {
    summary
        .balances
        .iter()
        .map(|balance| (balance.member.as_str(), balance.net.to_string()))
        .collect()
}

fn money(raw: &str) -> MoneyCents {
    raw.parse().unwrap()
}

#[test]
fn equal_split_credits_the_payer() {
    let expenses = [Expense::equal(money("300"), "a", ["a", "b", "c"])];
    let summary = build_summary(&expenses, &trio()).unwrap();

    assert_eq!(
        nets(&summary),
        vec![
            ("a", "200.00".to_string()),
            ("b", "-100.00".to_string()),
            ("c", "-100.00".to_string()),
        ]
    );
}

#[test]
fn weighted_split_follows_share_counts() {
    let expenses = [Expense::weighted(
        money("1500"),
        "a",
        [("a", 2), ("b", 1), ("c", 1)],
    )];
    let summary = build_summary(&expenses, &trio()).unwrap();

    assert_eq!(
        nets(&summary),
        vec![
            ("a", "750.00".to_string()),
            ("b", "-375.00".to_string()),
            ("c", "-375.00".to_string()),
        ]
    );
}

#[test]
fn expenses_net_out_before_settling() {
    let expenses = [
        Expense::equal(money("300"), "a", ["a", "b", "c"]),
        Expense::equal(money("150"), "b", ["a", "b", "c"]),
    ];
    let summary = build_summary(&expenses, &trio()).unwrap();

    assert_eq!(summary.total_amount, money("450"));
    assert_eq!(summary.expense_count, 2);
    assert_eq!(
        nets(&summary),
        vec![
            ("a", "150.00".to_string()),
            ("b", "0.00".to_string()),
            ("c", "-150.00".to_string()),
        ]
    );
    assert_eq!(summary.settlements.len(), 1);
    let settlement = &summary.settlements[0];
    assert_eq!(settlement.from.as_str(), "c");
    assert_eq!(settlement.to.as_str(), "a");
    assert_eq!(settlement.amount, money("150.00"));
}

#[test]
fn sub_cent_noise_needs_no_transfer() {
    let balances = [
        Balance::new("a", MoneyCents::new(1)),
        Balance::new("b", MoneyCents::new(-1)),
        Balance::new("c", MoneyCents::ZERO),
    ];
    assert!(compute_settlements(&balances).is_empty());
}

#[test]
fn empty_group_is_all_zero() {
    let summary = build_summary(&[], &trio()).unwrap();

    assert_eq!(summary.total_amount, MoneyCents::ZERO);
    assert_eq!(summary.expense_count, 0);
    assert!(summary.balances.iter().all(|b| b.net.is_zero()));
    assert_eq!(summary.balances.len(), 3);
    assert!(summary.settlements.is_empty());
}

#[test]
fn odd_amounts_are_split_to_the_cent() {
    let expenses = [Expense::equal(money("100"), "a", ["a", "b", "c"])];
    let summary = build_summary(&expenses, &trio()).unwrap();

    assert_eq!(
        nets(&summary),
        vec![
            ("a", "66.66".to_string()),
            ("b", "-33.33".to_string()),
            ("c", "-33.33".to_string()),
        ]
    );
    let settled: MoneyCents = summary.settlements.iter().map(|s| s.amount).sum();
    assert_eq!(settled, money("66.66"));
}

#[test]
fn foreign_weights_are_an_error() {
    let mut expense = Expense::weighted(money("90"), "a", [("a", 1), ("b", 1), ("z", 1)]);
    expense.participants.retain(|member| member.as_str() != "z");

    let err = build_summary(&[expense], &trio()).unwrap_err();
    assert!(matches!(err, EngineError::InconsistentWeights(_)));
}

#[test]
fn invalid_expense_aborts_the_summary() {
    let expenses = [
        Expense::equal(money("10"), "a", ["a", "b"]),
        Expense::equal(money("10"), "b", Vec::<&str>::new()),
    ];
    let err = build_summary(&expenses, &trio()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidExpense(_)));
}

// Property tests

fn member_id(idx: usize) -> String {
    format!("m{idx}")
}

fn arb_expense(member_count: usize) -> impl Strategy<Value = Expense> {
    (
        1i64..=1_000_000,
        0..member_count,
        prop::collection::btree_map(0..member_count, 1u32..=5, 1..=member_count),
        any::<bool>(),
    )
        .prop_map(|(cents, payer, weights, weighted)| {
            let amount = MoneyCents::new(cents);
            let payer = member_id(payer);
            if weighted {
                Expense::weighted(
                    amount,
                    payer,
                    weights.into_iter().map(|(idx, w)| (member_id(idx), w)),
                )
            } else {
                Expense::equal(amount, payer, weights.into_keys().map(member_id))
            }
        })
}

fn arb_group() -> impl Strategy<Value = (Vec<Member>, Vec<Expense>)> {
    (2usize..=8).prop_flat_map(|member_count| {
        let members = (0..member_count)
            .map(|idx| Member::new(member_id(idx), format!("Member {idx}")))
            .collect::<Vec<_>>();
        (
            Just(members),
            prop::collection::vec(arb_expense(member_count), 0..=25),
        )
    })
}

proptest! {
    #[test]
    fn balances_sum_to_zero((members, expenses) in arb_group()) {
        let balances = compute_balances(&expenses, &members).unwrap();
        let total: MoneyCents = balances.iter().map(|b| b.net).sum();
        prop_assert_eq!(total, MoneyCents::ZERO);
    }

    #[test]
    fn settlements_clear_every_balance((members, expenses) in arb_group()) {
        let balances = compute_balances(&expenses, &members).unwrap();
        let settlements = compute_settlements(&balances);

        let mut remaining: HashMap<&str, i64> = balances
            .iter()
            .map(|b| (b.member.as_str(), b.net.cents()))
            .collect();
        for settlement in &settlements {
            prop_assert!(settlement.amount > SETTLED_TOLERANCE);
            prop_assert_ne!(&settlement.from, &settlement.to);
            *remaining.entry(settlement.from.as_str()).or_default() += settlement.amount.cents();
            *remaining.entry(settlement.to.as_str()).or_default() -= settlement.amount.cents();
        }
        // One-cent balances are never transferred, so their cents may end up
        // parked on somebody else.
        let slack = members.len() as i64 * SETTLED_TOLERANCE.cents();
        for (member, net) in remaining {
            prop_assert!(net.abs() <= slack, "{member} left with {net}");
        }
    }

    #[test]
    fn settlement_count_is_bounded((members, expenses) in arb_group()) {
        let balances = compute_balances(&expenses, &members).unwrap();
        let debtors = balances.iter().filter(|b| b.net < -SETTLED_TOLERANCE).count();
        let creditors = balances.iter().filter(|b| b.net > SETTLED_TOLERANCE).count();
        let settlements = compute_settlements(&balances);

        if debtors > 0 && creditors > 0 {
            prop_assert!(settlements.len() < debtors + creditors);
        } else {
            prop_assert!(settlements.is_empty());
        }
    }

    #[test]
    fn summary_is_idempotent((members, expenses) in arb_group()) {
        let first = build_summary(&expenses, &members).unwrap();
        let second = build_summary(&expenses, &members).unwrap();
        prop_assert_eq!(first, second);
    }
}

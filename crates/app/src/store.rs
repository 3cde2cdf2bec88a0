//! JSON group snapshots.
//!
//! A [`StoredGroup`] is the wire snapshot read from disk. It feeds the engine
//! through [`SnapshotSource`] and labels members through [`MemberLabels`].

use std::{fs, path::Path};

use chrono::{DateTime, FixedOffset};
use pareggio_api::{
    Currency,
    snapshot::{self, Amount, Split},
};
use pareggio_engine::{
    Expense, GroupSnapshot, Member, MemberId, MemberLabels, MoneyCents, SnapshotSource,
    SplitPolicy,
};

use crate::error::{AppError, Result};

/// Expenses kept by a snapshot: `since <= occurred_at < until`.
///
/// Expenses without a timestamp are always kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct Window {
    pub since: Option<DateTime<FixedOffset>>,
    pub until: Option<DateTime<FixedOffset>>,
}

impl Window {
    fn contains(&self, occurred_at: Option<DateTime<FixedOffset>>) -> bool {
        let Some(at) = occurred_at else {
            return true;
        };
        self.since.is_none_or(|since| at >= since) && self.until.is_none_or(|until| at < until)
    }
}

#[derive(Debug)]
pub struct StoredGroup {
    raw: snapshot::GroupSnapshot,
    window: Window,
}

impl StoredGroup {
    pub fn open(path: &Path, window: Window) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw, window)
    }

    pub fn from_json(raw: &str, window: Window) -> Result<Self> {
        let raw: snapshot::GroupSnapshot = serde_json::from_str(raw)?;
        Ok(Self { raw, window })
    }

    pub fn currency(&self) -> Currency {
        self.raw.currency
    }

    pub fn group_name(&self) -> Option<String> {
        let group = self.raw.group.as_ref()?;
        group
            .name
            .clone()
            .or_else(|| group.id.map(|id| id.to_string()))
    }

    fn expense(&self, index: usize, raw: &snapshot::Expense) -> Result<Expense> {
        if let Some(currency) = raw.currency
            && currency != self.raw.currency
        {
            return Err(AppError::Snapshot(format!(
                "expense #{} is in {currency}, group currency is {}",
                index + 1,
                self.raw.currency
            )));
        }

        let amount = parse_amount(index, &raw.amount)?;
        let split = match &raw.split {
            Split::Equal => SplitPolicy::Equal,
            Split::Weighted(weights) => SplitPolicy::Weighted(
                weights
                    .iter()
                    .map(|(member, weight)| (MemberId::from(member.as_str()), *weight))
                    .collect(),
            ),
        };
        let participants = match (&raw.split, raw.participants.is_empty()) {
            (Split::Weighted(weights), true) => weights
                .keys()
                .map(|member| MemberId::from(member.as_str()))
                .collect(),
            _ => raw
                .participants
                .iter()
                .map(|member| MemberId::from(member.as_str()))
                .collect(),
        };

        Ok(Expense {
            amount,
            payer: MemberId::from(raw.payer.as_str()),
            participants,
            split,
            description: raw.description.clone(),
        })
    }
}

/// Digits an `f64` carries exactly.
const F64_EXACT_DIGITS: usize = 15;

fn parse_amount(index: usize, raw: &Amount) -> Result<MoneyCents> {
    let text = raw.to_string();
    if let Amount::Number(number) = raw {
        let digits = text
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        let significant = digits.trim_start_matches('0').trim_end_matches('0');
        if !number.is_finite() || significant.len() > F64_EXACT_DIGITS {
            return Err(AppError::Snapshot(format!(
                "expense #{}: amount {text} is not exact as a JSON number, write it as a string",
                index + 1
            )));
        }
    }
    Ok(text.parse()?)
}

impl SnapshotSource for StoredGroup {
    type Error = AppError;

    fn snapshot(&self) -> Result<GroupSnapshot> {
        let members = self
            .raw
            .members
            .iter()
            .map(|member| Member {
                id: MemberId::from(member.id.as_str()),
                display_name: member.name.clone().unwrap_or_else(|| member.id.clone()),
            })
            .collect();

        let mut expenses = Vec::with_capacity(self.raw.expenses.len());
        for (index, raw) in self.raw.expenses.iter().enumerate() {
            if !self.window.contains(raw.occurred_at) {
                continue;
            }
            expenses.push(self.expense(index, raw)?);
        }

        tracing::debug!(
            kept = expenses.len(),
            stored = self.raw.expenses.len(),
            "expenses selected"
        );
        Ok(GroupSnapshot { members, expenses })
    }
}

impl MemberLabels for StoredGroup {
    fn label(&self, id: &MemberId) -> Option<&str> {
        self.raw
            .members
            .iter()
            .find(|member| member.id == id.as_str())
            .map(|member| member.name.as_deref().unwrap_or(member.id.as_str()))
    }
}

//! Shared expenses.
//!
//! An [`Expense`] is one cost fronted by a payer and shared by a set of
//! participants, split either evenly or by integer share counts.

use std::collections::{BTreeMap, HashSet};

use crate::{EngineError, MemberId, MoneyCents, ResultEngine};

/// How an expense is divided between its participants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Everybody owes the same amount.
    Equal,
    /// Each participant owes proportionally to its share count.
    Weighted(BTreeMap<MemberId, u32>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub amount: MoneyCents,
    pub payer: MemberId,
    pub participants: Vec<MemberId>,
    pub split: SplitPolicy,
    pub description: Option<String>,
}

impl Expense {
    /// Builds an evenly split expense.
    pub fn equal<I, M>(amount: MoneyCents, payer: impl Into<MemberId>, participants: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        Self {
            amount,
            payer: payer.into(),
            participants: participants.into_iter().map(Into::into).collect(),
            split: SplitPolicy::Equal,
            description: None,
        }
    }

    /// Builds a weighted expense; participants are the weight keys, in
    /// iteration order.
    pub fn weighted<I, M>(amount: MoneyCents, payer: impl Into<MemberId>, weights: I) -> Self
    where
        I: IntoIterator<Item = (M, u32)>,
        M: Into<MemberId>,
    {
        let weights: Vec<(MemberId, u32)> = weights
            .into_iter()
            .map(|(member, weight)| (member.into(), weight))
            .collect();
        Self {
            amount,
            payer: payer.into(),
            participants: weights.iter().map(|(member, _)| member.clone()).collect(),
            split: SplitPolicy::Weighted(weights.into_iter().collect()),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the expense can be split.
    ///
    /// Weights naming a member outside `participants` are an
    /// [`EngineError::InconsistentWeights`]; they are never silently dropped.
    pub fn validate(&self) -> ResultEngine<()> {
        let label = self.label();

        if !self.amount.is_positive() {
            return Err(EngineError::InvalidExpense(format!(
                "{label}: amount must be > 0, got {}",
                self.amount
            )));
        }
        if self.participants.is_empty() {
            return Err(EngineError::InvalidExpense(format!(
                "{label}: no participants"
            )));
        }

        let mut seen = HashSet::with_capacity(self.participants.len());
        for member in &self.participants {
            if !seen.insert(member) {
                return Err(EngineError::InvalidExpense(format!(
                    "{label}: participant '{member}' listed twice"
                )));
            }
        }

        if let SplitPolicy::Weighted(weights) = &self.split {
            if let Some(stranger) = weights.keys().find(|member| !seen.contains(member)) {
                return Err(EngineError::InconsistentWeights(format!(
                    "{label}: weight given to '{stranger}' who is not a participant"
                )));
            }
            for member in &self.participants {
                match weights.get(member) {
                    Some(weight) if *weight > 0 => {}
                    Some(_) => {
                        return Err(EngineError::InvalidExpense(format!(
                            "{label}: weight of '{member}' must be > 0"
                        )));
                    }
                    None => {
                        return Err(EngineError::InvalidExpense(format!(
                            "{label}: missing weight for '{member}'"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn label(&self) -> String {
        match &self.description {
            Some(description) => format!("expense '{description}'"),
            None => format!("expense paid by '{}'", self.payer),
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency of a group. Every supported code uses two decimal digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Chf,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Chf => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub mod snapshot {
    use std::collections::BTreeMap;

    use chrono::{DateTime, FixedOffset};
    use uuid::Uuid;

    use super::*;

    /// A group's members and expenses, as exported by the storage side.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct GroupSnapshot {
        #[serde(default)]
        pub group: Option<Group>,
        #[serde(default)]
        pub currency: Currency,
        pub members: Vec<Member>,
        #[serde(default)]
        pub expenses: Vec<Expense>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct Group {
        /// Group id (UUID).
        ///
        /// This is serialized as a string in JSON.
        pub id: Option<Uuid>,
        pub name: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Member {
        pub id: String,
        /// Display name; the id is shown when missing.
        pub name: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Expense {
        pub description: Option<String>,
        pub amount: Amount,
        /// Must match the group currency when present.
        pub currency: Option<Currency>,
        pub payer: String,
        /// May be left empty for weighted splits: the weight keys are used.
        #[serde(default)]
        pub participants: Vec<String>,
        #[serde(default)]
        pub split: Split,
        pub occurred_at: Option<DateTime<FixedOffset>>,
    }

    /// Expense amount, either as decimal text (`"12.50"`) or a JSON number.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum Amount {
        Text(String),
        Number(f64),
    }

    impl fmt::Display for Amount {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Text(text) => f.write_str(text),
                Self::Number(number) => write!(f, "{number}"),
            }
        }
    }

    /// How an expense is split.
    ///
    /// JSON: `"equal"` or `{"weighted": {"anna": 2, "bruno": 1}}`.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Split {
        #[default]
        Equal,
        Weighted(BTreeMap<String, u32>),
    }
}

pub mod report {
    use super::*;

    /// Settlement summary ready for rendering.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SummaryReport {
        pub group: Option<String>,
        pub currency: Currency,
        pub total_amount: String,
        pub expense_count: usize,
        pub balances: Vec<BalanceLine>,
        pub settlements: Vec<SettlementLine>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BalanceLine {
        pub member_id: String,
        pub member: String,
        pub net: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SettlementLine {
        pub from_id: String,
        pub from: String,
        pub to_id: String,
        pub to: String,
        pub amount: String,
    }
}

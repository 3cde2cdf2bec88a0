//! Debt-splitting and settlement engine.
//!
//! Given the expenses of a group and its members, the engine computes:
//!
//! - the share each participant owes for an expense ([`compute_shares`]),
//! - the net balance of every member ([`compute_balances`]),
//! - a short list of direct transfers that settles them all
//!   ([`compute_settlements`]),
//! - a summary combining the above ([`build_summary`]).
//!
//! Every operation is a pure function of its inputs: no I/O, no shared state.
//! Money is carried as integer cents ([`MoneyCents`]).
//!
//! ```rust
//! use pareggio_engine::{Expense, Member, MoneyCents, build_summary};
//!
//! let members = [
//!     Member::new("a", "Anna"),
//!     Member::new("b", "Bruno"),
//!     Member::new("c", "Carla"),
//! ];
//! let expenses = [
//!     Expense::equal(MoneyCents::new(300_00), "a", ["a", "b", "c"]),
//!     Expense::equal(MoneyCents::new(150_00), "b", ["a", "b", "c"]),
//! ];
//!
//! let summary = build_summary(&expenses, &members).unwrap();
//! assert_eq!(summary.total_amount.to_string(), "450.00");
//! assert_eq!(summary.settlements.len(), 1);
//! assert_eq!(summary.settlements[0].from.as_str(), "c");
//! assert_eq!(summary.settlements[0].to.as_str(), "a");
//! assert_eq!(summary.settlements[0].amount.to_string(), "150.00");
//! ```

pub use balances::{Balance, compute_balances};
pub use error::EngineError;
pub use expense::{Expense, SplitPolicy};
pub use member::{Member, MemberId};
pub use money::MoneyCents;
pub use ports::{GroupSnapshot, MemberLabels, SnapshotSource, summarize};
pub use settlements::{SETTLED_TOLERANCE, Settlement, compute_settlements};
pub use shares::{Share, compute_shares};
pub use summary::{Summary, build_summary};

mod balances;
mod error;
mod expense;
mod member;
mod money;
mod ports;
mod settlements;
mod shares;
mod summary;

pub type ResultEngine<T> = Result<T, EngineError>;

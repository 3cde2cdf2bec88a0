//! Seams towards the collaborators around the engine.
//!
//! The engine never reads storage or renders output itself: a
//! [`SnapshotSource`] hands it a complete group snapshot and the presentation
//! side relabels member ids through [`MemberLabels`].

use crate::{EngineError, Expense, Member, MemberId, Summary, build_summary};

/// Everything needed to summarize one group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

/// Persistence collaborator: loads a complete and consistent snapshot.
pub trait SnapshotSource {
    type Error: From<EngineError>;

    fn snapshot(&self) -> Result<GroupSnapshot, Self::Error>;
}

/// Presentation collaborator: maps member ids to human-facing labels.
pub trait MemberLabels {
    fn label(&self, id: &MemberId) -> Option<&str>;

    /// Label of `id`, or the raw id when none is known.
    fn label_or_id<'a>(&'a self, id: &'a MemberId) -> &'a str {
        self.label(id).unwrap_or(id.as_str())
    }
}

impl MemberLabels for [Member] {
    fn label(&self, id: &MemberId) -> Option<&str> {
        self.iter()
            .find(|member| member.id == *id)
            .map(|member| member.display_name.as_str())
    }
}

impl MemberLabels for Vec<Member> {
    fn label(&self, id: &MemberId) -> Option<&str> {
        self.as_slice().label(id)
    }
}

/// Loads a snapshot from `source` and summarizes it.
pub fn summarize<S: SnapshotSource>(source: &S) -> Result<Summary, S::Error> {
    let snapshot = source.snapshot()?;
    tracing::debug!(
        members = snapshot.members.len(),
        expenses = snapshot.expenses.len(),
        "snapshot loaded"
    );
    Ok(build_summary(&snapshot.expenses, &snapshot.members)?)
}

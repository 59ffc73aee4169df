//! The edit script: an ordered, coalesced list of edits.

use std::cell::OnceCell;

use crate::edit::{Edit, Op};
use crate::error::{DiffError, DiffResult};

/// The ordered list of [`Edit`]s turning an old sequence into a new one.
///
/// Adjacent edits never share an [`Op`]: appending a run whose op matches
/// the last edit extends that edit instead. A script produced under a
/// distance budget that was too small is flagged as truncated and must not
/// be treated as complete.
#[derive(Clone, Debug)]
pub struct EditScript<P = ()> {
    edits: Vec<Edit<P>>,
    budget: usize,
    truncated: bool,
    diffs: OnceCell<Vec<Edit<P>>>,
}

impl<P> EditScript<P> {
    /// Create an empty script searched under `budget`.
    pub(crate) fn new(budget: usize) -> Self {
        Self {
            edits: Vec::new(),
            budget,
            truncated: false,
            diffs: OnceCell::new(),
        }
    }

    /// Append a run, coalescing it into the last edit when the op matches.
    /// Zero-length runs are dropped.
    pub(crate) fn push(&mut self, op: Op, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.diffs = OnceCell::new();
        if let Some(last) = self.edits.last_mut() {
            if last.op == op {
                last.len += len;
                return;
            }
        }
        self.edits.push(Edit::new(op, offset, len));
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// All edits, matches included, in order.
    pub fn edits(&self) -> &[Edit<P>] {
        &self.edits
    }

    /// Number of edits, matches included.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The distance budget the script was searched under.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Returns `true` if the search gave up because the edit distance
    /// reached the budget. The edits are then incomplete.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Returns `true` if the script is complete and contains no change.
    pub fn is_identical(&self) -> bool {
        !self.truncated && self.edits.iter().all(|e| e.op.is_match())
    }

    /// Number of inserted tokens.
    pub fn insertions(&self) -> usize {
        self.count(Op::Insert)
    }

    /// Number of deleted tokens.
    pub fn deletions(&self) -> usize {
        self.count(Op::Delete)
    }

    /// Edit distance implied by the script: inserted plus deleted tokens.
    pub fn distance(&self) -> usize {
        self.insertions() + self.deletions()
    }

    fn count(&self, op: Op) -> usize {
        self.edits
            .iter()
            .filter(|e| e.op == op)
            .map(|e| e.len)
            .sum()
    }

    /// Fail with [`DiffError::BudgetExceeded`] if the script is truncated.
    pub fn into_complete(self) -> DiffResult<Self> {
        if self.truncated {
            return Err(DiffError::BudgetExceeded {
                budget: self.budget,
            });
        }
        Ok(self)
    }

    /// Attach payloads, producing a script with a different payload type.
    ///
    /// `f` sees every edit in order; whatever it returns becomes that edit's
    /// payload.
    pub fn annotate<Q, F>(self, mut f: F) -> EditScript<Q>
    where
        F: FnMut(&Edit<P>) -> Option<Q>,
    {
        let edits = self
            .edits
            .into_iter()
            .map(|e| {
                let payload = f(&e);
                e.with_payload(payload)
            })
            .collect();
        EditScript {
            edits,
            budget: self.budget,
            truncated: self.truncated,
            diffs: OnceCell::new(),
        }
    }

    /// Rebuild the new sequence by replaying the script over `old`, taking
    /// inserted tokens from `new`.
    ///
    /// Returns `None` for a truncated script or one whose ranges fall outside
    /// the inputs.
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Option<Vec<T>> {
        if self.truncated {
            return None;
        }
        let mut out = Vec::with_capacity(new.len());
        for edit in &self.edits {
            match edit.op {
                Op::Match => out.extend_from_slice(old.get(edit.range())?),
                Op::Insert => out.extend_from_slice(new.get(edit.range())?),
                Op::Delete => {
                    old.get(edit.range())?;
                }
            }
        }
        Some(out)
    }
}

impl<P: Clone> EditScript<P> {
    /// The non-match edits. Computed on first call and cached.
    pub fn diffs(&self) -> &[Edit<P>] {
        self.diffs.get_or_init(|| {
            self.edits
                .iter()
                .filter(|e| !e.op.is_match())
                .cloned()
                .collect()
        })
    }
}

impl<P: PartialEq> PartialEq for EditScript<P> {
    fn eq(&self, other: &Self) -> bool {
        self.edits == other.edits && self.truncated == other.truncated
    }
}

impl<P: Eq> Eq for EditScript<P> {}

impl<'a, P> IntoIterator for &'a EditScript<P> {
    type Item = &'a Edit<P>;
    type IntoIter = std::slice::Iter<'a, Edit<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

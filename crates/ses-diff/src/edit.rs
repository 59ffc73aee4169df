//! Edit operations: the unit of output of the SES engine.
//!
//! An [`Edit`] describes one contiguous run of a single [`Op`]. The `offset`
//! of a `Match` or `Delete` indexes the old sequence; the `offset` of an
//! `Insert` indexes the new sequence, because that is where the inserted
//! tokens live.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The kind of a single edit run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// Tokens present, in order, in both sequences.
    Match,
    /// Tokens present only in the new sequence.
    Insert,
    /// Tokens present only in the old sequence.
    Delete,
}

impl Op {
    /// Returns `true` for [`Op::Match`].
    pub fn is_match(self) -> bool {
        matches!(self, Op::Match)
    }

    /// Marker used when rendering a change header (`>` insert, `<` delete).
    pub fn marker(self) -> Option<char> {
        match self {
            Op::Match => None,
            Op::Insert => Some('>'),
            Op::Delete => Some('<'),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Match => write!(f, "match"),
            Op::Insert => write!(f, "insert"),
            Op::Delete => write!(f, "delete"),
        }
    }
}

/// One contiguous run of a single operation.
///
/// `len` is never zero for an edit produced by the engine. The payload is
/// only ever filled in by an adapter, and only for inserts: deleted and
/// matched content can be recovered from the old sequence at `offset`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit<P = ()> {
    /// What this run does.
    pub op: Op,
    /// Start index, into the old sequence for `Match`/`Delete` and into the
    /// new sequence for `Insert`.
    pub offset: usize,
    /// Number of tokens covered.
    pub len: usize,
    /// Literal inserted content, attached by adapters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<P>,
}

impl<P> Edit<P> {
    /// Create an edit without payload.
    pub fn new(op: Op, offset: usize, len: usize) -> Self {
        Self {
            op,
            offset,
            len,
            payload: None,
        }
    }

    /// The index range this edit covers in the sequence `offset` refers to.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Replace the payload, changing its type.
    pub fn with_payload<Q>(self, payload: Option<Q>) -> Edit<Q> {
        Edit {
            op: self.op,
            offset: self.offset,
            len: self.len,
            payload,
        }
    }
}

impl<P> fmt::Display for Edit<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.op, self.offset, self.len)
    }
}

/// Coordinates of a middle snake in the edit graph of one sub-problem.
///
/// `(x, y)` is where the snake starts and `(u, v)` where it ends; both are
/// relative to the sub-problem origin. A fresh value is produced by every
/// middle-snake search and dropped once the sub-problem is split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MiddleSnake {
    pub x: usize,
    pub y: usize,
    pub u: usize,
    pub v: usize,
}

impl MiddleSnake {
    /// Number of matching tokens along the snake.
    pub fn len(&self) -> usize {
        self.u - self.x
    }

    /// Returns `true` if the snake covers no matching tokens.
    pub fn is_empty(&self) -> bool {
        self.u == self.x
    }
}

//! Line adapter: diff two texts line by line.
//!
//! Every line is reduced to a BLAKE3 signature of its content, optionally
//! whitespace-normalised, and every distinct signature gets a small integer
//! id shared by both texts. The engine then compares id sequences, and the
//! result is mapped back to the literal lines for payloads and rendering.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::config::DiffConfig;
use crate::edit::Op;
use crate::engine;
use crate::error::DiffResult;
use crate::render::{self, Rendered};
use crate::script::EditScript;

/// Content signature of one line.
///
/// With `skip_whitespace` set, runs of whitespace collapse to one space and
/// leading and trailing whitespace is dropped before hashing.
pub fn line_signature(line: &str, skip_whitespace: bool) -> blake3::Hash {
    let content: Cow<'_, str> = if skip_whitespace {
        Cow::Owned(line.split_whitespace().collect::<Vec<_>>().join(" "))
    } else {
        Cow::Borrowed(line)
    };
    blake3::hash(content.as_bytes())
}

/// Assigns sequential ids to line signatures, first come first served.
#[derive(Debug, Default)]
pub struct SignatureTable {
    skip_whitespace: bool,
    ids: HashMap<blake3::Hash, usize>,
}

impl SignatureTable {
    pub fn new(skip_whitespace: bool) -> Self {
        Self {
            skip_whitespace,
            ids: HashMap::new(),
        }
    }

    /// The id of `line`, assigning the next free one if its signature is new.
    pub fn id(&mut self, line: &str) -> usize {
        let next = self.ids.len();
        *self
            .ids
            .entry(line_signature(line, self.skip_whitespace))
            .or_insert(next)
    }

    /// Map lines to ids.
    pub fn tokenize(&mut self, lines: &[&str]) -> Vec<usize> {
        lines.iter().map(|line| self.id(line)).collect()
    }

    /// Number of distinct signatures seen so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The result of diffing two texts line by line.
///
/// Offsets are zero-based line indices. Inserts carry the inserted lines as
/// payload.
#[derive(Clone, Debug)]
pub struct LineDiff<'a> {
    old_lines: Vec<&'a str>,
    new_lines: Vec<&'a str>,
    vocabulary: usize,
    script: EditScript<Vec<String>>,
}

/// Diff `old` against `new` line by line with the standard budget.
pub fn diff_lines<'a>(old: &'a str, new: &'a str, skip_whitespace: bool) -> LineDiff<'a> {
    let config = DiffConfig {
        skip_whitespace,
        ..DiffConfig::default()
    };
    diff_lines_with(old, new, &config)
}

/// Diff `old` against `new` line by line.
///
/// Lines are split on `\n` only; a trailing newline yields a final empty
/// line. With `config.vocabulary_budget` the search budget is the number of
/// distinct line signatures, otherwise `config.budget`.
pub fn diff_lines_with<'a>(old: &'a str, new: &'a str, config: &DiffConfig) -> LineDiff<'a> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();

    let mut table = SignatureTable::new(config.skip_whitespace);
    let a = table.tokenize(&old_lines);
    let b = table.tokenize(&new_lines);
    let vocabulary = table.len();
    debug!(
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        vocabulary,
        skip_whitespace = config.skip_whitespace,
        "tokenized lines"
    );

    let budget = if config.vocabulary_budget {
        if let Some(ignored) = config.budget {
            warn!(ignored, vocabulary, "vocabulary budget set, ignoring explicit budget");
        }
        Some(vocabulary)
    } else {
        config.budget
    };
    let script = engine::diff_with_budget(&a, &b, budget).annotate(|e| {
        (e.op == Op::Insert).then(|| {
            new_lines[e.range()]
                .iter()
                .map(|line| line.to_string())
                .collect()
        })
    });

    LineDiff {
        old_lines,
        new_lines,
        vocabulary,
        script,
    }
}

impl<'a> LineDiff<'a> {
    pub fn script(&self) -> &EditScript<Vec<String>> {
        &self.script
    }

    pub fn into_script(self) -> EditScript<Vec<String>> {
        self.script
    }

    pub fn old_lines(&self) -> &[&'a str] {
        &self.old_lines
    }

    pub fn new_lines(&self) -> &[&'a str] {
        &self.new_lines
    }

    /// Number of distinct line signatures across both texts.
    pub fn vocabulary(&self) -> usize {
        self.vocabulary
    }

    pub fn is_identical(&self) -> bool {
        self.script.is_identical()
    }

    pub fn is_truncated(&self) -> bool {
        self.script.is_truncated()
    }

    /// Fail if the budget truncated the script.
    pub fn into_complete(self) -> DiffResult<Self> {
        let Self {
            old_lines,
            new_lines,
            vocabulary,
            script,
        } = self;
        Ok(Self {
            old_lines,
            new_lines,
            vocabulary,
            script: script.into_complete()?,
        })
    }

    /// Each change as a one-based line header followed by the inserted or
    /// deleted lines.
    pub fn rendered(&self) -> Vec<Rendered> {
        self.script
            .diffs()
            .iter()
            .filter_map(|e| {
                let marker = e.op.marker()?;
                let line = e.offset + 1;
                let (verb, body) = match e.op {
                    Op::Insert => ("Insert", e.payload.as_deref().unwrap_or(&[]).join("\n")),
                    _ => ("Delete", self.old_lines[e.range()].join("\n")),
                };
                Some(Rendered {
                    op: e.op,
                    header: format!("{marker} Line {line} {verb} {} lines", e.len),
                    body,
                })
            })
            .collect()
    }

    /// All changes rendered and joined by newlines.
    pub fn render(&self) -> String {
        render::join(&self.rendered())
    }
}

impl fmt::Display for LineDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

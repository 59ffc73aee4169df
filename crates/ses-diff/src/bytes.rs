//! Byte adapter: diff two byte strings token by token.

use std::fmt;

use crate::config::DiffConfig;
use crate::edit::Op;
use crate::engine;
use crate::error::DiffResult;
use crate::render::{self, Rendered};
use crate::script::EditScript;

/// The result of diffing two byte strings.
///
/// Inserts carry the inserted bytes as payload; deletes do not, their bytes
/// are `old[offset..offset + len]`.
#[derive(Clone, Debug)]
pub struct ByteDiff<'a> {
    old: &'a [u8],
    script: EditScript<Vec<u8>>,
}

/// Diff `old` against `new` byte by byte.
pub fn diff_bytes<'a>(old: &'a [u8], new: &[u8], budget: Option<usize>) -> ByteDiff<'a> {
    let script = engine::diff_with_budget(old, new, budget)
        .annotate(|e| (e.op == Op::Insert).then(|| new[e.range()].to_vec()));
    ByteDiff { old, script }
}

/// Diff `old` against `new` byte by byte using the budget from `config`.
pub fn diff_bytes_with<'a>(old: &'a [u8], new: &[u8], config: &DiffConfig) -> ByteDiff<'a> {
    diff_bytes(old, new, config.budget)
}

impl<'a> ByteDiff<'a> {
    pub fn script(&self) -> &EditScript<Vec<u8>> {
        &self.script
    }

    pub fn into_script(self) -> EditScript<Vec<u8>> {
        self.script
    }

    pub fn is_identical(&self) -> bool {
        self.script.is_identical()
    }

    pub fn is_truncated(&self) -> bool {
        self.script.is_truncated()
    }

    /// Fail if the budget truncated the script.
    pub fn into_complete(self) -> DiffResult<Self> {
        let Self { old, script } = self;
        Ok(Self {
            old,
            script: script.into_complete()?,
        })
    }

    /// Each change as a `>`/`<` header with offset and length, followed by
    /// the inserted or deleted bytes.
    pub fn rendered(&self) -> Vec<Rendered> {
        self.script
            .diffs()
            .iter()
            .filter_map(|e| {
                let marker = e.op.marker()?;
                let bytes = match e.op {
                    Op::Insert => e.payload.as_deref().unwrap_or(&[]),
                    _ => &self.old[e.range()],
                };
                Some(Rendered {
                    op: e.op,
                    header: format!("{marker} {} ({})", e.offset, e.len),
                    body: String::from_utf8_lossy(bytes).into_owned(),
                })
            })
            .collect()
    }

    /// All changes rendered and joined by newlines.
    pub fn render(&self) -> String {
        render::join(&self.rendered())
    }
}

impl fmt::Display for ByteDiff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

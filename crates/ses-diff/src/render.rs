//! Plain-text rendering shared by the adapters.

use std::fmt;

use crate::edit::Op;

/// One rendered change: a header line followed by the affected content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub op: Op,
    pub header: String,
    pub body: String,
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.header, self.body)
    }
}

/// Join rendered changes with newlines.
pub(crate) fn join(entries: &[Rendered]) -> String {
    entries
        .iter()
        .map(Rendered::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_body() {
        let r = Rendered {
            op: Op::Insert,
            header: "> 0 (1)".into(),
            body: "x".into(),
        };
        assert_eq!(r.to_string(), "> 0 (1)\nx");
        assert_eq!(join(&[r.clone(), r]), "> 0 (1)\nx\n> 0 (1)\nx");
        assert_eq!(join(&[]), "");
    }
}

//! Shortest edit script (SES) diff engine.
//!
//! Computes a minimal list of insert and delete runs turning one sequence
//! into another, using Myers' O(ND) algorithm in linear space, plus adapters
//! for diffing byte strings and multi-line texts.
//!
//! # Key Types
//!
//! - [`EditScript`] / [`Edit`] / [`Op`] -- Coalesced edit runs and derived queries
//! - [`diff`] / [`diff_with_budget`] -- The generic engine over `&[T]` where `T: Eq`
//! - [`ByteDiff`] -- Byte-level diff with inserted bytes attached
//! - [`LineDiff`] -- Line-level diff over hashed line signatures
//! - [`DiffConfig`] -- Budget and whitespace options, loadable from TOML

pub mod bytes;
pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod lines;
pub mod render;
pub mod script;

pub use bytes::{diff_bytes, diff_bytes_with, ByteDiff};
pub use config::DiffConfig;
pub use edit::{Edit, MiddleSnake, Op};
pub use engine::{default_budget, diff, diff_with_budget};
pub use error::{DiffError, DiffResult};
pub use lines::{diff_lines, diff_lines_with, line_signature, LineDiff, SignatureTable};
pub use render::Rendered;
pub use script::EditScript;

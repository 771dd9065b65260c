//! Library for parsing the script language of the Paradox grand strategy
//! games, and the localization files that go with it.
//!
//! Script text is scanned into classified [`Token`]s and then built into a
//! tree of [`Node`](node::Node)s owned by a [`NodeArena`]. Localization
//! files become flat key/value records in a [`LocaStore`], which can resolve
//! the `$key$` references between them. Problems that do not abort a parse
//! are collected as reports through the [`report`] module and written out
//! from there, either styled for a terminal or as JSON.

pub use crate::cwfile::CwFile;
pub use crate::date::Date;
pub use crate::localization::{LocaError, LocaRecord, LocaStore};
pub use crate::node::{Found, Node, NodeArena, NodeId, NodePayload, QueryError};
pub use crate::parse::{parse_script, parse_script_at, ParseError, Scanner};
pub use crate::token::{Loc, Token, TokenKind};

mod cwfile;
pub mod date;
pub mod localization;
pub mod node;
pub mod parse;
pub mod report;
pub mod token;

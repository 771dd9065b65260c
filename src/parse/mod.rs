//! Parsers for Clausewitz script.
//!
//! Script text goes through two stages: the [`Scanner`] cuts it into
//! classified [`Token`]s, and the tree builder in [`tree`] assembles those
//! into [`Node`](crate::node::Node)s. Errors that leave the rest of the file
//! unusable are returned as [`ParseError`]; recoverable oddities go through
//! the [`report`](crate::report) module instead.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::node::{NodeArena, NodeId};
use crate::token::{Loc, Token};

pub mod scanner;
mod tree;

pub use crate::parse::scanner::Scanner;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty token at {loc}")]
    EmptyToken { loc: Loc },
    #[error("invalid operator `{text}` at {loc}")]
    InvalidOperator { text: String, loc: Loc },
    #[error("quoted string not closed at {loc}")]
    UnterminatedString { loc: Loc },
    #[error("`@[` expression not closed at {loc}")]
    UnterminatedExpression { loc: Loc },
    #[error("unexpected operator `{token}` at {}", .token.loc)]
    UnexpectedOperator { token: Token },
    #[error("unexpected `}}` at {loc}")]
    StrayBlockEnd { loc: Loc },
    #[error("operator `{operator}` cannot open a block at {loc}")]
    BadBlockOperator { operator: Token, loc: Loc },
    #[error("unresolved tokens `{pending}` at {loc}")]
    QueueNotEmpty { pending: String, loc: Loc },
}

/// Parse a complete script text into nodes in the given arena, returning the
/// ids of the top level nodes. The `name` is only used in locations.
pub fn parse_script(text: &str, name: &str, arena: &mut NodeArena) -> Result<Vec<NodeId>, ParseError> {
    let loc = Loc::for_file(Arc::new(PathBuf::from(name)));
    parse_script_at(text, loc, arena)
}

/// Like [`parse_script`], but with a caller-supplied starting location, for
/// script embedded in some larger file.
pub fn parse_script_at(text: &str, loc: Loc, arena: &mut NodeArena) -> Result<Vec<NodeId>, ParseError> {
    let mut scanner = Scanner::new(text, loc);
    tree::build_group(&mut scanner, arena, None)
}

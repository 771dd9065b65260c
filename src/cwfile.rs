//! Entry point for reading script and localization files from disk.

use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::localization::{parse_loca_lines, parse_loca_tokens, LocaRecord, LocaStore};
use crate::node::{NodeArena, NodeId};
use crate::parse::parse_script_at;
use crate::token::Loc;

/// Reads whole files and feeds them to the right parser. File contents are
/// taken as UTF-8; a leading byte order mark is dropped.
#[derive(Clone, Copy, Debug)]
pub struct CwFile;

impl CwFile {
    /// Read a script file and parse it into nodes in the given arena,
    /// returning the ids of the top level nodes.
    pub fn read(pathname: &Path, arena: &mut NodeArena) -> Result<Vec<NodeId>> {
        let contents = read_to_string(pathname)?;
        let contents = strip_bom(&contents);
        let loc = Loc::for_file(Arc::new(pathname.to_path_buf()));
        Ok(parse_script_at(contents, loc, arena)?)
    }

    /// Read a line-dialect localization file. The parsed records are added
    /// to the store and also returned, in file order.
    pub fn read_localization(pathname: &Path, store: &mut LocaStore) -> Result<Vec<LocaRecord>> {
        let contents = read_to_string(pathname)?;
        let contents = strip_bom(&contents);
        let loc = Loc::for_file(Arc::new(pathname.to_path_buf()));
        let records = parse_loca_lines(contents, loc)?;
        store.insert_all(records.clone());
        Ok(records)
    }

    /// Like [`CwFile::read_localization`], for the token dialect.
    pub fn read_localization_tokens(
        pathname: &Path,
        store: &mut LocaStore,
    ) -> Result<Vec<LocaRecord>> {
        let contents = read_to_string(pathname)?;
        let contents = strip_bom(&contents);
        let loc = Loc::for_file(Arc::new(pathname.to_path_buf()));
        let records = parse_loca_tokens(contents, loc)?;
        store.insert_all(records.clone());
        Ok(records)
    }
}

fn strip_bom(contents: &str) -> &str {
    contents.strip_prefix('\u{feff}').unwrap_or(contents)
}

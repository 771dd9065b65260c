//! Localization files, which map keys to the text shown to the player.
//!
//! The files come in two dialects, handled by [`parse_loca_lines`] and
//! [`parse_loca_tokens`]. Parsed records go into a [`LocaStore`], which can
//! resolve the `$other_key$` references that localization values use to
//! include each other.

use ahash::{AHashMap, AHashSet};
use thiserror::Error;

use crate::parse::ParseError;
use crate::report::{warn, ErrorKey};
use crate::token::{Loc, Token};

mod parse;

pub use crate::localization::parse::{parse_loca_lines, parse_loca_tokens};

#[derive(Debug, Error)]
pub enum LocaError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("localization line has no `:` separator at {loc}")]
    MissingColon { loc: Loc },
    #[error("expected a localization key at {loc}, found `{text}`")]
    ExpectedKey { text: String, loc: Loc },
    #[error("localization key `{key}` has no quoted value at {loc}")]
    ExpectedValue { key: String, loc: Loc },
    #[error("reference `${reference}$` has too many `|` parts")]
    BadReference { reference: String },
    #[error("no localization for key `{key}`")]
    MissingKey { key: String },
}

/// One localization key together with its display text.
#[derive(Clone, Debug)]
pub struct LocaRecord {
    pub key: Token,
    pub value: String,
}

/// All localization records seen so far, with `$key$` resolution between
/// them.
#[derive(Debug, Default)]
pub struct LocaStore {
    records: AHashMap<String, LocaRecord>,
    /// Names whose `$name$` references are left alone by [`LocaStore::resolve`].
    passthrough: AHashSet<String>,
}

impl LocaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name that stands for a value only known at display time,
    /// such as `NAME` in titles. References to it survive resolution
    /// untouched.
    pub fn add_passthrough(&mut self, name: &str) {
        self.passthrough.insert(name.to_string());
    }

    /// Add a record. When a key is defined twice, the first definition wins
    /// and the redefinition is reported.
    pub fn insert(&mut self, record: LocaRecord) {
        if let Some(other) = self.records.get(record.key.as_str()) {
            let msg = format!("localization key `{}` is redefined", record.key);
            warn(ErrorKey::LocalizationDup)
                .msg(&msg)
                .loc(&record.key)
                .loc_msg(&other.key, "the other definition is here")
                .push();
            return;
        }
        self.records.insert(record.key.as_str().to_string(), record);
    }

    pub fn insert_all(&mut self, records: Vec<LocaRecord>) {
        for record in records {
            self.insert(record);
        }
    }

    pub fn get(&self, key: &str) -> Option<&LocaRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a key and give back its text with every `$other_key$`
    /// reference replaced by that key's resolved text.
    ///
    /// A `$key|format$` reference turns into `#format text#!` markup.
    /// Resolution is recursive and follows references through as many levels
    /// as the records chain up. There is no cycle detection; records that
    /// include themselves will blow the stack, which matches how little the
    /// game itself tolerates them.
    pub fn resolve(&self, key: &str) -> Result<String, LocaError> {
        let record = self
            .records
            .get(key)
            .ok_or_else(|| LocaError::MissingKey { key: key.to_string() })?;
        self.substitute(&record.value)
    }

    fn substitute(&self, value: &str) -> Result<String, LocaError> {
        let mut out = String::new();
        let mut rest = value;
        while let Some(open) = rest.find('$') {
            // an unpaired $ is just text
            let Some(close) = rest[open + 1..].find('$').map(|i| open + 1 + i) else {
                break;
            };
            out.push_str(&rest[..open]);
            let reference = &rest[open + 1..close];
            let mut parts = reference.split('|');
            let name = parts.next().unwrap_or("");
            let format = parts.next();
            if self.passthrough.contains(name) {
                out.push_str(&rest[open..=close]);
                rest = &rest[close + 1..];
                continue;
            }
            if parts.next().is_some() {
                return Err(LocaError::BadReference { reference: reference.to_string() });
            }
            let replacement = self.resolve(name)?;
            if let Some(format) = format {
                out.push('#');
                out.push_str(format);
                out.push(' ');
                out.push_str(&replacement);
                out.push_str("#!");
            } else {
                out.push_str(&replacement);
            }
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use super::*;
    use crate::report::errors::TEST_LOCK;
    use crate::report::take_reports;
    use crate::token::TokenKind;

    fn record(file: &str, key: &str, value: &str) -> LocaRecord {
        let loc = Loc::for_file(Arc::new(PathBuf::from(file)));
        LocaRecord {
            key: Token::new(key.to_string(), TokenKind::Identifier, loc),
            value: value.to_string(),
        }
    }

    fn store(file: &str, entries: &[(&str, &str)]) -> LocaStore {
        let mut store = LocaStore::new();
        for (key, value) in entries {
            store.insert(record(file, key, value));
        }
        store
    }

    #[test]
    fn resolve_replaces_references() {
        let store = store(
            "store_test",
            &[("GREETING", "Hello $TARGET$"), ("TARGET", "World"), ("PLAIN", "nothing here")],
        );
        assert_eq!(store.resolve("PLAIN").unwrap(), "nothing here");
        assert_eq!(store.resolve("GREETING").unwrap(), "Hello World");
    }

    #[test]
    fn resolve_follows_chains() {
        let store = store(
            "store_test",
            &[("A", "a and $B$"), ("B", "b and $C$"), ("C", "c")],
        );
        assert_eq!(store.resolve("A").unwrap(), "a and b and c");
    }

    #[test]
    fn resolve_applies_formatting() {
        let store = store("store_test", &[("TIP", "See $REF|E$."), ("REF", "this")]);
        assert_eq!(store.resolve("TIP").unwrap(), "See #E this#!.");
    }

    #[test]
    fn passthrough_names_are_kept() {
        let mut store = store("store_test", &[("TITLE", "Duke $NAME$ of $PLACE$"), ("PLACE", "Kent")]);
        store.add_passthrough("NAME");
        assert_eq!(store.resolve("TITLE").unwrap(), "Duke $NAME$ of Kent");
    }

    #[test]
    fn resolve_errors() {
        let store = store("store_test", &[("A", "$missing$"), ("B", "$x|y|z$"), ("C", "50$ off")]);
        assert!(matches!(store.resolve("nothing"), Err(LocaError::MissingKey { .. })));
        assert!(matches!(store.resolve("A"), Err(LocaError::MissingKey { .. })));
        assert!(matches!(store.resolve("B"), Err(LocaError::BadReference { .. })));
        // an unpaired $ is not a reference
        assert_eq!(store.resolve("C").unwrap(), "50$ off");
    }

    #[test]
    fn duplicate_keys_keep_the_first_and_report() {
        let _guard = TEST_LOCK.lock().unwrap();
        let file = "store_dup_test";
        let mut store = LocaStore::new();
        store.insert(record(file, "KEY", "first"));
        store.insert(record(file, "KEY", "second"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("KEY").unwrap().value, "first");

        let reports: Vec<_> = take_reports()
            .into_iter()
            .filter(|r| r.primary().loc.pathname.as_path() == Path::new(file))
            .collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].key, ErrorKey::LocalizationDup);
        assert_eq!(reports[0].pointers.len(), 2);
    }
}

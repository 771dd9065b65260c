//! The two on-disk dialects of localization files.

use std::sync::Arc;

use crate::localization::{LocaError, LocaRecord};
use crate::parse::Scanner;
use crate::report::{untidy, ErrorKey};
use crate::token::{Loc, Token, TokenKind};

/// The key part of a `name:0` token, with the version suffix cut off.
fn strip_key(s: &str) -> &str {
    match s.split_once(':') {
        Some((head, _)) => head,
        None => s,
    }
}

/// Parse the line-oriented dialect, where every record sits on its own line
/// as `key: "value"` and the quotes anchor the value.
///
/// Lines without any quote, such as the `l_english:` header, comment lines,
/// and blank lines, are skipped. A `#` before the first quote comments out
/// the rest of the line; a `#` after it is part of the value. The value runs
/// from the first quote to the last one, so stray quotes inside stay intact,
/// and a missing closing quote is tolerated.
pub fn parse_loca_lines(text: &str, loc: Loc) -> Result<Vec<LocaRecord>, LocaError> {
    let mut records = Vec::new();
    let mut lineno = if loc.line == 0 { 1 } else { loc.line };
    let pathname = loc.pathname;
    for raw_line in text.split('\n') {
        let mut line = raw_line.trim();
        let line_loc = Loc { pathname: Arc::clone(&pathname), line: lineno, column: 1 };
        lineno += 1;
        let Some(mut quote) = line.find('"') else { continue };
        if let Some(comment) = line.find('#') {
            if comment < quote {
                line = &line[..comment];
                if let Some(q) = line.find('"') {
                    quote = q;
                } else {
                    continue;
                }
            }
        }
        let Some(colon) = line.find(':') else {
            return Err(LocaError::MissingColon { loc: line_loc });
        };
        let name = line[..colon].trim();
        let mut value = &line[quote + 1..];
        if let Some(last) = value.rfind('"') {
            value = &value[..last];
        }
        records.push(LocaRecord {
            key: Token::new(name.to_string(), TokenKind::Identifier, line_loc),
            value: value.to_string(),
        });
    }
    Ok(records)
}

/// Parse the token-oriented dialect through the script [`Scanner`]: a
/// language header token followed by `key: "value"` pairs, where keys may
/// carry a `:0` version suffix.
pub fn parse_loca_tokens(text: &str, loc: Loc) -> Result<Vec<LocaRecord>, LocaError> {
    let mut scanner = Scanner::new(text, loc);
    let mut records = Vec::new();
    if let Some(header) = scanner.next() {
        header?;
    } else {
        return Ok(records);
    }
    while let Some(token) = scanner.next() {
        let token = token?;
        if token.kind() != TokenKind::Identifier {
            return Err(LocaError::ExpectedKey {
                text: token.as_str().to_string(),
                loc: token.loc.clone(),
            });
        }
        let name = strip_key(token.as_str()).to_string();
        let key = Token::new(name.clone(), TokenKind::Identifier, token.loc.clone());
        let Some(value) = scanner.next() else {
            return Err(LocaError::ExpectedValue { key: name, loc: token.loc });
        };
        let value = value?;
        match value.kind() {
            TokenKind::String => {
                records.push(LocaRecord { key, value: value.into_string() });
            }
            // an empty quoted string fails the string rule and scans as
            // this identifier instead
            TokenKind::Identifier if value.is("\"\"") => {
                records.push(LocaRecord { key, value: String::new() });
            }
            // some files repeat the key in place of an empty value; accept
            // that if the real value follows
            TokenKind::Identifier if strip_key(value.as_str()) == name => {
                let Some(third) = scanner.next() else {
                    return Err(LocaError::ExpectedValue { key: name, loc: value.loc });
                };
                let third = third?;
                if third.kind() == TokenKind::Identifier && third.is("\"\"") {
                    let msg = format!("localization key `{name}` is repeated before an empty value");
                    untidy(ErrorKey::Localization).msg(&msg).loc(&value).push();
                    records.push(LocaRecord { key, value: String::new() });
                } else {
                    return Err(LocaError::ExpectedValue { key: name, loc: third.loc });
                }
            }
            _ => {
                return Err(LocaError::ExpectedValue { key: name, loc: value.loc });
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;

    fn loc() -> Loc {
        Loc::for_file(Arc::new(PathBuf::from("loca_test")))
    }

    fn lines(text: &str) -> Vec<LocaRecord> {
        parse_loca_lines(text, loc()).unwrap()
    }

    fn tokens(text: &str) -> Vec<LocaRecord> {
        parse_loca_tokens(text, loc()).unwrap()
    }

    fn pairs(records: &[LocaRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.key.as_str(), r.value.as_str())).collect()
    }

    #[test]
    fn line_dialect_basics() {
        let text = "l_english:\n key1: \"Value 1\"\n key2:0 \"Value 2\"\n\n";
        let records = lines(text);
        assert_eq!(pairs(&records), vec![("key1", "Value 1"), ("key2", "Value 2")]);
        assert_eq!(records[0].key.loc.line, 2);
        assert_eq!(records[1].key.loc.line, 3);
    }

    #[test]
    fn line_dialect_comments() {
        // a # before the first quote comments out the line; after it, the #
        // is part of the value
        let text = "l_english:\n # gone: \"nope\"\n a: \"costs # 5\"\n b: \"kept\" # note\n";
        let records = lines(text);
        assert_eq!(pairs(&records), vec![("a", "costs # 5"), ("b", "kept")]);
    }

    #[test]
    fn line_dialect_quote_handling() {
        // values run from the first quote to the last one
        let text = "a: \"say \"hi\" twice\"\n b: \"\"\n c: \"no closing quote";
        let records = lines(text);
        assert_eq!(
            pairs(&records),
            vec![("a", "say \"hi\" twice"), ("b", ""), ("c", "no closing quote")]
        );
    }

    #[test]
    fn line_dialect_requires_a_colon() {
        let err = parse_loca_lines("l_english:\n \"quoted but no colon\"\n", loc()).unwrap_err();
        match err {
            LocaError::MissingColon { loc } => assert_eq!(loc.line, 2),
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn token_dialect_basics() {
        let text = "l_english:\n a_key:0 \"Value A\"\n b_key: \"Value B\"\n";
        let records = tokens(text);
        assert_eq!(pairs(&records), vec![("a_key", "Value A"), ("b_key", "Value B")]);
    }

    #[test]
    fn token_dialect_empty_values() {
        let records = tokens("l_english:\n a_key: \"\"\n b_key: \"b\"\n");
        assert_eq!(pairs(&records), vec![("a_key", ""), ("b_key", "b")]);
    }

    #[test]
    fn token_dialect_doubled_key_before_empty_value() {
        let _guard = crate::report::errors::TEST_LOCK.lock().unwrap();
        let records = tokens("l_english:\n a_key: a_key: \"\"\n");
        assert_eq!(pairs(&records), vec![("a_key", "")]);
        let reports: Vec<_> = crate::report::take_reports()
            .into_iter()
            .filter(|r| r.key == ErrorKey::Localization)
            .collect();
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn token_dialect_errors() {
        assert!(matches!(
            parse_loca_tokens("l_english:\n a_key:", loc()),
            Err(LocaError::ExpectedValue { .. })
        ));
        assert!(matches!(
            parse_loca_tokens("l_english:\n a_key: 123", loc()),
            Err(LocaError::ExpectedValue { .. })
        ));
        assert!(matches!(
            parse_loca_tokens("l_english:\n a_key: \"unclosed", loc()),
            Err(LocaError::Parse(_))
        ));
        assert!(matches!(
            parse_loca_tokens("l_english:\n \"stray\" \"value\"", loc()),
            Err(LocaError::ExpectedKey { .. })
        ));
    }

    #[test]
    fn empty_input_gives_no_records() {
        assert!(tokens("").is_empty());
        assert!(tokens("l_english:").is_empty());
        assert!(lines("").is_empty());
    }
}

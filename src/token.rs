//! Contains the core [`Token`] and [`Loc`] types, which represent pieces of
//! script text and where they came from.

use std::borrow::Cow;
use std::fmt::{Debug, Display, Error, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::date::Date;
use crate::parse::ParseError;

/// A location in the game files. Used mostly for error reporting.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Loc {
    pub pathname: Arc<PathBuf>,
    /// line 0 means the loc applies to the file as a whole.
    pub line: usize,
    /// column numbers start with 1.
    pub column: usize,
}

impl Loc {
    /// Make a location that refers to a whole file rather than a place in it.
    pub fn for_file(pathname: Arc<PathBuf>) -> Self {
        Loc { pathname, line: 0, column: 0 }
    }

    pub fn filename(&self) -> Cow<str> {
        self.pathname
            .file_name()
            .map_or(Cow::Borrowed(""), |fname| fname.to_string_lossy())
    }

    pub fn same_file(&self, other: &Loc) -> bool {
        self.pathname == other.pathname
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        if self.line == 0 {
            write!(f, "{}", self.pathname.display())
        } else {
            write!(f, "{}: line {} col {}", self.pathname.display(), self.line, self.column)
        }
    }
}

/// A comparator is a binary operator that compares the two sides of an
/// assignment, such as `=` or `<`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Comparator {
    /// One of the assignment operators `=`, `==`, or `?=`.
    Equals(Eq),
    /// `!=`
    NotEquals,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    AtMost,
    /// `>=`
    AtLeast,
}

/// The three assignment operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Eq {
    /// Single `=`
    Single,
    /// Double `==`
    Double,
    /// `?=`, which only compares if the left side exists
    Question,
}

impl FromStr for Comparator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Comparator::Equals(Eq::Single)),
            "==" => Ok(Comparator::Equals(Eq::Double)),
            "?=" => Ok(Comparator::Equals(Eq::Question)),
            "!=" => Ok(Comparator::NotEquals),
            "<" => Ok(Comparator::LessThan),
            ">" => Ok(Comparator::GreaterThan),
            "<=" => Ok(Comparator::AtMost),
            ">=" => Ok(Comparator::AtLeast),
            _ => Err(Error),
        }
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Comparator::Equals(Eq::Single) => write!(f, "="),
            Comparator::Equals(Eq::Double) => write!(f, "=="),
            Comparator::Equals(Eq::Question) => write!(f, "?="),
            Comparator::NotEquals => write!(f, "!="),
            Comparator::LessThan => write!(f, "<"),
            Comparator::GreaterThan => write!(f, ">"),
            Comparator::AtMost => write!(f, "<="),
            Comparator::AtLeast => write!(f, ">="),
        }
    }
}

/// What kind of value a [`Token`] holds, as decided by the classifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// A bare word; also the fallback for anything no other rule claims.
    Identifier,
    /// An `@name` reference to a scripted value.
    LocalValue,
    /// An `@[ ... ]` calculation, kept verbatim for later evaluation.
    Expression,
    /// A quoted string, with the quotes stripped.
    String,
    /// An integer or decimal number, in normalized form.
    Number,
    /// A `year.month.day` date, in normalized form.
    Date,
    /// `yes` or `no`.
    Boolean,
    /// `{`
    BlockStart,
    /// `}`
    BlockEnd,
    /// One of the comparison or assignment operators.
    Comparator(Comparator),
}

/// A piece of script text together with its classification and its location.
#[derive(Clone, Debug, Eq)]
pub struct Token {
    s: String,
    kind: TokenKind,
    pub loc: Loc,
}

impl Token {
    pub fn new(s: String, kind: TokenKind, loc: Loc) -> Self {
        Token { s, kind, loc }
    }

    /// Decide what kind of token a lexeme is, normalizing its text where the
    /// kind calls for it.
    ///
    /// The rules are tried in a fixed order and the first match wins, so for
    /// example `yes` is a [`TokenKind::Boolean`] even though it would also
    /// pass the identifier rule.
    pub fn classify(raw: String, loc: Loc) -> Result<Self, ParseError> {
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyToken { loc });
        }
        if raw.eq_ignore_ascii_case("yes") || raw.eq_ignore_ascii_case("no") {
            return Ok(Token::new(raw, TokenKind::Boolean, loc));
        }
        if raw == "!" || raw == "?" {
            return Err(ParseError::InvalidOperator { text: raw, loc });
        }
        if let Ok(cmp) = raw.parse::<Comparator>() {
            return Ok(Token::new(raw, TokenKind::Comparator(cmp), loc));
        }
        if raw == "{" {
            return Ok(Token::new(raw, TokenKind::BlockStart, loc));
        }
        if raw == "}" {
            return Ok(Token::new(raw, TokenKind::BlockEnd, loc));
        }
        if raw.len() >= 3 && raw.starts_with('"') && raw.ends_with('"') {
            let s = raw[1..raw.len() - 1].to_string();
            return Ok(Token::new(s, TokenKind::String, loc));
        }
        if raw.len() >= 4 && raw.starts_with("@[") && raw.ends_with(']') {
            return Ok(Token::new(raw, TokenKind::Expression, loc));
        }
        if raw.len() >= 2 && raw.starts_with('@') {
            return Ok(Token::new(raw, TokenKind::LocalValue, loc));
        }
        if let Some(s) = normalize_date(&raw) {
            return Ok(Token::new(s, TokenKind::Date, loc));
        }
        if let Some(s) = normalize_float(&raw) {
            return Ok(Token::new(s, TokenKind::Number, loc));
        }
        if let Some(s) = normalize_int(&raw) {
            return Ok(Token::new(s, TokenKind::Number, loc));
        }
        Ok(Token::new(raw, TokenKind::Identifier, loc))
    }

    pub fn as_str(&self) -> &str {
        &self.s
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is(&self, s: &str) -> bool {
        self.s == s
    }

    pub fn lowercase_is(&self, s: &str) -> bool {
        self.s.to_ascii_lowercase() == s
    }

    /// The comparator this token carries, if it is an operator token.
    pub fn comparator(&self) -> Option<Comparator> {
        match self.kind {
            TokenKind::Comparator(cmp) => Some(cmp),
            _ => None,
        }
    }

    pub fn get_number(&self) -> Option<f64> {
        self.s.parse().ok()
    }

    pub fn get_integer(&self) -> Option<i64> {
        self.s.parse().ok()
    }

    pub fn get_date(&self) -> Option<Date> {
        self.s.parse().ok()
    }

    pub fn get_bool(&self) -> Option<bool> {
        if self.s.eq_ignore_ascii_case("yes") {
            Some(true)
        } else if self.s.eq_ignore_ascii_case("no") {
            Some(false)
        } else {
            None
        }
    }

    pub fn into_string(self) -> String {
        self.s
    }
}

/// Tokens are compared for equality regardless of their loc.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.s == other.s && self.kind == other.kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.s)
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip leading zeros the way an integer parse and re-print would, but
/// without any range limit.
fn strip_zeros(s: &str) -> &str {
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

/// Check for the `1066.1.1`, `1066.1.1.`, and `1066.1.` date forms and
/// normalize them to `year.month.day` with a day defaulting to 1.
fn normalize_date(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split('.').collect();
    let (year, month, day) = match parts[..] {
        [y, m, d] if all_digits(y) && all_digits(m) && (all_digits(d) || d.is_empty()) => (y, m, d),
        [y, m, d, ""] if all_digits(y) && all_digits(m) && all_digits(d) => (y, m, d),
        _ => return None,
    };
    let day = if day.is_empty() { "1" } else { strip_zeros(day) };
    Some(format!("{}.{}.{}", strip_zeros(year), strip_zeros(month), day))
}

/// Check for a decimal number. A bare trailing dot like `1066.` gets a zero
/// appended; otherwise the digits are kept as they were written.
fn normalize_float(raw: &str) -> Option<String> {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    let (int, frac) = body.split_once('.')?;
    if !all_digits(int) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.is_empty() {
        Some(format!("{raw}0"))
    } else {
        Some(raw.to_string())
    }
}

/// Check for an integer and strip leading zeros, so that `001` and `1` end up
/// as the same token text.
fn normalize_int(raw: &str) -> Option<String> {
    let (neg, body) = match raw.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, raw),
    };
    if !all_digits(body) {
        return None;
    }
    let digits = strip_zeros(body);
    if neg && digits != "0" {
        Some(format!("-{digits}"))
    } else {
        Some(digits.to_string())
    }
}

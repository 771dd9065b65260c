use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::report::ErrorKey;
use crate::token::Loc;

/// Describes a report about a potentially problematic situation that can be
/// logged.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LogReport {
    /// Determines the colour of the output and can be used for filtering.
    pub severity: Severity,
    /// How likely the problem is to be real, for filtering.
    pub confidence: Confidence,
    /// Defines the category of the report.
    pub key: ErrorKey,
    /// The primary error message. A short description of the problem.
    pub msg: String,
    /// Optional info message to be printed at the end.
    pub info: Option<String>,
    /// The locations being pointed at, starting with the most relevant one.
    pub pointers: Vec<PointedMessage>,
}

impl LogReport {
    /// Returns the primary pointer of this report.
    ///
    /// # Panics
    /// The builder interface guarantees at least one pointer, so this panics
    /// only on a hand-rolled report without one.
    pub fn primary(&self) -> &PointedMessage {
        self.pointers.first().expect("every report must have at least one pointer")
    }

    /// The width to which line numbers should be padded in text output.
    pub fn indentation(&self) -> usize {
        self.pointers.iter().map(|pointer| pointer.loc.line.to_string().len()).max().unwrap_or(0)
    }
}

/// One location being pointed at by a report.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PointedMessage {
    pub loc: Loc,
    /// The length of the text being pointed at, in characters.
    pub length: usize,
    /// A short note to print next to this location.
    pub msg: Option<String>,
}

impl PointedMessage {
    pub fn new(loc: Loc) -> Self {
        PointedMessage { loc, length: 1, msg: None }
    }
}

/// How noticeable the problem behind a report would be in game. Reports
/// below the configured minimum severity are dropped on arrival.
#[derive(
    Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not necessarily wrong, but there may be a better way to write it.
    Tips,
    /// Wasted effort, such as text that can never be displayed.
    Untidy,
    /// Something the player would notice as a glitch.
    #[default]
    Warning,
    /// Something that will not work as written.
    Error,
    /// The file is broken badly enough that everything after the problem
    /// spot may be misread.
    Fatal,
}

/// How confident the library is that a reported problem is real, for the
/// heuristic checks that can misfire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// May well be a false positive.
    Weak,
    #[default]
    Reasonable,
    /// Surely a real problem.
    Strong,
}

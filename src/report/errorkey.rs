use serde::Serialize;
use strum_macros::Display;

/// The categories that reports are tagged with, so that downstream tooling
/// can filter on them.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKey {
    /// Problems with the overall structure of a script file.
    ParseError,
    /// A closing brace that is probably in the wrong place.
    BracePlacement,
    /// Problems inside localization files.
    Localization,
    /// A localization key that is defined more than once.
    LocalizationDup,
}

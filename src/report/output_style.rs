use std::collections::HashMap;

use ansiterm::{Color, Style};
use strum::IntoEnumIterator;

use crate::report::Severity;

/// True for the severity word itself, false for the parenthesized key
/// printed after it.
pub type IsTag = bool;

/// The visually distinct parts of a text report.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Styled {
    Default,
    /// The report tag, such as `warning(parse-error)`.
    Tag(Severity, IsTag),
    /// The main error message.
    ErrorMessage,
    /// The `Info:` label.
    InfoTag,
    /// The info message and other secondary notes.
    Info,
    /// File paths and positions in them.
    Location,
}

/// The colours and text styles used when reports are printed as text.
#[derive(Clone, Debug)]
pub struct OutputStyle {
    styles: HashMap<Styled, Style>,
}

impl Default for OutputStyle {
    fn default() -> Self {
        let mut styles = HashMap::new();
        styles.insert(Styled::Default, Style::new());
        for severity in Severity::iter() {
            let color = match severity {
                Severity::Tips => Color::Cyan,
                Severity::Untidy => Color::Green,
                Severity::Warning => Color::Yellow,
                Severity::Error | Severity::Fatal => Color::Red,
            };
            styles.insert(Styled::Tag(severity, true), color.bold());
            styles.insert(Styled::Tag(severity, false), color.normal());
        }
        styles.insert(Styled::ErrorMessage, Style::new().bold());
        styles.insert(Styled::InfoTag, Color::Blue.bold());
        styles.insert(Styled::Info, Style::new());
        styles.insert(Styled::Location, Color::Cyan.normal());
        OutputStyle { styles }
    }
}

impl OutputStyle {
    /// A style set that leaves all text unstyled.
    pub fn no_color() -> Self {
        let mut styles = HashMap::new();
        styles.insert(Styled::Default, Style::new());
        OutputStyle { styles }
    }

    pub(crate) fn style(&self, styled: &Styled) -> Style {
        if let Some(style) = self.styles.get(styled) {
            *style
        } else if let Some(style) = self.styles.get(&Styled::Default) {
            *style
        } else {
            Style::new()
        }
    }
}

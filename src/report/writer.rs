//! Write reports in a human-readable text format.

use std::io::Write;

use ansiterm::{ANSIString, ANSIStrings};

use crate::report::errors::Reports;
use crate::report::output_style::Styled;
use crate::report::{LogReport, PointedMessage};

/// Log the report.
pub(crate) fn log_report(reports: &mut Reports, report: &LogReport) {
    log_line_title(reports, report);
    for pointer in &report.pointers {
        log_line_location(reports, report, pointer);
    }
    if let Some(info) = &report.info {
        log_line_info(reports, report, info);
    }
    _ = writeln!(reports.output.get_mut());
}

/// Print the `warning(parse-error): message` line.
fn log_line_title(reports: &mut Reports, report: &LogReport) {
    let styles = &reports.styles;
    let line: &[ANSIString] = &[
        styles.style(&Styled::Tag(report.severity, true)).paint(report.severity.to_string()),
        styles.style(&Styled::Tag(report.severity, false)).paint("("),
        styles.style(&Styled::Tag(report.severity, false)).paint(report.key.to_string()),
        styles.style(&Styled::Tag(report.severity, false)).paint(")"),
        styles.style(&Styled::Default).paint(": "),
        styles.style(&Styled::ErrorMessage).paint(report.msg.as_str()),
    ];
    let text = ANSIStrings(line).to_string();
    _ = writeln!(reports.output.get_mut(), "{text}");
}

/// Print a `--> file: line N col M` line for one pointer.
fn log_line_location(reports: &mut Reports, report: &LogReport, pointer: &PointedMessage) {
    let styles = &reports.styles;
    let loc = &pointer.loc;
    let mut line: Vec<ANSIString> = vec![
        styles.style(&Styled::Default).paint(format!("{:width$}", "", width = report.indentation())),
        styles.style(&Styled::Default).paint("--> "),
        styles.style(&Styled::Location).paint(loc.pathname.display().to_string()),
    ];
    if loc.line > 0 {
        line.push(styles.style(&Styled::Default).paint(": "));
        line.push(
            styles.style(&Styled::Location).paint(format!("line {} col {}", loc.line, loc.column)),
        );
    }
    if let Some(msg) = &pointer.msg {
        line.push(styles.style(&Styled::Default).paint(" <-- "));
        line.push(styles.style(&Styled::Info).paint(msg.as_str()));
    }
    let text = ANSIStrings(&line).to_string();
    _ = writeln!(reports.output.get_mut(), "{text}");
}

/// Print the optional info line at the end of a report.
fn log_line_info(reports: &mut Reports, report: &LogReport, info: &str) {
    let styles = &reports.styles;
    let line: &[ANSIString] = &[
        styles.style(&Styled::Default).paint(format!("{:width$}", "", width = report.indentation())),
        styles.style(&Styled::Default).paint(" = "),
        styles.style(&Styled::InfoTag).paint("Info:"),
        styles.style(&Styled::Default).paint(" "),
        styles.style(&Styled::Info).paint(info),
    ];
    let text = ANSIStrings(line).to_string();
    _ = writeln!(reports.output.get_mut(), "{text}");
}

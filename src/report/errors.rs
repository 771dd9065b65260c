//! Collect error reports and write them out.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{stdout, Write};
use std::mem::take;
use std::path::Path;
use std::sync::{LazyLock, Mutex, MutexGuard};

use ahash::AHashSet;
use anyhow::Result;

use crate::report::writer::log_report;
use crate::report::writer_json::log_report_json;
use crate::report::{LogReport, OutputStyle, Severity};

static REPORTS: LazyLock<Mutex<Reports>> = LazyLock::new(|| Mutex::new(Reports::default()));

/// Serializes tests that inspect the global report sink.
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

#[allow(missing_debug_implementations)]
pub struct Reports {
    /// Where the reports are written. Defaults to stdout.
    pub(crate) output: RefCell<Box<dyn Write + Send>>,
    /// Colours and styles for the text output.
    pub(crate) styles: OutputStyle,
    /// Reports with a lower severity than this are dropped on arrival.
    minimum_severity: Severity,
    /// Reports logged so far. A set, so that identical reports only come
    /// out once.
    storage: AHashSet<LogReport>,
}

impl Default for Reports {
    fn default() -> Self {
        Reports {
            output: RefCell::new(Box::new(stdout())),
            styles: OutputStyle::default(),
            minimum_severity: Severity::Tips,
            storage: AHashSet::default(),
        }
    }
}

impl Reports {
    /// Get the global instance.
    ///
    /// # Panics
    /// May panic when the mutex has been poisoned by another thread.
    pub fn get_mut() -> MutexGuard<'static, Reports> {
        REPORTS.lock().unwrap()
    }

    fn push_report(&mut self, report: LogReport) {
        if report.severity >= self.minimum_severity {
            self.storage.insert(report);
        }
    }

    /// Extract all stored reports, sorted by severity, then confidence, then
    /// location. The sink is left empty.
    pub fn take_reports(&mut self) -> Vec<LogReport> {
        let mut reports: Vec<LogReport> = take(&mut self.storage).into_iter().collect();
        reports.sort_unstable_by(|a, b| {
            // Severity in descending order
            let mut cmp = b.severity.cmp(&a.severity);
            if cmp != Ordering::Equal {
                return cmp;
            }
            // Confidence in descending order too
            cmp = b.confidence.cmp(&a.confidence);
            if cmp != Ordering::Equal {
                return cmp;
            }
            // Otherwise, by location. Compare the whole pointer chains.
            for (a, b) in a.pointers.iter().zip(b.pointers.iter()) {
                cmp = a.loc.cmp(&b.loc);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            cmp = a.pointers.len().cmp(&b.pointers.len());
            if cmp != Ordering::Equal {
                return cmp;
            }
            a.msg.cmp(&b.msg)
        });
        reports
    }

    /// Write all stored reports to the configured output and clear them.
    pub fn emit_reports(&mut self, json: bool) {
        let reports = self.take_reports();
        if json {
            _ = writeln!(self.output.get_mut(), "[");
            let mut first = true;
            for report in &reports {
                if !first {
                    _ = writeln!(self.output.get_mut(), ",");
                }
                first = false;
                log_report_json(self, report);
            }
            _ = writeln!(self.output.get_mut());
            _ = writeln!(self.output.get_mut(), "]");
        } else {
            for report in &reports {
                log_report(self, report);
            }
        }
    }
}

/// Store a report for later printing with [`emit_reports`].
pub fn log(report: LogReport) {
    Reports::get_mut().push_report(report);
}

/// Extract the stored reports, sorted, leaving the sink empty.
pub fn take_reports() -> Vec<LogReport> {
    Reports::get_mut().take_reports()
}

/// Print the stored reports and clear them. With `json` set, the output is
/// one JSON array of report objects.
pub fn emit_reports(json: bool) {
    Reports::get_mut().emit_reports(json);
}

/// Redirect the reports to a file instead of stdout.
pub fn set_output_file(file: &Path) -> Result<()> {
    let file = File::create(file)?;
    Reports::get_mut().output = RefCell::new(Box::new(file));
    Ok(())
}

/// Drop reports below this severity on arrival.
pub fn set_minimum_severity(severity: Severity) {
    Reports::get_mut().minimum_severity = severity;
}

/// Override the colours used in text output.
pub fn set_output_style(style: OutputStyle) {
    Reports::get_mut().styles = style;
}

/// Turn off the ANSI colour codes in text output, for terminals or files
/// where they would just be noise.
pub fn disable_ansi_colors() {
    Reports::get_mut().styles = OutputStyle::no_color();
}

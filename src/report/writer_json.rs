//! Write reports as JSON, for tools that want to consume them.

use serde_json::{json, to_writer_pretty, Value};

use crate::report::errors::Reports;
use crate::report::LogReport;

/// Log the report as one JSON object.
pub(crate) fn log_report_json(reports: &mut Reports, report: &LogReport) {
    let locations: Vec<Value> = report
        .pointers
        .iter()
        .map(|pointer| {
            json!({
                "path": &*pointer.loc.pathname,
                "linenr": (pointer.loc.line > 0).then_some(pointer.loc.line),
                "column": (pointer.loc.column > 0).then_some(pointer.loc.column),
                "length": pointer.length,
                "tag": pointer.msg,
            })
        })
        .collect();
    let value = json!({
        "severity": report.severity,
        "confidence": report.confidence,
        "key": report.key,
        "message": report.msg,
        "info": report.info,
        "locations": locations,
    });
    if let Err(e) = to_writer_pretty(reports.output.get_mut(), &value) {
        eprintln!("JSON error: {e}");
    }
}

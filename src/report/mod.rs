//! Error report collection and printing.
//!
//! Problems that do not stop a parse are not returned as errors; they are
//! logged here and written out later, either as styled text or as JSON.

pub use crate::report::builder::{
    err, fatal, tips, untidy, warn, ReportBuilderStage1, ReportBuilderStage2, ReportBuilderStage3,
};
pub use crate::report::error_loc::ErrorLoc;
pub use crate::report::errorkey::ErrorKey;
pub use crate::report::errors::{
    disable_ansi_colors, emit_reports, log, set_minimum_severity, set_output_file,
    set_output_style, take_reports,
};
pub use crate::report::output_style::OutputStyle;
pub use crate::report::report_struct::{Confidence, LogReport, PointedMessage, Severity};

mod builder;
mod error_loc;
mod errorkey;
pub(crate) mod errors;
mod output_style;
mod report_struct;
mod writer;
mod writer_json;

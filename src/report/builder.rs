//! A builder for error reports, in stages so that the compiler enforces a
//! minimum of content: a report cannot be logged until it has a message and
//! at least one location.
//!
//! A typical use looks like
//! `warn(ErrorKey::ParseError).msg("...").loc(&token).push()`.

use crate::report::error_loc::ErrorLoc;
use crate::report::{log, Confidence, ErrorKey, LogReport, PointedMessage, Severity};

pub fn tips(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1 { key, severity: Severity::Tips, confidence: Confidence::default() }
}

pub fn untidy(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1 { key, severity: Severity::Untidy, confidence: Confidence::default() }
}

pub fn warn(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1 { key, severity: Severity::Warning, confidence: Confidence::default() }
}

pub fn err(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1 { key, severity: Severity::Error, confidence: Confidence::default() }
}

pub fn fatal(key: ErrorKey) -> ReportBuilderStage1 {
    ReportBuilderStage1 { key, severity: Severity::Fatal, confidence: Confidence::default() }
}

/// Stage one: severity and key are set, confidence can still be adjusted.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct ReportBuilderStage1 {
    key: ErrorKey,
    severity: Severity,
    confidence: Confidence,
}

impl ReportBuilderStage1 {
    pub fn weak(mut self) -> Self {
        self.confidence = Confidence::Weak;
        self
    }

    pub fn strong(mut self) -> Self {
        self.confidence = Confidence::Strong;
        self
    }

    pub fn msg(self, msg: &str) -> ReportBuilderStage2 {
        ReportBuilderStage2 { stage1: self, msg, info: None }
    }
}

/// Stage two: the message is set, and an info line may be added.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct ReportBuilderStage2<'a> {
    stage1: ReportBuilderStage1,
    msg: &'a str,
    info: Option<&'a str>,
}

impl<'a> ReportBuilderStage2<'a> {
    pub fn info(mut self, info: &'a str) -> Self {
        self.info = Some(info);
        self
    }

    pub fn loc<E: ErrorLoc>(self, loc: E) -> ReportBuilderStage3<'a> {
        ReportBuilderStage3 { stage2: self, pointers: vec![PointedMessage::new(loc.into_loc())] }
    }
}

/// Stage three: at least one location is attached, so the report can be
/// built or logged. Further locations may be chained on.
#[derive(Debug)]
#[must_use]
pub struct ReportBuilderStage3<'a> {
    stage2: ReportBuilderStage2<'a>,
    pointers: Vec<PointedMessage>,
}

impl ReportBuilderStage3<'_> {
    pub fn loc<E: ErrorLoc>(mut self, loc: E) -> Self {
        self.pointers.push(PointedMessage::new(loc.into_loc()));
        self
    }

    /// Attach a further location with a note explaining its role.
    pub fn loc_msg<E: ErrorLoc>(mut self, loc: E, msg: &str) -> Self {
        self.pointers.push(PointedMessage {
            loc: loc.into_loc(),
            length: 1,
            msg: Some(msg.to_string()),
        });
        self
    }

    pub fn build(self) -> LogReport {
        LogReport {
            key: self.stage2.stage1.key,
            severity: self.stage2.stage1.severity,
            confidence: self.stage2.stage1.confidence,
            msg: self.stage2.msg.to_string(),
            info: self.stage2.info.map(str::to_string),
            pointers: self.pointers,
        }
    }

    /// Build the report and send it to the log.
    pub fn push(self) {
        log(self.build());
    }
}

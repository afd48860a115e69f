//! Error kinds surfaced by the report engine.
//!
//! Field and metric failures are raised without location; the pipeline lifts
//! them into [`ReportError`] once it knows the file, block and line involved.

use std::process::ExitCode;
use thiserror::Error;

/// A requested field could not be read from a comma-separated line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("field {index} requested but line has only {available} fields")]
    Missing { index: usize, available: usize },

    #[error("line has {available} fields, expected {expected}")]
    Width { expected: usize, available: usize },

    #[error("field {index} ({value:?}) is not a valid {kind}")]
    NotNumeric {
        index: usize,
        value: String,
        kind: &'static str,
    },
}

/// A derived ratio could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("denominator of {metric} is zero")]
    DivisionByZero { metric: &'static str },

    #[error("{metric} is not finite: an operand overflowed")]
    NonFinite { metric: &'static str },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("parse error at {path}, block {block}: {reason}; line: {line:?}")]
    Parse {
        path: String,
        block: usize,
        line: String,
        reason: FieldError,
    },

    #[error("division by zero at {path}, block {block}: cannot compute {metric}; header: {line:?}")]
    DivisionByZero {
        path: String,
        block: usize,
        line: String,
        metric: &'static str,
    },

    #[error("overflow at {path}, block {block}: {metric} is not finite; header: {line:?}")]
    NonFinite {
        path: String,
        block: usize,
        line: String,
        metric: &'static str,
    },

    #[error(
        "shape mismatch in {path}: run {run} is {rows}x{cols}, run 1 is {expected_rows}x{expected_cols}"
    )]
    ShapeMismatch {
        path: String,
        run: usize,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn parse(path: &str, block: usize, line: &str, reason: FieldError) -> Self {
        Self::Parse {
            path: path.to_string(),
            block,
            line: line.to_string(),
            reason,
        }
    }

    pub fn metric(path: &str, block: usize, line: &str, err: MetricError) -> Self {
        let (path, line) = (path.to_string(), line.to_string());
        match err {
            MetricError::DivisionByZero { metric } => Self::DivisionByZero {
                path,
                block,
                line,
                metric,
            },
            MetricError::NonFinite { metric } => Self::NonFinite {
                path,
                block,
                line,
                metric,
            },
        }
    }

    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Process exit status for this error kind. 2 is left to clap usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Parse { .. } => 3,
            Self::DivisionByZero { .. } => 4,
            Self::ShapeMismatch { .. } => 5,
            Self::Io { .. } => 6,
            Self::NonFinite { .. } => 7,
        }
    }
}

/// Map any error bubbling out of `main` to an exit status.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ReportError>() {
        Some(report) => ExitCode::from(report.exit_code()),
        None => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_path_block_and_line() {
        let err = ReportError::parse(
            "data.txt",
            3,
            "1,2,x",
            FieldError::NotNumeric {
                index: 2,
                value: "x".into(),
                kind: "float",
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("data.txt"));
        assert!(msg.contains("block 3"));
        assert!(msg.contains("\"1,2,x\""));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let div = ReportError::metric(
            "a",
            0,
            "h",
            MetricError::DivisionByZero { metric: "wb_rate" },
        );
        let io = ReportError::io("a", std::io::Error::other("gone"));
        let shape = ReportError::ShapeMismatch {
            path: "a".into(),
            run: 2,
            rows: 1,
            cols: 1,
            expected_rows: 2,
            expected_cols: 1,
        };
        let overflow = ReportError::metric(
            "a",
            0,
            "h",
            MetricError::NonFinite { metric: "wb_rate" },
        );
        assert_eq!(div.exit_code(), 4);
        assert_eq!(overflow.exit_code(), 7);
        assert_eq!(shape.exit_code(), 5);
        assert_eq!(io.exit_code(), 6);
    }

    #[test]
    fn exit_code_survives_anyhow_context() {
        use anyhow::Context;
        let res: Result<(), ReportError> = Err(ReportError::ShapeMismatch {
            path: "m".into(),
            run: 2,
            rows: 3,
            cols: 3,
            expected_rows: 2,
            expected_cols: 3,
        });
        let err = res.context("average runs").unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::from(5));
    }
}

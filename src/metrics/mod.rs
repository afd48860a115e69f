//! Derived metrics, one profile per report kind.
//!
//! Every profile is a pure function of one block's data lines: `extract`
//! reads the floats the profile needs, `derive` turns them into ratios.
//! Ratios are kept as fractions here and scaled to percentages when rows
//! are written.

pub mod conflict;
pub mod cpi;
pub mod exec_time;
pub mod writeback;

use crate::block::Block;
use crate::error::MetricError;
use crate::field::LineFault;
use serde::Serialize;

pub use conflict::ConflictProfile;
pub use cpi::CpiProfile;
pub use exec_time::ExecTimeProfile;
pub use writeback::WritebackProfile;

pub trait Profile {
    /// Lines per block, header included.
    const PERIOD: usize;

    type Sample;
    type Metrics: Serialize;

    fn extract(&self, block: &Block<'_>) -> Result<Self::Sample, LineFault>;

    fn derive(&self, sample: &Self::Sample) -> Result<Self::Metrics, MetricError>;
}

/// `num / den`, failing instead of producing an infinite or NaN ratio.
///
/// Operands are sums of counters and may overflow to infinity.
pub fn ratio(num: f64, den: f64, metric: &'static str) -> Result<f64, MetricError> {
    if den == 0.0 {
        return Err(MetricError::DivisionByZero { metric });
    }
    let value = num / den;
    if !num.is_finite() || !den.is_finite() || !value.is_finite() {
        return Err(MetricError::NonFinite { metric });
    }
    Ok(value)
}

/// Signed relative change of `value` against `base`, in percent.
pub fn relative_delta(value: f64, base: f64, metric: &'static str) -> Result<f64, MetricError> {
    Ok(ratio(value - base, base, metric)? * 100.0)
}

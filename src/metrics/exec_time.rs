//! Period-7 execution-time normalization.
//!
//! Data residues 1..=6 hold one configuration's cycle count each (field 2).
//! Residue 1 is the unprotected baseline; every other configuration is
//! reported as its absolute percentage distance from it and as a
//! multiplier of it.

use crate::block::Block;
use crate::error::MetricError;
use crate::field::{LineFault, Schema, role};
use crate::metrics::{Profile, relative_delta};
use serde::Serialize;

const LINE: Schema<1> = Schema {
    width: 3,
    roles: [role("cycles", 2)],
};

/// Configurations in residue order, baseline excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scheme {
    #[serde(rename = "lrp+pf")]
    LrpPf,
    #[serde(rename = "lrp")]
    Lrp,
    #[serde(rename = "bb+pf")]
    BbPf,
    #[serde(rename = "bb")]
    Bb,
    #[serde(rename = "sb")]
    Sb,
}

impl Scheme {
    pub const RESIDUE_ORDER: [Scheme; 5] =
        [Scheme::LrpPf, Scheme::Lrp, Scheme::BbPf, Scheme::Bb, Scheme::Sb];

    /// Column order of the normalized report.
    pub const REPORT_ORDER: [Scheme; 5] =
        [Scheme::Sb, Scheme::Bb, Scheme::BbPf, Scheme::Lrp, Scheme::LrpPf];

    pub fn label(self) -> &'static str {
        match self {
            Scheme::LrpPf => "lrp+pf",
            Scheme::Lrp => "lrp",
            Scheme::BbPf => "bb+pf",
            Scheme::Bb => "bb",
            Scheme::Sb => "sb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SchemeDelta {
    pub scheme: Scheme,
    /// `|value - baseline| / baseline`, in percent.
    pub delta: f64,
}

impl SchemeDelta {
    pub fn multiplier(&self) -> f64 {
        (self.delta + 100.0) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecTimeMetrics {
    pub baseline: f64,
    /// In residue order.
    pub deltas: [SchemeDelta; 5],
}

impl ExecTimeMetrics {
    pub fn delta(&self, scheme: Scheme) -> &SchemeDelta {
        let pos = Scheme::RESIDUE_ORDER
            .iter()
            .position(|c| *c == scheme)
            .unwrap_or_default();
        &self.deltas[pos]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExecTimeProfile;

impl Profile for ExecTimeProfile {
    const PERIOD: usize = 7;

    type Sample = [f64; 6];
    type Metrics = ExecTimeMetrics;

    fn extract(&self, block: &Block<'_>) -> Result<[f64; 6], LineFault> {
        let mut out = [0.0; 6];
        for (slot, residue) in out.iter_mut().zip(1..Self::PERIOD) {
            let [cycles] = LINE.extract_line(block, residue)?;
            *slot = cycles;
        }
        Ok(out)
    }

    fn derive(&self, sample: &[f64; 6]) -> Result<ExecTimeMetrics, MetricError> {
        let [baseline, rest @ ..] = *sample;
        let mut deltas = Scheme::RESIDUE_ORDER.map(|scheme| SchemeDelta { scheme, delta: 0.0 });
        for (slot, value) in deltas.iter_mut().zip(rest) {
            slot.delta = relative_delta(value, baseline, "execution time delta")?.abs();
        }
        Ok(ExecTimeMetrics { baseline, deltas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::read_blocks;
    use pretty_assertions::assert_eq;

    #[test]
    fn fifty_percent_slower_is_one_and_a_half() {
        let m = ExecTimeProfile
            .derive(&[100.0, 150.0, 100.0, 50.0, 125.0, 200.0])
            .unwrap();
        let lrp_pf = m.delta(Scheme::LrpPf);
        assert_eq!(lrp_pf.delta, 50.0);
        assert_eq!(lrp_pf.multiplier(), 1.5);
        assert_eq!(m.delta(Scheme::Lrp).multiplier(), 1.0);
        // Faster than baseline still reports the absolute distance.
        assert_eq!(m.delta(Scheme::BbPf).delta, 50.0);
        assert_eq!(m.delta(Scheme::Bb).delta, 25.0);
        assert_eq!(m.delta(Scheme::Sb).multiplier(), 2.0);
    }

    #[test]
    fn zero_baseline_is_an_error() {
        assert_eq!(
            ExecTimeProfile.derive(&[0.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
            Err(MetricError::DivisionByZero {
                metric: "execution time delta"
            })
        );
    }

    #[test]
    fn reads_field_two_of_each_data_line() {
        let text = "skiplist,8,x,8,0\n\
                    a,b,100\n\
                    a,b,110\n\
                    a,b,120\n\
                    a,b,130\n\
                    a,b,140\n\
                    a,b,150\n";
        let blocks = read_blocks(text, ExecTimeProfile::PERIOD);
        let sample = ExecTimeProfile.extract(&blocks[0]).unwrap();
        assert_eq!(sample, [100.0, 110.0, 120.0, 130.0, 140.0, 150.0]);
    }

    #[test]
    fn report_order_reverses_residue_order() {
        let mut reversed = Scheme::RESIDUE_ORDER;
        reversed.reverse();
        assert_eq!(reversed, Scheme::REPORT_ORDER);
        let labels: Vec<&str> = Scheme::REPORT_ORDER.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["sb", "bb", "bb+pf", "lrp", "lrp+pf"]);
    }
}

//! Period-5 CPI cross ratios.
//!
//! Residues 1..=4 carry the CPI (field 2) under no protection, release
//! persistency, baseline exclusive persistency and flush-baseline release
//! persistency. Each of the last three is compared against the other three.

use crate::block::Block;
use crate::error::MetricError;
use crate::field::{LineFault, Schema, role};
use crate::metrics::{Profile, relative_delta};
use serde::Serialize;

const LINE: Schema<1> = Schema {
    width: 3,
    roles: [role("cpi", 2)],
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpiSample {
    pub nop: f64,
    pub rp: f64,
    pub bep: f64,
    pub fbrp: f64,
}

/// Signed percentage deltas, `x_y = (x - y) / y * 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpiMetrics {
    pub rp_nop: f64,
    pub bep_nop: f64,
    pub fbrp_nop: f64,
    pub nop_bep: f64,
    pub rp_bep: f64,
    pub fbrp_bep: f64,
    pub nop_fbrp: f64,
    pub rp_fbrp: f64,
    pub bep_fbrp: f64,
}

impl CpiMetrics {
    /// Grouped by reference configuration: nop, bep, fbrp.
    pub fn in_report_order(&self) -> [f64; 9] {
        [
            self.rp_nop,
            self.bep_nop,
            self.fbrp_nop,
            self.nop_bep,
            self.rp_bep,
            self.fbrp_bep,
            self.nop_fbrp,
            self.rp_fbrp,
            self.bep_fbrp,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CpiProfile;

impl Profile for CpiProfile {
    const PERIOD: usize = 5;

    type Sample = CpiSample;
    type Metrics = CpiMetrics;

    fn extract(&self, block: &Block<'_>) -> Result<CpiSample, LineFault> {
        let [nop] = LINE.extract_line(block, 1)?;
        let [rp] = LINE.extract_line(block, 2)?;
        let [bep] = LINE.extract_line(block, 3)?;
        let [fbrp] = LINE.extract_line(block, 4)?;
        Ok(CpiSample { nop, rp, bep, fbrp })
    }

    fn derive(&self, s: &CpiSample) -> Result<CpiMetrics, MetricError> {
        Ok(CpiMetrics {
            rp_nop: relative_delta(s.rp, s.nop, "cpi delta vs no protection")?,
            bep_nop: relative_delta(s.bep, s.nop, "cpi delta vs no protection")?,
            fbrp_nop: relative_delta(s.fbrp, s.nop, "cpi delta vs no protection")?,
            nop_bep: relative_delta(s.nop, s.bep, "cpi delta vs baseline exclusive")?,
            rp_bep: relative_delta(s.rp, s.bep, "cpi delta vs baseline exclusive")?,
            fbrp_bep: relative_delta(s.fbrp, s.bep, "cpi delta vs baseline exclusive")?,
            nop_fbrp: relative_delta(s.nop, s.fbrp, "cpi delta vs flush-baseline release")?,
            rp_fbrp: relative_delta(s.rp, s.fbrp, "cpi delta vs flush-baseline release")?,
            bep_fbrp: relative_delta(s.bep, s.fbrp, "cpi delta vs flush-baseline release")?,
        })
    }
}

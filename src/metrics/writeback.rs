//! Period-7 write-back criticality profile.
//!
//! Residues 2..=5 each carry one run's write-back and conflict counters
//! (39 fields). Residues 2 and 3 were simulated without proactive flushing
//! of natural evictions, residues 4 and 5 with it; the model decides how
//! much inter-thread proactive-flush credit is subtracted from critical
//! write-backs.

use crate::block::Block;
use crate::config::Discounts;
use crate::error::MetricError;
use crate::field::{LineFault, Schema, role};
use crate::metrics::{Profile, ratio};
use serde::Serialize;

const RESIDUES: [usize; 4] = [2, 3, 4, 5];

const LINE: Schema<17> = Schema {
    width: 39,
    roles: [
        role("clwb_tot", 0),
        role("critical_clwb", 1),
        role("natural_clwb", 4),
        role("all_natural_clwb", 5),
        role("intra_tot", 6),
        role("intra_vis_conflicts", 7),
        role("intra_persist", 15),
        role("intra_vis_persists", 16),
        role("intra_evi_persists", 17),
        role("inter_tot", 19),
        role("inter_persist", 23),
        role("vis_pf_persists", 27),
        role("evi_pf_persists", 28),
        role("inter_pf_persists", 29),
        role("invals_m", 31),
        role("shares_m", 34),
        role("conflict_evi_persists", 36),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistModel {
    NoFlush,
    Flush,
}

impl PersistModel {
    pub fn for_residue(residue: usize) -> Self {
        if residue <= 3 {
            PersistModel::NoFlush
        } else {
            PersistModel::Flush
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WritebackCounts {
    pub clwb_tot: f64,
    pub critical_clwb: f64,
    pub natural_clwb: f64,
    pub all_natural_clwb: f64,
    pub intra_tot: f64,
    pub intra_vis_conflicts: f64,
    pub intra_persist: f64,
    pub intra_vis_persists: f64,
    pub intra_evi_persists: f64,
    pub inter_tot: f64,
    pub inter_persist: f64,
    pub vis_pf_persists: f64,
    pub evi_pf_persists: f64,
    pub inter_pf_persists: f64,
    pub invals_m: f64,
    pub shares_m: f64,
    pub conflict_evi_persists: f64,
}

impl WritebackCounts {
    fn from_fields(
        [
            clwb_tot,
            critical_clwb,
            natural_clwb,
            all_natural_clwb,
            intra_tot,
            intra_vis_conflicts,
            intra_persist,
            intra_vis_persists,
            intra_evi_persists,
            inter_tot,
            inter_persist,
            vis_pf_persists,
            evi_pf_persists,
            inter_pf_persists,
            invals_m,
            shares_m,
            conflict_evi_persists,
        ]: [f64; 17],
    ) -> Self {
        Self {
            clwb_tot,
            critical_clwb,
            natural_clwb,
            all_natural_clwb,
            intra_tot,
            intra_vis_conflicts,
            intra_persist,
            intra_vis_persists,
            intra_evi_persists,
            inter_tot,
            inter_persist,
            vis_pf_persists,
            evi_pf_persists,
            inter_pf_persists,
            invals_m,
            shares_m,
            conflict_evi_persists,
        }
    }
}

/// Ratios for one residue line, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WritebackLine {
    pub residue: usize,
    pub model: PersistModel,
    pub inter_intra_ratio: f64,
    pub wb_rate: f64,
    /// Critical write-backs (intra and inter) over all write-backs.
    pub crit_ratio: f64,
    /// Intra-thread critical write-backs over all write-backs.
    pub intra_crit_ratio: f64,
    /// Intra share of critical write-backs.
    pub intra_crit_share: f64,
    pub intra_vis_ratio: f64,
    pub intra_evi_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WritebackMetrics {
    pub lines: [WritebackLine; 4],
}

impl WritebackMetrics {
    /// Intra shares of residues 2 and 3, then their write-back rates.
    pub fn summary_percentages(&self) -> [f64; 4] {
        let [r2, r3, _, _] = &self.lines;
        [
            r2.inter_intra_ratio * 100.0,
            r3.inter_intra_ratio * 100.0,
            r2.wb_rate * 100.0,
            r3.wb_rate * 100.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WritebackProfile {
    pub discounts: Discounts,
}

impl WritebackProfile {
    pub fn new(discounts: Discounts) -> Self {
        Self { discounts }
    }

    fn derive_line(
        &self,
        residue: usize,
        c: &WritebackCounts,
    ) -> Result<WritebackLine, MetricError> {
        let model = PersistModel::for_residue(residue);
        let d = &self.discounts;

        let flushed_naturals = match model {
            PersistModel::Flush => c.natural_clwb,
            PersistModel::NoFlush => 0.0,
        };
        let intra_all =
            c.intra_persist + c.intra_vis_conflicts + c.all_natural_clwb + flushed_naturals;
        let intra_crit = c.intra_persist + c.intra_vis_conflicts + c.conflict_evi_persists
            - (c.vis_pf_persists + c.evi_pf_persists) * d.intra_pf;

        let inter_m_all = c.inter_persist + c.invals_m + c.shares_m;
        let inter_discount = match model {
            PersistModel::Flush => d.inter_pf_flush,
            PersistModel::NoFlush => d.inter_pf_no_flush,
        };
        let inter_crit = c.inter_persist - c.inter_pf_persists * inter_discount;

        let all_wb = intra_all + inter_m_all;

        Ok(WritebackLine {
            residue,
            model,
            inter_intra_ratio: ratio(c.intra_tot, c.inter_tot + c.intra_tot, "inter_intra_ratio")?,
            wb_rate: ratio(c.critical_clwb, c.clwb_tot, "wb_rate")?,
            crit_ratio: ratio(intra_crit + inter_crit, all_wb, "crit_ratio")?,
            intra_crit_ratio: ratio(intra_crit, all_wb, "intra_crit_ratio")?,
            intra_crit_share: ratio(intra_crit, intra_crit + inter_crit, "intra_crit_share")?,
            intra_vis_ratio: ratio(
                c.intra_vis_persists + c.intra_vis_conflicts,
                intra_all,
                "intra_vis_ratio",
            )?,
            intra_evi_ratio: ratio(
                c.intra_evi_persists + c.conflict_evi_persists,
                intra_all,
                "intra_evi_ratio",
            )?,
        })
    }
}

impl Profile for WritebackProfile {
    const PERIOD: usize = 7;

    type Sample = [WritebackCounts; 4];
    type Metrics = WritebackMetrics;

    fn extract(&self, block: &Block<'_>) -> Result<Self::Sample, LineFault> {
        let mut out = [WritebackCounts::default(); 4];
        for (slot, residue) in out.iter_mut().zip(RESIDUES) {
            *slot = WritebackCounts::from_fields(LINE.extract_line(block, residue)?);
        }
        Ok(out)
    }

    fn derive(&self, sample: &Self::Sample) -> Result<WritebackMetrics, MetricError> {
        let [a, b, c, d] = sample;
        Ok(WritebackMetrics {
            lines: [
                self.derive_line(RESIDUES[0], a)?,
                self.derive_line(RESIDUES[1], b)?,
                self.derive_line(RESIDUES[2], c)?,
                self.derive_line(RESIDUES[3], d)?,
            ],
        })
    }
}

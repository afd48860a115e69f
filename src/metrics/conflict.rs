//! Period-5 conflict profile.
//!
//! Residues 2 and 3 carry `inter, intra, persist, wb, cwb, ncwb, nat, ext`.
//! Residue 3 is the release-persistency run, where natural evictions count
//! on the intra side of the split.

use crate::block::Block;
use crate::error::MetricError;
use crate::field::{LineFault, Schema, role};
use crate::metrics::{Profile, ratio};
use serde::Serialize;

const LINE: Schema<5> = Schema {
    width: 8,
    roles: [
        role("inter", 0),
        role("intra", 1),
        role("wb", 3),
        role("cwb", 4),
        role("nat", 6),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictCounts {
    pub inter: f64,
    pub intra: f64,
    pub wb: f64,
    pub cwb: f64,
    pub nat: f64,
}

impl ConflictCounts {
    fn from_fields([inter, intra, wb, cwb, nat]: [f64; 5]) -> Self {
        Self {
            inter,
            intra,
            wb,
            cwb,
            nat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConflictRatios {
    pub inter_intra: f64,
    pub wb_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConflictMetrics {
    pub plain: ConflictRatios,
    pub release: ConflictRatios,
}

impl ConflictMetrics {
    /// Report order: both intra shares, then both write-back rates.
    pub fn percentages(&self) -> [f64; 4] {
        [
            self.plain.inter_intra * 100.0,
            self.release.inter_intra * 100.0,
            self.plain.wb_rate * 100.0,
            self.release.wb_rate * 100.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictProfile;

impl Profile for ConflictProfile {
    const PERIOD: usize = 5;

    type Sample = [ConflictCounts; 2];
    type Metrics = ConflictMetrics;

    fn extract(&self, block: &Block<'_>) -> Result<Self::Sample, LineFault> {
        Ok([
            ConflictCounts::from_fields(LINE.extract_line(block, 2)?),
            ConflictCounts::from_fields(LINE.extract_line(block, 3)?),
        ])
    }

    fn derive(&self, [plain, release]: &Self::Sample) -> Result<ConflictMetrics, MetricError> {
        Ok(ConflictMetrics {
            plain: ConflictRatios {
                inter_intra: ratio(plain.intra, plain.inter + plain.intra, "inter_intra_ratio")?,
                wb_rate: ratio(plain.cwb, plain.wb, "wb_rate")?,
            },
            release: ConflictRatios {
                inter_intra: ratio(
                    release.intra + release.nat,
                    release.inter + release.nat + release.intra,
                    "inter_intra_ratio",
                )?,
                wb_rate: ratio(release.cwb, release.wb, "wb_rate")?,
            },
        })
    }
}

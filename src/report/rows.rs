//! Line layouts of each report kind.
//!
//! Ratios leave the metric layer as fractions and are scaled to percent
//! here. Layouts match what the downstream plotting scripts read, trailing
//! tabs and padding included.

use crate::metrics::conflict::ConflictMetrics;
use crate::metrics::cpi::CpiMetrics;
use crate::metrics::exec_time::{ExecTimeMetrics, Scheme};
use crate::metrics::writeback::WritebackMetrics;
use crate::pipeline::Derived;
use crate::report::{fmt_num, tab_row};

/// First line of the normalized execution-time report.
pub fn exec_time_title() -> String {
    let mut line = String::from("benchmarks-T ");
    for scheme in Scheme::REPORT_ORDER {
        line.push_str(&format!("\t ,{} ", scheme.label()));
    }
    line
}

/// Header cells followed by the four summary percentages.
fn summary_line<M>(d: &Derived<M>, percentages: [f64; 4]) -> String {
    let cells = d
        .header
        .cells()
        .into_iter()
        .chain(percentages.into_iter().map(fmt_num));
    tab_row(cells)
}

pub fn conflict_line(d: &Derived<ConflictMetrics>) -> String {
    summary_line(d, d.metrics.percentages())
}

/// One block's lines for each write-back report file.
#[derive(Debug, Clone, PartialEq)]
pub struct WritebackRows {
    /// `data2.out`
    pub summary: String,
    /// `data_wb.out`: one line per residue, then an empty separator.
    pub split: Vec<String>,
    /// `data_wb_all.out`
    pub intra_crit: String,
    /// `data_wb_tot.out`
    pub intra_kinds: String,
    /// `data_wb_crit.out`
    pub crit: String,
}

pub fn writeback_rows(d: &Derived<WritebackMetrics>) -> WritebackRows {
    let lines = &d.metrics.lines;

    let mut split: Vec<String> = lines
        .iter()
        .map(|l| {
            format!(
                "{}\t{}\t{}",
                l.residue,
                fmt_num(l.inter_intra_ratio * 100.0),
                fmt_num(l.intra_crit_share * 100.0)
            )
        })
        .collect();
    split.push(String::new());

    // Newest residue first.
    let intra_crit = tab_row(lines.iter().rev().map(|l| fmt_num(l.intra_crit_ratio * 100.0)));
    let intra_kinds = tab_row(lines.iter().rev().flat_map(|l| {
        [
            fmt_num(l.intra_vis_ratio * 100.0),
            fmt_num(l.intra_evi_ratio * 100.0),
        ]
    }));
    let crit = tab_row(lines.iter().map(|l| fmt_num(l.crit_ratio * 100.0)));

    WritebackRows {
        summary: summary_line(d, d.metrics.summary_percentages()),
        split,
        intra_crit,
        intra_kinds,
        crit,
    }
}

/// Normalized row: `name-variant` then one multiplier per scheme.
pub fn exec_time_line(d: &Derived<ExecTimeMetrics>) -> String {
    let mut line = format!("{}-{}   \t", d.header.benchmark, d.header.variant);
    for scheme in Scheme::REPORT_ORDER {
        line.push_str(&format!(",{} \t", fmt_num(d.metrics.delta(scheme).multiplier())));
    }
    line
}

/// Echo row: header labels then absolute deltas in residue order.
pub fn exec_time_delta_line(d: &Derived<ExecTimeMetrics>) -> String {
    let h = &d.header;
    let mut line = format!(
        "{}-{}\t{}\t{}\t{} \t",
        h.benchmark, h.variant, h.secondary, h.threads, h.extra
    );
    line.push_str(&tab_row(d.metrics.deltas.iter().map(|s| fmt_num(s.delta))));
    line
}

pub fn cpi_line(d: &Derived<CpiMetrics>) -> String {
    let h = &d.header;
    let labels = [
        h.variant.clone(),
        h.secondary.clone(),
        h.threads.to_string(),
        h.extra.to_string(),
    ];
    tab_row(
        labels
            .into_iter()
            .chain(d.metrics.in_report_order().into_iter().map(fmt_num)),
    )
}

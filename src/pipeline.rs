//! Single pass over one input file: segment, extract, filter, derive.

use crate::block::{Block, Header, read_blocks};
use crate::error::ReportError;
use crate::metrics::Profile;
use serde::Serialize;

/// Derived metrics of one block whose header names a known benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derived<M> {
    pub block: usize,
    pub header: Header,
    pub metrics: M,
}

/// Run `profile` over every block of `text`.
///
/// Data lines of every complete block are validated, known benchmark or
/// not. Only blocks with a known benchmark name are derived. The result is
/// grouped by benchmark in enumeration order, blocks in source order
/// within each benchmark.
pub fn run_profile<P: Profile>(
    profile: &P,
    path: &str,
    text: &str,
) -> Result<Vec<Derived<P::Metrics>>, ReportError> {
    let blocks = read_blocks(text, P::PERIOD);
    tracing::debug!(path, blocks = blocks.len(), period = P::PERIOD, "segmented input");

    let mut out = Vec::new();
    for block in &blocks {
        if let Some(derived) = derive_block(profile, path, block)? {
            out.push(derived);
        }
    }

    // Stable: keeps source order inside each benchmark.
    out.sort_by_key(|d| d.header.benchmark);
    Ok(out)
}

fn derive_block<P: Profile>(
    profile: &P,
    path: &str,
    block: &Block<'_>,
) -> Result<Option<Derived<P::Metrics>>, ReportError> {
    let sample = profile.extract(block).map_err(|fault| {
        ReportError::parse(path, block.index, block.line(fault.residue), fault.reason)
    })?;

    let header = Header::parse(block.header())
        .map_err(|reason| ReportError::parse(path, block.index, block.header(), reason))?;
    let Some(header) = header else {
        tracing::trace!(
            path,
            block = block.index,
            header = block.header(),
            "no benchmark match, skipping"
        );
        return Ok(None);
    };

    let metrics = profile
        .derive(&sample)
        .map_err(|err| ReportError::metric(path, block.index, block.header(), err))?;
    tracing::debug!(
        path,
        block = block.index,
        line = block.first_line,
        benchmark = %header.benchmark,
        "derived block"
    );

    Ok(Some(Derived {
        block: block.index,
        header,
        metrics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Benchmark;
    use crate::error::FieldError;
    use crate::metrics::{ConflictProfile, CpiProfile};

    fn conflict_block(name: &str, wb: u32) -> String {
        format!("{name},v,s,8,16\n-\n10,2,1,{wb},1,1,1,0\n10,2,1,4,1,1,1,0\n-\n")
    }

    #[test]
    fn output_is_grouped_by_benchmark_order() {
        let text = [
            conflict_block("lfqueue", 4),
            conflict_block("linkedlist", 4),
            conflict_block("unknown", 4),
            conflict_block("lfqueue", 2),
            conflict_block("hashmap", 4),
        ]
        .concat();
        let rows = run_profile(&ConflictProfile, "in.txt", &text).unwrap();
        let order: Vec<(Benchmark, usize)> =
            rows.iter().map(|d| (d.header.benchmark, d.block)).collect();
        assert_eq!(
            order,
            vec![
                (Benchmark::LinkedList, 1),
                (Benchmark::HashMap, 4),
                (Benchmark::LfQueue, 0),
                (Benchmark::LfQueue, 3),
            ]
        );
        assert_eq!(rows[3].metrics.plain.wb_rate, 0.5);
    }

    #[test]
    fn unknown_benchmark_is_not_derived() {
        // wb = 0 would fail derivation, but the block is filtered out first.
        let text = conflict_block("rbtree", 0);
        assert_eq!(run_profile(&ConflictProfile, "in.txt", &text).unwrap(), vec![]);
    }

    #[test]
    fn unknown_benchmark_data_is_still_validated() {
        let text = "rbtree,v,s,1,1\nx,y,1\nx,y,oops\nx,y,1\nx,y,1\n";
        let err = run_profile(&CpiProfile, "cpi.txt", text).unwrap_err();
        match err {
            ReportError::Parse {
                path,
                block,
                line,
                reason,
            } => {
                assert_eq!(path, "cpi.txt");
                assert_eq!(block, 0);
                assert_eq!(line, "x,y,oops");
                assert!(matches!(reason, FieldError::NotNumeric { index: 2, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_denominator_reports_block_and_header() {
        let text = [conflict_block("bstree", 4), conflict_block("bstree", 0)].concat();
        let err = run_profile(&ConflictProfile, "in.txt", &text).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        let msg = err.to_string();
        assert!(msg.contains("block 1"), "{msg}");
        assert!(msg.contains("wb_rate"), "{msg}");
        assert!(msg.contains("bstree,v,s,8,16"), "{msg}");
    }

    #[test]
    fn trailing_partial_block_produces_nothing() {
        let text = conflict_block("skiplist", 4) + "skiplist,v,s,8,16\n-\n";
        let rows = run_profile(&ConflictProfile, "in.txt", &text).unwrap();
        assert_eq!(rows.len(), 1);
    }
}

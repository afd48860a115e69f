//! Block segmentation of simulator output.
//!
//! A block is `period` consecutive lines: a header line followed by data
//! lines whose meaning is fixed by their residue (`index mod period`).

pub mod header;
pub mod reader;

pub use header::Header;
pub use reader::read_blocks;

/// One complete block, borrowing its lines from the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Block<'a> {
    /// Zero-based position of the block in the stream.
    pub index: usize,
    /// One-based line number of the header in the source file.
    pub first_line: usize,
    lines: Vec<&'a str>,
}

impl<'a> Block<'a> {
    pub fn header(&self) -> &'a str {
        self.lines[0]
    }

    /// Line at `residue`; residues are fixed by each report profile and are
    /// always below the block's period.
    pub fn line(&self, residue: usize) -> &'a str {
        self.lines[residue]
    }
}

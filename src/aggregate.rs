//! Cross-run averaging of tabular reports.
//!
//! Each run is a comma-separated table whose first row and first column are
//! labels. The average keeps run 1's labels and replaces every other cell
//! with the mean of that cell across runs.

use crate::error::{FieldError, ReportError};
use crate::field::{Fields, parse_float};
use crate::report::fmt_num;
use std::path::{Path, PathBuf};

/// One run's table, cells trimmed but not converted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMatrix {
    path: String,
    lines: Vec<String>,
    cells: Vec<Vec<String>>,
}

impl RunMatrix {
    /// Parse a table. Whitespace-only lines are skipped; every remaining
    /// row must be as wide as the first.
    pub fn parse(path: &str, text: &str) -> Result<Self, ReportError> {
        let mut lines = Vec::new();
        let mut cells: Vec<Vec<String>> = Vec::new();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let row: Vec<String> = Fields::split(line).iter().map(str::to_string).collect();
            let expected = cells.first().map_or(row.len(), Vec::len);
            if row.len() != expected {
                return Err(ReportError::parse(
                    path,
                    cells.len(),
                    line,
                    FieldError::Width {
                        expected,
                        available: row.len(),
                    },
                ));
            }
            lines.push(line.to_string());
            cells.push(row);
        }

        Ok(Self {
            path: path.to_string(),
            lines,
            cells,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.cells.len(), self.cells.first().map_or(0, Vec::len))
    }

    fn value(&self, row: usize, col: usize) -> Result<f64, ReportError> {
        parse_float(&self.cells[row][col], col)
            .map_err(|reason| ReportError::parse(&self.path, row, &self.lines[row], reason))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Label(String),
    Value(f64),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Label(s) => s.clone(),
            Cell::Value(v) => fmt_num(*v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageMatrix {
    pub rows: Vec<Vec<Cell>>,
}

impl AverageMatrix {
    /// Output lines: each cell right-aligned to 14 columns, then ` \t`.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| {
            row.iter()
                .map(|cell| format!("{:>14} \t", cell.render()))
                .collect::<String>()
        })
    }
}

/// Average `runs` cell by cell.
///
/// All runs must share run 1's shape. Row 0 and column 0 are copied from
/// run 1 unconverted.
pub fn average(runs: &[RunMatrix]) -> Result<AverageMatrix, ReportError> {
    let Some(first) = runs.first() else {
        return Ok(AverageMatrix::default());
    };
    let (rows, cols) = first.shape();

    for (i, run) in runs.iter().enumerate().skip(1) {
        let (r, c) = run.shape();
        if (r, c) != (rows, cols) {
            return Err(ReportError::ShapeMismatch {
                path: run.path.clone(),
                run: i + 1,
                rows: r,
                cols: c,
                expected_rows: rows,
                expected_cols: cols,
            });
        }
    }

    let mut out = Vec::with_capacity(rows);
    for j in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for k in 0..cols {
            if j == 0 || k == 0 {
                row.push(Cell::Label(first.cells[j][k].clone()));
                continue;
            }
            let mut values = runs
                .iter()
                .map(|run| run.value(j, k))
                .collect::<Result<Vec<f64>, _>>()?;
            // Summed in sorted order so the mean does not depend on run order.
            values.sort_by(f64::total_cmp);
            let sum: f64 = values.iter().sum();
            row.push(Cell::Value(sum / runs.len() as f64));
        }
        out.push(row);
    }

    Ok(AverageMatrix { rows: out })
}

/// `<input>/<program>-<run>/<file>`, runs numbered from 1.
pub fn run_path(input: &str, program: &str, run: usize, file: &str) -> PathBuf {
    Path::new(input)
        .join(format!("{}-{}", program, run))
        .join(file)
}

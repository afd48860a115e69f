//! Tab-separated report output.

pub mod json;
pub mod rows;

use crate::error::ReportError;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Line-oriented report sink. Lines are written in call order.
pub struct ReportWriter<W: Write> {
    out: BufWriter<W>,
    path: String,
    lines: usize,
}

impl ReportWriter<File> {
    pub fn create(path: &str) -> Result<Self, ReportError> {
        let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
        Ok(Self::new(file, path))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, path: &str) -> Self {
        Self {
            out: BufWriter::new(out),
            path: path.to_string(),
            lines: 0,
        }
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), ReportError> {
        writeln!(self.out, "{}", line).map_err(|e| ReportError::io(&self.path, e))?;
        self.lines += 1;
        Ok(())
    }

    /// Flush and hand back the sink.
    pub fn finish(self) -> Result<W, ReportError> {
        let Self { out, path, lines } = self;
        let inner = out
            .into_inner()
            .map_err(|e| ReportError::io(&path, e.into_error()))?;
        tracing::info!(path = %path, lines, "wrote report");
        Ok(inner)
    }
}

/// Shortest round-trip decimal, keeping `.0` on integral values (`25.0`).
pub fn fmt_num(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Every cell followed by a tab, trailing tab included.
pub fn tab_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for cell in cells {
        line.push_str(cell.as_ref());
        line.push('\t');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_keep_a_decimal_point() {
        assert_eq!(fmt_num(25.0), "25.0");
        assert_eq!(fmt_num(-50.0), "-50.0");
        assert_eq!(fmt_num(0.0), "0.0");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(2.0 / 12.0 * 100.0), "16.666666666666664");
    }

    #[test]
    fn tab_row_terminates_every_cell() {
        assert_eq!(tab_row(["a", "b"]), "a\tb\t");
        assert_eq!(tab_row(Vec::<String>::new()), "");
    }

    #[test]
    fn writer_emits_lines_in_order() {
        let mut w = ReportWriter::new(Vec::new(), "mem");
        w.write_line("one").unwrap();
        w.write_line("").unwrap();
        w.write_line("two").unwrap();
        let bytes = w.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "one\n\ntwo\n");
    }
}

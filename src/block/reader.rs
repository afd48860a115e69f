use crate::block::Block;

/// Role of a line inside its block, decided only by `index mod period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Residue 0: the header line.
    Start,
    /// Any data line that does not close the block.
    Interior,
    /// Residue `period - 1`: the block is complete once this line is consumed.
    End,
}

pub fn classify(index: usize, period: usize) -> LineRole {
    match index % period {
        0 => LineRole::Start,
        r if r == period - 1 => LineRole::End,
        _ => LineRole::Interior,
    }
}

/// Groups a line stream into complete blocks of `period` lines.
///
/// Lines are never inspected here; blank lines count like any other. A
/// trailing run shorter than `period` never reaches `End` and is dropped.
pub struct Blocks<'a, I> {
    lines: I,
    period: usize,
    consumed: usize,
    emitted: usize,
    pending: Vec<&'a str>,
}

impl<'a, I> Blocks<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn new(lines: I, period: usize) -> Self {
        debug_assert!(period >= 2, "a block needs a header and at least one data line");
        Self {
            lines,
            period,
            consumed: 0,
            emitted: 0,
            pending: Vec::with_capacity(period),
        }
    }
}

impl<'a, I> Iterator for Blocks<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        for line in self.lines.by_ref() {
            let role = classify(self.consumed, self.period);
            self.consumed += 1;

            if role == LineRole::Start {
                self.pending.clear();
            }
            self.pending.push(line);

            if role == LineRole::End {
                let block = Block {
                    index: self.emitted,
                    first_line: self.consumed - self.period + 1,
                    lines: std::mem::take(&mut self.pending),
                };
                self.emitted += 1;
                return Some(block);
            }
        }

        if !self.pending.is_empty() {
            tracing::debug!(
                lines = self.pending.len(),
                period = self.period,
                "ignoring trailing partial block"
            );
            self.pending.clear();
        }
        None
    }
}

/// Split `text` once into its complete blocks.
pub fn read_blocks(text: &str, period: usize) -> Vec<Block<'_>> {
    Blocks::new(text.lines(), period).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn classify_marks_start_interior_and_end() {
        let roles: Vec<LineRole> = (0..7).map(|i| classify(i, 5)).collect();
        assert_eq!(
            roles,
            vec![
                LineRole::Start,
                LineRole::Interior,
                LineRole::Interior,
                LineRole::Interior,
                LineRole::End,
                LineRole::Start,
                LineRole::Interior,
            ]
        );
    }

    #[test]
    fn blocks_carry_index_and_line_number() {
        let text = "a,1\nx\ny\nb,2\nz\nw\n";
        let blocks = read_blocks(text, 3);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].index, 1);
        assert_eq!(blocks[1].first_line, 4);
        assert_eq!(blocks[1].header(), "b,2");
        assert_eq!(blocks[1].line(2), "w");
    }

    #[test]
    fn trailing_partial_block_is_dropped() {
        let text = "a\n1\n2\n3\n4\nb\n1\n\n";
        let blocks = read_blocks(text, 5);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header(), "a");
    }

    #[test]
    fn blank_lines_occupy_a_residue() {
        let text = "h\n\n1\n";
        let blocks = read_blocks(text, 3);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].line(1), "");
        assert_eq!(blocks[0].line(2), "1");
    }

    proptest! {
        #[test]
        fn stream_of_k_periods_yields_k_blocks(
            period in 2usize..9,
            k in 0usize..20,
            extra in 0usize..8,
        ) {
            let extra = extra % period;
            let lines: Vec<String> = (0..k * period + extra).map(|i| i.to_string()).collect();
            let text = lines.join("\n");
            let blocks = read_blocks(&text, period);
            prop_assert_eq!(blocks.len(), k);
            for (i, b) in blocks.iter().enumerate() {
                prop_assert_eq!(b.index, i);
                prop_assert_eq!(b.line(period - 1), (i * period + period - 1).to_string());
                prop_assert_eq!(b.header(), (i * period).to_string());
            }
        }
    }
}

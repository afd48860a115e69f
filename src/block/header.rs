use crate::benchmark::Benchmark;
use crate::error::FieldError;
use crate::field::Fields;
use serde::Serialize;

/// Parsed header line: `name, variant, secondary, threads, extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub benchmark: Benchmark,
    pub variant: String,
    pub secondary: String,
    pub threads: i64,
    pub extra: i64,
}

impl Header {
    /// Parse a header line.
    ///
    /// Returns `Ok(None)` when the name is not one of the known benchmarks;
    /// the rest of such a header is never looked at.
    pub fn parse(line: &str) -> Result<Option<Header>, FieldError> {
        let fields = Fields::split(line);
        let Some(benchmark) = Benchmark::from_name(fields.text(0)?) else {
            return Ok(None);
        };

        Ok(Some(Header {
            benchmark,
            variant: fields.text(1)?.to_string(),
            secondary: fields.text(2)?.to_string(),
            threads: fields.int(3)?,
            extra: fields.int(4)?,
        }))
    }

    /// The five header cells as they lead every report line.
    pub fn cells(&self) -> [String; 5] {
        [
            self.benchmark.to_string(),
            self.variant.clone(),
            self.secondary.clone(),
            self.threads.to_string(),
            self.extra.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_benchmark() {
        let header = Header::parse("hashmap, 8,16 ,8,16").unwrap().unwrap();
        assert_eq!(
            header,
            Header {
                benchmark: Benchmark::HashMap,
                variant: "8".into(),
                secondary: "16".into(),
                threads: 8,
                extra: 16,
            }
        );
        assert_eq!(header.cells().join(","), "hashmap,8,16,8,16");
    }

    #[test]
    fn unknown_name_is_a_filter_miss_even_if_malformed() {
        assert_eq!(Header::parse("rbtree,x,y,not,ints"), Ok(None));
        assert_eq!(Header::parse(""), Ok(None));
    }

    #[test]
    fn known_name_with_bad_thread_count_fails() {
        let err = Header::parse("skiplist,a,b,eight,1").unwrap_err();
        assert_eq!(
            err,
            FieldError::NotNumeric {
                index: 3,
                value: "eight".into(),
                kind: "int",
            }
        );
    }

    #[test]
    fn known_name_with_short_header_fails() {
        let err = Header::parse("bstree,a,b").unwrap_err();
        assert_eq!(err, FieldError::Missing { index: 3, available: 3 });
    }
}

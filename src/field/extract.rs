use crate::error::FieldError;

/// The comma-separated fields of one line, each trimmed of surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields<'a> {
    raw: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn split(line: &'a str) -> Self {
        Self {
            raw: line.split(',').map(str::trim).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn text(&self, index: usize) -> Result<&'a str, FieldError> {
        self.raw.get(index).copied().ok_or(FieldError::Missing {
            index,
            available: self.raw.len(),
        })
    }

    pub fn int(&self, index: usize) -> Result<i64, FieldError> {
        let value = self.text(index)?;
        value.parse().map_err(|_| FieldError::NotNumeric {
            index,
            value: value.to_string(),
            kind: "int",
        })
    }

    pub fn float(&self, index: usize) -> Result<f64, FieldError> {
        parse_float(self.text(index)?, index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.raw.iter().copied()
    }
}

/// Parse a finite float. `inf` and `NaN` are rejected so they can never
/// reach a report.
pub fn parse_float(value: &str, index: usize) -> Result<f64, FieldError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FieldError::NotNumeric {
            index,
            value: value.to_string(),
            kind: "float",
        }),
    }
}

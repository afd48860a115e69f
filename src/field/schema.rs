//! Per-profile data line layouts.
//!
//! A schema names every field a profile reads and the number of fields a
//! line must carry. Extraction checks the width first, so a producer that
//! drops or reorders trailing columns fails loudly instead of shifting
//! values into the wrong role.

use crate::block::Block;
use crate::error::FieldError;
use crate::field::Fields;

/// A named float field at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub name: &'static str,
    pub index: usize,
}

pub const fn role(name: &'static str, index: usize) -> Role {
    Role { name, index }
}

/// A failed extraction, with the residue of the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFault {
    pub residue: usize,
    pub reason: FieldError,
}

#[derive(Debug, Clone, Copy)]
pub struct Schema<const N: usize> {
    /// Minimum number of comma-separated fields on a conforming line.
    pub width: usize,
    pub roles: [Role; N],
}

impl<const N: usize> Schema<N> {
    /// Extract the schema's roles from `line`, in role order.
    pub fn extract(&self, line: &str) -> Result<[f64; N], FieldError> {
        let fields = Fields::split(line);
        if fields.len() < self.width {
            return Err(FieldError::Missing {
                index: self.width - 1,
                available: fields.len(),
            });
        }

        let mut out = [0.0; N];
        for (slot, role) in out.iter_mut().zip(self.roles.iter()) {
            *slot = fields.float(role.index).inspect_err(|_| {
                tracing::debug!(role = role.name, index = role.index, "unconvertible field");
            })?;
        }
        Ok(out)
    }

    /// Extract from the line at `residue` of `block`.
    pub fn extract_line(&self, block: &Block<'_>, residue: usize) -> Result<[f64; N], LineFault> {
        self.extract(block.line(residue))
            .map_err(|reason| LineFault { residue, reason })
    }
}

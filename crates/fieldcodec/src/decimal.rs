// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-point decimal numbers.
//!
//! A [`Decimal`] is an unscaled integer plus a scale (number of fractional
//! digits). Its wire form is the unscaled integer as minimal big-endian
//! two's-complement bytes; the scale lives in the schema, not the bytes.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum number of bytes an unscaled value can occupy.
pub const MAX_DECIMAL_BYTES: usize = 16;

/// Fixed-point decimal value.
///
/// Equality is structural: `1.0` and `1.00` differ because their scales do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: i128,
    scale: u32,
}

/// Error returned when parsing a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal `{0}`")]
pub struct ParseDecimalError(String);

impl Decimal {
    /// Create a decimal from its unscaled value and scale.
    pub const fn new(unscaled: i128, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    /// Unscaled integer value.
    pub const fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// Number of fractional digits.
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Number of significant decimal digits in the unscaled value.
    pub fn precision(&self) -> usize {
        let mut digits = 1;
        let mut rest = self.unscaled.unsigned_abs() / 10;
        while rest > 0 {
            digits += 1;
            rest /= 10;
        }
        digits
    }

    /// Change the scale, rounding half away from zero when digits are dropped.
    ///
    /// Returns `None` if the result overflows.
    pub fn rescale(&self, scale: u32) -> Option<Self> {
        if scale == self.scale {
            return Some(*self);
        }

        if scale > self.scale {
            let factor = 10i128.checked_pow(scale - self.scale)?;
            let unscaled = self.unscaled.checked_mul(factor)?;
            return Some(Self { unscaled, scale });
        }

        let drop = self.scale - scale;
        let Some(factor) = 10i128.checked_pow(drop) else {
            // Dropping more digits than an i128 can hold rounds to zero.
            return Some(Self { unscaled: 0, scale });
        };
        let quotient = self.unscaled / factor;
        let remainder = (self.unscaled % factor).unsigned_abs();
        let half = factor.unsigned_abs() / 2;
        let unscaled = if remainder >= half && factor > 1 {
            if self.unscaled < 0 {
                quotient.checked_sub(1)?
            } else {
                quotient.checked_add(1)?
            }
        } else {
            quotient
        };
        Some(Self { unscaled, scale })
    }

    /// Minimal big-endian two's-complement encoding of the unscaled value.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let full = self.unscaled.to_be_bytes();
        let mut start = 0;
        while start + 1 < full.len() {
            let redundant = (full[start] == 0x00 && full[start + 1] & 0x80 == 0)
                || (full[start] == 0xFF && full[start + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        full[start..].to_vec()
    }

    /// Decode big-endian two's-complement bytes at the given scale.
    ///
    /// Returns `None` if `bytes` is longer than [`MAX_DECIMAL_BYTES`].
    /// An empty slice decodes to zero.
    pub fn from_be_bytes(bytes: &[u8], scale: u32) -> Option<Self> {
        if bytes.len() > MAX_DECIMAL_BYTES {
            return None;
        }
        let fill = match bytes.first() {
            Some(b) if b & 0x80 != 0 => 0xFF,
            _ => 0x00,
        };
        let mut buf = [fill; MAX_DECIMAL_BYTES];
        buf[MAX_DECIMAL_BYTES - bytes.len()..].copy_from_slice(bytes);
        Some(Self {
            unscaled: i128::from_be_bytes(buf),
            scale,
        })
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError(s.to_string());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len() + 1);
        if negative {
            digits.push('-');
        }
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let unscaled = digits.parse::<i128>().map_err(|_| err())?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| err())?;
        Ok(Self { unscaled, scale })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if self.unscaled < 0 {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}.{}", int_part, frac_part)
    }
}

use core::{fmt, str::FromStr};
use std::sync::LazyLock;

use compact_str::CompactString;
use regex::Regex;
use serde::Serialize;

#[allow(clippy::unwrap_used)]
static RECEIPT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Za-z]{3})([0-9]+)$").unwrap());

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReceiptError {
    #[error("receipt number must be 3 letters followed by digits, got {0:?}")]
    Malformed(String),
    #[error("receipt number {0:?} has too many digits")]
    Overflow(String),
    #[error("receipt numbers after {0} run past the largest serial")]
    Exhausted(String),
}

/// A receipt number such as `EAC1990123456`: a 3-letter office code and a
/// zero-padded serial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct ReceiptNumber {
    prefix: CompactString,
    serial: u64,
    width: usize,
}

impl ReceiptNumber {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The receipt `n` after `self`, or `None` past `u64::MAX`.
    pub fn offset(&self, n: u64) -> Option<Self> {
        Some(Self {
            prefix: self.prefix.clone(),
            serial: self.serial.checked_add(n)?,
            width: self.width,
        })
    }

    /// `self` followed by the next `count - 1` receipt numbers.
    pub fn sequence(&self, count: usize) -> Result<Vec<Self>, ReceiptError> {
        (0..count as u64)
            .map(|i| {
                self.offset(i)
                    .ok_or_else(|| ReceiptError::Exhausted(self.to_string()))
            })
            .collect()
    }
}

impl FromStr for ReceiptNumber {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let cap = RECEIPT
            .captures(s)
            .ok_or_else(|| ReceiptError::Malformed(s.to_owned()))?;
        let digits = &cap[2];
        let serial = digits
            .parse()
            .map_err(|_| ReceiptError::Overflow(s.to_owned()))?;

        Ok(Self {
            prefix: cap[1].to_ascii_uppercase().into(),
            serial,
            width: digits.len(),
        })
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.prefix, self.serial, width = self.width)
    }
}

impl From<ReceiptNumber> for String {
    fn from(value: ReceiptNumber) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_keeps_prefix_and_padding() {
        let base: ReceiptNumber = "ABC0123456789".parse().unwrap();
        let seq = base
            .sequence(4)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            seq,
            ["ABC0123456789", "ABC0123456790", "ABC0123456791", "ABC0123456792"]
        );
        assert!(seq.iter().all(|r| r.starts_with("ABC")));
    }

    #[test]
    fn sequence_grows_past_width() {
        let base: ReceiptNumber = "eac998".parse().unwrap();
        assert_eq!(base.prefix(), "EAC");
        let seq = base
            .sequence(3)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(seq, ["EAC998", "EAC999", "EAC1000"]);
        assert_eq!(base.sequence(0).unwrap().len(), 0);
    }

    #[test]
    fn sequence_stops_at_largest_serial() {
        let base: ReceiptNumber = "ABC18446744073709551614".parse().unwrap();
        let seq = base.sequence(2).unwrap();
        assert_eq!(seq[1].to_string(), "ABC18446744073709551615");
        assert_eq!(
            base.sequence(4),
            Err(ReceiptError::Exhausted("ABC18446744073709551614".to_owned()))
        );
        assert_eq!(base.offset(2), None);
    }

    #[test]
    fn only_ascii_digits() {
        assert_eq!(
            "ABC١٢".parse::<ReceiptNumber>(),
            Err(ReceiptError::Malformed("ABC١٢".to_owned()))
        );
    }

    #[test]
    fn rejects_bad_shapes() {
        for bad in ["", "AB0123", "ABCD", "ABC12x", "1230123456789"] {
            assert_eq!(
                bad.parse::<ReceiptNumber>(),
                Err(ReceiptError::Malformed(bad.to_owned())),
            );
        }
        assert!(matches!(
            "ABC123456789012345678901".parse::<ReceiptNumber>(),
            Err(ReceiptError::Overflow(_))
        ));
    }
}

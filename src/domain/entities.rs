//! Domain entities: symbols, codes and code tables

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Input unit of the alphabet together with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol<S> {
    pub value: S,
    pub frequency: u64,
}

impl<S> Symbol<S> {
    pub fn new(value: S, frequency: u64) -> Self {
        Self { value, frequency }
    }
}

impl<S> From<(S, u64)> for Symbol<S> {
    fn from((value, frequency): (S, u64)) -> Self {
        Self::new(value, frequency)
    }
}

/// How an alphabet with exactly one symbol is handled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SingleSymbolPolicy {
    /// The lone symbol gets the one-digit code `0`
    #[default]
    OneDigit,
    /// A single-symbol alphabet is rejected as invalid input
    Reject,
}

impl FromStr for SingleSymbolPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one-digit" | "one_digit" => Ok(Self::OneDigit),
            "reject" => Ok(Self::Reject),
            other => Err(DomainError::InvalidInput(format!(
                "unknown single symbol policy: {other}"
            ))),
        }
    }
}

impl fmt::Display for SingleSymbolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneDigit => write!(f, "one-digit"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Root-to-leaf path: `false` is a left edge (0), `true` a right edge (1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(DomainError::InvalidInput(format!(
                    "invalid code digit {other:?} in {s:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Code)
    }
}

/// One emitted `(symbol, code)` pair, with the leaf weight it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry<S> {
    pub symbol: S,
    pub weight: u64,
    pub code: Code,
}

/// Code assignments in emission order (left-to-right leaf order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    entries: Vec<CodeEntry<S>>,
}

impl<S> Default for CodeTable<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> CodeTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: CodeEntry<S>) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeEntry<S>> {
        self.entries.iter()
    }

    /// Sum of `weight * code length` over all entries.
    pub fn weighted_length(&self) -> u128 {
        self.entries
            .iter()
            .map(|e| u128::from(e.weight) * e.code.len() as u128)
            .sum()
    }

    /// Expected code length in bits per symbol occurrence.
    ///
    /// Returns 0.0 when the total weight is zero.
    pub fn average_length(&self) -> f64 {
        let total: u128 = self.entries.iter().map(|e| u128::from(e.weight)).sum();
        if total == 0 {
            return 0.0;
        }
        self.weighted_length() as f64 / total as f64
    }

    pub fn max_length(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.code.len())
            .max()
            .unwrap_or(0)
    }

    /// Checks that no code is a prefix of another (equal codes count as prefixes).
    pub fn is_prefix_free(&self) -> bool {
        self.entries
            .iter()
            .tuple_combinations()
            .all(|(a, b)| !a.code.is_prefix_of(&b.code) && !b.code.is_prefix_of(&a.code))
    }
}

impl<S: PartialEq> CodeTable<S> {
    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.entries
            .iter()
            .find(|e| &e.symbol == symbol)
            .map(|e| &e.code)
    }
}

impl<S> IntoIterator for CodeTable<S> {
    type Item = CodeEntry<S>;
    type IntoIter = std::vec::IntoIter<CodeEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a CodeTable<S> {
    type Item = &'a CodeEntry<S>;
    type IntoIter = std::slice::Iter<'a, CodeEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: char, weight: u64, code: &str) -> CodeEntry<char> {
        CodeEntry {
            symbol,
            weight,
            code: code.parse().unwrap(),
        }
    }

    #[test]
    fn given_digit_string_when_parsing_code_then_roundtrips_display() {
        let code: Code = "01101".parse().unwrap();
        assert_eq!(code.len(), 5);
        assert_eq!(code.to_string(), "01101");
    }

    #[test]
    fn given_non_binary_digit_when_parsing_code_then_errors() {
        let result = "0120".parse::<Code>();
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn given_codes_when_checking_prefix_then_detects_relation() {
        let short: Code = "10".parse().unwrap();
        let long: Code = "101".parse().unwrap();
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(Code::new().is_prefix_of(&short));
    }

    #[test]
    fn given_prefix_collision_when_checking_table_then_not_prefix_free() {
        let mut table = CodeTable::new();
        table.push(entry('a', 1, "0"));
        table.push(entry('b', 1, "01"));
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn given_table_when_measuring_then_reports_weighted_and_average_length() {
        let mut table = CodeTable::new();
        table.push(entry('a', 3, "0"));
        table.push(entry('b', 1, "10"));
        table.push(entry('c', 0, "11"));
        assert!(table.is_prefix_free());
        assert_eq!(table.weighted_length(), 5);
        assert!((table.average_length() - 1.25).abs() < f64::EPSILON);
        assert_eq!(table.max_length(), 2);
        assert_eq!(table.get(&'b').map(ToString::to_string), Some("10".into()));
        assert_eq!(table.get(&'z'), None);
    }

    #[test]
    fn given_policy_names_when_parsing_then_accepts_known_values() {
        assert_eq!(
            "one-digit".parse::<SingleSymbolPolicy>().unwrap(),
            SingleSymbolPolicy::OneDigit
        );
        assert_eq!(
            "Reject".parse::<SingleSymbolPolicy>().unwrap(),
            SingleSymbolPolicy::Reject
        );
        assert!("sometimes".parse::<SingleSymbolPolicy>().is_err());
    }
}

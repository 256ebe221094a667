//! Alphabet preparation: argument parsing, character counting and sorting.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Symbol;

/// Parse `SYMBOL:FREQ` arguments into an alphabet, keeping argument order.
///
/// The split happens at the last `:` so `::3` is the symbol `:`.
/// Whitespace symbols are written as `\s`, `\t` or `\n`.
pub fn parse_pairs(args: &[String]) -> ApplicationResult<Vec<Symbol<String>>> {
    args.iter().map(|arg| parse_pair(arg)).collect()
}

fn parse_pair(arg: &str) -> ApplicationResult<Symbol<String>> {
    let parse_err = |reason: &str| ApplicationError::Parse {
        input: arg.to_string(),
        reason: reason.to_string(),
    };

    let (symbol, frequency) = arg
        .rsplit_once(':')
        .ok_or_else(|| parse_err("expected SYMBOL:FREQ"))?;
    if symbol.is_empty() {
        return Err(parse_err("empty symbol"));
    }
    let frequency = frequency
        .trim()
        .parse::<u64>()
        .map_err(|e| parse_err(&format!("frequency: {e}")))?;

    Ok(Symbol::new(unescape(symbol), frequency))
}

fn unescape(symbol: &str) -> String {
    match symbol {
        "\\s" => " ".to_string(),
        "\\t" => "\t".to_string(),
        "\\n" => "\n".to_string(),
        other => other.to_string(),
    }
}

/// Count character occurrences of `text`, sorted ascending by frequency.
///
/// Characters with equal counts keep code point order.
pub fn count_chars(text: &str) -> Vec<Symbol<String>> {
    let mut counts: BTreeMap<char, u64> = BTreeMap::new();
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    debug!(distinct = counts.len(), "counted characters");

    let symbols = counts
        .into_iter()
        .map(|(c, n)| Symbol::new(c.to_string(), n))
        .collect();
    sort_by_frequency(symbols)
}

/// Stable ascending sort by frequency.
pub fn sort_by_frequency<S: Send>(mut symbols: Vec<Symbol<S>>) -> Vec<Symbol<S>> {
    symbols.par_sort_by_key(|s| s.frequency);
    symbols
}

/// True if frequencies are non-decreasing.
pub fn is_sorted_by_frequency<S>(symbols: &[Symbol<S>]) -> bool {
    symbols.windows(2).all(|w| w[0].frequency <= w[1].frequency)
}

/// The six-symbol textbook alphabet.
pub fn demo_alphabet() -> Vec<Symbol<String>> {
    [("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)]
        .into_iter()
        .map(|(s, f)| Symbol::new(s.to_string(), f))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_pairs_when_parsing_then_keeps_order() {
        let args = vec!["x:3".to_string(), "y:1".to_string()];
        let symbols = parse_pairs(&args).unwrap();
        assert_eq!(
            symbols,
            vec![Symbol::new("x".to_string(), 3), Symbol::new("y".to_string(), 1)]
        );
    }

    #[test]
    fn given_escaped_whitespace_when_parsing_then_unescapes() {
        let args = vec!["\\s:4".to_string(), "\\n:2".to_string(), "::1".to_string()];
        let symbols = parse_pairs(&args).unwrap();
        assert_eq!(symbols[0].value, " ");
        assert_eq!(symbols[1].value, "\n");
        assert_eq!(symbols[2].value, ":");
    }

    #[test]
    fn given_malformed_pair_when_parsing_then_errors() {
        for bad in ["abc", ":5", "a:", "a:-1", "a:x"] {
            let result = parse_pairs(&[bad.to_string()]);
            assert!(
                matches!(result, Err(ApplicationError::Parse { .. })),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn given_text_when_counting_then_sorted_with_stable_ties() {
        let symbols = count_chars("abracadabra");
        let rendered: Vec<(String, u64)> = symbols
            .into_iter()
            .map(|s| (s.value, s.frequency))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("c".to_string(), 1),
                ("d".to_string(), 1),
                ("b".to_string(), 2),
                ("r".to_string(), 2),
                ("a".to_string(), 5),
            ]
        );
    }

    #[test]
    fn given_unsorted_alphabet_when_sorting_then_ascending_and_stable() {
        let symbols = vec![
            Symbol::new('z', 3),
            Symbol::new('y', 1),
            Symbol::new('x', 3),
            Symbol::new('w', 1),
        ];
        assert!(!is_sorted_by_frequency(&symbols));
        let sorted = sort_by_frequency(symbols);
        assert!(is_sorted_by_frequency(&sorted));
        let order: Vec<char> = sorted.iter().map(|s| s.value).collect();
        assert_eq!(order, vec!['y', 'w', 'z', 'x']);
    }
}

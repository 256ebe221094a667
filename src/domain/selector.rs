//! Two-queue minimum selection for linear-time Huffman construction.
//!
//! Leaves enter pre-sorted and merged nodes are produced in non-decreasing
//! weight order, so the global minimum is always at the front of one of the
//! two queues.

use std::collections::VecDeque;

use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// A pending node handle together with the weight it is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending<T> {
    pub item: T,
    pub weight: u64,
}

/// Minimum-weight extraction over a leaf queue and a merged-node queue.
#[derive(Debug)]
pub struct PrioritySelector<T> {
    leaves: VecDeque<Pending<T>>,
    merged: VecDeque<Pending<T>>,
    leaf_capacity: usize,
    merged_capacity: usize,
}

impl<T> PrioritySelector<T> {
    /// Selector sized for an alphabet of `symbols` entries: `symbols` leaves
    /// and at most `symbols - 1` merged nodes.
    pub fn with_capacity(symbols: usize) -> Self {
        let merged_capacity = symbols.saturating_sub(1);
        Self {
            leaves: VecDeque::with_capacity(symbols),
            merged: VecDeque::with_capacity(merged_capacity),
            leaf_capacity: symbols,
            merged_capacity,
        }
    }

    pub fn push_leaf(&mut self, item: T, weight: u64) -> DomainResult<()> {
        if self.leaves.len() >= self.leaf_capacity {
            return Err(DomainError::CapacityExceeded {
                queue: "leaf",
                capacity: self.leaf_capacity,
            });
        }
        self.leaves.push_back(Pending { item, weight });
        Ok(())
    }

    pub fn push_merged(&mut self, item: T, weight: u64) -> DomainResult<()> {
        if self.merged.len() >= self.merged_capacity {
            return Err(DomainError::CapacityExceeded {
                queue: "merged",
                capacity: self.merged_capacity,
            });
        }
        self.merged.push_back(Pending { item, weight });
        Ok(())
    }

    /// Removes the lowest-weight pending entry.
    ///
    /// On equal weights the leaf queue wins.
    pub fn extract_min(&mut self) -> DomainResult<Pending<T>> {
        let from_leaves = match (self.leaves.front(), self.merged.front()) {
            (None, None) => return Err(DomainError::Underflow),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(leaf), Some(merged)) => leaf.weight <= merged.weight,
        };
        let (queue, source) = if from_leaves {
            (&mut self.leaves, "leaf")
        } else {
            (&mut self.merged, "merged")
        };
        let pending = queue.pop_front().ok_or(DomainError::Underflow)?;
        trace!(weight = pending.weight, source, "extract_min");
        Ok(pending)
    }

    /// True once only the root is left: no leaves and exactly one merged node.
    pub fn is_settled(&self) -> bool {
        self.leaves.is_empty() && self.merged.len() == 1
    }

    pub fn len(&self) -> usize {
        self.leaves.len() + self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.merged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_only_leaves_when_extracting_then_returns_in_queue_order() {
        let mut selector = PrioritySelector::with_capacity(3);
        selector.push_leaf('a', 1).unwrap();
        selector.push_leaf('b', 2).unwrap();
        selector.push_leaf('c', 3).unwrap();

        let order: Vec<char> = (0..3).map(|_| selector.extract_min().unwrap().item).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
        assert!(selector.is_empty());
    }

    #[test]
    fn given_smaller_merged_front_when_extracting_then_takes_merged() {
        let mut selector = PrioritySelector::with_capacity(3);
        selector.push_leaf('a', 5).unwrap();
        selector.push_merged('m', 4).unwrap();

        assert_eq!(selector.extract_min().unwrap(), Pending { item: 'm', weight: 4 });
        assert_eq!(selector.extract_min().unwrap(), Pending { item: 'a', weight: 5 });
    }

    #[test]
    fn given_equal_fronts_when_extracting_then_leaf_wins() {
        let mut selector = PrioritySelector::with_capacity(3);
        selector.push_leaf('l', 7).unwrap();
        selector.push_merged('m', 7).unwrap();

        assert_eq!(selector.extract_min().unwrap().item, 'l');
        assert_eq!(selector.extract_min().unwrap().item, 'm');
    }

    #[test]
    fn given_empty_selector_when_extracting_then_underflows() {
        let mut selector: PrioritySelector<char> = PrioritySelector::with_capacity(2);
        assert_eq!(selector.extract_min(), Err(DomainError::Underflow));
    }

    #[test]
    fn given_full_queues_when_pushing_then_capacity_exceeded() {
        let mut selector = PrioritySelector::with_capacity(2);
        selector.push_leaf('a', 1).unwrap();
        selector.push_leaf('b', 1).unwrap();
        assert_eq!(
            selector.push_leaf('c', 1),
            Err(DomainError::CapacityExceeded {
                queue: "leaf",
                capacity: 2
            })
        );

        selector.push_merged('m', 2).unwrap();
        assert_eq!(
            selector.push_merged('n', 2),
            Err(DomainError::CapacityExceeded {
                queue: "merged",
                capacity: 1
            })
        );
    }

    #[test]
    fn given_single_merged_node_when_checking_then_settled() {
        let mut selector = PrioritySelector::with_capacity(2);
        selector.push_leaf('a', 1).unwrap();
        assert!(!selector.is_settled());
        selector.extract_min().unwrap();
        selector.push_merged('r', 1).unwrap();
        assert!(selector.is_settled());
        assert_eq!(selector.len(), 1);
    }
}

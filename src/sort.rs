//! Stable comparison sorts over a caller-supplied key.
//!
//! Two interchangeable strategies:
//!
//! - [`BubbleSort`]: O(n²) adjacent swaps, stopping after the first pass without a swap.
//! - [`MergeSort`]: O(n log n) top-down merge sort with O(n) extra space.
//!
//! Both are stable, in both directions, and produce identical output for the same input and
//! key function. `reverse` flips the comparison predicate; the output is never reversed
//! afterwards, so equal keys keep their input order in descending sorts too.
//!
//! The key function is called exactly once per element, before any comparison. Inputs with
//! fewer than two elements are returned as-is, without calling it. Keys only need
//! [`PartialOrd`]: tuples compare lexicographically, which is how secondary orderings are
//! expressed. With incomparable keys (such as `NaN`) the resulting order is unspecified, but
//! the output is still a permutation of the input.
//!
//! ```rust
//! use recipe_rs::sort::{BubbleSort, MergeSort, SortingAlgorithm};
//!
//! let items = [("b", 2), ("a", 1), ("c", 2), ("d", 0)];
//! let by_num = |x: &(&str, i32)| x.1;
//! let merged = MergeSort.sort_by_key(&items, by_num, false);
//! assert_eq!(merged, [("d", 0), ("a", 1), ("b", 2), ("c", 2)]);
//! assert_eq!(BubbleSort.sort_by_key(&items, by_num, false), merged);
//! ```

use std::fmt;

/// Work done by one sort.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SortStats {
    /// Key comparisons.
    pub comparisons: usize,
    /// Adjacent swaps (bubble sort) or element placements during merges (merge sort).
    pub moves: usize,
}

pub trait SortingAlgorithm {
    fn name(&self) -> &'static str;

    /// Orders pre-computed `(key, item)` pairs.
    fn sort_keyed<K: PartialOrd, T>(&self, keyed: Vec<(K, T)>, reverse: bool, stats: &mut SortStats) -> Vec<(K, T)>;

    /// Returns a sorted copy of `items`, ordered by `key`.
    fn sort_by_key<T, K, F>(&self, items: &[T], key: F, reverse: bool) -> Vec<T>
    where
        T: Clone,
        K: PartialOrd,
        F: FnMut(&T) -> K,
    {
        self.sort_by_key_with_stats(items, key, reverse).0
    }

    /// Like [`sort_by_key`][SortingAlgorithm::sort_by_key], also reporting the work done.
    fn sort_by_key_with_stats<T, K, F>(&self, items: &[T], mut key: F, reverse: bool) -> (Vec<T>, SortStats)
    where
        T: Clone,
        K: PartialOrd,
        F: FnMut(&T) -> K,
    {
        let mut stats = SortStats::default();
        if items.len() < 2 {
            return (items.to_vec(), stats);
        }
        let keyed = items.iter().map(|x| (key(x), x.clone())).collect();
        let sorted = self.sort_keyed(keyed, reverse, &mut stats);
        (sorted.into_iter().map(|(_, x)| x).collect(), stats)
    }

    /// Sorts with a fallible key function.
    ///
    /// The first key error is returned unchanged, and no partial result is produced.
    fn try_sort_by_key<T, K, E, F>(&self, items: &[T], mut key: F, reverse: bool) -> Result<Vec<T>, E>
    where
        T: Clone,
        K: PartialOrd,
        F: FnMut(&T) -> Result<K, E>,
    {
        if items.len() < 2 {
            return Ok(items.to_vec());
        }
        let keyed = items
            .iter()
            .map(|x| key(x).map(|k| (k, x.clone())))
            .collect::<Result<Vec<_>, E>>()?;
        let sorted = self.sort_keyed(keyed, reverse, &mut SortStats::default());
        Ok(sorted.into_iter().map(|(_, x)| x).collect())
    }

    /// Sorts by the items themselves (identity key).
    fn sort<T>(&self, items: &[T], reverse: bool) -> Vec<T>
    where
        T: Clone + PartialOrd,
    {
        self.sort_by_key(items, T::clone, reverse)
    }
}

/// Whether `a` must come after `b` in the requested direction.
#[inline]
fn after<K: PartialOrd>(a: &K, b: &K, reverse: bool) -> bool {
    if reverse {
        a < b
    } else {
        a > b
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct BubbleSort;

impl SortingAlgorithm for BubbleSort {
    fn name(&self) -> &'static str {
        "BubbleSort"
    }

    fn sort_keyed<K: PartialOrd, T>(&self, keyed: Vec<(K, T)>, reverse: bool, stats: &mut SortStats) -> Vec<(K, T)> {
        let mut arr = keyed;
        let n = arr.len();
        if n < 2 {
            return arr;
        }

        for i in 0..n {
            let mut swapped = false;
            for j in 0..n - i - 1 {
                stats.comparisons += 1;
                if after(&arr[j].0, &arr[j + 1].0, reverse) {
                    arr.swap(j, j + 1);
                    stats.moves += 1;
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }

        arr
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct MergeSort;

impl MergeSort {
    fn merge<K: PartialOrd, T>(
        left: Vec<(K, T)>,
        right: Vec<(K, T)>,
        reverse: bool,
        stats: &mut SortStats,
    ) -> Vec<(K, T)> {
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let mut left = left.into_iter().peekable();
        let mut right = right.into_iter().peekable();

        while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
            stats.comparisons += 1;
            // Ties go to the left half.
            let take_left = !after(&l.0, &r.0, reverse) && !incomparable(&l.0, &r.0);
            let next = if take_left { left.next() } else { right.next() };
            merged.extend(next);
            stats.moves += 1;
        }

        stats.moves += left.len() + right.len();
        merged.extend(left);
        merged.extend(right);
        merged
    }
}

/// `NaN`-like keys: neither ordered nor equal.
#[inline]
fn incomparable<K: PartialOrd>(a: &K, b: &K) -> bool {
    a.partial_cmp(b).is_none()
}

impl SortingAlgorithm for MergeSort {
    fn name(&self) -> &'static str {
        "MergeSort"
    }

    fn sort_keyed<K: PartialOrd, T>(&self, keyed: Vec<(K, T)>, reverse: bool, stats: &mut SortStats) -> Vec<(K, T)> {
        let mut left = keyed;
        if left.len() < 2 {
            return left;
        }
        let mid = left.len() / 2;
        let right = left.split_off(mid);
        let left = self.sort_keyed(left, reverse, stats);
        let right = self.sort_keyed(right, reverse, stats);
        Self::merge(left, right, reverse, stats)
    }
}

/// Runtime choice between the two strategies.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum SortAlgorithm {
    Bubble,
    #[default]
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 2] = [SortAlgorithm::Bubble, SortAlgorithm::Merge];
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SortingAlgorithm for SortAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => BubbleSort.name(),
            SortAlgorithm::Merge => MergeSort.name(),
        }
    }

    fn sort_keyed<K: PartialOrd, T>(&self, keyed: Vec<(K, T)>, reverse: bool, stats: &mut SortStats) -> Vec<(K, T)> {
        match self {
            SortAlgorithm::Bubble => BubbleSort.sort_keyed(keyed, reverse, stats),
            SortAlgorithm::Merge => MergeSort.sort_keyed(keyed, reverse, stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        label: &'static str,
        price: f64,
        healthy: bool,
    }

    fn item(label: &'static str, price: f64, healthy: bool) -> Item {
        Item { label, price, healthy }
    }

    fn labels(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|i| i.label).collect()
    }

    #[test]
    fn test_sort_identity_key() {
        let xs = [5, 3, 8, 1, 9, 2];
        for algo in SortAlgorithm::ALL {
            assert_eq!(algo.sort(&xs, false), vec![1, 2, 3, 5, 8, 9]);
            assert_eq!(algo.sort(&xs, true), vec![9, 8, 5, 3, 2, 1]);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let xs = vec![3, 1, 2];
        let sorted = BubbleSort.sort(&xs, false);
        assert_eq!(xs, vec![3, 1, 2]);
        assert_eq!(sorted, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: [i32; 0] = [];
        assert!(BubbleSort.sort(&empty, false).is_empty());
        assert_eq!(MergeSort.sort(&[42], false), vec![42]);
    }

    #[test]
    fn test_small_inputs_skip_key_calls() {
        let calls = Cell::new(0);
        let key = |x: &i32| {
            calls.set(calls.get() + 1);
            *x
        };
        let (out, stats) = MergeSort.sort_by_key_with_stats(&[7], key, false);
        assert_eq!(out, vec![7]);
        assert_eq!(calls.get(), 0);
        assert_eq!(stats, SortStats::default());
    }

    #[test]
    fn test_key_called_once_per_element() {
        let calls = Cell::new(0);
        let key = |x: &i32| {
            calls.set(calls.get() + 1);
            -*x
        };
        let out = BubbleSort.sort_by_key(&[1, 2, 3, 4, 5], key, false);
        assert_eq!(out, vec![5, 4, 3, 2, 1]);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_stable_ascending() {
        let items = [
            item("a", 4.0, true),
            item("b", 3.0, false),
            item("c", 4.0, false),
            item("d", 3.0, true),
        ];
        for algo in SortAlgorithm::ALL {
            let sorted = algo.sort_by_key(&items, |i| i.price, false);
            assert_eq!(labels(&sorted), vec!["b", "d", "a", "c"], "{}", algo);
        }
    }

    #[test]
    fn test_stable_descending() {
        let items = [
            item("a", 4.0, true),
            item("b", 3.0, false),
            item("c", 4.0, false),
            item("d", 3.0, true),
        ];
        for algo in SortAlgorithm::ALL {
            let sorted = algo.sort_by_key(&items, |i| i.price, true);
            assert_eq!(labels(&sorted), vec!["a", "c", "b", "d"], "{}", algo);
        }
    }

    #[test]
    fn test_tuple_key_secondary_ordering() {
        let items = [
            item("Healthy Tie", 4.0, true),
            item("Less Healthy", 4.0, false),
            item("Different Price", 3.0, false),
        ];
        let key = |i: &Item| (i.price, if i.healthy { 0 } else { 1 });
        for algo in SortAlgorithm::ALL {
            let sorted = algo.sort_by_key(&items, key, false);
            assert_eq!(
                labels(&sorted),
                vec!["Different Price", "Healthy Tie", "Less Healthy"],
                "{}",
                algo
            );
        }
    }

    #[test]
    fn test_bubble_early_exit_on_sorted_input() {
        let xs: Vec<i32> = (0..10).collect();
        let (out, stats) = BubbleSort.sort_by_key_with_stats(&xs, |x| *x, false);
        assert_eq!(out, xs);
        assert_eq!(stats.comparisons, 9);
        assert_eq!(stats.moves, 0);
    }

    #[test]
    fn test_bubble_worst_case_comparisons() {
        let xs: Vec<i32> = (0..10).rev().collect();
        let (_, stats) = BubbleSort.sort_by_key_with_stats(&xs, |x| *x, false);
        assert_eq!(stats.moves, 45);
        assert_eq!(stats.comparisons, 45);
    }

    #[test]
    fn test_merge_comparisons_bounded() {
        let xs: Vec<i32> = (0..64).rev().collect();
        let (out, stats) = MergeSort.sort_by_key_with_stats(&xs, |x| *x, false);
        assert_eq!(out, (0..64).collect::<Vec<_>>());
        // n log2 n = 384
        assert!(stats.comparisons <= 384);
    }

    #[test]
    fn test_try_sort_propagates_key_error() {
        let xs = ["3", "1", "x", "2"];
        let res = MergeSort.try_sort_by_key(&xs, |s| s.parse::<i32>(), false);
        assert!(res.is_err());

        let ok = BubbleSort.try_sort_by_key(&["3", "1", "2"], |s| s.parse::<i32>(), false);
        assert_eq!(ok.unwrap(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_nan_keys_keep_all_elements() {
        let xs = [2.0, f64::NAN, 1.0, 3.0, f64::NAN];
        for algo in SortAlgorithm::ALL {
            let sorted = algo.sort(&xs, false);
            assert_eq!(sorted.len(), xs.len());
            assert_eq!(sorted.iter().filter(|x| x.is_nan()).count(), 2);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(SortAlgorithm::Bubble.to_string(), "BubbleSort");
        assert_eq!(SortAlgorithm::Merge.name(), "MergeSort");
    }
}

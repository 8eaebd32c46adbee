// THEORY:
// Three classic comparison sorts behind one trait. Each algorithm is a
// zero-sized strategy value; the data is always a caller-owned slice sorted in
// place, and the ordering is always an explicit comparison closure so the same
// code sorts numbers, strings and `Primitive`s alike.
//
// - `QuickSort`: last element as pivot, two inward scans swapping out-of-place
//   pairs, then recursion on the smaller side and a loop over the larger.
//   O(n log n) average, O(n^2) worst case, O(log n) stack either way.
// - `MergeSort`: top-down halving with a stable merge. Needs `Clone` for the
//   merge buffer.
// - `HeapSort`: builds a max-heap, then repeatedly moves the root behind the
//   shrinking heap. The result is ascending.

use std::cmp::Ordering;

/// A sorting strategy over slices of `T`.
pub trait Sorter<T> {
    /// Sorts `items` in ascending order according to `compare`.
    fn sort_by<F>(&self, items: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;

    /// Sorts `items` in their natural order.
    fn sort(&self, items: &mut [T])
    where
        T: Ord,
    {
        self.sort_by(items, T::cmp);
    }
}

/// True when no adjacent pair is out of order.
pub fn is_sorted_by<T, F>(items: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl QuickSort {
    // Recurses into the smaller side and loops on the larger one, so the stack
    // stays O(log n) deep even when every pivot is an extreme.
    fn step<T, F>(mut items: &mut [T], compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        while items.len() >= 2 {
            let split = Self::partition(items, compare);
            let (lower, upper) = std::mem::take(&mut items).split_at_mut(split);
            let upper = &mut upper[1..];
            if lower.len() < upper.len() {
                Self::step(lower, compare);
                items = upper;
            } else {
                Self::step(upper, compare);
                items = lower;
            }
        }
    }

    /// Moves the last element to its final position and returns that index.
    fn partition<T, F>(items: &mut [T], compare: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let pivot = items.len() - 1;
        let mut left = 0usize;
        // One past the right scan position, so it can reach "before 0".
        let mut right = pivot;

        while left < right {
            while left < right && compare(&items[left], &items[pivot]) != Ordering::Greater {
                left += 1;
            }
            while left < right && compare(&items[right - 1], &items[pivot]) != Ordering::Less {
                right -= 1;
            }
            if left + 1 < right {
                items.swap(left, right - 1);
            }
        }
        items.swap(left, pivot);
        left
    }
}

impl<T> Sorter<T> for QuickSort {
    fn sort_by<F>(&self, items: &mut [T], mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        Self::step(items, &mut compare);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl MergeSort {
    fn step<T: Clone, F>(items: &mut [T], compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if items.len() < 2 {
            return;
        }
        let mid = items.len() / 2;
        Self::step(&mut items[..mid], compare);
        Self::step(&mut items[mid..], compare);

        let (a, b) = items.split_at(mid);
        let mut merged = Vec::with_capacity(items.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            // ties take from the left half, keeping the sort stable
            if compare(&a[i], &b[j]) != Ordering::Greater {
                merged.push(a[i].clone());
                i += 1;
            } else {
                merged.push(b[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        items.clone_from_slice(&merged);
    }
}

impl<T: Clone> Sorter<T> for MergeSort {
    fn sort_by<F>(&self, items: &mut [T], mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        Self::step(items, &mut compare);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSort;

impl HeapSort {
    fn heapify<T, F>(items: &mut [T], size: usize, mut pos: usize, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        loop {
            let mut max = pos;
            let (l, r) = (2 * pos + 1, 2 * pos + 2);
            if l < size && compare(&items[l], &items[max]) == Ordering::Greater {
                max = l;
            }
            if r < size && compare(&items[r], &items[max]) == Ordering::Greater {
                max = r;
            }
            if max == pos {
                return;
            }
            items.swap(max, pos);
            pos = max;
        }
    }
}

impl<T> Sorter<T> for HeapSort {
    fn sort_by<F>(&self, items: &mut [T], mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = items.len();
        if len < 2 {
            return;
        }
        for i in (0..len / 2).rev() {
            Self::heapify(items, len, i, &mut compare);
        }
        for end in (1..len).rev() {
            items.swap(0, end);
            Self::heapify(items, end, 0, &mut compare);
        }
    }
}

/// Runtime choice of sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    #[default]
    Quick,
    Merge,
    Heap,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [SortAlgorithm::Quick, SortAlgorithm::Merge, SortAlgorithm::Heap];
}

impl<T: Clone> Sorter<T> for SortAlgorithm {
    fn sort_by<F>(&self, items: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            SortAlgorithm::Quick => QuickSort.sort_by(items, compare),
            SortAlgorithm::Merge => MergeSort.sort_by(items, compare),
            SortAlgorithm::Heap => HeapSort.sort_by(items, compare),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn small_array_sorts_with_every_algorithm() {
        for algorithm in SortAlgorithm::ALL {
            let mut items = [5, 3, 4, 1, 2];
            algorithm.sort(&mut items);
            assert_eq!(items, [1, 2, 3, 4, 5], "{:?}", algorithm);
        }
    }

    #[test]
    fn algorithms_agree_on_random_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<i32> = (0..257).map(|_| rng.gen_range(-50..50)).collect();
        let mut expected = input.clone();
        expected.sort();
        for algorithm in SortAlgorithm::ALL {
            let mut items = input.clone();
            algorithm.sort(&mut items);
            assert!(is_sorted_by(&items, i32::cmp));
            assert_eq!(items, expected, "{:?}", algorithm);
        }
    }

    #[test]
    fn edge_lengths() {
        for algorithm in SortAlgorithm::ALL {
            let mut empty: [u8; 0] = [];
            algorithm.sort(&mut empty);
            let mut one = [9];
            algorithm.sort(&mut one);
            assert_eq!(one, [9]);
            let mut pair = [2, 1];
            algorithm.sort(&mut pair);
            assert_eq!(pair, [1, 2]);
            let mut same = [4, 4, 4, 4];
            algorithm.sort(&mut same);
            assert_eq!(same, [4, 4, 4, 4]);
        }
    }

    #[test]
    fn descending_with_a_custom_comparator() {
        let mut words = vec!["pear", "apple", "fig", "kiwi"];
        HeapSort.sort_by(&mut words, |a, b| b.cmp(a));
        assert_eq!(words, ["pear", "kiwi", "fig", "apple"]);
    }

    #[test]
    fn quick_sort_survives_presorted_input() {
        let mut ascending: Vec<u32> = (0..40_000).collect();
        QuickSort.sort(&mut ascending);
        assert!(ascending.iter().copied().eq(0..40_000u32));

        let mut flat = vec![7u8; 20_000];
        QuickSort.sort(&mut flat);
        assert!(flat.iter().all(|&x| x == 7));

        let mut descending: Vec<i64> = (0..20_000).rev().collect();
        QuickSort.sort(&mut descending);
        assert!(is_sorted_by(&descending, i64::cmp));
    }

    #[test]
    fn merge_sort_is_stable() {
        let mut pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        MergeSort.sort_by(&mut pairs, |x, y| x.0.cmp(&y.0));
        assert_eq!(pairs, [(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }
}

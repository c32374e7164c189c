use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<K> {
    pub key: K,
    pub count: u64,
}

/// How a histogram orders its buckets. Each statistic picks its own.
#[derive(Clone, Copy)]
pub enum SortOrder<K> {
    KeyAscending,
    KeyDescending,
    By(fn(&Bucket<K>, &Bucket<K>) -> Ordering),
}

/// Ordered `(key, count)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<K> {
    buckets: Vec<Bucket<K>>,
}

impl<K: Ord + Clone> Histogram<K> {
    /// Counts one per item; items mapped to `None` are filtered out.
    pub fn count_by<T, I, F>(items: I, mut key: F, order: SortOrder<K>) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Option<K>,
    {
        Self::sum_by(items, |item| key(item).map(|k| (k, 1)), order)
    }

    /// Sums a per-item weight into each key; items mapped to `None` are filtered out.
    pub fn sum_by<T, I, F>(items: I, mut weighted_key: F, order: SortOrder<K>) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Option<(K, u64)>,
    {
        let mut totals: BTreeMap<K, u64> = BTreeMap::new();

        for item in items {
            if let Some((key, weight)) = weighted_key(item) {
                *totals.entry(key).or_insert(0) += weight;
            }
        }

        let buckets = totals
            .into_iter()
            .map(|(key, count)| Bucket { key, count })
            .collect();

        let mut histogram = Self { buckets };
        histogram.sort(order);
        histogram
    }

    fn sort(&mut self, order: SortOrder<K>) {
        match order {
            SortOrder::KeyAscending => self.buckets.sort_by(|a, b| a.key.cmp(&b.key)),
            SortOrder::KeyDescending => self.buckets.sort_by(|a, b| b.key.cmp(&a.key)),
            SortOrder::By(compare) => self.buckets.sort_by(compare),
        }
    }

    /// Prefix sum over the buckets in their current order.
    pub fn running_total(&self) -> Self {
        let mut total = 0;
        let buckets = self
            .buckets
            .iter()
            .map(|bucket| {
                total += bucket.count;
                Bucket {
                    key: bucket.key.clone(),
                    count: total,
                }
            })
            .collect();

        Self { buckets }
    }
}

impl<K> Histogram<K> {
    pub fn buckets(&self) -> &[Bucket<K>] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|bucket| bucket.count).sum()
    }
}

impl<K: Display> Histogram<K> {
    /// Bucket keys in their rendered form, in order.
    pub fn entries(&self) -> Vec<(String, u64)> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.key.to_string(), bucket.count))
            .collect()
    }
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

/// Most frequent first, ties by key.
pub fn by_count_descending<K: Ord>(a: &Bucket<K>, b: &Bucket<K>) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key))
}

impl<K: Display> Serialize for Histogram<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.key.to_string(), &bucket.count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn counts_occurrences_per_key() {
        let histogram = Histogram::count_by([0usize, 0, 1, 2, 2, 2], Some, SortOrder::KeyAscending);
        assert_eq!(
            histogram.entries(),
            vec![
                ("0".to_string(), 2),
                ("1".to_string(), 1),
                ("2".to_string(), 3)
            ]
        );
    }

    #[test]
    fn honours_descending_order() {
        let histogram = Histogram::count_by(
            [2019, 2019, 2019, 2020, 2021, 2022],
            Some,
            SortOrder::KeyDescending,
        );
        let keys: Vec<i32> = histogram.buckets().iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![2022, 2021, 2020, 2019]);
    }

    #[test]
    fn custom_order_sorts_by_count() {
        let histogram = Histogram::count_by(
            ["b", "a", "c", "c", "b", "c"],
            |s| Some(s.to_string()),
            SortOrder::By(by_count_descending),
        );
        assert_eq!(
            histogram.entries(),
            vec![
                ("c".to_string(), 3),
                ("b".to_string(), 2),
                ("a".to_string(), 1)
            ]
        );
    }

    #[test]
    fn filtered_items_are_dropped() {
        let histogram = Histogram::count_by([1, 2, 3, 4], |n| (n % 2 == 0).then_some(n), SortOrder::KeyAscending);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn weights_are_summed_and_zero_weights_keep_their_bucket() {
        let histogram = Histogram::sum_by(
            [("jan", 4u64), ("feb", 0), ("jan", 1)],
            |(k, w)| Some((k, w)),
            SortOrder::KeyAscending,
        );
        assert_eq!(histogram.entries(), vec![("feb".to_string(), 0), ("jan".to_string(), 5)]);
    }

    #[test]
    fn running_total_accumulates_in_order() {
        let histogram = Histogram::count_by([1, 2, 2, 3, 3, 3], Some, SortOrder::KeyAscending);
        let cumulative: Vec<u64> = histogram.running_total().buckets().iter().map(|b| b.count).collect();
        assert_eq!(cumulative, vec![1, 3, 6]);
    }

    #[test]
    fn empty_input_gives_empty_histogram() {
        let histogram = Histogram::<u32>::count_by(Vec::<u32>::new(), Some, SortOrder::KeyAscending);
        assert!(histogram.is_empty());
        assert!(histogram.running_total().is_empty());
        assert_eq!(serde_json::to_string(&histogram).unwrap(), "{}");
    }

    #[test]
    fn serializes_as_ordered_object() {
        let histogram = Histogram::count_by([2019, 2022, 2019], Some, SortOrder::KeyDescending);
        assert_eq!(serde_json::to_string(&histogram).unwrap(), r#"{"2022":1,"2019":2}"#);
    }

    proptest! {
        #[test]
        fn counts_sum_to_filtered_items(values in proptest::collection::vec(0u8..20, 0..200)) {
            let histogram = Histogram::count_by(values.iter().copied(), |v| (v < 10).then_some(v), SortOrder::KeyAscending);
            let expected = values.iter().filter(|v| **v < 10).count() as u64;
            prop_assert_eq!(histogram.total(), expected);
        }

        #[test]
        fn running_total_is_non_decreasing(values in proptest::collection::vec(0u16..50, 1..200)) {
            let histogram = Histogram::count_by(values.iter().copied(), Some, SortOrder::KeyAscending);
            let cumulative = histogram.running_total();
            let counts: Vec<u64> = cumulative.buckets().iter().map(|b| b.count).collect();
            prop_assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
            prop_assert_eq!(counts.last().copied(), Some(values.len() as u64));
        }
    }
}

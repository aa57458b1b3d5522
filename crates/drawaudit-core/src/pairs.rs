//! Pairwise co-occurrence counts within draws.
//!
//! Storage is sparse: only pairs seen at least once are kept, keyed by a
//! normalized `(smaller, larger)` tuple, so the table grows with the data
//! rather than with the square of the range.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::record::DrawRecord;

/// Unordered pair of distinct numbers, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pair {
    pub a: u32,
    pub b: u32,
}

impl Pair {
    /// Normalize `(x, y)` so the smaller number comes first. `None` if equal.
    pub fn new(x: u32, y: u32) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(Self { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(Self { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A pair and the number of draws containing both of its numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub a: u32,
    pub b: u32,
    pub count: u64,
}

/// Sparse co-occurrence table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairTable {
    counts: BTreeMap<Pair, u64>,
}

impl PairTable {
    /// Co-occurrence count of `x` and `y` in either order.
    pub fn count(&self, x: u32, y: u32) -> u64 {
        Pair::new(x, y)
            .and_then(|p| self.counts.get(&p).copied())
            .unwrap_or(0)
    }

    /// Number of distinct pairs observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts: valid draws × C(K, 2).
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Observed pairs in ascending pair order.
    pub fn iter(&self) -> impl Iterator<Item = PairCount> + '_ {
        self.counts.iter().map(|(p, &count)| PairCount {
            a: p.a,
            b: p.b,
            count,
        })
    }

    /// The `n` most frequent pairs; ties go to the smaller pair.
    pub fn top(&self, n: usize) -> Vec<PairCount> {
        let mut ranked: Vec<PairCount> = self.iter().collect();
        // iter() is already pair-ascending, so a stable sort keeps the tie order
        ranked.sort_by(|x, y| y.count.cmp(&x.count));
        ranked.truncate(n);
        ranked
    }
}

impl Serialize for PairTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.counts.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

/// Count every unordered pair within each draw.
pub fn count_pairs(draws: &[DrawRecord]) -> PairTable {
    let mut table = PairTable::default();
    for draw in draws {
        let nums = draw.numbers();
        for (i, &x) in nums.iter().enumerate() {
            for &y in &nums[i + 1..] {
                if let Some(pair) = Pair::new(x, y) {
                    *table.counts.entry(pair).or_insert(0) += 1;
                }
            }
        }
    }
    table
}

/// C(k, 2): pairs per draw.
pub fn pairs_per_draw(k: usize) -> u64 {
    let k = k as u64;
    k * k.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::draw;

    #[test]
    fn test_pair_normalization() {
        assert_eq!(Pair::new(7, 3), Some(Pair { a: 3, b: 7 }));
        assert_eq!(Pair::new(3, 7), Pair::new(7, 3));
        assert_eq!(Pair::new(4, 4), None);
    }

    #[test]
    fn test_shared_pair_counted_per_draw() {
        let draws = vec![draw(&[1, 2, 3, 4, 5, 6]), draw(&[1, 2, 7, 8, 9, 10])];
        let table = count_pairs(&draws);
        assert_eq!(table.count(1, 2), 2);
        assert_eq!(table.count(2, 1), 2);
        assert_eq!(table.count(3, 4), 1);
        assert_eq!(table.count(3, 7), 0);
    }

    #[test]
    fn test_total_is_draws_times_pairs_per_draw() {
        let draws = vec![draw(&[1, 2, 3, 4, 5, 6]), draw(&[1, 2, 7, 8, 9, 10])];
        let table = count_pairs(&draws);
        assert_eq!(pairs_per_draw(6), 15);
        assert_eq!(table.total(), 2 * 15);
        // (1,2) shared, so 29 distinct pairs
        assert_eq!(table.len(), 29);
    }

    #[test]
    fn test_top_pairs_deterministic() {
        let draws = vec![draw(&[1, 2, 3]), draw(&[1, 2, 4]), draw(&[3, 4, 5])];
        let table = count_pairs(&draws);
        let top = table.top(3);
        assert_eq!(top[0], PairCount { a: 1, b: 2, count: 2 });
        assert_eq!((top[1].a, top[1].b), (1, 3));
        assert_eq!((top[2].a, top[2].b), (1, 4));
    }

    #[test]
    fn test_empty_input() {
        let table = count_pairs(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.top(10).is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let table = count_pairs(&[draw(&[2, 9])]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"a":2,"b":9,"count":1}]"#);
    }
}

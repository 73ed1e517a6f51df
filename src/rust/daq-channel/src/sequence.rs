// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Expansion of sequence parameters into the combinations of a protocol run.
//!
//! A protocol sequence is described by a mapping from parameter name to the
//! values the parameter takes. Running the sequence visits the full cartesian
//! product of those values. The iteration order follows the insertion order of
//! the mapping: the first parameter forms the outermost loop, the last
//! parameter varies fastest.

use std::hash::Hash;

use indexmap::IndexMap;

/// Parameter name mapped to the index into that parameter's sequence.
pub type Combination = IndexMap<String, usize>;

/// Iterator over all combinations of a parameter space.
pub struct Combinations<'a, K, V> {
    params: &'a IndexMap<K, Vec<V>>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a, K, V> Combinations<'a, K, V> {
    pub fn new(params: &'a IndexMap<K, Vec<V>>) -> Self {
        Self {
            params,
            indices: vec![0; params.len()],
            exhausted: params.values().any(|values| values.is_empty()),
        }
    }

    fn advance(&mut self) {
        for (position, values) in self.params.values().enumerate().rev() {
            self.indices[position] += 1;
            if self.indices[position] < values.len() {
                return;
            }
            self.indices[position] = 0;
        }
        self.exhausted = true;
    }
}

impl<K, V> Iterator for Combinations<'_, K, V>
where
    K: Clone + Hash + Eq,
    V: Clone,
{
    type Item = IndexMap<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let combination = self
            .params
            .iter()
            .zip(self.indices.iter())
            .map(|((name, values), index)| (name.clone(), values[*index].clone()))
            .collect();
        self.advance();
        Some(combination)
    }
}

/// Number of combinations in the parameter space.
///
/// An empty parameter space has exactly one (empty) combination.
pub fn combination_count<K, V>(params: &IndexMap<K, Vec<V>>) -> usize {
    params.values().map(|values| values.len()).product()
}

/// Invoke `f` once for every combination of the parameter values.
pub fn run_sequence<K, V, F>(params: &IndexMap<K, Vec<V>>, mut f: F)
where
    K: Clone + Hash + Eq,
    V: Clone,
    F: FnMut(&IndexMap<K, V>),
{
    for combination in Combinations::new(params) {
        f(&combination);
    }
}

/// Expand parameter counts into the index ranges `0..count`.
pub fn sequence_ranges(counts: &IndexMap<String, usize>) -> IndexMap<String, Vec<usize>> {
    counts
        .iter()
        .map(|(name, count)| (name.clone(), (0..*count).collect()))
        .collect()
}

//! Re-orders results that arrive out of order from worker threads

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, VecDeque};

/// Results sort by year, then day, then part
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Holds results back until everything before them has arrived
pub struct ResultAggregator {
    /// Keys still to emit, smallest first
    expected: VecDeque<ResultKey>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(mut expected: Vec<ResultKey>) -> Self {
        expected.sort();
        expected.dedup();
        Self {
            expected: expected.into(),
            pending: BTreeMap::new(),
        }
    }

    /// One key per selected part of every item
    pub fn for_items(items: &[WorkItem]) -> Self {
        Self::new(
            items
                .iter()
                .flat_map(|w| {
                    w.parts.clone().map(|part| ResultKey {
                        year: w.year,
                        day: w.day,
                        part,
                    })
                })
                .collect(),
        )
    }

    /// Accept `result` and return whatever can now be emitted, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front() {
            let Some(result) = self.pending.remove(next) else {
                break;
            };
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Everything still held back, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(day: u8, part: u8) -> ResultKey {
        ResultKey {
            year: 2022,
            day,
            part,
        }
    }

    fn result(day: u8, part: u8) -> SolverResult {
        SolverResult {
            year: 2022,
            day,
            part,
            answer: Ok(format!("{day}.{part}")),
            parse_duration: None,
            solve_duration: TimeDelta::microseconds(3),
        }
    }

    fn keys(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn in_order_results_pass_straight_through() {
        let mut agg = ResultAggregator::new(vec![key(1, 1), key(1, 2)]);
        assert_eq!(keys(&agg.add(result(1, 1))), [key(1, 1)]);
        assert_eq!(keys(&agg.add(result(1, 2))), [key(1, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn late_result_releases_the_backlog() {
        let mut agg = ResultAggregator::new(vec![key(2, 1), key(1, 2), key(1, 1)]);
        assert!(agg.add(result(1, 2)).is_empty());
        assert!(agg.add(result(2, 1)).is_empty());
        assert_eq!(keys(&agg.add(result(1, 1))), [key(1, 1), key(1, 2), key(2, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn drain_returns_stragglers() {
        let mut agg = ResultAggregator::new(vec![key(1, 1), key(1, 2)]);
        agg.add(result(1, 2));
        assert!(!agg.is_complete());
        assert_eq!(keys(&agg.drain()), [key(1, 2)]);
        assert!(agg.drain().is_empty());
    }

    #[test]
    fn keys_for_items() {
        let items = [
            WorkItem { year: 2022, day: 3, parts: 1..=2 },
            WorkItem { year: 2022, day: 1, parts: 2..=2 },
        ];
        let agg = ResultAggregator::for_items(&items);
        assert_eq!(Vec::from(agg.expected.clone()), [key(1, 2), key(3, 1), key(3, 2)]);
    }

    proptest! {
        #[test]
        fn any_arrival_order_is_emitted_sorted(
            order in Just((1u8..=25).flat_map(|d| [(d, 1), (d, 2)]).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let mut expected: Vec<_> = order.iter().map(|&(d, p)| key(d, p)).collect();
            let mut agg = ResultAggregator::new(expected.clone());
            let emitted: Vec<_> = order
                .iter()
                .flat_map(|&(d, p)| keys(&agg.add(result(d, p))))
                .collect();
            expected.sort();
            prop_assert_eq!(emitted, expected);
            prop_assert!(agg.is_complete());
        }
    }
}

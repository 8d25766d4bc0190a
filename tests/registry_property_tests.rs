//! Property-based tests for the forwarding registry
//!
//! Random sequences of Add and Remove are applied both to `PhoneForward` and
//! to a naive model that scans every stored forwarding. Every query must agree
//! with the model, and both tries must stay consistent with each other.

use phone_forward::{compare_numbers, PhoneForward};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

// =============================================================================
// NAIVE MODEL
// =============================================================================

#[derive(Debug, Default)]
struct NaiveRegistry {
    forwardings: BTreeMap<String, String>,
}

impl NaiveRegistry {
    fn add(&mut self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        self.forwardings.insert(source.to_string(), target.to_string());
        true
    }

    fn remove(&mut self, prefix: &str) {
        self.forwardings.retain(|source, _| !source.starts_with(prefix));
    }

    fn get(&self, number: &str) -> String {
        self.forwardings
            .iter()
            .filter(|(source, _)| number.starts_with(source.as_str()))
            .max_by_key(|(source, _)| source.len())
            .map(|(source, target)| format!("{}{}", target, &number[source.len()..]))
            .unwrap_or_else(|| number.to_string())
    }

    fn reverse(&self, number: &str) -> Vec<String> {
        let mut result: Vec<String> = self
            .forwardings
            .iter()
            .filter(|(_, target)| number.starts_with(target.as_str()))
            .map(|(source, target)| format!("{}{}", source, &number[target.len()..]))
            .collect();
        result.push(number.to_string());
        result.sort_by(|a, b| compare_numbers(a, b));
        result.dedup();
        result
    }

    fn get_reverse(&self, number: &str) -> Vec<String> {
        self.reverse(number)
            .into_iter()
            .filter(|candidate| self.get(candidate) == number)
            .collect()
    }
}

// =============================================================================
// GENERATORS
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Add(String, String),
    Remove(String),
}

/// Short numbers over a reduced alphabet so prefixes collide often
fn number() -> impl Strategy<Value = String> {
    "[01*#]{1,4}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (number(), number()).prop_map(|(s, t)| Op::Add(s, t)),
        1 => number().prop_map(Op::Remove),
    ]
}

fn apply(ops: &[Op]) -> (PhoneForward, NaiveRegistry) {
    let mut pf = PhoneForward::new();
    let mut model = NaiveRegistry::default();
    for op in ops {
        match op {
            Op::Add(s, t) => {
                assert_eq!(pf.try_add(s, t), model.add(s, t));
            }
            Op::Remove(p) => {
                pf.remove(p);
                model.remove(p);
            }
        }
    }
    (pf, model)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_queries_match_model(
        ops in prop::collection::vec(op(), 0..40),
        queries in prop::collection::vec(number(), 1..10),
    ) {
        let (pf, model) = apply(&ops);

        prop_assert!(pf.is_consistent());
        prop_assert_eq!(pf.len(), model.forwardings.len());

        for q in &queries {
            prop_assert_eq!(pf.get(q).to_vec(), vec![model.get(q)]);
            prop_assert_eq!(pf.reverse(q).to_vec(), model.reverse(q));
            prop_assert_eq!(pf.get_reverse(q).to_vec(), model.get_reverse(q));
        }
    }

    #[test]
    fn prop_reverse_sorted_and_contains_self(
        ops in prop::collection::vec(op(), 0..40),
        q in number(),
    ) {
        let (pf, _) = apply(&ops);
        let reversed = pf.reverse(&q).to_vec();
        prop_assert!(reversed.contains(&q));
        prop_assert!(reversed
            .windows(2)
            .all(|w| compare_numbers(&w[0], &w[1]) == Ordering::Less));
    }

    #[test]
    fn prop_round_trip(s in number(), t in number()) {
        prop_assume!(s != t);
        let mut pf = PhoneForward::new();
        pf.add(&s, &t).unwrap();
        prop_assert_eq!(pf.get(&s).to_vec(), vec![t.clone()]);
        prop_assert!(pf.reverse(&t).contains(&s));
    }

    #[test]
    fn prop_remove_idempotent(
        ops in prop::collection::vec(op(), 0..40),
        p in number(),
    ) {
        let (mut pf, _) = apply(&ops);
        pf.remove(&p);
        let once = (pf.forwardings(), pf.stats());
        pf.remove(&p);
        prop_assert_eq!((pf.forwardings(), pf.stats()), once);
    }

    #[test]
    fn prop_get_reverse_verifies_every_candidate(
        ops in prop::collection::vec(op(), 0..40),
        q in number(),
    ) {
        let (pf, _) = apply(&ops);
        for x in pf.get_reverse(&q).iter() {
            let got = pf.get(x);
            prop_assert_eq!(got.get(0), Some(q.as_str()));
        }
    }
}

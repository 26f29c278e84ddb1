//! Property tests for the scheduler lifecycle and the filter evaluator.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use friction_lab::filter::evaluate::{EvalContext, evaluate};
use friction_lab::filter::predicate::{FilterPredicate, SizeBucket};
use friction_lab::filter::record::{FieldValue, Record, RecordSet};
use friction_lab::scheduler::deferred::{DeferredScheduler, DeferredState};

fn ctx() -> EvalContext {
    EvalContext::with_reference(chrono::NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
}

proptest! {
    /// Cancelling strictly before the deadline means the action never
    /// fires, no matter how long the host keeps polling afterwards.
    #[test]
    fn cancel_before_deadline_never_fires(
        delay_ms in 2u64..10_000,
        cancel_frac in 0.0f64..0.999,
        extra_polls in 1usize..20,
    ) {
        let start = Instant::now();
        let delay = Duration::from_millis(delay_ms);
        let mut scheduler: DeferredScheduler<u8, u8> = DeferredScheduler::new();
        scheduler.arm(start, delay, 0, |_| 1);

        let cancel_at = start + delay.mul_f64(cancel_frac);
        prop_assert!(scheduler.poll(cancel_at.min(start + delay - Duration::from_millis(1))).is_none());
        scheduler.cancel();
        prop_assert_eq!(scheduler.state(), DeferredState::Cancelled);

        for i in 0..extra_polls {
            let later = start + delay + Duration::from_millis(1 + i as u64 * 100);
            prop_assert!(scheduler.poll(later).is_none());
        }
    }

    /// Arm storms (rapid repeat triggers) never create duplicate timers:
    /// exactly one effect is ever produced, from the first arm's closure.
    #[test]
    fn arm_storms_never_double_fire(
        delay_ms in 1u64..5_000,
        rearm_attempts in 1usize..50,
        poll_count in 1usize..10,
    ) {
        let start = Instant::now();
        let delay = Duration::from_millis(delay_ms);
        let mut scheduler: DeferredScheduler<u8, u32> = DeferredScheduler::new();

        let first = scheduler.arm(start, delay, 0, |_| 1);
        for attempt in 0..rearm_attempts {
            let again = scheduler.arm(
                start + Duration::from_millis(attempt as u64),
                delay,
                0,
                |_| 999,
            );
            prop_assert_eq!(again, first, "re-arm must return the original handle");
        }

        let mut effects = Vec::new();
        for i in 0..poll_count {
            let now = start + delay + Duration::from_millis(i as u64);
            if let Some(effect) = scheduler.poll(now) {
                effects.push(effect);
            }
        }
        prop_assert_eq!(effects, vec![1], "one fire, from the first closure");
    }

    /// The evaluator returns an ordered subset of the input in which every
    /// record satisfies every predicate.
    #[test]
    fn evaluate_returns_ordered_matching_subset(
        sizes in proptest::collection::vec(0.0f64..20.0, 0..30),
        bucket_idx in 0usize..3,
    ) {
        let records: RecordSet = sizes
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Record::new()
                    .with("id", i as f64)
                    .with("shoe_size", *s)
            })
            .collect();
        let bucket = [SizeBucket::Small, SizeBucket::Medium, SizeBucket::Large][bucket_idx];
        let query = vec![FilterPredicate::CategoricalRange {
            field: "shoe_size".to_string(),
            bucket,
        }];

        let context = ctx();
        let out = evaluate(&records, &query, &context);

        let ids: Vec<f64> = out
            .iter()
            .filter_map(|r| r.get("id").and_then(FieldValue::as_number))
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_by(f64::total_cmp);
        prop_assert_eq!(&ids, &sorted, "output preserves input order");

        for record in &out {
            let size = record.get("shoe_size").and_then(FieldValue::as_number).unwrap();
            let ok = match bucket {
                SizeBucket::Small => size <= context.buckets.small_max,
                SizeBucket::Medium => {
                    size > context.buckets.small_max && size <= context.buckets.medium_max
                }
                SizeBucket::Large => size > context.buckets.medium_max,
            };
            prop_assert!(ok, "record with size {size} fails the {bucket} predicate");
        }

        // Records left out genuinely do not match.
        let matched = ids.len();
        let expected = sizes
            .iter()
            .filter(|s| match bucket {
                SizeBucket::Small => **s <= context.buckets.small_max,
                SizeBucket::Medium => {
                    **s > context.buckets.small_max && **s <= context.buckets.medium_max
                }
                SizeBucket::Large => **s > context.buckets.medium_max,
            })
            .count();
        prop_assert_eq!(matched, expected);
    }
}

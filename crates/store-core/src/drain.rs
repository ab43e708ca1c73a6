//! # Backorder Drain Planning
//!
//! Decides which pending backorders a given amount of stock can satisfy.
//!
//! ## Single Greedy Pass
//! ```text
//! available = 5
//!
//!   queue (oldest first):   [ 3 ]  [ 4 ]  [ 2 ]  [ 1 ]
//!                             │      │      │      │
//!   remaining before visit:   5      2      2      0
//!   fits?                     ✅     ❌     ✅     ❌
//!   remaining after:          2      2      0      0
//!
//!   satisfied = [3, 2]   skipped = [4, 1]
//! ```
//!
//! Skipped backorders are not revisited in the same pass and the queue is
//! never reordered by size. Planning only reads; the caller deletes the
//! satisfied rows and notifies their customers. Product stock is untouched.

use serde::Serialize;
use ts_rs::TS;

use crate::types::Backorder;

/// Which backorders a drain satisfies and which it leaves pending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrainPlan {
    pub satisfied: Vec<Backorder>,
    pub skipped: Vec<Backorder>,
    /// Budget left after the pass.
    pub remaining: i64,
}

/// Plans a drain of `queue` against `available` units.
pub fn plan_drain(queue: Vec<Backorder>, available: i64) -> DrainPlan {
    let mut remaining = available.max(0);
    let mut plan = DrainPlan::default();

    for backorder in queue {
        if backorder.quantity <= remaining {
            remaining -= backorder.quantity;
            plan.satisfied.push(backorder);
        } else {
            plan.skipped.push(backorder);
        }
    }

    plan.remaining = remaining;
    plan
}

/// What a drain did, returned by product updates and order deletes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DrainReport {
    pub product_id: String,
    pub satisfied: Vec<Backorder>,
    pub still_pending: usize,
}

impl DrainReport {
    /// A report for a product that was not drained.
    pub fn untouched(product_id: impl Into<String>) -> Self {
        DrainReport {
            product_id: product_id.into(),
            ..Default::default()
        }
    }

    pub fn from_plan(product_id: impl Into<String>, plan: &DrainPlan) -> Self {
        DrainReport {
            product_id: product_id.into(),
            satisfied: plan.satisfied.clone(),
            still_pending: plan.skipped.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn queue(quantities: &[i64]) -> Vec<Backorder> {
        quantities
            .iter()
            .map(|q| Backorder::new("p-1", "c-1", *q, Utc::now()))
            .collect()
    }

    fn quantities(items: &[Backorder]) -> Vec<i64> {
        items.iter().map(|b| b.quantity).collect()
    }

    #[test]
    fn test_greedy_pass_skips_without_revisiting() {
        let plan = plan_drain(queue(&[3, 4, 2, 1]), 5);
        assert_eq!(quantities(&plan.satisfied), vec![3, 2]);
        assert_eq!(quantities(&plan.skipped), vec![4, 1]);
        assert_eq!(plan.remaining, 0);
    }

    #[test]
    fn test_large_head_does_not_block_smaller_followers() {
        let plan = plan_drain(queue(&[6, 3]), 5);
        assert_eq!(quantities(&plan.satisfied), vec![3]);
        assert_eq!(plan.remaining, 2);
    }

    #[test]
    fn test_zero_or_negative_budget_satisfies_nothing() {
        assert!(plan_drain(queue(&[1, 2]), 0).satisfied.is_empty());
        assert!(plan_drain(queue(&[1]), -4).satisfied.is_empty());
    }

    #[test]
    fn test_empty_queue() {
        let plan = plan_drain(Vec::new(), 10);
        assert!(plan.satisfied.is_empty());
        assert_eq!(plan.remaining, 10);
    }

    #[test]
    fn test_monotonicity_over_many_queues() {
        // Deterministic pseudo-random queues: the removed total never exceeds
        // the budget and each skip exceeded the remainder at its visit.
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..200 {
            let len = (seed % 8) as usize;
            let mut qs = Vec::with_capacity(len);
            for _ in 0..len {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                qs.push((seed % 6 + 1) as i64);
            }
            let available = (seed % 12) as i64;

            let items = queue(&qs);
            let plan = plan_drain(items.clone(), available);

            let removed: i64 = plan.satisfied.iter().map(|b| b.quantity).sum();
            assert!(removed <= available);
            assert_eq!(plan.remaining, available - removed);

            let mut remaining = available;
            for b in &items {
                if plan.satisfied.iter().any(|s| s.id == b.id) {
                    remaining -= b.quantity;
                } else {
                    assert!(b.quantity > remaining);
                }
            }
        }
    }

    #[test]
    fn test_report_from_plan() {
        let plan = plan_drain(queue(&[2, 9]), 3);
        let report = DrainReport::from_plan("p-1", &plan);
        assert_eq!(report.satisfied.len(), 1);
        assert_eq!(report.still_pending, 1);
    }
}

//! Galactic Orders - time-boxed campaign-wide objectives
//!
//! An order tracks a single target count against a turn budget. The reward
//! pool is shared: when the order resolves, every faction is paid, whether
//! the order completed or merely ran out its clock.

use serde::{Deserialize, Serialize};

use crate::core::types::ResourceId;

/// What an order counts toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderGoal {
    /// Planets under any faction's control
    ClaimPlanets { target: u32 },
    /// Ships in service across all fleets
    MusterFleets { target: u32 },
}

impl OrderGoal {
    pub fn target(&self) -> u32 {
        match self {
            Self::ClaimPlanets { target } | Self::MusterFleets { target } => *target,
        }
    }
}

/// Lifecycle of a galactic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Active,
    Complete,
    Expired,
}

/// A time-boxed objective with a shared reward pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalacticOrder {
    pub name: String,
    pub goal: OrderGoal,
    /// Last measured progress toward the goal's target
    pub progress: u32,
    /// Turns left before the order expires
    pub turns_remaining: u32,
    pub reward: Vec<(ResourceId, i64)>,
    pub status: OrderStatus,
}

impl GalacticOrder {
    pub fn new(
        name: impl Into<String>,
        goal: OrderGoal,
        turn_budget: u32,
        reward: Vec<(ResourceId, i64)>,
    ) -> Self {
        assert!(turn_budget > 0, "an order needs at least one turn");
        Self {
            name: name.into(),
            goal,
            progress: 0,
            turns_remaining: turn_budget,
            reward,
            status: OrderStatus::Active,
        }
    }

    /// Record the freshly measured progress and advance the clock by one
    /// turn. Target reached wins over an expiring budget on the same turn.
    pub fn advance(&mut self, measured: u32) -> OrderStatus {
        assert_eq!(
            self.status,
            OrderStatus::Active,
            "resolved orders must not be advanced"
        );

        self.progress = measured;
        if measured >= self.goal.target() {
            self.status = OrderStatus::Complete;
        } else {
            self.turns_remaining -= 1;
            if self.turns_remaining == 0 {
                self.status = OrderStatus::Expired;
            }
        }
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward() -> Vec<(ResourceId, i64)> {
        vec![(ResourceId::from("requisition"), 5)]
    }

    #[test]
    fn test_completes_when_target_reached() {
        let mut order = GalacticOrder::new(
            "Claim the Reach",
            OrderGoal::ClaimPlanets { target: 3 },
            10,
            reward(),
        );
        assert_eq!(order.advance(1), OrderStatus::Active);
        assert_eq!(order.advance(3), OrderStatus::Complete);
        assert_eq!(order.progress, 3);
    }

    #[test]
    fn test_expires_when_budget_runs_out() {
        let mut order = GalacticOrder::new(
            "Muster the Fleet",
            OrderGoal::MusterFleets { target: 100 },
            2,
            reward(),
        );
        assert_eq!(order.advance(1), OrderStatus::Active);
        assert_eq!(order.advance(2), OrderStatus::Expired);
    }

    #[test]
    fn test_completion_beats_expiry_on_final_turn() {
        let mut order = GalacticOrder::new(
            "Last Stand",
            OrderGoal::ClaimPlanets { target: 2 },
            1,
            reward(),
        );
        assert_eq!(order.advance(2), OrderStatus::Complete);
        assert_eq!(order.turns_remaining, 1);
    }

    #[test]
    #[should_panic(expected = "resolved orders")]
    fn test_advancing_resolved_order_panics() {
        let mut order = GalacticOrder::new(
            "Done",
            OrderGoal::ClaimPlanets { target: 1 },
            5,
            reward(),
        );
        order.advance(1);
        order.advance(1);
    }
}

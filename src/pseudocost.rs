use std::collections::HashMap;

use crate::candidate::BranchingCandidate;
use crate::probe::Direction;

/// One observation fed to the framework's pseudocosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudocostUpdate {
    pub var_prob_id: usize,
    pub direction: Direction,
    /// Change of the variable's value, negative for the down branch.
    pub sol_val_delta: f64,
    /// Observed objective gain.
    pub obj_delta: f64,
    pub weight: f64,
}

/// Turns the gains of a strong branching probe into pseudocost observations.
///
/// Sides with a non-finite gain (an infeasible or unprobed side) are left out.
pub fn pseudocost_updates(
    candidate: &BranchingCandidate,
    down_gain: Option<f64>,
    up_gain: Option<f64>,
) -> Vec<PseudocostUpdate> {
    let mut updates = Vec::with_capacity(2);
    if let Some(gain) = down_gain.filter(|g| g.is_finite()) {
        updates.push(PseudocostUpdate {
            var_prob_id: candidate.var_prob_id,
            direction: Direction::Down,
            sol_val_delta: -candidate.down_distance(),
            obj_delta: gain.max(0.0),
            weight: 1.0,
        });
    }
    if let Some(gain) = up_gain.filter(|g| g.is_finite()) {
        updates.push(PseudocostUpdate {
            var_prob_id: candidate.var_prob_id,
            direction: Direction::Up,
            sol_val_delta: candidate.up_distance(),
            obj_delta: gain.max(0.0),
            weight: 1.0,
        });
    }
    updates
}

/// Running pseudocost sums of one variable and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PseudocostRecord {
    /// Sum of weighted objective gains per unit of fractional distance.
    pub sum: f64,
    /// Total weight of the observations.
    pub count: f64,
}

impl PseudocostRecord {
    /// The average gain per unit distance, if anything was observed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0.0).then(|| self.sum / self.count)
    }
}

/// Pseudocost records of all variables, for frameworks that do not keep their own.
#[derive(Debug, Clone, Default)]
pub struct Pseudocosts {
    down: HashMap<usize, PseudocostRecord>,
    up: HashMap<usize, PseudocostRecord>,
}

impl Pseudocosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an observation; the same observation recorded twice counts twice.
    pub fn update(&mut self, update: &PseudocostUpdate) {
        let distance = update.sol_val_delta.abs();
        if distance <= 0.0 {
            return;
        }
        let table = match update.direction {
            Direction::Down => &mut self.down,
            Direction::Up => &mut self.up,
        };
        let record = table.entry(update.var_prob_id).or_default();
        record.sum += update.weight * update.obj_delta / distance;
        record.count += update.weight;
    }

    pub fn record(&self, var_prob_id: usize, direction: Direction) -> PseudocostRecord {
        let table = match direction {
            Direction::Down => &self.down,
            Direction::Up => &self.up,
        };
        table.get(&var_prob_id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sides_are_observed() {
        let cand = BranchingCandidate::new(2, 3.25);
        let updates = pseudocost_updates(&cand, Some(1.0), Some(3.0));
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].direction, Direction::Down);
        assert_eq!(updates[0].sol_val_delta, -0.25);
        assert_eq!(updates[1].sol_val_delta, 0.75);
        assert_eq!(updates[1].obj_delta, 3.0);
    }

    #[test]
    fn infinite_or_missing_gains_are_skipped() {
        let cand = BranchingCandidate::new(2, 3.5);
        let updates = pseudocost_updates(&cand, Some(f64::INFINITY), None);
        assert!(updates.is_empty());
        let updates = pseudocost_updates(&cand, None, Some(2.0));
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].direction, Direction::Up);
    }

    #[test]
    fn records_average_per_unit_distance() {
        let cand = BranchingCandidate::new(0, 0.25);
        let mut pc = Pseudocosts::new();
        for update in pseudocost_updates(&cand, Some(0.5), Some(1.5)) {
            pc.update(&update);
        }
        assert_eq!(pc.record(0, Direction::Down).mean(), Some(2.0));
        assert_eq!(pc.record(0, Direction::Up).mean(), Some(2.0));
        assert_eq!(pc.record(1, Direction::Up).mean(), None);
    }

    #[test]
    fn repeated_observation_counts_twice() {
        let cand = BranchingCandidate::new(0, 0.5);
        let mut pc = Pseudocosts::new();
        let update = pseudocost_updates(&cand, Some(1.0), None)[0];
        pc.update(&update);
        pc.update(&update);
        assert_eq!(pc.record(0, Direction::Down).count, 2.0);
        assert_eq!(pc.record(0, Direction::Down).mean(), Some(2.0));
    }
}

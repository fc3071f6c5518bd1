/// Combination of the down and up gain of a candidate into a single branching score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreFunction {
    /// `max(down, eps) * max(up, eps)`.
    Product {
        /// Lower guard on each gain.
        epsilon: f64,
    },
    /// `(1 - weight) * min(down, up) + weight * max(down, up)`.
    Linear {
        /// Weight of the larger gain.
        weight: f64,
    },
}

impl Default for ScoreFunction {
    fn default() -> Self {
        ScoreFunction::Product { epsilon: 1e-6 }
    }
}

impl ScoreFunction {
    /// Scores a candidate; negative gains count as zero.
    pub fn score(&self, down_gain: f64, up_gain: f64) -> f64 {
        let down = down_gain.max(0.0);
        let up = up_gain.max(0.0);
        match *self {
            ScoreFunction::Product { epsilon } => down.max(epsilon) * up.max(epsilon),
            ScoreFunction::Linear { weight } => (1.0 - weight) * down.min(up) + weight * down.max(up),
        }
    }
}

use std::ops::{Deref, DerefMut};

use crate::candidate::BranchingCandidate;
use crate::probe::{Direction, ProbeResult};
use crate::retcode::Retcode;

/// The strong-branching capabilities of an LP back end.
pub trait StrongBranchLp {
    /// Saves the LP state so that it can be restored by `end_strong_branch()`.
    fn start_strong_branch(&mut self) -> Result<(), Retcode>;

    /// Restores the LP state saved by `start_strong_branch()`.
    fn end_strong_branch(&mut self) -> Result<(), Retcode>;

    /// Solves the LP with the candidate's bound on the given side rounded.
    ///
    /// LP failures are reported through the status of the result. `Err` means the call itself
    /// could not be made.
    fn probe(
        &mut self,
        candidate: &BranchingCandidate,
        direction: Direction,
        iteration_limit: Option<usize>,
    ) -> Result<ProbeResult, Retcode>;
}

/// An open strong-branching episode on an LP back end.
///
/// The episode ends either explicitly with [`ProbeSession::end`] or when the session is dropped,
/// so an early return from the rule always leaves the LP as it was found. The back end remains
/// reachable through `Deref` for calls that do not touch the LP.
pub struct ProbeSession<'a, L: StrongBranchLp + ?Sized> {
    lp: &'a mut L,
    open: bool,
    n_probes: usize,
}

impl<'a, L: StrongBranchLp + ?Sized> ProbeSession<'a, L> {
    /// Starts a strong-branching episode.
    pub fn begin(lp: &'a mut L) -> Result<Self, Retcode> {
        lp.start_strong_branch()?;
        Ok(ProbeSession {
            lp,
            open: true,
            n_probes: 0,
        })
    }

    /// Probes one side of a candidate.
    pub fn probe(
        &mut self,
        candidate: &BranchingCandidate,
        direction: Direction,
        iteration_limit: Option<usize>,
    ) -> Result<ProbeResult, Retcode> {
        assert!(self.open, "Probing requires an open strong branching session.");
        let result = self.lp.probe(candidate, direction, iteration_limit)?;
        self.n_probes += 1;
        Ok(result)
    }

    /// Returns the number of probes issued in this session.
    pub fn n_probes(&self) -> usize {
        self.n_probes
    }

    /// Ends the episode and restores the LP.
    pub fn end(mut self) -> Result<(), Retcode> {
        self.open = false;
        self.lp.end_strong_branch()
    }
}

impl<L: StrongBranchLp + ?Sized> Deref for ProbeSession<'_, L> {
    type Target = L;

    fn deref(&self) -> &Self::Target {
        self.lp
    }
}

impl<L: StrongBranchLp + ?Sized> DerefMut for ProbeSession<'_, L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.lp
    }
}

impl<L: StrongBranchLp + ?Sized> Drop for ProbeSession<'_, L> {
    fn drop(&mut self) {
        if self.open {
            self.open = false;
            if let Err(retcode) = self.lp.end_strong_branch() {
                log::warn!("failed to end strong branching: {retcode}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFramework;

    #[test]
    fn begin_end_without_probes_leaves_lp_untouched() {
        let mut lp = MockFramework::new(10.0);
        let before = lp.lp_state();
        let session = ProbeSession::begin(&mut lp).unwrap();
        session.end().unwrap();
        assert_eq!(lp.lp_state(), before);
        assert_eq!(lp.sessions_started(), 1);
        assert!(!lp.in_session());
    }

    #[test]
    fn probes_are_discarded_by_end() {
        let mut lp = MockFramework::new(10.0);
        lp.script(0, ProbeResult::optimal(11.0), ProbeResult::optimal(12.0));
        let before = lp.lp_state();
        let cand = BranchingCandidate::new(0, 0.5);
        let mut session = ProbeSession::begin(&mut lp).unwrap();
        let down = session.probe(&cand, Direction::Down, None).unwrap();
        let up = session.probe(&cand, Direction::Up, Some(100)).unwrap();
        assert_eq!(down.objective, 11.0);
        assert_eq!(up.objective, 12.0);
        assert_eq!(session.n_probes(), 2);
        assert_ne!(session.lp_state(), before);
        session.end().unwrap();
        assert_eq!(lp.lp_state(), before);
    }

    #[test]
    fn dropping_the_session_ends_it() {
        let mut lp = MockFramework::new(10.0);
        {
            let _session = ProbeSession::begin(&mut lp).unwrap();
        }
        assert!(!lp.in_session());
    }

    #[test]
    fn failed_probe_keeps_session_usable() {
        let mut lp = MockFramework::new(10.0);
        lp.script(0, ProbeResult::unstable(10.5), ProbeResult::optimal(12.0));
        let cand = BranchingCandidate::new(0, 0.5);
        let mut session = ProbeSession::begin(&mut lp).unwrap();
        let down = session.probe(&cand, Direction::Down, None).unwrap();
        assert!(!down.valid);
        let up = session.probe(&cand, Direction::Up, None).unwrap();
        assert!(up.valid);
        session.end().unwrap();
    }
}

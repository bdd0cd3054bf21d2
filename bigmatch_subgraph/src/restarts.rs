//! Restart schedules.

use bigmatch_common::RestartPolicy;

/// The `i`-th element (1-based) of the Luby sequence 1, 1, 2, 1, 1, 2, 4, ...
pub(crate) fn luby(i: u64) -> u64 {
    debug_assert!(i >= 1);
    let mut i = i;
    loop {
        let mut k = 1;
        while (1u64 << k) - 1 < i {
            k += 1;
        }
        if i == (1u64 << k) - 1 {
            return 1u64 << (k - 1);
        }
        i -= (1u64 << (k - 1)) - 1;
    }
}

/// Backtrack budget bookkeeping for one solve.
#[derive(Clone, Debug)]
pub(crate) struct RestartSchedule {
    policy: RestartPolicy,
    run: u64,
    remaining: u64,
}

impl RestartSchedule {
    pub(crate) fn new(policy: RestartPolicy) -> Self {
        let mut schedule = Self {
            policy,
            run: 0,
            remaining: 0,
        };
        schedule.next_run();
        schedule
    }

    /// Start the next run with a fresh budget.
    pub(crate) fn next_run(&mut self) {
        self.run += 1;
        self.remaining = match self.policy {
            RestartPolicy::None => 0,
            RestartPolicy::Luby { multiplier } => multiplier.max(1).saturating_mul(luby(self.run)),
        };
    }

    /// Record a backtrack. Returns true when the budget is used up and the
    /// search should restart.
    pub(crate) fn did_backtrack(&mut self) -> bool {
        match self.policy {
            RestartPolicy::None => false,
            RestartPolicy::Luby { .. } => {
                self.remaining = self.remaining.saturating_sub(1);
                self.remaining == 0
            }
        }
    }

    /// Number of completed restarts.
    pub(crate) fn restarts(&self) -> u64 {
        self.run - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luby_sequence_prefix() {
        let prefix: Vec<u64> = (1..=15).map(luby).collect();
        assert_eq!(prefix, vec![1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8]);
    }

    #[test]
    fn no_restarts_never_triggers() {
        let mut schedule = RestartSchedule::new(RestartPolicy::None);
        assert!((0..1000).all(|_| !schedule.did_backtrack()));
    }

    #[test]
    fn luby_budget_grows() {
        let mut schedule = RestartSchedule::new(RestartPolicy::Luby { multiplier: 2 });
        assert!(!schedule.did_backtrack());
        assert!(schedule.did_backtrack());
        schedule.next_run();
        assert!(!schedule.did_backtrack());
        assert!(schedule.did_backtrack());
        schedule.next_run();
        // Third run: 2 * luby(3) = 4 backtracks.
        assert!(!schedule.did_backtrack());
        assert!(!schedule.did_backtrack());
        assert!(!schedule.did_backtrack());
        assert!(schedule.did_backtrack());
        assert_eq!(schedule.restarts(), 2);
    }
}

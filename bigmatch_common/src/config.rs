//! Solver configuration.
//!
//! A [`Config`] fixes the morphism discipline (injectivity, induced), the
//! bigraph modes, which optional filters run, the restart policy, and the
//! time limit. Build one with [`Config::builder`], or start from one of the
//! bigraph presets.

use std::time::Duration;

use tracing::warn;

use crate::Deadline;

/// How many pattern vertices may share a target vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Injectivity {
    /// Homomorphism: any number of pattern vertices may share an image.
    None,
    /// Monomorphism: images are pairwise distinct.
    #[default]
    Injective,
    /// The neighbours of every pattern vertex have pairwise distinct images.
    LocallyInjective,
}

/// Restart policy for find-one searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RestartPolicy {
    /// Never restart.
    #[default]
    None,
    /// Restart after `multiplier * luby(i)` backtracks.
    Luby {
        /// Backtracks per unit of the Luby sequence.
        multiplier: u64,
    },
}

impl RestartPolicy {
    /// Luby multiplier used by the bigraph presets.
    pub const DEFAULT_LUBY_MULTIPLIER: u64 = 660;

    /// Luby restarts with the default multiplier.
    pub fn luby() -> Self {
        Self::Luby {
            multiplier: Self::DEFAULT_LUBY_MULTIPLIER,
        }
    }
}

/// Which link port naming convention the bigraph decoders accept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkScheme {
    /// `L<k>_…` for open ports, `L<k>_…`/`C<k>_…` for any port.
    Prefixed,
    /// `:OPX:…:<k>:…` for open ports, plus `:CLX:<k>:…` for closed ones.
    Delimited,
    /// Try [`LinkScheme::Prefixed`] first, then [`LinkScheme::Delimited`].
    #[default]
    Either,
}

/// Parameters of one solve.
#[derive(Clone, Debug)]
pub struct Config {
    /// Image sharing discipline.
    pub injectivity: Injectivity,
    /// Non-edges of the pattern must map to non-edges of the target.
    pub induced: bool,
    /// Enable the place-graph filters and bigraph degree counters.
    pub bigraph: bool,
    /// Require identity on root indices and link ports.
    pub bigraph_equality_check: bool,
    /// Keep searching after the first solution.
    pub count_solutions: bool,
    /// Run the all-different Hall check during propagation.
    pub supplementals: bool,
    /// Filter by neighbourhood degree sequences at init.
    pub nds: bool,
    /// Restart schedule.
    pub restarts: RestartPolicy,
    /// Seed for value shuffling after restarts.
    pub seed: u64,
    /// Shared time limit.
    pub timeout: Deadline,
    /// Port naming convention used by the equality check.
    pub link_scheme: LinkScheme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            injectivity: Injectivity::Injective,
            induced: false,
            bigraph: false,
            bigraph_equality_check: false,
            count_solutions: false,
            supplementals: true,
            nds: true,
            restarts: RestartPolicy::None,
            seed: 0,
            timeout: Deadline::never(),
            link_scheme: LinkScheme::Either,
        }
    }
}

impl Config {
    /// Start from the default configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Bigraph matching: injective, non-induced, optional filters off.
    /// Enumeration runs without restarts, find-one uses Luby restarts.
    pub fn bigraph_search(all: bool) -> Self {
        Self::builder()
            .bigraph(true)
            .supplementals(false)
            .nds(false)
            .count_solutions(all)
            .restarts(if all {
                RestartPolicy::None
            } else {
                RestartPolicy::luby()
            })
            .build()
    }

    /// Bigraph equality: every mapping is enumerated so the interface
    /// identity can be verified on each.
    pub fn bigraph_equality() -> Self {
        Self::builder()
            .bigraph_equality_check(true)
            .supplementals(false)
            .nds(false)
            .count_solutions(true)
            .build()
    }

    /// Whether images must be pairwise distinct.
    pub fn injective(&self) -> bool {
        self.injectivity == Injectivity::Injective
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the injectivity discipline.
    pub fn injectivity(mut self, injectivity: Injectivity) -> Self {
        self.config.injectivity = injectivity;
        self
    }

    /// Require non-edges to map to non-edges.
    pub fn induced(mut self, induced: bool) -> Self {
        self.config.induced = induced;
        self
    }

    /// Enable bigraph mode.
    pub fn bigraph(mut self, bigraph: bool) -> Self {
        self.config.bigraph = bigraph;
        self
    }

    /// Enable the bigraph equality check.
    pub fn bigraph_equality_check(mut self, check: bool) -> Self {
        self.config.bigraph_equality_check = check;
        self
    }

    /// Count (or enumerate) every solution.
    pub fn count_solutions(mut self, count: bool) -> Self {
        self.config.count_solutions = count;
        self
    }

    /// Toggle the all-different Hall check.
    pub fn supplementals(mut self, supplementals: bool) -> Self {
        self.config.supplementals = supplementals;
        self
    }

    /// Toggle the neighbourhood degree sequence filter.
    pub fn nds(mut self, nds: bool) -> Self {
        self.config.nds = nds;
        self
    }

    /// Set the restart policy.
    pub fn restarts(mut self, restarts: RestartPolicy) -> Self {
        self.config.restarts = restarts;
        self
    }

    /// Seed value shuffling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Share an existing deadline.
    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.config.timeout = deadline;
        self
    }

    /// Expire after `timeout`; zero means no limit.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Deadline::from_timeout(timeout))
    }

    /// Set the port naming convention.
    pub fn link_scheme(mut self, scheme: LinkScheme) -> Self {
        self.config.link_scheme = scheme;
        self
    }

    /// Finish the configuration, normalising inconsistent combinations.
    pub fn build(self) -> Config {
        let mut config = self.config;
        if config.bigraph_equality_check {
            config.bigraph = true;
        }
        if config.count_solutions && config.restarts != RestartPolicy::None {
            warn!("Restarts are disabled when counting solutions");
            config.restarts = RestartPolicy::None;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_injective_non_induced() {
        let config = Config::builder().build();
        assert_eq!(config.injectivity, Injectivity::Injective);
        assert!(config.injective());
        assert!(!config.induced);
        assert!(config.supplementals);
        assert!(config.nds);
        assert_eq!(config.restarts, RestartPolicy::None);
        assert_eq!(config.link_scheme, LinkScheme::Either);
    }

    #[test]
    fn counting_disables_restarts() {
        let config = Config::builder()
            .count_solutions(true)
            .restarts(RestartPolicy::luby())
            .build();
        assert_eq!(config.restarts, RestartPolicy::None);
    }

    #[test]
    fn equality_implies_bigraph() {
        let config = Config::bigraph_equality();
        assert!(config.bigraph);
        assert!(config.bigraph_equality_check);
        assert!(config.count_solutions);
        assert!(!config.nds);
        assert!(!config.supplementals);
    }

    #[test]
    fn bigraph_search_presets() {
        let one = Config::bigraph_search(false);
        assert_eq!(one.restarts, RestartPolicy::luby());
        assert!(!one.count_solutions);

        let all = Config::bigraph_search(true);
        assert_eq!(all.restarts, RestartPolicy::None);
        assert!(all.count_solutions);
    }

    #[test]
    fn zero_timeout_is_unlimited() {
        let config = Config::builder().timeout(Duration::ZERO).build();
        assert_eq!(config.timeout.remaining(), None);
    }
}

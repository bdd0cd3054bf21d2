use std::time::Duration;

use bigmatch_common::{Config, Injectivity, LinkScheme, RestartPolicy};
use clap::Parser;

use crate::driver::Mode;

/// Bigraph matcher - reads `<pattern> <target> [all|equal|count]` requests
/// from standard input, one per line
#[derive(Parser, Debug, Clone)]
#[command(name = "bigmatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Abort each solve after this many milliseconds (0 means no limit)
    #[arg(long, default_value_t = 0)]
    pub timeout_ms: u64,

    /// Require non-edges to map to non-edges
    #[arg(long, default_value_t = false)]
    pub induced: bool,

    /// Skip the neighbourhood degree sequence filter
    #[arg(long, default_value_t = false)]
    pub no_nds: bool,

    /// Skip the all-different Hall check during propagation
    #[arg(long, default_value_t = false)]
    pub no_supplementals: bool,

    /// How pattern vertices may share images
    #[arg(long, value_enum, default_value = "injective")]
    pub injectivity: InjectivityArg,

    /// Seed for value shuffling after restarts
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Port naming convention of LINK vertices
    #[arg(long, value_enum, default_value = "either")]
    pub link_scheme: LinkSchemeArg,
}

impl Default for Args {
    fn default() -> Self {
        Args::parse_from(["bigmatch"])
    }
}

impl Args {
    /// Convert command-line arguments into the configuration of one request.
    pub fn to_config(&self, mode: Mode) -> Config {
        let builder = match mode {
            Mode::One => Config::builder()
                .bigraph(true)
                .restarts(RestartPolicy::luby()),
            Mode::All | Mode::Count => Config::builder().bigraph(true).count_solutions(true),
            Mode::Equal => Config::builder()
                .bigraph_equality_check(true)
                .count_solutions(true),
        };

        builder
            .injectivity(self.injectivity.into())
            .induced(self.induced)
            .nds(!self.no_nds)
            .supplementals(!self.no_supplementals)
            .seed(self.seed)
            .timeout(Duration::from_millis(self.timeout_ms))
            .link_scheme(self.link_scheme.into())
            .build()
    }
}

/// Command-line argument wrapper for Injectivity
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum InjectivityArg {
    /// Any vertex map (homomorphism)
    #[value(name = "none")]
    None,
    /// Distinct pattern vertices have distinct images
    #[value(name = "injective")]
    Injective,
    /// Neighbours of each pattern vertex have distinct images
    #[value(name = "locally-injective")]
    LocallyInjective,
}

impl From<InjectivityArg> for Injectivity {
    fn from(arg: InjectivityArg) -> Self {
        match arg {
            InjectivityArg::None => Injectivity::None,
            InjectivityArg::Injective => Injectivity::Injective,
            InjectivityArg::LocallyInjective => Injectivity::LocallyInjective,
        }
    }
}

/// Command-line argument wrapper for LinkScheme
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LinkSchemeArg {
    /// `L<k>_name` and `C<k>_name`
    #[value(name = "prefixed")]
    Prefixed,
    /// `:OPX:name:<k>:` and `:CLX:<k>:`
    #[value(name = "delimited")]
    Delimited,
    /// Prefixed first, then delimited
    #[value(name = "either")]
    Either,
}

impl From<LinkSchemeArg> for LinkScheme {
    fn from(arg: LinkSchemeArg) -> Self {
        match arg {
            LinkSchemeArg::Prefixed => LinkScheme::Prefixed,
            LinkSchemeArg::Delimited => LinkScheme::Delimited,
            LinkSchemeArg::Either => LinkScheme::Either,
        }
    }
}

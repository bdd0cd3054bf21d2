//! Opt-in wall-clock accounting for solver phases.
//!
//! With the `profiling` feature a [`Timer`] adds its lifetime to a global
//! table keyed by label; [`report`] logs the table. Without the feature
//! everything compiles to nothing.

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;
    use std::time::{Duration, Instant};

    use dashmap::DashMap;
    use tracing::info;

    type Count = u64;
    type TotalNanos = u128;

    static STATS: OnceLock<DashMap<&'static str, (Count, TotalNanos)>> = OnceLock::new();

    #[inline]
    fn stats() -> &'static DashMap<&'static str, (Count, TotalNanos)> {
        STATS.get_or_init(DashMap::new)
    }

    pub struct Timer {
        label: &'static str,
        start: Instant,
    }

    impl Timer {
        #[inline]
        pub fn new(label: &'static str) -> Self {
            Timer {
                label,
                start: Instant::now(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            record(self.label, self.start.elapsed());
        }
    }

    pub fn record(label: &'static str, dur: Duration) {
        let mut entry = stats().entry(label).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += dur.as_nanos();
    }

    pub fn report() {
        let mut rows: Vec<(&'static str, Count, TotalNanos)> = stats()
            .iter()
            .map(|kv| (*kv.key(), kv.value().0, kv.value().1))
            .collect();

        // heaviest first
        rows.sort_by(|a, b| b.2.cmp(&a.2));

        info!("bigmatch solver profile");
        for (label, count, total_ns) in rows {
            let avg_ns = if count == 0 {
                0.0
            } else {
                total_ns as f64 / count as f64
            };
            info!(
                "{:<40} calls={:<10} total={:>9.3} ms avg={:>12.1} ns",
                label,
                count,
                total_ns as f64 / 1_000_000.0,
                avg_ns
            );
        }
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    use std::time::Duration;

    #[derive(Clone, Copy)]
    pub struct Timer;

    impl Timer {
        #[inline]
        pub fn new(_: &'static str) -> Self {
            Timer
        }
    }

    pub fn record(_: &'static str, _: Duration) {}
    pub fn report() {}
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(not(feature = "profiling"))]
pub use disabled::*;

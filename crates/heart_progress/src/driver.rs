//! Periodic value driver for a [`HeartProgress`].

use std::{ops::RangeInclusive, time::Duration};

use gpui::{App, Task, WeakEntity};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

use crate::{HeartProgress, config::DriverConfig};

/// Produces the next value to show.
pub trait ValueSource {
    fn next_value(&mut self) -> i32;
}

impl<F> ValueSource for F
where
    F: FnMut() -> i32,
{
    fn next_value(&mut self) -> i32 {
        self()
    }
}

/// Uniformly random heart rates.
pub struct RandomHeartRate {
    rng: StdRng,
    range: RangeInclusive<i32>,
}

impl Default for RandomHeartRate {
    fn default() -> Self {
        Self::new(0..=300)
    }
}

impl RandomHeartRate {
    /// Panics if `range` is empty.
    pub fn new(range: RangeInclusive<i32>) -> Self {
        Self::with_rng(StdRng::from_entropy(), range)
    }

    /// A reproducible sequence of values, panics if `range` is empty.
    pub fn seeded(range: RangeInclusive<i32>, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), range)
    }

    fn with_rng(rng: StdRng, range: RangeInclusive<i32>) -> Self {
        assert!(
            !range.is_empty(),
            "heart rate range {}..={} is empty",
            range.start(),
            range.end()
        );
        Self { rng, range }
    }

    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(config.min..=config.max)
    }
}

impl ValueSource for RandomHeartRate {
    fn next_value(&mut self) -> i32 {
        self.rng.gen_range(self.range.clone())
    }
}

/// Pushes a new value into a [`HeartProgress`] on a fixed interval.
///
/// The updates run as a GPUI task owned by the driver: [`Self::stop`] or
/// dropping the driver cancels it. The task also ends by itself once the
/// target view has been released.
pub struct HeartRateDriver {
    interval: Duration,
    task: Option<Task<()>>,
}

impl Default for HeartRateDriver {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl HeartRateDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start pushing values from `source` into `target`, replacing any
    /// running updates.
    pub fn start(
        &mut self,
        target: WeakEntity<HeartProgress>,
        mut source: impl ValueSource + 'static,
        cx: &mut App,
    ) {
        let interval = self.interval;
        tracing::debug!("heart rate driver started, interval: {:?}", interval);

        self.task = Some(cx.spawn(async move |cx| {
            loop {
                cx.background_executor().timer(interval).await;

                let value = source.next_value();
                let result = target.update(cx, |this, cx| this.set_value(value, cx));
                if result.is_err() {
                    tracing::debug!("heart progress released, heart rate driver finished");
                    break;
                }
            }
        }));
    }

    /// Cancel the updates, the last value stays on the view.
    pub fn stop(&mut self) {
        if self.task.take().is_some() {
            tracing::debug!("heart rate driver stopped");
        }
    }
}

//! Countdown to the wedding day.
//!
//! [`Countdown::between`] is the pure computation; [`countdown_ticks`] turns
//! it into a once-per-second stream that ends as soon as the target is
//! reached.

use chrono::{DateTime, Utc};
use futures::Stream;
use futures::stream;
use std::fmt;
use std::time::Duration;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Remaining time until the event, clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub finished: bool,
}

impl Countdown {
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = (target - now).num_seconds().max(0);

        Self {
            days: remaining / SECONDS_PER_DAY,
            hours: (remaining % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (remaining % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: remaining % SECONDS_PER_MINUTE,
            finished: now >= target,
        }
    }

    pub fn zero() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            finished: true,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Emits one [`Countdown`] per second, the first one immediately.
///
/// The stream ends right after yielding the first finished value, so the
/// periodic tick stops at the target.
pub fn countdown_ticks<C: Clock>(target: DateTime<Utc>, clock: C) -> impl Stream<Item = Countdown> {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    stream::unfold(
        (interval, clock, false),
        move |(mut interval, clock, done)| async move {
            if done {
                return None;
            }

            interval.tick().await;
            let countdown = Countdown::between(target, clock.now());
            let finished = countdown.finished;

            Some((countdown, (interval, clock, finished)))
        },
    )
}

//! Time-driven interpolation.
//!
//! The host event loop drives every animation by calling [`Animated::tick`]
//! once per frame. Nothing here sleeps or spawns; a tween is just a start and
//! end value plus a time window.

use crate::color::Argb;
use std::time::{Duration, Instant};

pub trait Lerp: Copy {
    fn lerp(self, target: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }
}

impl<const N: usize> Lerp for [f64; N] {
    fn lerp(self, target: Self, t: f64) -> Self {
        let mut out = self;
        for (value, end) in out.iter_mut().zip(target) {
            *value = value.lerp(end, t);
        }
        out
    }
}

impl Lerp for Argb {
    fn lerp(self, target: Self, t: f64) -> Self {
        Argb::lerp(self, target, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tween<T> {
    Idle,
    Running {
        from: T,
        to: T,
        started: Instant,
        duration: Duration,
    },
}

impl<T: Lerp> Tween<T> {
    /// Linear progress in `[0, 1]` at `now`.
    fn fraction(started: Instant, duration: Duration, now: Instant) -> f64 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value at `now` and whether the window has elapsed.
    pub fn sample(&self, now: Instant) -> Option<(T, bool)> {
        match *self {
            Self::Idle => None,
            Self::Running {
                from,
                to,
                started,
                duration,
            } => {
                let t = Self::fraction(started, duration, now);
                if t >= 1.0 {
                    Some((to, true))
                } else {
                    Some((from.lerp(to, t), false))
                }
            }
        }
    }
}

/// A value with at most one tween in flight.
#[derive(Debug, Clone, Copy)]
pub struct Animated<T> {
    value: T,
    tween: Tween<T>,
    duration: Duration,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T, duration: Duration) -> Self {
        Self {
            value,
            tween: Tween::Idle,
            duration,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Where the value is heading, or the value itself when idle.
    pub fn target(&self) -> T {
        match self.tween {
            Tween::Running { to, .. } => to,
            Tween::Idle => self.value,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.tween, Tween::Running { .. })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Jumps straight to `value`, dropping any tween in flight.
    pub fn snap_to(&mut self, value: T) {
        self.tween = Tween::Idle;
        self.value = value;
    }

    /// Starts a tween from the current on-screen value to `target`.
    ///
    /// A tween already in flight is sampled at `now` and replaced, so two
    /// requests never blend into each other.
    pub fn animate_to(&mut self, target: T, now: Instant) {
        if self.is_running() {
            log::debug!("superseding running tween");
            self.tick(now);
        }
        self.tween = Tween::Running {
            from: self.value,
            to: target,
            started: now,
            duration: self.duration,
        };
        self.tick(now);
    }

    pub fn set(&mut self, target: T, animated: bool, now: Instant) {
        if animated {
            self.animate_to(target, now);
        } else {
            self.snap_to(target);
        }
    }

    /// Advances the tween to `now`; returns whether it is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.tween.sample(now) {
            None => false,
            Some((value, finished)) => {
                self.value = value;
                if finished {
                    self.tween = Tween::Idle;
                }
                !finished
            }
        }
    }
}

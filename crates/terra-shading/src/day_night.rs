//! Day/night cycle: simulated clock, sun direction, ambient curve.
//!
//! Time of day is normalized to `[0.0, 1.0)`. The sun circles the planet
//! in the XZ plane, raised slightly above it, completing one orbit per
//! simulated day. Ambient light peaks a quarter of the way through the
//! cycle and bottoms out at three quarters.

use std::f32::consts::TAU;

use glam::Vec3;
use tracing::trace;

use crate::light::LightDirection;

/// Height of the sun above the orbital plane, before normalization.
const SUN_ELEVATION: f32 = 0.2;
/// Ambient level at the darkest point of the cycle.
const MIN_AMBIENT: f32 = 0.2;
/// Ambient gained between the darkest and brightest point.
const AMBIENT_SWING: f32 = 0.2;

/// Simulated time tracking for the day/night cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct DayNightClock {
    /// Current time of day, normalized `[0.0, 1.0)`.
    pub time_of_day: f64,
    /// Duration of one full day in real-time seconds.
    pub day_duration_seconds: f64,
    /// Whether the cycle is paused.
    pub paused: bool,
}

impl DayNightClock {
    /// Create a clock at `start` (wrapped into `[0, 1)`).
    pub fn new(day_duration_seconds: f64, start: f64) -> Self {
        Self {
            time_of_day: start.rem_euclid(1.0),
            day_duration_seconds,
            paused: false,
        }
    }

    /// Advance the clock by `dt` real-time seconds.
    ///
    /// A non-positive or non-finite day duration leaves the clock unchanged.
    pub fn tick(&mut self, dt: f64) {
        let duration = self.day_duration_seconds;
        if self.paused || duration.is_nan() || duration <= 0.0 || !dt.is_finite() {
            return;
        }
        let day_fraction = dt / duration;
        self.time_of_day = (self.time_of_day + day_fraction).rem_euclid(1.0);
    }

    /// Time of day in hours (0-24).
    pub fn hours(&self) -> f64 {
        self.time_of_day * 24.0
    }
}

fn orbit_angle(time_of_day: f64) -> f32 {
    (time_of_day.rem_euclid(1.0) as f32) * TAU
}

/// Sun direction for a time of day. Always unit length.
pub fn sun_direction_from_time(time_of_day: f64) -> LightDirection {
    let angle = orbit_angle(time_of_day);
    // Length is at least SUN_ELEVATION, so normalization always succeeds.
    LightDirection::from_unnormalized(Vec3::new(angle.cos(), SUN_ELEVATION, angle.sin()))
        .unwrap_or(LightDirection::POSITIVE_X)
}

/// Ambient intensity for a time of day, in `[0.2, 0.4]`.
pub fn ambient_intensity(time_of_day: f64) -> f32 {
    let day_factor = (orbit_angle(time_of_day).sin() + 1.0) * 0.5;
    MIN_AMBIENT + AMBIENT_SWING * day_factor
}

/// Clock plus the lighting values derived from it, refreshed every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct DayNightState {
    /// The simulated clock.
    pub clock: DayNightClock,
    /// Current sun direction.
    pub light: LightDirection,
    /// Current ambient intensity.
    pub ambient: f32,
}

impl DayNightState {
    /// State for a day of `day_duration_seconds`, starting at `start`.
    pub fn new(day_duration_seconds: f64, start: f64) -> Self {
        let clock = DayNightClock::new(day_duration_seconds, start);
        Self {
            light: sun_direction_from_time(clock.time_of_day),
            ambient: ambient_intensity(clock.time_of_day),
            clock,
        }
    }

    /// Advance the clock by `dt` seconds and recompute the derived values.
    pub fn tick(&mut self, dt: f64) {
        self.clock.tick(dt);
        self.light = sun_direction_from_time(self.clock.time_of_day);
        self.ambient = ambient_intensity(self.clock.time_of_day);
        trace!(
            time_of_day = self.clock.time_of_day,
            ambient = self.ambient,
            "day/night tick"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_direction_is_unit_all_day() {
        for i in 0..1000 {
            let t = i as f64 / 1000.0;
            let dir = sun_direction_from_time(t).as_vec3();
            assert!((dir.length() - 1.0).abs() < 1e-5, "t={t}: {dir}");
        }
    }

    #[test]
    fn test_sun_completes_one_orbit_per_day() {
        let start = sun_direction_from_time(0.0).as_vec3();
        let end = sun_direction_from_time(1.0).as_vec3();
        assert!((start - end).length() < 1e-5);
        let half = sun_direction_from_time(0.5).as_vec3();
        assert!(half.x < -0.9, "half a day later the sun is opposite: {half}");
    }

    #[test]
    fn test_ambient_range() {
        assert!((ambient_intensity(0.25) - 0.4).abs() < 1e-6);
        assert!((ambient_intensity(0.75) - 0.2).abs() < 1e-6);
        for i in 0..100 {
            let a = ambient_intensity(i as f64 / 100.0);
            assert!((0.2..=0.4).contains(&a));
        }
    }

    #[test]
    fn test_cycle_duration_is_configurable() {
        let mut fast = DayNightClock::new(60.0, 0.5);
        let mut slow = DayNightClock::new(3600.0, 0.5);
        fast.tick(30.0);
        slow.tick(30.0);
        assert!(fast.time_of_day.abs() < 0.01, "fast clock: {}", fast.time_of_day);
        assert!((slow.time_of_day - 0.508).abs() < 0.01, "slow clock: {}", slow.time_of_day);
    }

    #[test]
    fn test_clock_paused() {
        let mut clock = DayNightClock::new(1200.0, 0.3);
        clock.paused = true;
        clock.tick(100.0);
        assert_eq!(clock.time_of_day, 0.3);
    }

    #[test]
    fn test_zero_duration_does_not_advance() {
        let mut clock = DayNightClock::new(0.0, 0.3);
        clock.tick(10.0);
        assert_eq!(clock.time_of_day, 0.3);
    }

    #[test]
    fn test_start_wraps() {
        assert!((DayNightClock::new(10.0, 1.25).time_of_day - 0.25).abs() < 1e-12);
        assert!((DayNightClock::new(10.0, -0.25).time_of_day - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_hours_conversion() {
        let clock = DayNightClock::new(1200.0, 0.5);
        assert!((clock.hours() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_state_tick_updates_light() {
        let mut state = DayNightState::new(100.0, 0.0);
        let before = state.light;
        state.tick(25.0);
        assert!((state.clock.time_of_day - 0.25).abs() < 1e-9);
        assert_ne!(state.light, before);
        assert_eq!(state.ambient, ambient_intensity(0.25));
    }

    #[test]
    fn test_lighting_changes_smoothly() {
        let mut state = DayNightState::new(1200.0, 0.0);
        let mut previous = state.light.as_vec3();
        for frame in 0..600 {
            state.tick(1.0 / 60.0);
            let current = state.light.as_vec3();
            assert!((current - previous).length() < 0.01, "frame {frame} jumped");
            previous = current;
        }
    }
}

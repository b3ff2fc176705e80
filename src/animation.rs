use std::time::Duration;

/// A css-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Fast start, long slow crawl into the pointer.
    pub const WHEEL: Self = Self::new(0.12, 0.01, 0.0, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Progress along the curve for `x` in `0.0..=1.0`.
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        // newton first, bisection if the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < 1e-7 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t = (t - err / d).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let v = Self::sample(self.x1, self.x2, t);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

/// What the wheel looks like while it turns toward a spin's target.
///
/// Only the picture moves; the winner was settled when the spin started.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpinAnimation {
    from: f64,
    to: f64,
    started: f64,
    duration: f64,
    curve: CubicBezier,
}

impl Default for SpinAnimation {
    fn default() -> Self {
        Self::resting(0.0)
    }
}

impl SpinAnimation {
    pub const fn resting(rotation: f64) -> Self {
        Self {
            from: rotation,
            to: rotation,
            started: 0.0,
            duration: 0.0,
            curve: CubicBezier::WHEEL,
        }
    }

    /// Starts turning from `from` to `to`. `now` is in seconds, on whatever
    /// clock is later passed to [`SpinAnimation::rotation_at`].
    pub fn start(&mut self, from: f64, to: f64, now: f64, duration: Duration) {
        *self = Self {
            from,
            to,
            started: now,
            duration: duration.as_secs_f64(),
            curve: self.curve,
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        now < self.started + self.duration
    }

    pub fn rotation_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }

        let x = (now - self.started) / self.duration;
        self.from + (self.to - self.from) * self.curve.ease(x)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{CubicBezier, SpinAnimation};

    #[test]
    fn curve_endpoints() {
        let curve = CubicBezier::WHEEL;
        assert_eq!(curve.ease(-1.0), 0.0);
        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);
        assert_eq!(curve.ease(2.0), 1.0);
    }

    #[test]
    fn curve_is_monotonic() {
        let curve = CubicBezier::WHEEL;
        let mut last = 0.0;
        for i in 1..=1000 {
            let y = curve.ease(i as f64 / 1000.0);
            assert!(y + 1e-6 >= last, "{i}: {y} < {last}");
            last = y;
        }
    }

    #[test]
    fn linear_curve() {
        let curve = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for x in [0.1, 0.25, 0.5, 0.9] {
            assert!((curve.ease(x) - x).abs() < 1e-4);
        }
    }

    #[test]
    fn wheel_front_loads_the_motion() {
        // most of the distance is covered in the first half
        assert!(CubicBezier::WHEEL.ease(0.5) > 0.85);
    }

    #[test]
    fn animation_bounds() {
        let mut anim = SpinAnimation::resting(90.0);
        assert_eq!(anim.rotation_at(100.0), 90.0);

        anim.start(90.0, 6030.0, 10.0, Duration::from_secs(15));
        assert!(anim.is_animating(10.0));
        assert_eq!(anim.rotation_at(9.0), 90.0);
        assert_eq!(anim.rotation_at(10.0), 90.0);

        let mid = anim.rotation_at(17.5);
        assert!(mid > 90.0 && mid < 6030.0);

        assert!(!anim.is_animating(25.0));
        assert_eq!(anim.rotation_at(25.0), 6030.0);
        assert_eq!(anim.rotation_at(40.0), 6030.0);
    }
}

use std::time::Duration;

use crate::{timer::Deferred, NameList, RequestPaint};

const FULL_TURN: f64 = 360.0;

/// Where the spin's randomness comes from.
pub trait SpinRng {
    /// A uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// `min` plus a uniform draw from `0..choices`.
    fn extra_turns(&mut self, min: u32, choices: u32) -> u32;
}

impl SpinRng for fastrand::Rng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.usize(0..len)
    }

    fn extra_turns(&mut self, min: u32, choices: u32) -> u32 {
        min.saturating_add(self.u32(0..choices.max(1)))
    }
}

/// How long a spin takes and how many whole turns it adds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpinRules {
    pub duration: Duration,
    pub min_extra_turns: u32,
    pub extra_turn_choices: u32,
}

impl Default for SpinRules {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(15),
            min_extra_turns: 15,
            extra_turn_choices: 5,
        }
    }
}

/// The center of slice `index` on an unrotated wheel of `len` slices.
pub fn center_angle(index: usize, len: usize) -> f64 {
    let span = FULL_TURN / len as f64;
    index as f64 * span + span / 2.0
}

/// Picks a slice and works out the rotation that parks it under the pointer.
///
/// The wheel first finishes its current partial turn, then adds the extra
/// whole turns, then backs the chosen slice's center up to 0 degrees. Every
/// term is positive, so the wheel only ever turns forward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub center_angle: f64,
    pub extra_turns: u32,
    pub from: f64,
    pub target: f64,
}

impl Selection {
    pub fn draw(rotation: f64, len: usize, rules: &SpinRules, rng: &mut impl SpinRng) -> Self {
        assert!(len != 0, "cannot select from an empty wheel");

        let index = rng.pick_index(len).min(len - 1);
        let center_angle = center_angle(index, len);
        let current = rotation % FULL_TURN;
        let extra_turns = rng.extra_turns(rules.min_extra_turns, rules.extra_turn_choices);

        let target = rotation
            + (FULL_TURN - current)
            + extra_turns as f64 * FULL_TURN
            + (FULL_TURN - center_angle);

        Self {
            index,
            center_angle,
            extra_turns,
            from: rotation,
            target,
        }
    }
}

/// A spin that has been started, with the winner already fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinOutcome {
    pub selection: Selection,
    /// The winner's name at the moment the spin started.
    pub name: String,
}

impl SpinOutcome {
    pub const fn index(&self) -> usize {
        self.selection.index
    }
}

/// Receives the winner once a spin has run its full duration.
pub trait ResultNotifier {
    fn notify(&mut self, outcome: &SpinOutcome);
}

impl ResultNotifier for Vec<SpinOutcome> {
    fn notify(&mut self, outcome: &SpinOutcome) {
        self.push(outcome.clone())
    }
}

/// The wheel's names and its cumulative rotation.
pub struct Wheel {
    names: NameList,
    rotation: f64,
    rules: SpinRules,
    pending: Option<Deferred<SpinOutcome>>,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(SpinRules::default())
    }
}

impl Wheel {
    pub const fn new(rules: SpinRules) -> Self {
        Self {
            names: NameList::new(),
            rotation: 0.0,
            rules,
            pending: None,
        }
    }

    pub const fn names(&self) -> &NameList {
        &self.names
    }

    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    pub const fn rules(&self) -> &SpinRules {
        &self.rules
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && !self.names.is_empty()
    }

    pub fn add_name(&mut self, text: &str) -> bool {
        self.names.add(text)
    }

    pub fn remove_name(&mut self, index: usize) -> Option<String> {
        self.names.remove(index)
    }

    /// Starts a spin, unless one is running or there is nobody to pick.
    ///
    /// The winner is chosen and its name copied right away; `repaint` is
    /// poked when the spin's duration has passed.
    pub fn spin<R>(&mut self, rng: &mut impl SpinRng, repaint: R) -> Option<SpinOutcome>
    where
        R: RequestPaint + 'static,
    {
        if !self.can_spin() {
            log::trace!(
                "ignoring spin (spinning: {}, names: {})",
                self.is_spinning(),
                self.names.len()
            );
            return None;
        }

        let selection = Selection::draw(self.rotation, self.names.len(), &self.rules, rng);
        let name = self.names.get(selection.index)?.to_string();
        let outcome = SpinOutcome { selection, name };

        log::info!(
            "spinning to {:.1} ({} extra turns), landing on #{}",
            selection.target,
            selection.extra_turns,
            selection.index
        );

        self.rotation = selection.target;
        self.pending
            .replace(Deferred::spawn(self.rules.duration, outcome.clone(), repaint));

        Some(outcome)
    }

    /// Delivers the result if the running spin has finished.
    pub fn poll(&mut self, notifier: &mut dyn ResultNotifier) -> bool {
        let outcome = match self.pending.as_mut().and_then(Deferred::try_fire) {
            Some(outcome) => outcome,
            None => return false,
        };
        self.finish(outcome, notifier);
        true
    }

    /// Like [`Wheel::poll`], but waits up to `timeout` for the spin to end.
    pub fn poll_timeout(&mut self, timeout: Duration, notifier: &mut dyn ResultNotifier) -> bool {
        let outcome = match self
            .pending
            .as_mut()
            .and_then(|pending| pending.wait_timeout(timeout))
        {
            Some(outcome) => outcome,
            None => return false,
        };
        self.finish(outcome, notifier);
        true
    }

    fn finish(&mut self, outcome: SpinOutcome, notifier: &mut dyn ResultNotifier) {
        self.pending.take();
        log::info!("picked '{}'", outcome.name);
        notifier.notify(&outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::NoopRepaint;

    const EPSILON: f64 = 1e-6;
    const WAIT: Duration = Duration::from_secs(5);

    struct Scripted {
        index: usize,
        turns: u32,
    }

    impl SpinRng for Scripted {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.index
        }

        fn extra_turns(&mut self, min: u32, _choices: u32) -> u32 {
            min + self.turns
        }
    }

    fn quick() -> SpinRules {
        SpinRules {
            duration: Duration::from_millis(10),
            ..SpinRules::default()
        }
    }

    fn wheel_of(names: &[&str], rules: SpinRules) -> Wheel {
        let mut wheel = Wheel::new(rules);
        for name in names {
            wheel.add_name(name);
        }
        wheel
    }

    #[test]
    fn lands_on_sara() {
        let mut wheel = wheel_of(&["Ali", "Sara", "Omar"], quick());
        let mut rng = Scripted { index: 1, turns: 0 };

        let outcome = wheel.spin(&mut rng, NoopRepaint).unwrap();
        assert_eq!(outcome.name, "Sara");
        assert_eq!(outcome.selection.extra_turns, 15);
        assert!((outcome.selection.center_angle - 180.0).abs() < EPSILON);
        assert!((outcome.selection.target % 360.0 - 180.0).abs() < EPSILON);
        // a full turn back to zero, 15 more, then half a turn
        assert!((outcome.selection.target - 16.5 * 360.0).abs() < EPSILON);
        assert!(wheel.is_spinning());

        let mut results = vec![];
        assert!(wheel.poll_timeout(WAIT, &mut results));
        assert!(!wheel.is_spinning());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Sara");
    }

    #[test]
    fn second_spin_is_dropped() {
        let mut wheel = wheel_of(&["Ali", "Sara", "Omar"], SpinRules::default());
        let mut rng = fastrand::Rng::with_seed(7);

        assert!(wheel.spin(&mut rng, NoopRepaint).is_some());
        let rotation = wheel.rotation();

        assert!(wheel.spin(&mut rng, NoopRepaint).is_none());
        assert_eq!(wheel.rotation(), rotation);
        assert!(wheel.is_spinning());

        let mut results = vec![];
        assert!(!wheel.poll(&mut results));
        assert!(results.is_empty());
    }

    #[test]
    fn empty_wheel_does_not_spin() {
        let mut wheel = Wheel::new(quick());
        let mut rng = fastrand::Rng::with_seed(1);

        assert!(wheel.spin(&mut rng, NoopRepaint).is_none());
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn winner_survives_being_removed() {
        let mut wheel = wheel_of(&["Ali", "Sara", "Omar"], quick());
        let mut rng = Scripted { index: 1, turns: 2 };

        wheel.spin(&mut rng, NoopRepaint).unwrap();
        assert_eq!(wheel.remove_name(1).as_deref(), Some("Sara"));
        wheel.add_name("Huda");

        let mut results = vec![];
        assert!(wheel.poll_timeout(WAIT, &mut results));
        assert_eq!(results[0].name, "Sara");
        assert_eq!(results[0].index(), 1);
        assert_eq!(wheel.names().as_slice(), ["Ali", "Omar", "Huda"]);
    }

    #[test]
    fn pointer_always_hits_the_reported_slice() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let rules = SpinRules::default();
        let mut rotation = 0.0;

        for len in (1..=12).cycle().take(500) {
            let selection = Selection::draw(rotation, len, &rules, &mut rng);
            assert!(selection.index < len);
            assert!((15..=19).contains(&selection.extra_turns));
            assert!(selection.target > rotation);

            let expected = 360.0 - center_angle(selection.index, len);
            let landed = selection.target % 360.0;
            assert!((landed - expected).abs() < 1e-6, "{landed} != {expected}");

            rotation = selection.target;
        }
    }

    #[test]
    fn rotation_never_goes_backwards() {
        let mut wheel = wheel_of(&["Ali", "Sara", "Omar", "Huda", "Zaid"], quick());
        let mut rng = fastrand::Rng::with_seed(42);
        let mut results = vec![];
        let mut last = wheel.rotation();

        for _ in 0..20 {
            wheel.spin(&mut rng, NoopRepaint).unwrap();
            assert!(wheel.rotation() >= last);
            last = wheel.rotation();
            assert!(wheel.poll_timeout(WAIT, &mut results));
        }

        assert_eq!(results.len(), 20);
        for pair in results.windows(2) {
            assert!(pair[1].selection.from >= pair[0].selection.from);
            assert_eq!(pair[1].selection.from, pair[0].selection.target);
        }
    }

    #[test]
    fn seeded_spins_repeat() {
        let spin = |seed| {
            let mut wheel = wheel_of(&["Ali", "Sara", "Omar"], SpinRules::default());
            let mut rng = fastrand::Rng::with_seed(seed);
            wheel.spin(&mut rng, NoopRepaint).unwrap()
        };

        assert_eq!(spin(99), spin(99));
    }

    #[test]
    fn extra_turns_cover_the_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut seen = [false; 5];
        for _ in 0..1000 {
            let turns = rng.extra_turns(15, 5);
            seen[(turns - 15) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn extra_turns_saturate() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..100 {
            assert_eq!(rng.extra_turns(u32::MAX, 5), u32::MAX);
        }
    }
}

use proptest::prelude::*;
use suncycle::Rgb;
use suncycle::cycle::{Ramp, RampStatus, RotationAccumulator};

fn value_strategy() -> impl Strategy<Value = f64> {
    -10.0..10.0
}

fn duration_strategy() -> impl Strategy<Value = f64> {
    0.1..100.0
}

fn channel_strategy() -> impl Strategy<Value = Rgb> {
    (0.0..=1.0, 0.0..=1.0, 0.0..=1.0).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

proptest! {
    /// A single step lands on the linear interpolation, or exactly on the target
    /// once the step covers the whole duration.
    #[test]
    fn step_matches_linear_interpolation(
        from in value_strategy(),
        to in value_strategy(),
        duration in duration_strategy(),
        fraction in 0.0..1.5f64,
    ) {
        let mut ramp = Ramp::new(from, duration);
        ramp.start(from, to);
        let elapsed = duration * fraction;
        let status = ramp.step(elapsed);

        if elapsed >= duration {
            prop_assert_eq!(status, RampStatus::Completed);
            prop_assert_eq!(ramp.current(), to);
        } else {
            prop_assert_eq!(status, RampStatus::Running);
            let expected = from + (to - from) * (elapsed / duration);
            prop_assert!((ramp.current() - expected).abs() < 1e-9);
        }
    }

    /// Stepping converges monotonically and finishes exactly on the target.
    #[test]
    fn steps_converge_monotonically(
        from in value_strategy(),
        to in value_strategy(),
        duration in duration_strategy(),
        steps in prop::collection::vec(0.0..5.0f64, 1..200),
    ) {
        let mut ramp = Ramp::new(from, duration);
        ramp.start(from, to);

        let mut distance = (to - from).abs();
        let mut total = 0.0;
        for step in steps {
            total += step;
            let status = ramp.step(step);
            let next = (to - ramp.current()).abs();
            prop_assert!(next <= distance + 1e-12);
            distance = next;

            if status == RampStatus::Completed {
                prop_assert_eq!(ramp.current(), to);
                prop_assert!(!ramp.is_running());
                break;
            }
        }

        if total >= duration {
            prop_assert_eq!(ramp.current(), to);
        }
    }

    /// Color ramps interpolate every channel independently and never leave the
    /// box spanned by start and target.
    #[test]
    fn color_ramp_stays_between_endpoints(
        from in channel_strategy(),
        to in channel_strategy(),
        duration in duration_strategy(),
        fraction in 0.0..1.0f64,
    ) {
        let mut ramp = Ramp::new(from, duration);
        ramp.start(from, to);
        ramp.step(duration * fraction);

        let current = ramp.current().channels();
        for ((c, a), b) in current.iter().zip(from.channels()).zip(to.channels()) {
            prop_assert!(*c >= a.min(b) - 1e-12 && *c <= a.max(b) + 1e-12);
        }
    }

    /// Whatever the clock reports, the angle never decreases and the buffer never
    /// goes negative.
    #[test]
    fn rotation_never_runs_backwards(
        deltas in prop::collection::vec(prop::num::f64::ANY, 1..100),
        speed in prop::num::f64::ANY,
        threshold in 0.0..5.0f64,
    ) {
        let mut rotation = RotationAccumulator::new(threshold);
        let mut angle = rotation.rotated_angle();
        for delta in deltas {
            let step = rotation.advance(delta, speed, 1.0);
            prop_assert!(step >= 0.0 && step.is_finite());
            rotation.take_update();
            prop_assert!(rotation.rotated_angle() >= angle);
            prop_assert!(rotation.update_buffer() >= 0.0);
            angle = rotation.rotated_angle();
        }
    }
}

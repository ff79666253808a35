use std::panic::{AssertUnwindSafe, catch_unwind};

use super::*;
use crate::foundation::error::MemeError;

#[derive(Default)]
struct Recorder {
    transform: Affine,
    seen: Vec<Affine>,
}

impl Recorder {
    fn draw(&mut self) {
        self.seen.push(self.transform);
    }
}

impl Transformable for Recorder {
    fn current_transform(&self) -> Affine {
        self.transform
    }

    fn set_current_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }
}

fn assert_affine_eq(a: Affine, b: Affine) {
    for (x, y) in a.as_coeffs().iter().zip(b.as_coeffs()) {
        assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
    }
}

#[test]
fn push_composes_with_prior_and_drop_restores() {
    let prior = Affine::translate((5.0, 7.0));
    let mut rec = Recorder {
        transform: prior,
        ..Default::default()
    };
    let pivot = Point::new(100.0, 50.0);

    {
        let mut scope = RotationScope::push(&mut rec, 0.5, pivot);
        scope.draw();
    }

    assert_affine_eq(rec.seen[0], prior * Affine::rotate_about(0.5, pivot));
    assert_eq!(rec.transform, prior);
}

#[test]
fn rotation_keeps_pivot_fixed() {
    let mut rec = Recorder::default();
    let pivot = Point::new(300.0, 50.0);
    let scope = RotationScope::push(&mut rec, 1.2, pivot);
    let mapped = scope.current_transform() * pivot;
    assert!((mapped - pivot).hypot() < 1e-9);
    scope.pop();
    assert_eq!(rec.transform, Affine::IDENTITY);
}

#[test]
fn with_rotation_none_draws_untransformed() {
    let mut rec = Recorder::default();
    with_rotation(&mut rec, None, Point::new(1.0, 1.0), |r| {
        r.draw();
        Ok(())
    })
    .unwrap();
    assert_eq!(rec.seen, vec![Affine::IDENTITY]);
}

#[test]
fn with_rotation_restores_after_error() {
    let mut rec = Recorder::default();
    let err = with_rotation(
        &mut rec,
        Some(Rotation { degrees: -10.0 }),
        Point::new(10.0, 10.0),
        |r| -> MemeResult<()> {
            r.draw();
            Err(MemeError::validation("draw failed"))
        },
    )
    .unwrap_err();

    assert!(matches!(err, MemeError::Validation(_)));
    assert_ne!(rec.seen[0], Affine::IDENTITY);
    assert_eq!(rec.transform, Affine::IDENTITY);
}

#[test]
fn with_rotation_restores_after_panic() {
    let mut rec = Recorder::default();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = with_rotation(
            &mut rec,
            Some(Rotation { degrees: 45.0 }),
            Point::ZERO,
            |_| -> MemeResult<()> { panic!("draw panicked") },
        );
    }));
    assert!(result.is_err());
    assert_eq!(rec.transform, Affine::IDENTITY);
}

#[test]
fn sequential_rotations_do_not_accumulate() {
    let mut rec = Recorder::default();
    let pivot = Point::new(20.0, 20.0);
    for _ in 0..3 {
        with_rotation(&mut rec, Some(Rotation { degrees: 30.0 }), pivot, |r| {
            r.draw();
            Ok(())
        })
        .unwrap();
    }
    assert_eq!(rec.seen[0], rec.seen[1]);
    assert_eq!(rec.seen[1], rec.seen[2]);
    assert_eq!(rec.transform, Affine::IDENTITY);
}

#[test]
fn render_context_round_trips_transform() {
    let mut ctx = vello_cpu::RenderContext::new(16, 16);
    let t = Affine::scale(2.0);
    ctx.set_current_transform(t);
    assert_eq!(ctx.current_transform(), t);
    {
        let _scope = RotationScope::push(&mut ctx, 0.3, Point::new(8.0, 8.0));
    }
    assert_eq!(ctx.current_transform(), t);
}

use super::*;
use crate::foundation::{core::Affine, error::MemeError};

#[derive(Default)]
struct Recorder {
    transform: Affine,
    draws: Vec<(Point, Affine)>,
}

impl Transformable for Recorder {
    fn current_transform(&self) -> Affine {
        self.transform
    }

    fn set_current_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }
}

fn record(rec: &mut Recorder, radius: u32, rotation: Option<Rotation>, anchor: Point) {
    stroke_pass(rec, radius, rotation, anchor, |r, at| {
        let t = r.transform;
        r.draws.push((at, t));
        Ok(())
    })
    .unwrap();
}

#[test]
fn offset_counts_follow_strict_disc() {
    assert_eq!(stroke_offsets(0).len(), 0);
    assert_eq!(stroke_offsets(1), vec![(0, 0)]);
    assert_eq!(stroke_offsets(2).len(), 9);
    assert_eq!(stroke_offsets(3).len(), 25);
    assert_eq!(stroke_offsets(4).len(), 45);
}

#[test]
fn offsets_iterate_rows_then_columns() {
    let offsets = stroke_offsets(2);
    assert_eq!(offsets.first(), Some(&(-1, -1)));
    assert_eq!(offsets[1], (0, -1));
    assert_eq!(offsets.last(), Some(&(1, 1)));
    assert!(offsets.iter().all(|(dx, dy)| dx * dx + dy * dy < 4));
}

#[test]
fn stroke_pass_draws_once_per_offset() {
    let mut rec = Recorder::default();
    let anchor = Point::new(300.0, 50.0);
    record(&mut rec, 4, None, anchor);

    assert_eq!(rec.draws.len(), 45);
    assert!(rec.draws.contains(&(Point::new(303.0, 50.0), Affine::IDENTITY)));
    assert!(!rec.draws.iter().any(|(p, _)| *p == Point::new(304.0, 50.0)));
}

#[test]
fn rotated_stroke_pivots_on_anchor_not_offset() {
    let mut rec = Recorder::default();
    let anchor = Point::new(130.0, 120.0);
    let rotation = Rotation { degrees: -10.0 };
    record(&mut rec, 2, Some(rotation), anchor);

    let expected = Affine::rotate_about(rotation.radians(), anchor);
    assert_eq!(rec.draws.len(), 9);
    for (at, t) in &rec.draws {
        assert_eq!(*t, expected);
        assert!((*at - anchor).hypot() < 2.0);
    }
    assert_eq!(rec.transform, Affine::IDENTITY);
}

#[test]
fn stroke_pass_stops_at_first_error_and_restores_frame() {
    let mut rec = Recorder::default();
    let mut calls = 0;
    let err = stroke_pass(
        &mut rec,
        3,
        Some(Rotation { degrees: 45.0 }),
        Point::ZERO,
        |_, _| {
            calls += 1;
            if calls == 2 {
                return Err(MemeError::validation("glyph draw failed"));
            }
            Ok(())
        },
    )
    .unwrap_err();

    assert!(matches!(err, MemeError::Validation(_)));
    assert_eq!(calls, 2);
    assert_eq!(rec.transform, Affine::IDENTITY);
}

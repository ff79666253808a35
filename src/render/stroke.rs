use crate::{
    foundation::{
        core::{Point, Vec2},
        error::MemeResult,
    },
    render::transform::{Transformable, with_rotation},
    template::model::Rotation,
};

/// Integer offsets `(dx, dy)` inside the open disc `dx² + dy² < radius²`.
///
/// Rows (`dy`) run outer, columns (`dx`) inner, both ascending. Radius 0 yields nothing and
/// radius 1 yields only the origin.
pub fn stroke_offsets(radius: u32) -> Vec<(i64, i64)> {
    let r = i64::from(radius);
    let r2 = i128::from(r) * i128::from(r);
    let mut out = Vec::new();
    for dy in -r..=r {
        let dy2 = i128::from(dy) * i128::from(dy);
        for dx in -r..=r {
            if i128::from(dx) * i128::from(dx) + dy2 < r2 {
                out.push((dx, dy));
            }
        }
    }
    out
}

/// Draw the outline pass: one `draw_at` call per offset of [`stroke_offsets`].
///
/// Each call receives `anchor + (dx, dy)` and runs inside its own rotation scope pivoting on
/// the un-offset `anchor`. The offset grid itself is not rotated, only what each call draws.
pub fn stroke_pass<T, F>(
    target: &mut T,
    radius: u32,
    rotation: Option<Rotation>,
    anchor: Point,
    mut draw_at: F,
) -> MemeResult<()>
where
    T: Transformable + ?Sized,
    F: FnMut(&mut T, Point) -> MemeResult<()>,
{
    for (dx, dy) in stroke_offsets(radius) {
        let at = anchor + Vec2::new(dx as f64, dy as f64);
        with_rotation(target, rotation, anchor, |t| draw_at(t, at))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/stroke.rs"]
mod tests;

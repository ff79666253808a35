//! Scoped coordinate-frame rotation.
//!
//! A rotation is pushed for exactly one draw and popped afterwards. [`RotationScope`] restores
//! the prior transform when dropped, so early returns, `?` and unwinding all leave the target
//! in the frame it started in.

use std::ops::{Deref, DerefMut};

use crate::{
    foundation::{
        core::{Affine, Point},
        error::MemeResult,
    },
    template::model::Rotation,
};

/// Anything carrying a current 2D transform that draws are placed through.
pub trait Transformable {
    /// Transform applied to subsequent draws.
    fn current_transform(&self) -> Affine;
    /// Replace the transform applied to subsequent draws.
    fn set_current_transform(&mut self, transform: Affine);
}

impl Transformable for vello_cpu::RenderContext {
    fn current_transform(&self) -> Affine {
        *self.transform()
    }

    fn set_current_transform(&mut self, transform: Affine) {
        self.set_transform(transform);
    }
}

/// Guard holding a rotation about a pivot. Derefs to the target for drawing.
pub struct RotationScope<'a, T: Transformable + ?Sized> {
    target: &'a mut T,
    prior: Affine,
}

impl<'a, T: Transformable + ?Sized> RotationScope<'a, T> {
    /// Install `prior * rotate_about(radians, pivot)` on `target`.
    pub fn push(target: &'a mut T, radians: f64, pivot: Point) -> Self {
        let prior = target.current_transform();
        target.set_current_transform(prior * Affine::rotate_about(radians, pivot));
        Self { target, prior }
    }

    /// Restore the prior transform now.
    pub fn pop(self) {
        drop(self);
    }
}

impl<T: Transformable + ?Sized> Deref for RotationScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.target
    }
}

impl<T: Transformable + ?Sized> DerefMut for RotationScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.target
    }
}

impl<T: Transformable + ?Sized> Drop for RotationScope<'_, T> {
    fn drop(&mut self) {
        self.target.set_current_transform(self.prior);
    }
}

/// Run one draw under `rotation` about `pivot`; without a rotation the draw runs as is.
pub fn with_rotation<T, R, F>(
    target: &mut T,
    rotation: Option<Rotation>,
    pivot: Point,
    draw: F,
) -> MemeResult<R>
where
    T: Transformable + ?Sized,
    F: FnOnce(&mut T) -> MemeResult<R>,
{
    match rotation {
        None => draw(target),
        Some(rotation) => {
            let mut scope = RotationScope::push(target, rotation.radians(), pivot);
            draw(&mut scope)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/transform.rs"]
mod tests;

// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Scoped use of the 2D-array binding point.
//!
//! Backends mutate whatever texture is bound, so every mutation happens inside a
//! [`BindingScope`].  When the scope ends, on success, error or unwinding, the binding
//! point is cleared.  The previously bound texture is *not* restored; callers rebind
//! what they need before further GPU work.

use std::ops::{Deref, DerefMut};

use crate::imp::{GraphicsContext, TextureId};

/// A context with `texture` bound to the 2D-array binding point.
///
/// Derefs to the context so backend calls can be issued through the scope.
#[derive(Debug)]
pub struct BindingScope<'c, C: GraphicsContext + ?Sized> {
    context: &'c mut C,
    texture: TextureId,
}

impl<'c, C: GraphicsContext + ?Sized> BindingScope<'c, C> {
    pub fn bind(context: &'c mut C, texture: TextureId) -> Self {
        logwise::trace_sync!("bind 2d array {texture}", texture = texture.raw());
        context.bind_texture_2d_array(Some(texture));
        Self { context, texture }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }
}

impl<C: GraphicsContext + ?Sized> Deref for BindingScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: GraphicsContext + ?Sized> DerefMut for BindingScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: GraphicsContext + ?Sized> Drop for BindingScope<'_, C> {
    fn drop(&mut self) {
        self.context.bind_texture_2d_array(None);
        logwise::trace_sync!("unbind 2d array {texture}", texture = self.texture.raw());
    }
}

/// Runs `body` with `texture` bound, then clears the binding point.
pub fn with_binding<C, R, E>(
    context: &mut C,
    texture: TextureId,
    body: impl FnOnce(&mut C) -> Result<R, E>,
) -> Result<R, E>
where
    C: GraphicsContext + ?Sized,
{
    let mut scope = BindingScope::bind(context, texture);
    body(&mut *scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::{BackendError, HeadlessContext};

    #[test]
    fn binding_is_cleared_after_success() {
        let mut context = HeadlessContext::new();
        let texture = context.create_texture().unwrap();
        let seen = with_binding(&mut context, texture, |ctx| {
            Ok::<_, BackendError>(ctx.bound_texture_2d_array())
        })
        .unwrap();
        assert_eq!(seen, Some(texture));
        assert_eq!(context.bound_texture_2d_array(), None);
    }

    #[test]
    fn binding_is_cleared_after_error() {
        let mut context = HeadlessContext::new();
        let texture = context.create_texture().unwrap();
        let result: Result<(), BackendError> =
            with_binding(&mut context, texture, |_| Err(BackendError::NoTextureBound));
        assert_eq!(result, Err(BackendError::NoTextureBound));
        assert_eq!(context.bound_texture_2d_array(), None);
    }

    #[test]
    fn binding_is_cleared_after_panic() {
        let mut context = HeadlessContext::new();
        let texture = context.create_texture().unwrap();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), BackendError> = with_binding(&mut context, texture, |_| panic!("boom"));
        }));
        assert!(outcome.is_err());
        assert_eq!(context.bound_texture_2d_array(), None);
    }

    #[test]
    fn prior_binding_is_not_restored() {
        let mut context = HeadlessContext::new();
        let first = context.create_texture().unwrap();
        let second = context.create_texture().unwrap();
        context.bind_texture_2d_array(Some(first));
        let _ = with_binding(&mut context, second, |_| Ok::<_, BackendError>(()));
        assert_eq!(context.bound_texture_2d_array(), None);
    }
}

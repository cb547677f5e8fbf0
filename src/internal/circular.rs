//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;

#[cfg(feature = "smallvec")]
type Frames<K> = smallvec::SmallVec<[K; 8]>;
#[cfg(not(feature = "smallvec"))]
type Frames<K> = Vec<K>;

/// Identifiers whose factories are currently running, outermost first.
pub(crate) struct BuildStack<K> {
    frames: Frames<K>,
}

impl<K: ServiceKey> BuildStack<K> {
    pub(crate) fn new() -> Self {
        Self { frames: Frames::new() }
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        self.frames.iter().any(|frame| frame == id)
    }

    /// Cycle path from the first occurrence of `id` through `id` again.
    fn cycle_path(&self, id: &K) -> Vec<String> {
        let start = self.frames.iter().position(|frame| frame == id).unwrap_or(0);
        self.frames[start..]
            .iter()
            .chain(std::iter::once(id))
            .map(ToString::to_string)
            .collect()
    }
}

/// Scoped frame on a [`BuildStack`].
///
/// Dropping the guard truncates the stack back to the depth it had on
/// entry, so the frame disappears on success, on error and on unwind
/// alike. Once an error has left the outermost guard the stack is empty.
pub(crate) struct StackGuard<'a, K: ServiceKey> {
    stack: &'a RefCell<BuildStack<K>>,
    depth: usize,
}

impl<'a, K: ServiceKey> StackGuard<'a, K> {
    /// Pushes `id`, failing if it is already being built or the depth limit is hit.
    ///
    /// A failure leaves the frames of the outer builds in place. They are
    /// still running and may recover from the error.
    pub(crate) fn enter(stack: &'a RefCell<BuildStack<K>>, id: &K, max_depth: usize) -> DiResult<Self> {
        let mut frames = stack.borrow_mut();

        if frames.contains(id) {
            let path = frames.cycle_path(id);
            tracing::warn!(cycle = %path.join(" > "), "circular dependency detected");
            return Err(DiError::Circular(path));
        }

        let depth = frames.depth();
        if depth >= max_depth {
            tracing::warn!(service = %id, max_depth, "maximum build depth exceeded");
            return Err(DiError::DepthExceeded(max_depth));
        }

        frames.frames.push(id.clone());
        Ok(Self { stack, depth })
    }
}

impl<K: ServiceKey> Drop for StackGuard<'_, K> {
    fn drop(&mut self) {
        if let Ok(mut frames) = self.stack.try_borrow_mut() {
            frames.frames.truncate(self.depth);
        }
    }
}

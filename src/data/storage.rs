//! Pluggable storage for per-point field buffers.
//!
//! This trait abstracts how a [`Matrix`](crate::data::matrix::Matrix) keeps its
//! flat row-major buffer. Only a `Vec` backend ships today; the slice-based
//! interface keeps `Matrix` independent of where the bytes live.

use core::fmt::{self, Debug};

use crate::bound_error::BoundVarError;

/// Contiguous, indexable storage for `V` with slice access.
pub trait Storage<V>: Debug {
    /// Construct a buffer of `len`, filled with `fill`.
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone;

    /// Current length in elements.
    fn len(&self) -> usize;

    /// Whether the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite every element with `value`.
    fn fill(&mut self, value: V)
    where
        V: Clone,
    {
        self.as_mut_slice().fill(value);
    }

    /// Entire read-only buffer.
    fn as_slice(&self) -> &[V];

    /// Entire mutable buffer.
    fn as_mut_slice(&mut self) -> &mut [V];

    /// Copy `src` into the range `[offset .. offset + src.len())`.
    fn write_at(&mut self, offset: usize, src: &[V]) -> Result<(), BoundVarError>
    where
        V: Clone,
    {
        let len = self.len();
        let end = offset
            .checked_add(src.len())
            .filter(|&end| end <= len)
            .ok_or(BoundVarError::StorageShapeMismatch {
                expected: len,
                found: offset.saturating_add(src.len()),
            })?;
        self.as_mut_slice()[offset..end].clone_from_slice(src);
        Ok(())
    }

    /// Read the range `[offset .. offset + dst.len())` into `dst`.
    fn read_into(&self, offset: usize, dst: &mut [V]) -> Result<(), BoundVarError>
    where
        V: Clone,
    {
        let src = offset
            .checked_add(dst.len())
            .and_then(|end| self.as_slice().get(offset..end))
            .ok_or(BoundVarError::StorageShapeMismatch {
                expected: self.len(),
                found: offset.saturating_add(dst.len()),
            })?;
        dst.clone_from_slice(src);
        Ok(())
    }
}

/// `Vec`-backed storage (default).
#[derive(Clone, PartialEq)]
pub struct VecStorage<V>(pub(crate) Vec<V>);

impl<V> Debug for VecStorage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecStorage")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<V> Default for VecStorage<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> Storage<V> for VecStorage<V> {
    fn with_len(len: usize, fill: V) -> Self
    where
        V: Clone,
    {
        Self(vec![fill; len])
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn as_slice(&self) -> &[V] {
        &self.0
    }

    fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.0
    }
}

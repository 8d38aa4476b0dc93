//! BoundaryStore: dense storage for fields that exist only on boundary vertices.
//!
//! A `BoundaryStore` owns a [`VertexMap`] and one [`Matrix`] per declared
//! field. Matrices have one row per vertex and are created only once the
//! vertex set is final (see [`allocate`](BoundaryStore::allocate)), so the
//! memory cost is proportional to the boundary, not to the domain.
//!
//! Every access is addressed by **global** point index and goes through the
//! vertex map:
//! - writing to a point without a vertex index is silently ignored,
//! - reading such a point yields `V::zero()`.
//!
//! This lets solver loops sweep the whole domain without branching on
//! membership. With the `strict-boundary-access` feature enabled, debug builds
//! panic on ignored writes instead.

use num_traits::Zero;

use crate::bound_error::BoundVarError;
use crate::data::matrix::Matrix;
use crate::data::vertex_map::{VertexIndex, VertexMap};
#[cfg(any(debug_assertions, feature = "check-invariants"))]
use crate::debug_invariants::DebugInvariants;

/// Key naming one per-point field.
pub trait FieldKey: Copy + Eq + core::fmt::Debug {
    /// Human-readable field name used in errors and logs.
    fn name(self) -> &'static str;
}

/// Declared shape of one boundary-only field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDecl<K> {
    /// Field key.
    pub key: K,
    /// Components stored per vertex.
    pub columns: usize,
}

/// Boundary-only field storage gated by a [`VertexMap`].
#[derive(Clone, Debug)]
pub struct BoundaryStore<K, V, I: VertexIndex = u32> {
    vertices: VertexMap<I>,
    decls: Vec<FieldDecl<K>>,
    /// One matrix per entry of `decls`; empty until allocation.
    fields: Vec<Matrix<V>>,
    allocated: bool,
}

impl<K: FieldKey, V: Copy + Zero, I: VertexIndex> BoundaryStore<K, V, I> {
    /// Create a store over `n_point` points with the given field layout.
    ///
    /// No field storage is allocated yet.
    ///
    /// # Panics
    /// Panics if a key is declared twice.
    pub fn new(n_point: usize, decls: &[FieldDecl<K>]) -> Self {
        for (i, d) in decls.iter().enumerate() {
            assert!(
                decls[..i].iter().all(|prev| prev.key != d.key),
                "boundary field `{}` declared twice",
                d.key.name()
            );
        }
        Self {
            vertices: VertexMap::new(n_point),
            decls: decls.to_vec(),
            fields: Vec::new(),
            allocated: false,
        }
    }

    /// The underlying vertex map.
    #[inline]
    pub fn vertex_map(&self) -> &VertexMap<I> {
        &self.vertices
    }

    /// Whether `point` is marked as a boundary vertex.
    #[inline]
    pub fn is_vertex(&self, point: usize) -> bool {
        self.vertices.is_vertex(point)
    }

    /// Mark (or unmark) `point` as a boundary vertex.
    ///
    /// Allocation freezes the vertex set: afterwards a change is refused
    /// (logged, returns `false`) and stored data stays reachable.
    #[inline]
    pub fn set_is_vertex(&mut self, point: usize, is_vertex: bool) -> bool {
        self.vertices.set_is_vertex(point, is_vertex)
    }

    /// Mark every point yielded by `points` as a vertex. Returns how many
    /// were refused because the store is already allocated.
    pub fn mark_vertices<It>(&mut self, points: It) -> usize
    where
        It: IntoIterator<Item = usize>,
    {
        self.vertices.mark_vertices(points)
    }

    /// Whether [`allocate`](Self::allocate) has completed.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Number of rows in every boundary matrix (zero before allocation).
    #[inline]
    pub fn n_vertex(&self) -> usize {
        if self.allocated {
            self.vertices.n_vertex()
        } else {
            0
        }
    }

    /// Declared fields in declaration order.
    pub fn decls(&self) -> &[FieldDecl<K>] {
        &self.decls
    }

    /// Freeze the vertex set and allocate every declared field as a
    /// zero-filled `[n_vertex, columns]` matrix. Returns `n_vertex`.
    ///
    /// # Errors
    /// - `BoundaryAlreadyAllocated` on a second call; existing data is kept.
    /// - `LocalIndexOverflow` if the vertex count does not fit in `I`.
    pub fn allocate(&mut self) -> Result<usize, BoundVarError> {
        if self.allocated {
            log::warn!(
                "ignoring repeated boundary allocation ({} vertices already allocated)",
                self.vertices.n_vertex()
            );
            return Err(BoundVarError::BoundaryAlreadyAllocated {
                n_vertex: self.vertices.n_vertex(),
            });
        }
        let n_vertex = self.vertices.build()?;
        self.fields = self
            .decls
            .iter()
            .map(|d| Matrix::filled(n_vertex, d.columns, V::zero()))
            .collect();
        self.allocated = true;
        log::debug!(
            "allocated {} boundary fields for {} of {} points",
            self.fields.len(),
            n_vertex,
            self.vertices.n_point()
        );
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        self.vertices.debug_assert_invariants();
        Ok(n_vertex)
    }

    fn slot(&self, key: K) -> Option<usize> {
        self.decls.iter().position(|d| d.key == key)
    }

    fn slot_declared(&self, key: K) -> usize {
        self.slot(key)
            .unwrap_or_else(|| panic!("boundary field `{}` is not declared", key.name()))
    }

    fn slot_checked(&self, key: K, column: usize) -> usize {
        let slot = self.slot_declared(key);
        let columns = self.decls[slot].columns;
        assert!(
            column < columns,
            "column {column} out of range for `{}` ({columns} columns)",
            key.name()
        );
        slot
    }

    fn try_slot(&self, key: K, point: usize, column: usize) -> Result<usize, BoundVarError> {
        let slot = self.try_slot_at(key, point)?;
        let columns = self.decls[slot].columns;
        if column >= columns {
            return Err(BoundVarError::ColumnOutOfRange {
                field: key.name(),
                column,
                columns,
            });
        }
        Ok(slot)
    }

    fn try_slot_at(&self, key: K, point: usize) -> Result<usize, BoundVarError> {
        let slot = self
            .slot(key)
            .ok_or(BoundVarError::UnknownBoundaryField(key.name()))?;
        if point >= self.vertices.n_point() {
            return Err(BoundVarError::PointOutOfRange {
                point,
                n_point: self.vertices.n_point(),
            });
        }
        Ok(slot)
    }

    /// Row of `point` in the boundary matrices, if it has one.
    #[inline]
    fn row_of(&self, point: usize) -> Option<usize> {
        let row = self.vertices.vertex_index(point)?;
        self.allocated.then(|| row.to_usize())
    }

    /// Value of `key` at `(point, column)`, or zero if `point` is not a
    /// vertex.
    ///
    /// # Panics
    /// Panics if `key` is undeclared, `column` is out of range, or `point`
    /// is outside the domain.
    #[inline]
    pub fn get(&self, key: K, point: usize, column: usize) -> V {
        let slot = self.slot_checked(key, column);
        match self.row_of(point) {
            Some(row) => *self.fields[slot].at(row, column),
            None => V::zero(),
        }
    }

    /// Store `value` for `key` at `(point, column)`; ignored if `point` is
    /// not a vertex.
    ///
    /// # Panics
    /// Panics if `key` is undeclared, `column` is out of range, or `point`
    /// is outside the domain.
    #[inline]
    pub fn set(&mut self, key: K, point: usize, column: usize, value: V) {
        let slot = self.slot_checked(key, column);
        match self.row_of(point) {
            Some(row) => *self.fields[slot].at_mut(row, column) = value,
            None => {
                #[cfg(all(debug_assertions, feature = "strict-boundary-access"))]
                panic!(
                    "write to `{}` at non-vertex point {point} (strict-boundary-access)",
                    key.name()
                );
            }
        }
    }

    /// Fallible form of [`get`](Self::get).
    pub fn try_get(&self, key: K, point: usize, column: usize) -> Result<V, BoundVarError> {
        let slot = self.try_slot(key, point, column)?;
        Ok(match self.row_of(point) {
            Some(row) => *self.fields[slot].at(row, column),
            None => V::zero(),
        })
    }

    /// Fallible form of [`set`](Self::set). Returns whether the value was
    /// stored (`false` for non-vertex points).
    pub fn try_set(
        &mut self,
        key: K,
        point: usize,
        column: usize,
        value: V,
    ) -> Result<bool, BoundVarError> {
        let slot = self.try_slot(key, point, column)?;
        match self.row_of(point) {
            Some(row) => {
                *self.fields[slot].at_mut(row, column) = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// All components of `key` at `point`, or `None` if `point` is not a
    /// vertex.
    ///
    /// # Panics
    /// Panics if `key` is undeclared or `point` is outside the domain.
    pub fn row(&self, key: K, point: usize) -> Option<&[V]> {
        let slot = self.slot_declared(key);
        self.row_of(point).map(|row| self.fields[slot].row(row))
    }

    /// Copy all components of `key` at `point` into `dst`, zero-filling it
    /// when `point` is not a vertex. Returns whether `point` had storage.
    ///
    /// # Errors
    /// `UnknownBoundaryField`, `PointOutOfRange`, or `StorageShapeMismatch`
    /// if `dst` does not hold exactly the declared column count.
    pub fn read_row(&self, key: K, point: usize, dst: &mut [V]) -> Result<bool, BoundVarError> {
        let slot = self.try_slot_at(key, point)?;
        match self.row_of(point) {
            Some(row) => self.fields[slot].read_row(row, dst).map(|()| true),
            None => {
                let columns = self.decls[slot].columns;
                if dst.len() != columns {
                    return Err(BoundVarError::StorageShapeMismatch {
                        expected: columns,
                        found: dst.len(),
                    });
                }
                dst.fill(V::zero());
                Ok(false)
            }
        }
    }

    /// Column count declared for `key`, or zero if undeclared.
    pub fn columns(&self, key: K) -> usize {
        self.slot(key).map_or(0, |s| self.decls[s].columns)
    }

    /// Dense matrix backing `key`, once allocated.
    pub fn matrix(&self, key: K) -> Option<&Matrix<V>> {
        if !self.allocated {
            return None;
        }
        self.slot(key).map(|s| &self.fields[s])
    }

    /// Reset every boundary value to zero without touching the vertex set.
    pub fn clear(&mut self) {
        for m in &mut self.fields {
            m.fill(V::zero());
        }
    }
}

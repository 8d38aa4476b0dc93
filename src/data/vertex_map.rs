//! VertexMap: boundary membership over a dense point domain.
//!
//! A `VertexMap` records, for every global point index `0..n_point`, whether
//! the point is a boundary vertex, and after an explicit [`build`] it assigns
//! every vertex a compact local index `0..n_vertex`. Boundary-only fields are
//! sized by `n_vertex` and addressed through [`vertex_index`], so interior
//! points cost one flag and one narrow integer each.
//!
//! The protocol is two-phase:
//! 1. **mark**: geometry code calls [`set_is_vertex`] (any order, last write
//!    wins);
//! 2. **build**: [`build`] scans the flags once in ascending global order and
//!    numbers the vertices.
//!
//! A built map is frozen: later calls to `set_is_vertex` that would change a
//! flag are refused and logged, so the numbering (and any storage sized by
//! it) stays valid.
//!
//! [`build`]: VertexMap::build
//! [`vertex_index`]: VertexMap::vertex_index
//! [`set_is_vertex`]: VertexMap::set_is_vertex

use crate::bound_error::BoundVarError;
use crate::debug_invariants::DebugInvariants;

/// Unsigned integer type used for compact vertex indices.
///
/// A narrower type than `usize` halves (or quarters) the memory of the
/// per-point index table on large meshes.
pub trait VertexIndex: Copy + Default + Eq + core::fmt::Debug + Send + Sync + 'static {
    /// Type name reported by [`BoundVarError::LocalIndexOverflow`].
    const NAME: &'static str;

    /// Convert from `usize`, or `None` if it does not fit.
    fn from_usize(n: usize) -> Option<Self>;

    /// Widen to `usize`.
    fn to_usize(self) -> usize;
}

macro_rules! impl_vertex_index {
    ($($t:ty),*) => {
        $(
            impl VertexIndex for $t {
                const NAME: &'static str = stringify!($t);

                #[inline]
                fn from_usize(n: usize) -> Option<Self> {
                    <$t>::try_from(n).ok()
                }

                #[inline]
                fn to_usize(self) -> usize {
                    // Built only from usize values, so this never truncates.
                    self as usize
                }
            }
        )*
    };
}

impl_vertex_index!(u16, u32, u64, usize);

/// Membership flags plus compact vertex numbering.
///
/// # Invariants
///
/// - `is_vertex.len() == local.len() == n_point`.
/// - When `built`, `local` restricted to vertices is a bijection onto
///   `0..n_vertex`, increasing with global index, and `n_vertex` equals the
///   number of set flags.
///
/// These invariants are checked after [`build`](Self::build) in debug builds
/// and when the `check-invariants` feature is enabled.
#[derive(Clone, Debug, Default)]
pub struct VertexMap<I: VertexIndex = u32> {
    is_vertex: Vec<bool>,
    local: Vec<I>,
    n_vertex: usize,
    built: bool,
}

impl<I: VertexIndex> VertexMap<I> {
    /// Create a map over `n_point` points, none of them vertices.
    pub fn new(n_point: usize) -> Self {
        Self {
            is_vertex: vec![false; n_point],
            local: vec![I::default(); n_point],
            n_vertex: 0,
            built: false,
        }
    }

    /// Size of the global domain.
    #[inline]
    pub fn n_point(&self) -> usize {
        self.is_vertex.len()
    }

    /// Number of vertices numbered by the last [`build`](Self::build).
    ///
    /// Zero until the map has been built.
    #[inline]
    pub fn n_vertex(&self) -> usize {
        self.n_vertex
    }

    /// Whether [`build`](Self::build) has succeeded, freezing the flags.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Whether `point` is marked as a boundary vertex.
    ///
    /// # Panics
    /// Panics if `point >= n_point`.
    #[inline]
    pub fn is_vertex(&self, point: usize) -> bool {
        self.is_vertex[point]
    }

    /// Fallible form of [`is_vertex`](Self::is_vertex).
    pub fn try_is_vertex(&self, point: usize) -> Result<bool, BoundVarError> {
        self.is_vertex
            .get(point)
            .copied()
            .ok_or(BoundVarError::PointOutOfRange {
                point,
                n_point: self.n_point(),
            })
    }

    /// Mark (or unmark) `point` as a boundary vertex.
    ///
    /// Returns whether the flag now holds `is_vertex`. Once the map is
    /// [built](Self::build) a change is refused with a warning and `false`;
    /// re-marking a point with its current value is always accepted.
    ///
    /// # Panics
    /// Panics if `point >= n_point`.
    pub fn set_is_vertex(&mut self, point: usize, is_vertex: bool) -> bool {
        let flag = &mut self.is_vertex[point];
        if *flag == is_vertex {
            return true;
        }
        if self.built {
            log::warn!("ignoring re-mark of point {point} ({is_vertex}): vertex map is frozen");
            return false;
        }
        *flag = is_vertex;
        true
    }

    /// Mark every point yielded by `points` as a vertex. Returns how many
    /// of them were refused because the map is frozen.
    ///
    /// # Panics
    /// Panics if any point is out of range.
    pub fn mark_vertices<It>(&mut self, points: It) -> usize
    where
        It: IntoIterator<Item = usize>,
    {
        points
            .into_iter()
            .filter(|&p| !self.set_is_vertex(p, true))
            .count()
    }

    /// Freeze the current flags and number the vertices in ascending global
    /// order. Returns the vertex count.
    ///
    /// Building again yields the same numbering, since the flags are frozen.
    ///
    /// # Errors
    /// `LocalIndexOverflow` if the vertex count does not fit in `I`; the map
    /// stays unbuilt (and markable) in that case.
    pub fn build(&mut self) -> Result<usize, BoundVarError> {
        self.built = false;
        let mut next = 0usize;
        for (flag, slot) in self.is_vertex.iter().zip(self.local.iter_mut()) {
            if *flag {
                *slot = I::from_usize(next).ok_or_else(|| BoundVarError::LocalIndexOverflow {
                    n_vertex: self.is_vertex.iter().filter(|&&f| f).count(),
                    index_type: I::NAME,
                })?;
                next += 1;
            } else {
                *slot = I::default();
            }
        }
        self.n_vertex = next;
        self.built = true;
        log::debug!(
            "vertex map built: {} vertices over {} points",
            self.n_vertex,
            self.n_point()
        );
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        self.debug_assert_invariants();
        Ok(self.n_vertex)
    }

    /// Compact index of `point` if it is a vertex and the map is built.
    ///
    /// Returns `None` for interior points and before [`build`](Self::build).
    /// Never fatal for in-range points.
    ///
    /// # Panics
    /// Panics if `point >= n_point`.
    #[inline]
    pub fn vertex_index(&self, point: usize) -> Option<I> {
        (self.is_vertex[point] && self.built).then(|| self.local[point])
    }

    /// Fallible form of [`vertex_index`](Self::vertex_index).
    pub fn try_vertex_index(&self, point: usize) -> Result<Option<I>, BoundVarError> {
        if point >= self.n_point() {
            return Err(BoundVarError::PointOutOfRange {
                point,
                n_point: self.n_point(),
            });
        }
        Ok(self.vertex_index(point))
    }

    /// Vertices in local-index order (ascending global index).
    ///
    /// Reflects the current flags, whether or not the map is built.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.is_vertex
            .iter()
            .enumerate()
            .filter_map(|(p, &flag)| flag.then_some(p))
    }
}

impl<I: VertexIndex> DebugInvariants for VertexMap<I> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "VertexMap invalid");
    }

    fn validate_invariants(&self) -> Result<(), BoundVarError> {
        if self.local.len() != self.is_vertex.len() {
            return Err(BoundVarError::StorageShapeMismatch {
                expected: self.is_vertex.len(),
                found: self.local.len(),
            });
        }
        if !self.built {
            return Ok(());
        }
        // Ascending numbering without gaps implies the bijection.
        let mut expected = 0usize;
        for p in self.vertices() {
            if self.local[p].to_usize() != expected {
                return Err(BoundVarError::VertexMapCorrupt {
                    point: p,
                    reason: "local index out of sequence",
                });
            }
            expected += 1;
        }
        if expected != self.n_vertex {
            return Err(BoundVarError::VertexMapCorrupt {
                point: self.n_point(),
                reason: "vertex count does not match flags",
            });
        }
        Ok(())
    }
}

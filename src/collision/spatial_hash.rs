//! Dense spatial hash used as the collision broad-phase.
//!
//! Objects are bucketed by hashing their integer cell coordinates into a fixed
//! table, then stored contiguously per bucket with a counting sort. Building is
//! O(n) with no per-bucket allocation, and a query walks the cells covering a
//! square and copies out every entry of the buckets they hash to.
//!
//! Distinct cells may alias to one bucket, so query results are a superset of
//! the true neighbors (including duplicates and the queried object itself).
//! Callers do the exact distance test.

use glam::Vec2;

use crate::error::GridError;

const HASH_PRIME_X: i32 = 92_837_111;
const HASH_PRIME_Y: i32 = 689_287_499;

/// Counting-sort spatial hash over 2D points, rebuilt from scratch on every [`create`](Self::create).
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    spacing: f32,
    capacity: usize,
    table_size: usize,
    /// Start offset of each bucket in `cell_entries`; `table_size + 1` long, last slot is a guard.
    cell_start: Vec<usize>,
    cell_entries: Vec<usize>,
    query_ids: Vec<usize>,
    num_objects: usize,
}

impl SpatialHashGrid {
    /// Creates a grid with cells of `spacing` able to index `max_objects` points.
    pub fn new(spacing: f32, max_objects: usize) -> Result<Self, GridError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GridError::InvalidSpacing(spacing));
        }
        if max_objects == 0 {
            return Err(GridError::ZeroCapacity);
        }

        let table_size = 2 * max_objects;
        Ok(Self {
            spacing,
            capacity: max_objects,
            table_size,
            cell_start: vec![0; table_size + 1],
            cell_entries: vec![0; max_objects],
            query_ids: Vec::with_capacity(max_objects),
            num_objects: 0,
        })
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Maximum number of objects a single [`create`](Self::create) accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Number of objects indexed by the last successful build.
    pub fn len(&self) -> usize {
        self.num_objects
    }

    pub fn is_empty(&self) -> bool {
        self.num_objects == 0
    }

    /// Grows the grid so it can index `max_objects` points. Never shrinks.
    ///
    /// Growing discards the current index; call [`create`](Self::create) again.
    pub fn reserve(&mut self, max_objects: usize) {
        if max_objects <= self.capacity {
            return;
        }
        self.capacity = max_objects;
        self.table_size = 2 * max_objects;
        self.cell_start.clear();
        self.cell_start.resize(self.table_size + 1, 0);
        self.cell_entries.resize(max_objects, 0);
        self.query_ids
            .reserve(max_objects.saturating_sub(self.query_ids.len()));
        self.num_objects = 0;
    }

    /// Drops the current index.
    pub fn clear(&mut self) {
        self.cell_start.fill(0);
        self.num_objects = 0;
    }

    #[inline]
    pub fn int_coord(&self, coord: f32) -> i32 {
        (coord / self.spacing).floor() as i32
    }

    #[inline]
    pub fn hash_coords(&self, xi: i32, yi: i32) -> usize {
        let h = xi.wrapping_mul(HASH_PRIME_X) ^ yi.wrapping_mul(HASH_PRIME_Y);
        h.unsigned_abs() as usize % self.table_size
    }

    #[inline]
    pub fn hash_pos(&self, position: Vec2) -> usize {
        self.hash_coords(self.int_coord(position.x), self.int_coord(position.y))
    }

    /// Rebuilds the index from `positions`; object `i` is `positions[i]`.
    ///
    /// More points than [`capacity`](Self::capacity) is an error and leaves the
    /// grid empty; nothing is silently dropped.
    pub fn create(&mut self, positions: &[Vec2]) -> Result<(), GridError> {
        if positions.len() > self.capacity {
            self.clear();
            return Err(GridError::CapacityExceeded {
                requested: positions.len(),
                capacity: self.capacity,
            });
        }

        self.cell_start.fill(0);

        for &position in positions {
            let h = self.hash_pos(position);
            self.cell_start[h] += 1;
        }

        // Inclusive prefix sum: each slot holds the end of its bucket until the
        // scatter pass walks it back down to the start.
        let mut start = 0;
        for slot in &mut self.cell_start[..self.table_size] {
            start += *slot;
            *slot = start;
        }
        self.cell_start[self.table_size] = start;

        for (i, &position) in positions.iter().enumerate() {
            let h = self.hash_pos(position);
            self.cell_start[h] -= 1;
            self.cell_entries[self.cell_start[h]] = i;
        }

        self.num_objects = positions.len();
        Ok(())
    }

    /// Indices stored in bucket `h` by the last build.
    pub fn bucket(&self, h: usize) -> &[usize] {
        &self.cell_entries[self.cell_start[h]..self.cell_start[h + 1]]
    }

    /// Candidates around object `index` of the slice the grid was built from.
    pub fn query(
        &mut self,
        positions: &[Vec2],
        index: usize,
        max_dist: f32,
    ) -> Result<&[usize], GridError> {
        let center = positions
            .get(index)
            .copied()
            .ok_or(GridError::IndexOutOfRange {
                index,
                len: positions.len(),
            })?;
        Ok(self.query_region(center, max_dist))
    }

    /// Every indexed object in a bucket touched by the square of half-width
    /// `max_dist` around `center`.
    ///
    /// The returned slice borrows the grid's scratch buffer and is overwritten
    /// by the next query.
    pub fn query_region(&mut self, center: Vec2, max_dist: f32) -> &[usize] {
        self.query_ids.clear();
        if self.num_objects == 0 {
            return &self.query_ids;
        }

        let x0 = self.int_coord(center.x - max_dist);
        let y0 = self.int_coord(center.y - max_dist);
        let x1 = self.int_coord(center.x + max_dist);
        let y1 = self.int_coord(center.y + max_dist);

        let cells = (i64::from(x1) - i64::from(x0) + 1) * (i64::from(y1) - i64::from(y0) + 1);
        if cells > self.table_size as i64 {
            // The box touches more cells than there are buckets: every bucket is a candidate.
            self.query_ids
                .extend_from_slice(&self.cell_entries[..self.num_objects]);
            return &self.query_ids;
        }

        for xi in x0..=x1 {
            for yi in y0..=y1 {
                let h = self.hash_coords(xi, yi);
                let (start, end) = (self.cell_start[h], self.cell_start[h + 1]);
                self.query_ids
                    .extend_from_slice(&self.cell_entries[start..end]);
            }
        }

        &self.query_ids
    }

    /// Results of the last query.
    pub fn query_results(&self) -> &[usize] {
        &self.query_ids
    }

    pub fn query_size(&self) -> usize {
        self.query_ids.len()
    }
}

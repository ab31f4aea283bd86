//! Public container API
//!
//! `PropertyStore` composes the growth policy, the property registry, and
//! the accessor subsystem into a resizable struct-of-arrays container:
//! elements are logical rows identified by position, properties are typed
//! columns registered and erased at runtime, and every column always spans
//! the same capacity. Structural operations (resize, insert, erase,
//! property add/remove) require exclusive access; data access goes through
//! bound column accessors.

use core::ops::Range;

use propvec_core::{
    ColumnElement, ColumnLayout, GrowthPolicy, PropError, PropertyId, Result,
};

use crate::access::{self, AccessMut, ArrayReader, Row, ScalarReader};
use crate::iter::Rows;
use crate::table::PropertyTable;

/// Resizable struct-of-arrays store of per-element property columns
///
/// ```
/// use propvec::{GrowthPolicy, PropertyStore};
///
/// let mut store = PropertyStore::with_policy(GrowthPolicy::new().with_granularity(8));
/// let charge = store.add_scalar::<f64>();
/// let position = store.add_array::<f64>(3);
/// store.resize(12);
///
/// {
///     let view = store.access_mut();
///     let mut charges = view.scalars_mut::<f64>(charge).unwrap();
///     let mut positions = view.arrays_mut::<f64>(position).unwrap();
///     for row in view.rows_mut() {
///         charges[row] = -1.0;
///         positions[row][0] = 0.5 * row.position() as f64;
///     }
/// }
/// assert_eq!(store.capacity(), 16);
/// ```
#[derive(Debug)]
pub struct PropertyStore {
    len: usize,
    policy: GrowthPolicy,
    table: PropertyTable,
}

impl PropertyStore {
    /// Create an empty container with the default growth policy
    /// (exact-fit capacity, shrink on every reduction)
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Create an empty container with the given growth policy
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        PropertyStore {
            len: 0,
            policy,
            table: PropertyTable::new(),
        }
    }

    /// Clone another container's schema and data at a new size
    ///
    /// The copy keeps the source's property ids, layouts, and growth policy.
    /// Rows within the source length are copied; rows beyond it are
    /// zero-initialized.
    pub fn resized_copy(&self, new_len: usize) -> Self {
        let capacity = self.policy.capacity_for(new_len);
        PropertyStore {
            len: new_len,
            policy: self.policy,
            table: self.table.clone_resized(new_len.min(self.len), capacity),
        }
    }

    /// Number of live rows
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the container holds no live rows
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Row slots currently backed by allocated memory in every column
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of registered properties
    pub fn num_properties(&self) -> usize {
        self.table.len()
    }

    /// The growth policy currently in effect
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Set the capacity quantum; takes effect from the next reallocation
    pub fn set_granularity(&mut self, granularity: usize) {
        self.policy.granularity = granularity;
    }

    /// Set the slack required before capacity shrinks
    pub fn set_shrink_threshold(&mut self, shrink_threshold: usize) {
        self.policy.shrink_threshold = shrink_threshold;
    }

    /// Register a scalar column of `T`, zero-filled for all existing rows
    ///
    /// Cost is proportional to the current capacity. The returned id stays
    /// unique for the container lifetime.
    pub fn add_scalar<T: ColumnElement>(&mut self) -> PropertyId {
        self.table.add(ColumnLayout::scalar(T::DATA_TYPE))
    }

    /// Register an array column of `width` elements of `T` per row
    ///
    /// The width is fixed for the lifetime of the column and must be at
    /// least 1.
    pub fn add_array<T: ColumnElement>(&mut self, width: usize) -> PropertyId {
        assert!(width >= 1, "array property width must be at least 1");
        self.table.add(ColumnLayout::array(T::DATA_TYPE, width))
    }

    /// Release the column registered under `id`
    ///
    /// Accessors cannot outlive this call (they borrow the container);
    /// using the erased id afterwards reports `UnknownProperty`.
    pub fn erase_property(&mut self, id: PropertyId) -> Result<()> {
        self.table.erase(id)
    }

    /// Remove all rows; capacity follows the shrink policy
    pub fn clear(&mut self) {
        self.resize(0);
    }

    /// Grow or shrink the logical size
    ///
    /// New rows are zero-initialized in every column. Growth reallocates to
    /// the policy's rounded capacity when needed; shrink reallocates only
    /// once the policy's slack threshold is reached.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.len {
            self.reserve(new_len);
            // slots past the old length are already zero in every column
            self.len = new_len;
        } else if new_len < self.len {
            let old_len = self.len;
            for column in self.table.columns_mut() {
                column.zero_rows(new_len..old_len);
            }
            self.len = new_len;
            self.maybe_shrink();
        }
    }

    /// Insert one zero-initialized row at `pos`, shifting the tail right
    ///
    /// Returns the position of the inserted row.
    pub fn insert(&mut self, pos: usize) -> usize {
        self.insert_n(pos, 1)
    }

    /// Insert `n` zero-initialized rows at `pos`, shifting the tail right
    ///
    /// Returns the position of the first inserted row.
    pub fn insert_n(&mut self, pos: usize, n: usize) -> usize {
        assert!(
            pos <= self.len,
            "insert position {pos} past the live range {}",
            self.len
        );
        if n == 0 {
            return pos;
        }
        self.reserve(self.len + n);
        let len = self.len;
        for column in self.table.columns_mut() {
            column.shift_tail_right(pos, n, len);
            column.zero_rows(pos..pos + n);
        }
        self.len += n;
        pos
    }

    /// Insert a full copy of row `src` at `pos`, shifting the tail right
    ///
    /// Every registered column copies the source row. The result always
    /// equals capture-the-source-row, then shift, then write: no state
    /// mixing pre- and post-shift data is observable, even when the source
    /// row itself is shifted.
    pub fn insert_copy(&mut self, pos: usize, src: usize) -> usize {
        assert!(
            pos <= self.len,
            "insert position {pos} past the live range {}",
            self.len
        );
        assert!(
            src < self.len,
            "copy source {src} past the live range {}",
            self.len
        );
        self.reserve(self.len + 1);
        // a source at or past the insert position moves one slot right with
        // the tail, so reading it there afterwards sees the pre-shift row
        let from = if src >= pos { src + 1 } else { src };
        let len = self.len;
        for column in self.table.columns_mut() {
            column.shift_tail_right(pos, 1, len);
            column.copy_rows_within(from..from + 1, pos);
        }
        self.len += 1;
        pos
    }

    /// Remove the row at `pos`, shifting the tail left
    ///
    /// Returns the position of the row that followed it.
    pub fn erase(&mut self, pos: usize) -> usize {
        assert!(
            pos < self.len,
            "erase position {pos} past the live range {}",
            self.len
        );
        self.erase_range(pos..pos + 1)
    }

    /// Remove the rows `range`, shifting the tail left
    ///
    /// Returns the position of the first row after the removed range.
    pub fn erase_range(&mut self, range: Range<usize>) -> usize {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "erase range {}..{} past the live range {}",
            range.start,
            range.end,
            self.len
        );
        if range.is_empty() {
            return range.start;
        }
        let len = self.len;
        for column in self.table.columns_mut() {
            column.shift_tail_left(range.start, range.end, len);
        }
        self.len -= range.end - range.start;
        self.maybe_shrink();
        range.start
    }

    /// Copy every column's data of row `src` onto row `dst`
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        assert!(
            src < self.len && dst < self.len,
            "row copy {src} -> {dst} past the live range {}",
            self.len
        );
        for column in self.table.columns_mut() {
            column.copy_rows_within(src..src + 1, dst);
        }
    }

    /// Copy the rows `src` onto the rows starting at `dst`
    ///
    /// Overlapping ranges are handled: the result is as if the source rows
    /// were read in full before any destination row was written.
    pub fn copy_rows(&mut self, src: Range<usize>, dst: usize) {
        assert!(
            src.start <= src.end && src.end <= self.len,
            "source rows {}..{} past the live range {}",
            src.start,
            src.end,
            self.len
        );
        assert!(
            dst + (src.end - src.start) <= self.len,
            "destination rows past the live range {}",
            self.len
        );
        for column in self.table.columns_mut() {
            column.copy_rows_within(src.clone(), dst);
        }
    }

    /// Read-only handle to the row at `index`; unchecked by design
    pub fn row(&self, index: usize) -> Row {
        debug_assert!(index < self.len);
        Row { index }
    }

    /// Bounds-checked read-only handle to the row at `index`
    pub fn at(&self, index: usize) -> Result<Row> {
        if index >= self.len {
            return Err(PropError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(Row { index })
    }

    /// Iterate the live rows in order
    pub fn rows(&self) -> Rows<'_> {
        Rows::over(0..self.len)
    }

    /// Iterate a sub-range of the live rows in order
    pub fn rows_range(&self, range: Range<usize>) -> Rows<'_> {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "row range {}..{} past the live range {}",
            range.start,
            range.end,
            self.len
        );
        Rows::over(range)
    }

    /// Bind a read-only accessor to a scalar column
    pub fn scalars<T: ColumnElement>(&self, id: PropertyId) -> Result<ScalarReader<'_, T>> {
        access::bind_scalar(self, id)
    }

    /// Bind a read-only accessor to an array column
    pub fn arrays<T: ColumnElement>(&self, id: PropertyId) -> Result<ArrayReader<'_, T>> {
        access::bind_array(self, id)
    }

    /// Open the mutable-access view for writing through column accessors
    pub fn access_mut(&mut self) -> AccessMut<'_> {
        AccessMut::new(self)
    }

    pub(crate) fn table(&self) -> &PropertyTable {
        &self.table
    }

    fn reserve(&mut self, new_len: usize) {
        if new_len > self.table.capacity() {
            self.table.set_capacity(self.policy.capacity_for(new_len));
        }
    }

    fn maybe_shrink(&mut self) {
        if self.policy.should_shrink(self.len, self.table.capacity()) {
            self.table.set_capacity(self.policy.capacity_for(self.len));
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

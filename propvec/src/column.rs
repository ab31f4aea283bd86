//! Type-erased column buffers
//!
//! One `Column` owns the backing memory of a single property for every row
//! slot of the container. Storage is a vector of u64 words, so each of the
//! supported element types can be viewed through `bytemuck` casts without
//! any alignment concern. The buffer always spans the container capacity,
//! never the logical size, and every row slot at or past the logical size
//! holds zero bytes in every column. Erase and resize re-zero the slots they
//! vacate, which is what lets growth into existing capacity skip a fill
//! pass.

use core::cell::{Ref, RefCell, RefMut};
use core::ops::Range;

use propvec_core::{ColumnElement, ColumnLayout};

/// Backing buffer of one property column
#[derive(Debug)]
pub(crate) struct Column {
    layout: ColumnLayout,
    words: RefCell<Vec<u64>>,
}

impl Column {
    /// Allocate a zero-filled column spanning `capacity` row slots
    pub(crate) fn new(layout: ColumnLayout, capacity: usize) -> Self {
        Column {
            layout,
            words: RefCell::new(vec![0u64; layout.words_for(capacity)]),
        }
    }

    pub(crate) fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Reallocate the buffer for a new capacity
    ///
    /// Growth zero-fills the new slots; shrink truncates and returns the
    /// excess memory to the allocator. The caller guarantees the new
    /// capacity is not below the logical size, so truncation only ever cuts
    /// through slots that the zero-fill invariant already covers.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        let words = self.words.get_mut();
        let new_len = self.layout.words_for(capacity);
        if new_len < words.len() {
            words.truncate(new_len);
            words.shrink_to_fit();
        } else {
            words.resize(new_len, 0);
        }
    }

    /// Zero-fill the given row slots
    pub(crate) fn zero_rows(&mut self, rows: Range<usize>) {
        let stride = self.layout.stride_bytes();
        let bytes = self.bytes_mut();
        bytes[rows.start * stride..rows.end * stride].fill(0);
    }

    /// Move rows `[pos, len)` to `[pos + n, len + n)`
    ///
    /// The caller has already grown the buffer to hold `len + n` rows. The
    /// vacated slots keep their old contents and are overwritten or zeroed
    /// by the caller.
    pub(crate) fn shift_tail_right(&mut self, pos: usize, n: usize, len: usize) {
        let stride = self.layout.stride_bytes();
        let bytes = self.bytes_mut();
        bytes.copy_within(pos * stride..len * stride, (pos + n) * stride);
    }

    /// Remove rows `[first, last)` by moving `[last, len)` down to `first`
    ///
    /// The slots vacated at the tail are re-zeroed to keep the invariant
    /// that everything past the logical size is zero.
    pub(crate) fn shift_tail_left(&mut self, first: usize, last: usize, len: usize) {
        let stride = self.layout.stride_bytes();
        let removed = last - first;
        let bytes = self.bytes_mut();
        bytes.copy_within(last * stride..len * stride, first * stride);
        bytes[(len - removed) * stride..len * stride].fill(0);
    }

    /// Copy the rows `src` onto the slots starting at `dst`
    ///
    /// Overlapping ranges are handled; the result is as if the source rows
    /// were read in full before any destination slot was written.
    pub(crate) fn copy_rows_within(&mut self, src: Range<usize>, dst: usize) {
        let stride = self.layout.stride_bytes();
        let bytes = self.bytes_mut();
        bytes.copy_within(src.start * stride..src.end * stride, dst * stride);
    }

    /// Copy the first `rows` rows out of `src` into this column
    ///
    /// Both columns share a layout; this column's buffer is already large
    /// enough. Used by the resizing copy constructor.
    pub(crate) fn copy_prefix_from(&mut self, src: &Column, rows: usize) {
        debug_assert_eq!(self.layout, src.layout);
        let stride = self.layout.stride_bytes();
        let src_words = match src.words.try_borrow() {
            Ok(words) => words,
            Err(_) => panic!("source column is exclusively borrowed during a container copy"),
        };
        let src_bytes: &[u8] = bytemuck::cast_slice(src_words.as_slice());
        let bytes = bytemuck::cast_slice_mut::<u64, u8>(self.words.get_mut().as_mut_slice());
        bytes[..rows * stride].copy_from_slice(&src_bytes[..rows * stride]);
    }

    /// Shared typed view of the whole buffer, or None while a writer exists
    pub(crate) fn try_borrow_elems<T: ColumnElement>(&self) -> Option<Ref<'_, [T]>> {
        debug_assert_eq!(self.layout.data_type, T::DATA_TYPE);
        let words = self.words.try_borrow().ok()?;
        Some(Ref::map(words, |words| bytemuck::cast_slice(words.as_slice())))
    }

    /// Exclusive typed view of the whole buffer, or None while any other
    /// accessor for this column exists
    pub(crate) fn try_borrow_elems_mut<T: ColumnElement>(&self) -> Option<RefMut<'_, [T]>> {
        debug_assert_eq!(self.layout.data_type, T::DATA_TYPE);
        let words = self.words.try_borrow_mut().ok()?;
        Some(RefMut::map(words, |words| {
            bytemuck::cast_slice_mut(words.as_mut_slice())
        }))
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(self.words.get_mut().as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propvec_core::DataType;

    fn fill_seq(column: &Column, len: usize) {
        let mut elems = column.try_borrow_elems_mut::<i32>().unwrap();
        for (i, slot) in elems.iter_mut().take(len).enumerate() {
            *slot = i as i32;
        }
    }

    fn snapshot(column: &Column, len: usize) -> Vec<i32> {
        let elems = column.try_borrow_elems::<i32>().unwrap();
        elems[..len].to_vec()
    }

    #[test]
    fn test_new_column_is_zeroed() {
        let column = Column::new(ColumnLayout::array(DataType::F32, 3), 7);
        let elems = column.try_borrow_elems::<f32>().unwrap();
        assert!(elems[..21].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_grow_preserves_data_and_zero_fills() {
        let mut column = Column::new(ColumnLayout::scalar(DataType::I32), 4);
        fill_seq(&column, 4);
        column.set_capacity(16);
        let elems = column.try_borrow_elems::<i32>().unwrap();
        assert_eq!(&elems[..4], &[0, 1, 2, 3]);
        assert!(elems[4..16].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_shift_right_then_zero_opens_a_gap() {
        let mut column = Column::new(ColumnLayout::scalar(DataType::I32), 8);
        fill_seq(&column, 5);
        column.shift_tail_right(2, 2, 5);
        column.zero_rows(2..4);
        assert_eq!(snapshot(&column, 7), vec![0, 1, 0, 0, 2, 3, 4]);
    }

    #[test]
    fn test_shift_left_closes_range_and_rezeroes_tail() {
        let mut column = Column::new(ColumnLayout::scalar(DataType::I32), 8);
        fill_seq(&column, 6);
        column.shift_tail_left(1, 3, 6);
        assert_eq!(snapshot(&column, 6), vec![0, 3, 4, 5, 0, 0]);
    }

    #[test]
    fn test_copy_rows_handles_overlap() {
        let mut column = Column::new(ColumnLayout::scalar(DataType::I32), 8);
        fill_seq(&column, 8);
        column.copy_rows_within(1..5, 3);
        assert_eq!(snapshot(&column, 8), vec![0, 1, 2, 1, 2, 3, 4, 7]);
    }

    #[test]
    fn test_borrow_rules_per_column() {
        let column = Column::new(ColumnLayout::scalar(DataType::I32), 4);
        {
            let _a = column.try_borrow_elems::<i32>().unwrap();
            let _b = column.try_borrow_elems::<i32>().unwrap();
            assert!(column.try_borrow_elems_mut::<i32>().is_none());
        }
        let _w = column.try_borrow_elems_mut::<i32>().unwrap();
        assert!(column.try_borrow_elems::<i32>().is_none());
        assert!(column.try_borrow_elems_mut::<i32>().is_none());
    }

    #[test]
    fn test_copy_prefix_from_other_column() {
        let a = Column::new(ColumnLayout::array(DataType::U32, 2), 4);
        {
            let mut elems = a.try_borrow_elems_mut::<u32>().unwrap();
            for (i, slot) in elems.iter_mut().take(8).enumerate() {
                *slot = 100 + i as u32;
            }
        }
        let mut b = Column::new(ColumnLayout::array(DataType::U32, 2), 6);
        b.copy_prefix_from(&a, 3);
        let elems = b.try_borrow_elems::<u32>().unwrap();
        assert_eq!(&elems[..6], &[100, 101, 102, 103, 104, 105]);
        assert!(elems[6..12].iter().all(|&v| v == 0));
    }
}

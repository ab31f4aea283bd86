//! Property registry
//!
//! Maps opaque property identifiers to their column buffers and owns the
//! shared capacity bookkeeping: every registered column spans exactly the
//! capacity recorded here. Identifiers are handed out monotonically and
//! never recycled, so an id stays unambiguous for the container lifetime
//! even after its column is erased.

use hashbrown::HashMap;

use propvec_core::{ColumnLayout, PropError, PropertyId, Result};

use crate::column::Column;

#[derive(Debug)]
pub(crate) struct PropertyTable {
    columns: HashMap<PropertyId, Column>,
    next_id: u64,
    capacity: usize,
}

impl PropertyTable {
    pub(crate) fn new() -> Self {
        PropertyTable {
            columns: HashMap::new(),
            next_id: 0,
            capacity: 0,
        }
    }

    /// Number of registered properties
    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    /// Row slots currently backed by every column
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a column of the given layout, zero-filled to capacity
    pub(crate) fn add(&mut self, layout: ColumnLayout) -> PropertyId {
        let id = PropertyId::from_raw(self.next_id);
        self.next_id += 1;
        self.columns.insert(id, Column::new(layout, self.capacity));
        id
    }

    /// Release the column registered under `id`
    pub(crate) fn erase(&mut self, id: PropertyId) -> Result<()> {
        match self.columns.remove(&id) {
            Some(_) => Ok(()),
            None => Err(PropError::UnknownProperty { id }),
        }
    }

    /// Resolve an id to its column
    pub(crate) fn get(&self, id: PropertyId) -> Result<&Column> {
        self.columns
            .get(&id)
            .ok_or(PropError::UnknownProperty { id })
    }

    /// Reallocate every column for the new shared capacity
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        for column in self.columns.values_mut() {
            column.set_capacity(capacity);
        }
        self.capacity = capacity;
    }

    /// Mutably visit every column (structural operations)
    pub(crate) fn columns_mut(&mut self) -> impl Iterator<Item = &mut Column> {
        self.columns.values_mut()
    }

    /// Clone the schema (ids, layouts, id counter) into a fresh table
    ///
    /// Each new column copies the first `rows` rows of its source and is
    /// zero elsewhere. Used by the resizing copy constructor.
    pub(crate) fn clone_resized(&self, rows: usize, capacity: usize) -> Self {
        debug_assert!(rows <= capacity);
        let mut columns = HashMap::with_capacity(self.columns.len());
        for (&id, src) in &self.columns {
            let mut column = Column::new(src.layout(), capacity);
            column.copy_prefix_from(src, rows);
            columns.insert(id, column);
        }
        PropertyTable {
            columns,
            next_id: self.next_id,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propvec_core::DataType;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut table = PropertyTable::new();
        let a = table.add(ColumnLayout::scalar(DataType::I32));
        let b = table.add(ColumnLayout::array(DataType::F32, 2));
        assert!(a < b);
        assert_eq!(table.len(), 2);

        table.erase(a).unwrap();
        let c = table.add(ColumnLayout::scalar(DataType::F64));
        assert!(b < c);
        assert_ne!(a, c);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_erase_twice_reports_unknown() {
        let mut table = PropertyTable::new();
        let id = table.add(ColumnLayout::scalar(DataType::U64));
        table.erase(id).unwrap();
        assert_eq!(table.erase(id), Err(PropError::UnknownProperty { id }));
        assert!(table.get(id).is_err());
    }

    #[test]
    fn test_new_column_spans_current_capacity() {
        let mut table = PropertyTable::new();
        table.set_capacity(48);
        let id = table.add(ColumnLayout::array(DataType::F32, 2));
        let elems = table.get(id).unwrap().try_borrow_elems::<f32>().unwrap();
        assert!(elems.len() >= 96);
        assert!(elems[..96].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_clone_resized_keeps_ids_and_counter() {
        let mut table = PropertyTable::new();
        let id = table.add(ColumnLayout::scalar(DataType::I32));
        table.set_capacity(4);
        {
            let mut elems = table.get(id).unwrap().try_borrow_elems_mut::<i32>().unwrap();
            elems[..4].copy_from_slice(&[5, 6, 7, 8]);
        }

        let copy = table.clone_resized(2, 8);
        assert_eq!(copy.len(), 1);
        assert_eq!(copy.capacity(), 8);
        let elems = copy.get(id).unwrap().try_borrow_elems::<i32>().unwrap();
        assert_eq!(&elems[..4], &[5, 6, 0, 0]);
        drop(elems);

        // the copy keeps allocating fresh ids after the source's last one
        let mut copy = copy;
        let next = copy.add(ColumnLayout::scalar(DataType::U32));
        assert!(next > id);
    }
}

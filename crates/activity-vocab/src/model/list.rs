//! Ordered cells for repeatable properties.
//!
//! Position is meaningful: appends, prepends and removals never reorder the
//! remaining cells.
//!
//! Unrecognized data for the property as a whole is anchored on the first
//! cell. [`PropertyList::has_unrecognized`] and friends look only at index 0;
//! use [`PropertyList::is_unrecognized_at`] to inspect other positions.

use serde_json::Value;

use crate::error::AccessError;
use crate::model::{CellValue, Entity, Iri, Literal, PropertySpec, ValueCell};

/// The cells of one non-functional property, in order.
#[derive(Debug, Clone)]
pub struct PropertyList {
    spec: &'static PropertySpec,
    cells: Vec<ValueCell>,
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.spec.name == other.spec.name && self.cells == other.cells
    }
}

impl PropertyList {
    /// Creates an empty list for the given property.
    pub fn new(spec: &'static PropertySpec) -> Self {
        Self { spec, cells: Vec::new() }
    }

    /// Creates a list from decoded, populated cells.
    pub(crate) fn from_cells(spec: &'static PropertySpec, cells: Vec<ValueCell>) -> Self {
        Self { spec, cells }
    }

    /// The property this list belongs to.
    pub fn spec(&self) -> &'static PropertySpec {
        self.spec
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueCell> {
        self.cells.iter()
    }

    /// Returns the cell at `index`.
    pub fn get(&self, index: usize) -> Result<&ValueCell, AccessError> {
        let len = self.cells.len();
        self.cells
            .get(index)
            .ok_or(AccessError::IndexOutOfBounds { index, len })
    }

    /// Returns the cell at `index` for in-place changes.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut ValueCell, AccessError> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(AccessError::IndexOutOfBounds { index, len })
    }

    // =========================================================================
    // Insertion and removal
    // =========================================================================

    /// Appends a value at the tail.
    pub fn append(&mut self, value: CellValue) -> Result<(), AccessError> {
        let cell = ValueCell::with_value(self.spec, value)?;
        self.cells.push(cell);
        Ok(())
    }

    /// Inserts a value at the head.
    pub fn prepend(&mut self, value: CellValue) -> Result<(), AccessError> {
        let cell = ValueCell::with_value(self.spec, value)?;
        self.cells.insert(0, cell);
        Ok(())
    }

    /// Inserts a value before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: CellValue) -> Result<(), AccessError> {
        let len = self.cells.len();
        if index > len {
            return Err(AccessError::IndexOutOfBounds { index, len });
        }
        let cell = ValueCell::with_value(self.spec, value)?;
        self.cells.insert(index, cell);
        Ok(())
    }

    /// Removes the cell at `index`, shifting later cells down.
    pub fn remove_at(&mut self, index: usize) -> Result<CellValue, AccessError> {
        let len = self.cells.len();
        if index >= len {
            return Err(AccessError::IndexOutOfBounds { index, len });
        }
        let mut cell = self.cells.remove(index);
        // Cells in a list are always populated.
        cell.take().ok_or(AccessError::IndexOutOfBounds { index, len })
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn append_entity(&mut self, entity: Entity) -> Result<(), AccessError> {
        self.append(CellValue::Entity(Box::new(entity)))
    }

    pub fn prepend_entity(&mut self, entity: Entity) -> Result<(), AccessError> {
        self.prepend(CellValue::Entity(Box::new(entity)))
    }

    pub fn append_reference(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.append(CellValue::Reference(iri))
    }

    pub fn prepend_reference(&mut self, iri: Iri) -> Result<(), AccessError> {
        self.prepend(CellValue::Reference(iri))
    }

    pub fn append_literal(&mut self, literal: impl Into<Literal>) -> Result<(), AccessError> {
        self.append(CellValue::Literal(literal.into()))
    }

    pub fn prepend_literal(&mut self, literal: impl Into<Literal>) -> Result<(), AccessError> {
        self.prepend(CellValue::Literal(literal.into()))
    }

    /// Appends a raw value at the tail as its own cell.
    pub fn append_unrecognized(&mut self, raw: Value) {
        let mut cell = ValueCell::new(self.spec);
        cell.set_unrecognized(raw);
        self.cells.push(cell);
    }

    // =========================================================================
    // Positional queries
    // =========================================================================

    pub fn is_entity_at(&self, index: usize) -> Result<bool, AccessError> {
        Ok(self.get(index)?.is_entity())
    }

    pub fn get_entity_at(&self, index: usize) -> Result<&Entity, AccessError> {
        self.get(index)?.get_entity()
    }

    pub fn is_reference_at(&self, index: usize) -> Result<bool, AccessError> {
        Ok(self.get(index)?.is_reference())
    }

    pub fn get_reference_at(&self, index: usize) -> Result<&Iri, AccessError> {
        self.get(index)?.get_reference()
    }

    pub fn is_literal_at(&self, index: usize) -> Result<bool, AccessError> {
        Ok(self.get(index)?.is_literal())
    }

    pub fn get_literal_at(&self, index: usize) -> Result<&Literal, AccessError> {
        self.get(index)?.get_literal()
    }

    pub fn is_string_at(&self, index: usize) -> Result<bool, AccessError> {
        Ok(self.get(index)?.is_string())
    }

    pub fn get_string_at(&self, index: usize) -> Result<&str, AccessError> {
        self.get(index)?.get_string()
    }

    pub fn is_unrecognized_at(&self, index: usize) -> Result<bool, AccessError> {
        Ok(self.get(index)?.has_unrecognized())
    }

    pub fn get_unrecognized_at(&self, index: usize) -> Result<&Value, AccessError> {
        self.get(index)?.get_unrecognized()
    }

    /// Iterates over the references in the list, skipping other variants.
    pub fn references(&self) -> impl Iterator<Item = &Iri> {
        self.cells.iter().filter_map(|cell| cell.get_reference().ok())
    }

    // =========================================================================
    // Property-level unrecognized data (anchored on the first cell)
    // =========================================================================

    /// Returns true if the first cell holds unrecognized data.
    pub fn has_unrecognized(&self) -> bool {
        self.cells.first().is_some_and(ValueCell::has_unrecognized)
    }

    /// Returns the unrecognized data held by the first cell.
    pub fn get_unrecognized(&self) -> Result<&Value, AccessError> {
        self.get(0)?.get_unrecognized()
    }

    /// Records unrecognized data for the property: replaces the first cell's
    /// content, or creates the first cell if the list is empty.
    pub fn set_unrecognized(&mut self, raw: Value) {
        match self.cells.first_mut() {
            Some(cell) => cell.set_unrecognized(raw),
            None => self.append_unrecognized(raw),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a ValueCell;
    type IntoIter = std::slice::Iter<'a, ValueCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

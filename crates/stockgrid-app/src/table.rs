// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use tracing::debug;

use crate::{Product, ProductField, TableError, TableResult};

/// Supplies freshly synthesized products when the table is (re)populated.
pub trait RecordSource {
    fn next_product(&mut self) -> Product;
}

/// Snapshot of the row a pending confirmation targets. It is a copy taken at
/// selection time, so later edits to the same row do not show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub index: usize,
    pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    Idle,
    Pending(Selection),
}

impl Confirmation {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// An uncommitted cell value. Records stay untouched until it is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub index: usize,
    pub field: ProductField,
    pub value: String,
}

/// Result of a committed cell write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellEdit {
    pub index: usize,
    pub field: ProductField,
    pub previous: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct TableViewModel {
    records: Vec<Product>,
    filter: String,
    confirmation: Confirmation,
    draft: Option<EditDraft>,
}

impl TableViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Product>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Replaces every record with `count` new ones drawn from `source`.
    /// Any selection or draft pointed at the discarded rows is dropped.
    pub fn generate<S>(&mut self, count: usize, source: &mut S)
    where
        S: RecordSource + ?Sized,
    {
        self.records = (0..count).map(|_| source.next_product()).collect();
        self.confirmation = Confirmation::Idle;
        self.draft = None;
        debug!(count, "generated records");
    }

    pub fn records(&self) -> &[Product] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        debug!(filter = %self.filter, "filter changed");
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(String::new());
    }

    /// Rows whose fields contain the filter (case-insensitive), paired with
    /// their position in the full record set. Every call starts over.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &Product)> + '_ {
        let needle = self.filter.to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, product)| product.matches_lowercase(&needle))
    }

    pub fn visible_len(&self) -> usize {
        self.visible_rows().count()
    }

    /// Writes `value` verbatim into the field named `field_name` of row
    /// `index`.
    pub fn update_field(
        &mut self,
        index: usize,
        field_name: &str,
        value: impl Into<String>,
    ) -> TableResult<CellEdit> {
        let field = ProductField::parse(field_name)
            .ok_or_else(|| TableError::UnknownField(field_name.to_owned()))?;
        self.set_field(index, field, value)
    }

    pub fn set_field(
        &mut self,
        index: usize,
        field: ProductField,
        value: impl Into<String>,
    ) -> TableResult<CellEdit> {
        let current = self.checked(index)?;
        let value = value.into();
        let edit = CellEdit {
            index,
            field,
            previous: current.field(field).to_owned(),
            value: value.clone(),
        };
        let next = current.with_field(field, value);
        self.records[index] = next;
        debug!(index, field = field.as_str(), "cell updated");
        Ok(edit)
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.confirmation {
            Confirmation::Idle => None,
            Confirmation::Pending(selection) => Some(selection),
        }
    }

    pub fn confirmation(&self) -> &Confirmation {
        &self.confirmation
    }

    /// Opens a confirmation for row `index`, replacing any pending one.
    pub fn select(&mut self, index: usize) -> TableResult<()> {
        let product = self.checked(index)?.clone();
        self.confirmation = Confirmation::Pending(Selection { index, product });
        debug!(index, "row selected");
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.confirmation = Confirmation::Idle;
    }

    /// Leaves the pending confirmation and hands back its snapshot. The
    /// table itself is not modified; callers decide what confirming means.
    pub fn confirm(&mut self) -> Option<Selection> {
        let released = self.release();
        if let Some(selection) = &released {
            debug!(index = selection.index, "selection confirmed");
        }
        released
    }

    pub fn cancel(&mut self) -> Option<Selection> {
        let released = self.release();
        if let Some(selection) = &released {
            debug!(index = selection.index, "selection cancelled");
        }
        released
    }

    fn release(&mut self) -> Option<Selection> {
        match std::mem::take(&mut self.confirmation) {
            Confirmation::Idle => None,
            Confirmation::Pending(selection) => Some(selection),
        }
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Starts editing a cell and returns the draft, seeded with the current
    /// value.
    pub fn begin_edit(&mut self, index: usize, field: ProductField) -> TableResult<&str> {
        let value = self.checked(index)?.field(field).to_owned();
        let draft = self.draft.insert(EditDraft {
            index,
            field,
            value,
        });
        Ok(&draft.value)
    }

    pub fn update_draft(&mut self, value: impl Into<String>) {
        if let Some(draft) = &mut self.draft {
            draft.value = value.into();
        }
    }

    /// Writes the open draft into the table. `Ok(None)` when nothing is being
    /// edited.
    pub fn commit_edit(&mut self) -> TableResult<Option<CellEdit>> {
        let Some(draft) = self.draft.take() else {
            return Ok(None);
        };
        match self.set_field(draft.index, draft.field, draft.value.clone()) {
            Ok(edit) => Ok(Some(edit)),
            Err(error) => {
                self.draft = Some(draft);
                Err(error)
            }
        }
    }

    pub fn discard_edit(&mut self) {
        self.draft = None;
    }

    fn checked(&self, index: usize) -> TableResult<&Product> {
        self.records.get(index).ok_or(TableError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }
}

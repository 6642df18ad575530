//! Stateless data-table view model.
//!
//! [`TableView::build`] is a pure function of rows, columns, selection, sort
//! and loading flag. Interactions come back as [`TableEvent`]s for the list
//! controller; the table itself never fetches.

use std::collections::HashSet;

use smp_core::{Entity, SortDirection, SortState};

/// One column of a table over `T`.
pub struct Column<T> {
    /// Backend sort key.
    pub field: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(field: &'static str, header: &'static str, render: fn(&T) -> String) -> Self {
        Self {
            field,
            header,
            sortable: true,
            render,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            header: self.header,
            sortable: self.sortable,
            render: self.render,
        }
    }
}

impl<T> core::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<Id> {
    Sort(String),
    SelectRow(Id),
    SelectAllChange(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub field: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<Id> {
    pub id: Id,
    pub selected: bool,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<Id> {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView<Id>>,
    /// Checkbox column shown.
    pub selectable: bool,
    pub all_selected: bool,
    pub loading: bool,
    pub empty_message: &'static str,
}

impl<Id: Copy + Eq + std::hash::Hash + core::fmt::Display> TableView<Id> {
    pub fn build<T>(
        rows: &[T],
        columns: &[Column<T>],
        selection: Option<&HashSet<Id>>,
        sort: Option<&SortState>,
        loading: bool,
    ) -> Self
    where
        T: Entity<Id = Id>,
    {
        let headers = columns
            .iter()
            .map(|c| HeaderCell {
                field: c.field,
                label: c.header,
                sortable: c.sortable,
                direction: sort.and_then(|s| s.direction_of(c.field)),
            })
            .collect();

        let rows: Vec<RowView<Id>> = rows
            .iter()
            .map(|r| RowView {
                id: r.id(),
                selected: selection.is_some_and(|s| s.contains(&r.id())),
                cells: columns.iter().map(|c| (c.render)(r)).collect(),
            })
            .collect();

        Self {
            all_selected: selection.is_some() && !rows.is_empty() && rows.iter().all(|r| r.selected),
            headers,
            rows,
            selectable: selection.is_some(),
            loading,
            empty_message: "No records found",
        }
    }

    /// Header click. Unsortable or unknown columns raise nothing.
    pub fn click_header(&self, field: &str) -> Option<TableEvent<Id>> {
        self.headers
            .iter()
            .find(|h| h.field == field && h.sortable)
            .map(|h| TableEvent::Sort(h.field.to_string()))
    }

    pub fn click_row_checkbox(&self, id: Id) -> Option<TableEvent<Id>> {
        (self.selectable && self.rows.iter().any(|r| r.id == id)).then_some(TableEvent::SelectRow(id))
    }

    /// Header checkbox: flips between all and none.
    pub fn click_select_all(&self) -> Option<TableEvent<Id>> {
        self.selectable
            .then_some(TableEvent::SelectAllChange(!self.all_selected))
    }

    /// Fixed-width plain text, for terminals.
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.label.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(&row.cells) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:<width$}", width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(
            self.headers
                .iter()
                .map(|h| {
                    let mark = match h.direction {
                        Some(SortDirection::Asc) => " ^",
                        Some(SortDirection::Desc) => " v",
                        None => "",
                    };
                    format!("{}{mark}", h.label)
                })
                .collect(),
        )];
        if self.rows.is_empty() {
            out.push(if self.loading { "Loading..." } else { self.empty_message }.to_string());
        }
        for row in &self.rows {
            out.push(line(row.cells.clone()));
        }
        out.join("\n")
    }
}

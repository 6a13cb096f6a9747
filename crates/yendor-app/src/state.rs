// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::catalog::Catalog;
use crate::filter::filter_view;
use crate::model::{Category, Record};

/// Navigation state for the reference browser: active category, cursor,
/// scroll window, and the incremental-search buffer. One value of this type
/// is owned by the application loop and mutated only through [`dispatch`].
///
/// Invariants, maintained after every command:
/// - `selected < view.len()` whenever the view is non-empty, `selected == 0`
///   when it is empty;
/// - `scroll <= selected < scroll + viewport_rows` whenever the view is
///   non-empty and `viewport_rows > 0`.
///
/// [`dispatch`]: BrowserState::dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    pub category: Category,
    pub selected: usize,
    pub scroll: usize,
    pub search_active: bool,
    pub query: String,
    pub viewport_rows: usize,
    view: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserCommand {
    NextCategory,
    PrevCategory,
    MoveSelection(isize),
    PageUp,
    PageDown,
    JumpToStart,
    JumpToEnd,
    EnterSearch,
    ExitSearch { commit: bool },
    QueryPush(char),
    QueryPop,
    SetViewportRows(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    CategoryChanged(Category),
    SelectionMoved(usize),
    SearchModeChanged(bool),
    ViewFiltered { matches: usize },
    ViewportResized(usize),
}

impl BrowserState {
    pub fn new(catalog: &Catalog, category: Category) -> Self {
        Self {
            category,
            selected: 0,
            scroll: 0,
            search_active: false,
            query: String::new(),
            viewport_rows: 0,
            view: filter_view(catalog.records(category), ""),
        }
    }

    /// Indices into the active category's records that satisfy the current
    /// query, in catalog order.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn selected_record<'a>(&self, catalog: &'a Catalog) -> Option<&'a Record> {
        let index = *self.view.get(self.selected)?;
        catalog.records(self.category).get(index)
    }

    /// The slice of view positions currently inside the scroll window.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = self
            .scroll
            .saturating_add(self.viewport_rows)
            .min(self.view.len());
        self.scroll..end
    }

    pub fn dispatch(&mut self, catalog: &Catalog, command: BrowserCommand) -> Vec<BrowserEvent> {
        match command {
            BrowserCommand::NextCategory => self.set_category(catalog, self.category.next()),
            BrowserCommand::PrevCategory => self.set_category(catalog, self.category.prev()),
            BrowserCommand::MoveSelection(delta) => self.move_selection(delta),
            BrowserCommand::PageUp => self.move_selection(-(self.viewport_rows as isize)),
            BrowserCommand::PageDown => self.move_selection(self.viewport_rows as isize),
            BrowserCommand::JumpToStart => {
                if self.view.is_empty() || self.selected == 0 {
                    self.scroll = 0;
                    return Vec::new();
                }
                self.selected = 0;
                self.scroll = 0;
                vec![BrowserEvent::SelectionMoved(self.selected)]
            }
            BrowserCommand::JumpToEnd => {
                let Some(last) = self.view.len().checked_sub(1) else {
                    return Vec::new();
                };
                if self.selected == last {
                    return Vec::new();
                }
                self.selected = last;
                self.adjust_scroll();
                vec![BrowserEvent::SelectionMoved(self.selected)]
            }
            BrowserCommand::EnterSearch => {
                self.search_active = true;
                self.query.clear();
                let matches = self.refilter(catalog);
                vec![
                    BrowserEvent::SearchModeChanged(true),
                    BrowserEvent::ViewFiltered { matches },
                ]
            }
            BrowserCommand::ExitSearch { commit } => {
                self.search_active = false;
                let mut events = vec![BrowserEvent::SearchModeChanged(false)];
                if !commit {
                    self.query.clear();
                    let matches = self.refilter(catalog);
                    events.push(BrowserEvent::ViewFiltered { matches });
                }
                events
            }
            BrowserCommand::QueryPush(character) => {
                self.query.push(character);
                let matches = self.refilter(catalog);
                vec![BrowserEvent::ViewFiltered { matches }]
            }
            BrowserCommand::QueryPop => {
                if self.query.pop().is_none() {
                    return Vec::new();
                }
                let matches = self.refilter(catalog);
                vec![BrowserEvent::ViewFiltered { matches }]
            }
            BrowserCommand::SetViewportRows(rows) => {
                if self.viewport_rows == rows {
                    return Vec::new();
                }
                self.viewport_rows = rows;
                self.adjust_scroll();
                vec![BrowserEvent::ViewportResized(rows)]
            }
        }
    }

    /// Category switch resets the cursor to the top and implicitly clears any
    /// active search; the previous position is deliberately not remembered.
    fn set_category(&mut self, catalog: &Catalog, category: Category) -> Vec<BrowserEvent> {
        self.category = category;
        self.selected = 0;
        self.scroll = 0;
        self.query.clear();
        let matches = self.refilter(catalog);
        vec![
            BrowserEvent::CategoryChanged(category),
            BrowserEvent::ViewFiltered { matches },
        ]
    }

    fn move_selection(&mut self, delta: isize) -> Vec<BrowserEvent> {
        let Some(last) = self.view.len().checked_sub(1) else {
            return Vec::new();
        };

        let next = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize)
        }
        .min(last);

        if next == self.selected {
            return Vec::new();
        }
        self.selected = next;
        self.adjust_scroll();
        vec![BrowserEvent::SelectionMoved(self.selected)]
    }

    /// Re-run the filter against the full category listing and restore the
    /// selection/scroll invariants against the new view.
    fn refilter(&mut self, catalog: &Catalog) -> usize {
        self.view = filter_view(catalog.records(self.category), &self.query);

        if self.view.is_empty() {
            self.selected = 0;
            self.scroll = 0;
        } else {
            if self.selected >= self.view.len() {
                self.selected = self.view.len() - 1;
            }
            self.adjust_scroll();
        }
        self.view.len()
    }

    /// Keep the selected row inside `[scroll, scroll + viewport_rows)`.
    fn adjust_scroll(&mut self) {
        if self.viewport_rows == 0 {
            self.scroll = self.selected;
            return;
        }

        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.viewport_rows {
            self.scroll = self.selected - self.viewport_rows + 1;
        }
    }
}

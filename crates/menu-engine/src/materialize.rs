//! Turn resolved menu IDs into the concrete, displayable item list.
//!
//! Dangling references are dropped silently (with a debug-level trace): a menu
//! deleted mid-edit must not break the live display.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::model::{Item, Menu, Schedule};

/// Read access to menus and items.
pub trait Catalog {
    fn menu_by_id(&self, id: &str) -> Option<&Menu>;

    /// Items for `ids`, in the order of `ids` rather than catalog order, so a
    /// menu's own item ordering reaches the screen. Unknown IDs are skipped.
    fn items_by_ids(&self, ids: &[String]) -> Vec<&Item>;
}

/// A resolved menu with its active items.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMenu<'a> {
    pub menu: &'a Menu,
    /// Active items of this menu, in menu order.
    pub items: Vec<&'a Item>,
}

/// Look up each menu ID, keeping only menus the catalog knows about, each
/// with its active items.
pub fn materialize_menus<'c, C: Catalog>(catalog: &'c C, menu_ids: &[String]) -> Vec<ActiveMenu<'c>> {
    menu_ids
        .iter()
        .filter_map(|id| {
            let menu = catalog.menu_by_id(id);
            if menu.is_none() {
                debug!(menu_id = %id, "dropping unknown menu");
            }
            menu
        })
        .map(|menu| ActiveMenu {
            menu,
            items: catalog
                .items_by_ids(&menu.item_ids)
                .into_iter()
                .filter(|item| item.is_active)
                .collect(),
        })
        .collect()
}

/// Flatten the active items of every resolved menu, de-duplicated by item ID
/// in first-seen order.
pub fn materialize_items<'c, C: Catalog>(catalog: &'c C, menu_ids: &[String]) -> Vec<&'c Item> {
    let mut seen = HashSet::new();
    materialize_menus(catalog, menu_ids)
        .into_iter()
        .flat_map(|active| active.items)
        .filter(|item| seen.insert(item.id.as_str()))
        .collect()
}

/// A catalog held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    menus: Vec<Menu>,
    items: Vec<Item>,
}

impl InMemoryCatalog {
    pub fn new(menus: Vec<Menu>, items: Vec<Item>) -> Self {
        Self { menus, items }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Insert or replace a menu by ID.
    pub fn upsert_menu(&mut self, menu: Menu) {
        match self.menus.iter_mut().find(|m| m.id == menu.id) {
            Some(existing) => *existing = menu,
            None => self.menus.push(menu),
        }
    }

    /// Insert or replace an item by ID.
    pub fn upsert_item(&mut self, item: Item) {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Remove a menu unless the schedule still refers to it, either as the
    /// default or from a time slot. Returns whether a menu was removed.
    pub fn remove_menu(&mut self, id: &str, schedule: &Schedule) -> Result<bool> {
        let referenced = schedule.default_menu() == Some(id)
            || schedule.time_slots.iter().any(|s| s.menu_id == id);
        if referenced {
            return Err(EngineError::MenuInUse {
                menu_id: id.to_string(),
            });
        }
        let before = self.menus.len();
        self.menus.retain(|m| m.id != id);
        Ok(self.menus.len() != before)
    }

    /// Remove an item unless a menu still lists it. Returns whether an item
    /// was removed.
    pub fn remove_item(&mut self, id: &str) -> Result<bool> {
        let menus = self
            .menus
            .iter()
            .filter(|m| m.item_ids.iter().any(|i| i == id))
            .count();
        if menus > 0 {
            return Err(EngineError::ItemInUse {
                item_id: id.to_string(),
                menus,
            });
        }
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        Ok(self.items.len() != before)
    }
}

impl Catalog for InMemoryCatalog {
    fn menu_by_id(&self, id: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.id == id)
    }

    fn items_by_ids(&self, ids: &[String]) -> Vec<&Item> {
        ids.iter()
            .filter_map(|id| {
                let item = self.items.iter().find(|i| &i.id == id);
                if item.is_none() {
                    debug!(item_id = %id, "dropping unknown item");
                }
                item
            })
            .collect()
    }
}

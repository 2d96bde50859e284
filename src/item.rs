//! Items and the player's inventory.
//!
//! Items are fixed content discovered on the tavern floor. The inventory is
//! the only mutable collection in the session: the player adds items by
//! taking them, removes them by discarding, and spends uses in combat.

use std::fmt::{self, Display};

use log::info;

/// Item names the engine dispatches on (combat effects, badge buff).
pub const KNIFE_NAME: &str = "combat knife";
pub const BOTTLE_NAME: &str = "broken bottle";
pub const PATCH_NAME: &str = "trauma patch";
pub const BADGE_NAME: &str = "old starfighter badge";

/// Broad category of an item, which determines how (or whether) it is
/// consumed in combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Weapon,
    Buff,
    Lore,
    Heal,
}

impl ItemKind {
    /// Lore items are informational only; everything else can at least be
    /// selected from the combat item menu.
    pub fn usable_in_combat(self) -> bool {
        !matches!(self, ItemKind::Lore)
    }

    /// Only weapons and healing items spend a use when consumed.
    pub fn spends_uses(self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Heal)
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Buff => "buff",
            ItemKind::Lore => "lore",
            ItemKind::Heal => "heal",
        };
        write!(f, "{label}")
    }
}

/// A single inventory record.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub uses_left: u32,
}

impl Item {
    pub fn new(name: &str, description: &str, kind: ItemKind, uses_left: u32) -> Item {
        Item {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            uses_left,
        }
    }
}

/// All items held this session, in insertion order.
///
/// Lookups are case-insensitive on the item name. Re-taking an item the
/// player already holds replaces the record in place rather than merging.
#[derive(Debug, Default)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Inventory {
        Inventory::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Insert an item, overwriting any existing record with the same name.
    pub fn add(&mut self, item: Item) {
        info!("inventory add: '{}' ({}, {} uses)", item.name, item.kind, item.uses_left);
        if let Some(idx) = self.position(&item.name) {
            self.items[idx] = item;
        } else {
            self.items.push(item);
        }
    }

    /// Remove an item by name. `None` means "not found" -- the caller
    /// reports it; it is never fatal.
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let idx = self.position(name)?;
        let removed = self.items.remove(idx);
        info!("inventory remove: '{}'", removed.name);
        Some(removed)
    }

    /// Spend one use of an item and return its kind.
    ///
    /// Weapons and healing items are decremented and deleted when their uses
    /// reach exactly zero. Buff and lore items are never decremented or
    /// auto-removed by use.
    pub fn consume(&mut self, name: &str) -> Option<ItemKind> {
        let idx = self.position(name)?;
        let kind = self.items[idx].kind;
        if kind.spends_uses() {
            let item = &mut self.items[idx];
            item.uses_left = item.uses_left.saturating_sub(1);
            info!("inventory consume: '{}' ({} uses left)", item.name, item.uses_left);
            if item.uses_left == 0 {
                self.items.remove(idx);
            }
        }
        Some(kind)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.position(name).map(|idx| &self.items[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterate over held items in insertion order (display only).
    pub fn list(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overwrites_existing_record_in_place() {
        let mut inv = Inventory::new();
        inv.add(Item::new(KNIFE_NAME, "dull", ItemKind::Weapon, 2));
        inv.add(Item::new(BADGE_NAME, "scuffed", ItemKind::Buff, 999));
        inv.add(Item::new(KNIFE_NAME, "freshly honed", ItemKind::Weapon, 2));

        assert_eq!(inv.len(), 2);
        let first = inv.list().next().unwrap();
        assert_eq!(first.name, KNIFE_NAME);
        assert_eq!(first.description, "freshly honed");
    }

    #[test]
    fn consume_decrements_and_removes_at_zero() {
        let mut inv = Inventory::new();
        inv.add(Item::new(KNIFE_NAME, "", ItemKind::Weapon, 2));

        assert_eq!(inv.consume(KNIFE_NAME), Some(ItemKind::Weapon));
        assert_eq!(inv.get(KNIFE_NAME).unwrap().uses_left, 1);

        assert_eq!(inv.consume(KNIFE_NAME), Some(ItemKind::Weapon));
        assert!(!inv.contains(KNIFE_NAME));
    }

    #[test]
    fn consume_single_use_heal_removes_record() {
        let mut inv = Inventory::new();
        inv.add(Item::new(PATCH_NAME, "", ItemKind::Heal, 1));
        assert_eq!(inv.consume(PATCH_NAME), Some(ItemKind::Heal));
        assert!(!inv.contains(PATCH_NAME));
    }

    #[test]
    fn buff_and_lore_items_are_never_removed_by_use() {
        let mut inv = Inventory::new();
        inv.add(Item::new(BADGE_NAME, "", ItemKind::Buff, 999));
        inv.add(Item::new("cracked holo-chip", "", ItemKind::Lore, 0));

        assert_eq!(inv.consume(BADGE_NAME), Some(ItemKind::Buff));
        assert_eq!(inv.consume("cracked holo-chip"), Some(ItemKind::Lore));

        assert_eq!(inv.get(BADGE_NAME).unwrap().uses_left, 999);
        assert!(inv.contains("cracked holo-chip"));
    }

    #[test]
    fn remove_missing_item_returns_none() {
        let mut inv = Inventory::new();
        assert!(inv.remove("phantom limb").is_none());
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let mut inv = Inventory::new();
        inv.add(Item::new(BOTTLE_NAME, "", ItemKind::Weapon, 1));
        assert!(inv.contains("Broken Bottle"));
        assert_eq!(inv.consume("BROKEN BOTTLE"), Some(ItemKind::Weapon));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut inv = Inventory::new();
        inv.add(Item::new("a", "", ItemKind::Lore, 0));
        inv.add(Item::new("b", "", ItemKind::Lore, 0));
        inv.add(Item::new("c", "", ItemKind::Lore, 0));
        let names: Vec<&str> = inv.list().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}

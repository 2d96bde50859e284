//! Session state for a single run of the demo.
//!
//! [`SignalWorld`] owns the inventory and the narrative flags the scene
//! router dispatches on. There is no persistence: a new world is built for
//! every process run.

use log::info;

use crate::item::{BADGE_NAME, Inventory};

/// Complete mutable state of a play session.
#[derive(Debug, Default)]
pub struct SignalWorld {
    pub inventory: Inventory,
    badge_buff: bool,
    basement_unlocked: bool,
    clone_defeated: bool,
}

impl SignalWorld {
    pub fn new() -> SignalWorld {
        info!("new SignalWorld session created");
        SignalWorld::default()
    }

    /// Whether the passive +2 attack bonus is active.
    pub fn badge_buff(&self) -> bool {
        self.badge_buff
    }

    /// Arm the badge buff if the starfighter badge is currently held.
    ///
    /// Called once at the start of every combat. The flag is sticky: it
    /// stays set even if the badge is discarded later, and is never
    /// re-evaluated back to false. Preserved as observed behavior.
    pub fn arm_badge_buff_if_held(&mut self) {
        if !self.badge_buff && self.inventory.contains(BADGE_NAME) {
            self.badge_buff = true;
            info!("badge buff armed (holding '{BADGE_NAME}'); bonus is permanent from here");
        }
    }

    pub fn basement_unlocked(&self) -> bool {
        self.basement_unlocked
    }

    pub fn unlock_basement(&mut self) {
        if !self.basement_unlocked {
            info!("basement unlocked by bartender dialogue");
        }
        self.basement_unlocked = true;
    }

    pub fn set_clone_defeated(&mut self) {
        info!("clone defeated; hub will redirect into the chase");
        self.clone_defeated = true;
    }

    /// Read and clear the clone-defeated flag in one step.
    ///
    /// The hub checks this at the top of every loop pass; consuming it here
    /// guarantees the chase runs exactly once per combat win.
    pub fn take_clone_defeated(&mut self) -> bool {
        std::mem::take(&mut self.clone_defeated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemKind};

    #[test]
    fn take_clone_defeated_consumes_the_flag() {
        let mut world = SignalWorld::new();
        assert!(!world.take_clone_defeated());

        world.set_clone_defeated();
        assert!(world.take_clone_defeated());
        assert!(!world.take_clone_defeated());
    }

    #[test]
    fn badge_buff_requires_badge_in_inventory() {
        let mut world = SignalWorld::new();
        world.arm_badge_buff_if_held();
        assert!(!world.badge_buff());
    }

    // Documented quirk: the buff is "has ever equipped", not a live check.
    #[test]
    fn badge_buff_sticks_after_badge_is_discarded() {
        let mut world = SignalWorld::new();
        world.inventory.add(Item::new(BADGE_NAME, "", ItemKind::Buff, 999));
        world.arm_badge_buff_if_held();
        assert!(world.badge_buff());

        world.inventory.remove(BADGE_NAME);
        world.arm_badge_buff_if_held();
        assert!(world.badge_buff());
    }
}

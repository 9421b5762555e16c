//! Equipment catalog and gear slot handling

pub mod catalog;
pub mod slots;

pub use catalog::{CounterDef, EquipmentCatalog, EquipmentItem, SlotType};
pub use slots::{equipped_in, equipped_item_in, remove_item, swap, GearSlot, SwapOutcome};

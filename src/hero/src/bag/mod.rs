//src/hero/src/bag/mod.rs
mod inventory;

pub use inventory::{DEFAULT_MAX_SLOTS, Inventory, InventoryError};

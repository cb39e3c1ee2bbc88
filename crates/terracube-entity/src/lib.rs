//! Item drops and inventory for the terracube sandbox.

pub mod drops;
pub mod inventory;

pub use drops::{Drop, DropConfig, DropManager, ItemSink};
pub use inventory::{Inventory, ItemStack, SLOT_COUNT, STACK_LIMIT};

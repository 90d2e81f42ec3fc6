pub mod types;
pub mod slot_utils;
pub mod grid_store;
pub mod swap;

pub use types::{Assignment, GridDimensions, SlotChange, SlotCoordinate, SlotEntry};
pub use grid_store::GridStore;
pub use swap::{Notification, NotificationSink, RejectReason, SwapCoordinator, SwapState};
pub use slot_utils::{occupancy_by_day, slot_label};

//! UI module - the inventory modals and the widgets they share
//!
//! Each modal keeps its own transient state and reports what the user did as
//! an event; the owner holds the open/in-flight flags.

pub mod add_item_modal;
pub mod category_reassign_modal;
pub mod components;

pub use add_item_modal::{AddItemEvent, AddItemModal, AddItemProps};
pub use category_reassign_modal::{CategoryReassignModal, ReassignEvent, ReassignProps};

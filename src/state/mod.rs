//! State module for tracking crawl progress
//!
//! `ItemState` is the lifecycle shared by index sections and profile pages.

mod item_state;

pub use item_state::ItemState;

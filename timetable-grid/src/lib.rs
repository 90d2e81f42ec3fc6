//! Weekly school timetable grid: a slot store plus the select/confirm swap
//! gesture layered on top of it, with a small HTTP surface for a front-end.

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{ConfigError, GridError, SeedError};
pub use schedule::{Assignment, GridStore, SlotCoordinate, SwapCoordinator, SwapState};

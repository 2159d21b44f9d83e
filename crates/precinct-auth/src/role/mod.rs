//! Role resolution: rank levels, dashboard categories, menus and actions.

pub mod classifier;
pub mod hierarchy;
pub mod navigation;

pub use classifier::{DashboardCategory, classify, classify_officer};
pub use hierarchy::{has_role, rank_level};
pub use navigation::{Action, NavItem, actions_for, navigation_for};

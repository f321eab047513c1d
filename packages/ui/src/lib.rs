//! This crate contains all shared UI for the dashboard.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod storage;
pub use storage::make_storage;

pub mod state;
pub use state::{
    proxy_client, use_search, use_sidebar_store, use_users_query, StoreProvider, UsersQuery,
};

pub mod notifications;
pub use notifications::{notify, use_notifications, NoticeLevel, NotificationStack};

mod sidebar;
pub use sidebar::{AppSidebar, NavTarget};

mod header;
pub use header::Header;

mod user_table;
pub use user_table::UserTable;

mod user_modal;
pub use user_modal::UserModal;

pub mod views;

#[cfg(test)]
mod test_support;

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

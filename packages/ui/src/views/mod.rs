mod layout;
pub use layout::DashboardLayout;

mod dashboard;
pub use dashboard::DashboardView;

mod users;
pub use users::UsersView;

mod search;
pub use search::SearchView;

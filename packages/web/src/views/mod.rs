//! Route components. Each one adapts a shared view from `ui` to the router.

use dioxus::prelude::*;
use ui::views::{DashboardLayout, DashboardView, SearchView, UsersView};
use ui::NavTarget;

use crate::Route;

fn route_for(target: NavTarget) -> Route {
    match target {
        NavTarget::Dashboard => Route::Dashboard {},
        NavTarget::Users => Route::Users {},
        NavTarget::Search => Route::SearchUser {},
    }
}

/// Layout shared by every page.
#[component]
pub fn Shell() -> Element {
    let nav = use_navigator();
    let active = match use_route::<Route>() {
        Route::Dashboard {} => NavTarget::Dashboard,
        Route::Users {} => NavTarget::Users,
        Route::SearchUser {} => NavTarget::Search,
    };

    rsx! {
        DashboardLayout {
            active,
            on_navigate: move |target| {
                nav.push(route_for(target));
            },
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();
    rsx! {
        DashboardView {
            on_navigate: move |target| {
                nav.push(route_for(target));
            },
        }
    }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
pub fn SearchUser() -> Element {
    rsx! { SearchView {} }
}

use dioxus::prelude::*;

use crate::icons::{FaAngleLeft, FaArrowLeft, FaBars, FaUser, FaUsers};
use crate::state::use_sidebar_store;
use crate::Icon;

/// Pages reachable from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Dashboard,
    Users,
    Search,
}

impl NavTarget {
    pub fn title(self) -> &'static str {
        match self {
            NavTarget::Dashboard => "داشبورد",
            NavTarget::Users => "کاربران",
            NavTarget::Search => "جست و جوی کاربر",
        }
    }
}

#[component]
pub fn AppSidebar(active: NavTarget, on_navigate: EventHandler<NavTarget>) -> Element {
    let mut sidebar = use_sidebar_store();
    let mut users_expanded = use_signal(|| false);

    if !sidebar.read().is_open() {
        return rsx! {};
    }

    rsx! {
        aside {
            class: "sidebar",

            div {
                class: "sidebar-header",
                span {
                    class: "sidebar-brand",
                    onclick: move |_| on_navigate.call(NavTarget::Dashboard),
                    "پنل مدیریت"
                }
                button {
                    class: "sidebar-close md:hidden",
                    onclick: move |_| sidebar.write().toggle(),
                    Icon { icon: FaBars, width: 20, height: 20 }
                }
            }

            nav {
                class: "sidebar-menu",

                div {
                    class: "sidebar-item",
                    class: if active == NavTarget::Users { "active" },
                    onclick: move |_| users_expanded.toggle(),
                    div {
                        class: "sidebar-item-label",
                        Icon { icon: FaUsers, width: 18, height: 18 }
                        span { "همه کاربران" }
                    }
                    span {
                        class: if users_expanded() {
                            "sidebar-caret open"
                        } else {
                            "sidebar-caret"
                        },
                        Icon { icon: FaAngleLeft, width: 14, height: 14 }
                    }
                }
                if users_expanded() {
                    div {
                        class: "sidebar-submenu",
                        div {
                            class: "sidebar-subitem",
                            onclick: move |_| on_navigate.call(NavTarget::Users),
                            "{NavTarget::Users.title()}"
                        }
                    }
                }

                div {
                    class: "sidebar-item",
                    class: if active == NavTarget::Search { "active" },
                    onclick: move |_| on_navigate.call(NavTarget::Search),
                    div {
                        class: "sidebar-item-label",
                        Icon { icon: FaUser, width: 18, height: 18 }
                        span { "{NavTarget::Search.title()}" }
                    }
                    span {
                        class: "sidebar-arrow",
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}

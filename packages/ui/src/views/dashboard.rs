use dioxus::prelude::*;

use crate::components::Card;
use crate::icons::{FaUser, FaUsers};
use crate::sidebar::NavTarget;
use crate::Icon;

#[component]
pub fn DashboardView(on_navigate: EventHandler<NavTarget>) -> Element {
    rsx! {
        div {
            class: "grid gap-6",
            h1 { class: "text-xl font-semibold md:text-2xl", "خوش آمدید!" }
            div {
                class: "flex gap-5",
                Card {
                    class: "dashboard-card",
                    onclick: move |_| on_navigate.call(NavTarget::Users),
                    Icon { icon: FaUsers, width: 24, height: 24 }
                    p { "{NavTarget::Users.title()}" }
                }
                Card {
                    class: "dashboard-card",
                    onclick: move |_| on_navigate.call(NavTarget::Search),
                    Icon { icon: FaUser, width: 24, height: 24 }
                    p { "{NavTarget::Search.title()}" }
                }
            }
        }
    }
}

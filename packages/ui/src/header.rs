use dioxus::prelude::*;

use crate::icons::{FaBars, FaCircleUser};
use crate::state::use_sidebar_store;
use crate::Icon;

/// Top bar: sidebar toggle and the sign-in placeholder.
#[component]
pub fn Header() -> Element {
    let mut sidebar = use_sidebar_store();

    rsx! {
        header {
            class: "app-header",
            button {
                class: "header-toggle",
                title: "نمایش / پنهان کردن منو",
                onclick: move |_| sidebar.write().toggle(),
                Icon { icon: FaBars, width: 22, height: 22 }
            }
            div {
                class: "header-account",
                Icon { icon: FaCircleUser, width: 20, height: 20 }
                span { "وارد شوید" }
            }
        }
    }
}

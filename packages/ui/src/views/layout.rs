use dioxus::prelude::*;

use crate::notifications::NotificationStack;
use crate::sidebar::{AppSidebar, NavTarget};
use crate::Header;

/// Page shell: sidebar, header, the routed content and the notification stack.
///
/// Platform packages pass navigation as a callback and the router outlet as children.
#[component]
pub fn DashboardLayout(
    active: NavTarget,
    on_navigate: EventHandler<NavTarget>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "app-shell",
            dir: "rtl",
            AppSidebar { active, on_navigate }
            div {
                class: "app-main",
                Header {}
                main { class: "app-content", {children} }
            }
            NotificationStack {}
        }
    }
}

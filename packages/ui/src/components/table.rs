//! Table building blocks styled for the dashboard.

use dioxus::prelude::*;
use store::table::SortDirection;

#[component]
pub fn Table(children: Element) -> Element {
    rsx! {
        div {
            class: "table-wrapper",
            table { class: "data-table", {children} }
        }
    }
}

#[component]
pub fn TableHead(children: Element) -> Element {
    rsx! {
        thead { tr { {children} } }
    }
}

/// Column header. Sortable headers are clickable and show the active direction.
#[component]
pub fn HeaderCell(
    label: String,
    #[props(default)] class: String,
    #[props(default)] sortable: bool,
    direction: Option<SortDirection>,
    on_sort: Option<EventHandler<()>>,
) -> Element {
    let arrow = direction.map(SortDirection::arrow).unwrap_or_default();
    rsx! {
        th {
            class: "{class}",
            class: if sortable { "sortable" },
            onclick: move |_| {
                if sortable {
                    if let Some(handler) = &on_sort {
                        handler.call(());
                    }
                }
            },
            "{label}{arrow}"
        }
    }
}

#[component]
pub fn TableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

#[component]
pub fn TableRow(children: Element) -> Element {
    rsx! {
        tr { {children} }
    }
}

#[component]
pub fn TableCell(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        td { class: "{class}", {children} }
    }
}

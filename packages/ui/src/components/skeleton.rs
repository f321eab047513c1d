use dioxus::prelude::*;

/// Placeholder table shown while rows are loading.
#[component]
pub fn SkeletonTable(rows: usize, #[props(default = 5)] columns: usize) -> Element {
    rsx! {
        div {
            class: "table-wrapper",
            table {
                class: "data-table",
                thead {
                    tr {
                        for col in 0..columns {
                            th { key: "{col}", div { class: "skeleton skeleton-header" } }
                        }
                    }
                }
                tbody {
                    for row in 0..rows {
                        tr {
                            key: "{row}",
                            for col in 0..columns {
                                td { key: "{col}", div { class: "skeleton" } }
                            }
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use store::table::{
    arrange, cell_text, job_title_options, ColumnDef, ColumnKey, JobTitleFilter, SortState,
};
use store::UserProfile;

use crate::components::{
    Button, ButtonVariant, HeaderCell, Table, TableBody, TableCell, TableHead, TableRow,
};

/// Sortable, job-title-filterable table of users.
#[component]
pub fn UserTable(
    users: Vec<UserProfile>,
    columns: Vec<ColumnDef>,
    /// Show the job-title filter above the table.
    #[props(default = true)]
    filterable: bool,
    on_select: EventHandler<UserProfile>,
) -> Element {
    let mut sort = use_signal(SortState::default);
    let mut filter = use_signal(JobTitleFilter::default);

    let options = job_title_options(&users);
    let current_filter = filter();
    let current_sort = sort();
    let rows: Vec<(usize, UserProfile)> = arrange(&users, &current_filter, &current_sort)
        .into_iter()
        .map(|(position, user)| (position, user.clone()))
        .collect();

    rsx! {
        if filterable {
            div {
                class: "table-toolbar",
                label { r#for: "job-title-filter", "عنوان شغلی" }
                select {
                    id: "job-title-filter",
                    class: "table-filter",
                    value: "{current_filter.option_value()}",
                    onchange: move |evt| filter.set(JobTitleFilter::from_option(&evt.value())),
                    for option in options {
                        option {
                            key: "{option}",
                            value: "{option}",
                            if option == store::table::ALL_JOB_TITLES { "همه" } else { "{option}" }
                        }
                    }
                }
            }
        }

        Table {
            TableHead {
                for column in columns.clone() {
                    HeaderCell {
                        key: "{column.header_name}",
                        label: column.header_name.to_string(),
                        class: column.class_name.to_string(),
                        sortable: column.sortable,
                        direction: current_sort.direction_for(column.key),
                        on_sort: move |_| sort.write().toggle(column.key),
                    }
                }
            }
            TableBody {
                for (position, user) in rows {
                    TableRow {
                        key: "{user.id}",
                        for column in columns.clone() {
                            TableCell {
                                key: "{column.header_name}",
                                class: column.class_name.to_string(),
                                if column.key == ColumnKey::Actions {
                                    Button {
                                        variant: ButtonVariant::Outline,
                                        onclick: {
                                            let user = user.clone();
                                            move |_| on_select.call(user.clone())
                                        },
                                        "جزئیات"
                                    }
                                } else {
                                    "{cell_text(column.key, position, &user)}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use store::search::{SearchOutcome, SearchPhase};
use store::table::user_columns;
use store::UserProfile;

use crate::components::{Button, ButtonVariant, Input, SkeletonTable};
use crate::icons::FaMagnifyingGlass;
use crate::state::{schedule_search, start_search, use_search};
use crate::{Icon, UserModal, UserTable};

const SEARCH_SKELETON_ROWS: usize = 5;

/// Debounced full-name search. Term and results survive navigation within the session.
#[component]
pub fn SearchView() -> Element {
    let mut search = use_search();
    let mut selected = use_signal(|| Option::<UserProfile>::None);

    let oninput = move |evt: FormEvent| {
        let token = search.write().set_term(evt.value());
        if let Some(token) = token {
            schedule_search(search, token);
        }
    };

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let ticket = search.write().submit();
        if let Some(ticket) = ticket {
            start_search(search, ticket);
        }
    };

    let pipeline = search.read();
    let term = pipeline.term().to_string();
    let message = pipeline.message().to_string();
    let phase = pipeline.phase().clone();
    let results = pipeline.results().map(<[UserProfile]>::to_vec);
    drop(pipeline);

    let status_class = if matches!(phase, SearchPhase::Settled(SearchOutcome::Failed(_))) {
        "status-error"
    } else {
        "status-message"
    };

    let body = match (phase, results) {
        (SearchPhase::Loading, _) => rsx! {
            SkeletonTable { rows: SEARCH_SKELETON_ROWS, columns: 7 }
        },
        (_, Some(users)) if !users.is_empty() => rsx! {
            UserTable {
                users,
                columns: user_columns(),
                on_select: move |user| selected.set(Some(user)),
            }
        },
        _ => rsx! {},
    };

    rsx! {
        div {
            class: "grid gap-4",
            h1 { class: "text-xl font-semibold", "جست و جوی کاربر" }

            form {
                class: "search-form",
                onsubmit: onsubmit,
                Input {
                    id: "search-term",
                    placeholder: "نام و نام خانوادگی",
                    value: term,
                    oninput: oninput,
                }
                Button {
                    r#type: "submit",
                    title: "جست و جو",
                    Icon { icon: FaMagnifyingGlass, width: 16, height: 16 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| search.write().clear(),
                    "پاک کردن"
                }
            }

            p { class: "{status_class}", "{message}" }

            {body}
        }

        if let Some(user) = selected() {
            UserModal {
                key: "{user.id}",
                user,
                on_close: move |_| selected.set(None),
                on_updated: move |updated: UserProfile| {
                    search.write().apply_update(&updated);
                },
                on_deleted: move |removed: UserProfile| {
                    search.write().apply_removal(&removed.id);
                },
            }
        }
    }
}

use dioxus::prelude::*;
use store::table::user_list_columns;
use store::UserProfile;

use crate::components::SkeletonTable;
use crate::state::{proxy_client, use_users_query};
use crate::{UserModal, UserTable};

const LIST_SKELETON_ROWS: usize = 7;
const NO_USERS_FOUND: &str = "هیچ کاربری بیدا نشد.";

/// Every user in one sortable table. Refetches when the users query is invalidated.
#[component]
pub fn UsersView() -> Element {
    let users_query = use_users_query();
    let mut selected = use_signal(|| Option::<UserProfile>::None);

    let users = use_resource(move || async move {
        let _version = users_query.version();
        proxy_client().list_users().await
    });

    let content = match &*users.read() {
        None => rsx! { SkeletonTable { rows: LIST_SKELETON_ROWS, columns: 7 } },
        Some(Err(err)) => rsx! { p { class: "status-error", "{err}" } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "status-message", "{NO_USERS_FOUND}" }
        },
        Some(Ok(list)) => rsx! {
            UserTable {
                users: list.clone(),
                columns: user_list_columns(),
                on_select: move |user| selected.set(Some(user)),
            }
        },
    };

    rsx! {
        div {
            class: "grid gap-4",
            h1 { class: "text-xl font-semibold", "کاربران" }
            {content}
        }
        if let Some(user) = selected() {
            UserModal {
                key: "{user.id}",
                user,
                on_close: move |_| selected.set(None),
            }
        }
    }
}

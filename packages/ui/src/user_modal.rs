use dioxus::prelude::*;
use store::table::format_date_time;
use store::{ProfileDraft, ProfileField, UserProfile};

use crate::components::{Button, ButtonVariant, Input, Label, Modal, TextArea};
use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::state::{proxy_client, use_users_query};

const MISSING_VALUE: &str = "داده ای وجود ندارد";
const UPDATED_NOTICE: &str = "اطلاعات کاربر با موفقیت تغییر کرد!";
const DELETED_NOTICE: &str = "کاربر با موفقیت حذف شد!";

fn detail_rows(user: &UserProfile) -> Vec<(&'static str, String)> {
    fn present(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.trim().is_empty())
    }
    let text = |value: Option<&str>| {
        present(value).map_or_else(|| MISSING_VALUE.to_string(), str::to_string)
    };
    let date = |value: Option<&str>| {
        present(value).map_or_else(|| MISSING_VALUE.to_string(), format_date_time)
    };
    vec![
        ("نام و نام خانوادگی", text(Some(&user.full_name))),
        ("ایمیل", text(Some(&user.email))),
        ("نام کاربری", text(Some(&user.username))),
        ("عنوان شغلی", text(Some(&user.job_title))),
        ("شرکت", text(user.company.as_deref())),
        ("دپارتمان", text(user.department.as_deref())),
        ("بیو", text(user.bio.as_deref())),
        ("تاریخ ثبت نام", date(Some(&user.created_at))),
        ("آخرین ورود", date(user.last_sign_in_at.as_deref())),
    ]
}

/// Mark `busy` and return `true`, unless it is already set.
fn begin(mut busy: Signal<bool>) -> bool {
    if *busy.peek() {
        return false;
    }
    busy.set(true);
    true
}

/// Detail view and edit form for one user.
///
/// `on_updated` receives the row as stored by the backend, `on_deleted` the
/// removed user. Both fire before `on_close`.
#[component]
pub fn UserModal(
    user: UserProfile,
    on_close: EventHandler<()>,
    #[props(default)] on_updated: EventHandler<UserProfile>,
    #[props(default)] on_deleted: EventHandler<UserProfile>,
) -> Element {
    let mut editing = use_signal(|| false);
    let original = user.clone();
    let mut draft = use_signal(move || ProfileDraft::from_profile(&original));
    let mut field_errors = use_signal(Vec::<(ProfileField, &'static str)>::new);
    let mut saving = use_signal(|| false);
    let mut save_error = use_signal(|| Option::<String>::None);
    let mut deleting = use_signal(|| false);
    let mut users_query = use_users_query();
    let mut notifications = use_notifications();

    let submit_user = user.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let missing = draft.read().missing_required();
        if !missing.is_empty() {
            field_errors.set(missing);
            return;
        }
        field_errors.set(Vec::new());

        let updated = draft.read().merge_into(&submit_user);
        saving.set(true);
        save_error.set(None);
        spawn(async move {
            match proxy_client().update_user(&updated).await {
                Ok(stored) => {
                    saving.set(false);
                    users_query.invalidate();
                    notify(&mut notifications, NoticeLevel::Success, UPDATED_NOTICE);
                    on_updated.call(stored);
                    on_close.call(());
                }
                Err(err) => {
                    tracing::warn!(user = %updated.username, error = %err, "update failed");
                    saving.set(false);
                    save_error.set(Some(err.to_string()));
                }
            }
        });
    };

    let delete_user = user.clone();
    let ondelete = move |_| {
        if !begin(deleting) {
            return;
        }
        let target = delete_user.clone();
        spawn(async move {
            match proxy_client().delete_user(&target).await {
                Ok(()) => {
                    users_query.invalidate();
                    notify(&mut notifications, NoticeLevel::Success, DELETED_NOTICE);
                    on_deleted.call(target);
                    on_close.call(());
                }
                Err(err) => {
                    tracing::warn!(user = %target.username, error = %err, "delete failed");
                    deleting.set(false);
                    notify(&mut notifications, NoticeLevel::Error, err.to_string());
                }
            }
        });
    };

    let title_name = if user.full_name.is_empty() { &user.email } else { &user.full_name };
    let errors = field_errors();
    let error_for = move |field: ProfileField| {
        errors.iter().find(|(f, _)| *f == field).map(|(_, message)| *message)
    };

    rsx! {
        Modal {
            title: format!("اطلاعات کاربر : {title_name}"),
            on_close: move |_| on_close.call(()),

            p { class: "modal-description", "شما در حال مشاهده اطلاعات {user.full_name} هستید." }

            div {
                class: "modal-tabs",
                button {
                    class: if !editing() { "modal-tab active" } else { "modal-tab" },
                    onclick: move |_| editing.set(false),
                    "اطلاعات کاربر"
                }
                button {
                    class: if editing() { "modal-tab active" } else { "modal-tab" },
                    onclick: move |_| editing.set(true),
                    "ویرایش"
                }
            }

            if !editing() {
                div {
                    class: "detail-grid",
                    for (label, value) in detail_rows(&user) {
                        div {
                            key: "{label}",
                            class: "detail-item",
                            h3 { "{label}" }
                            p { "{value}" }
                        }
                    }
                }
            } else {
                form {
                    class: "grid gap-4",
                    onsubmit: onsubmit,
                    for field in ProfileField::ALL {
                        div {
                            key: "{field.id()}",
                            class: "grid gap-1",
                            Label { html_for: field.id().to_string(), "{field.label()}" }
                            if field == ProfileField::Bio {
                                TextArea {
                                    id: field.id().to_string(),
                                    value: draft.read().get(field).to_string(),
                                    oninput: move |evt: FormEvent| {
                                        draft.write().set(field, evt.value())
                                    },
                                }
                            } else {
                                Input {
                                    id: field.id().to_string(),
                                    r#type: field.input_type().to_string(),
                                    value: draft.read().get(field).to_string(),
                                    readonly: field.is_read_only(),
                                    invalid: error_for(field).is_some(),
                                    oninput: move |evt: FormEvent| {
                                        draft.write().set(field, evt.value())
                                    },
                                }
                            }
                            if let Some(message) = error_for(field) {
                                p { class: "field-error", "{message}" }
                            }
                        }
                    }

                    if let Some(message) = save_error() {
                        div {
                            class: "grid gap-1",
                            Button { r#type: "submit", "ارسال مجدد" }
                            p { class: "text-center text-sm text-red-600", "{message}" }
                        }
                    } else if saving() {
                        Button {
                            disabled: true,
                            class: "flex justify-center gap-2",
                            div { class: "spinner" }
                            span { "در حال ذخیره" }
                        }
                    } else {
                        Button { r#type: "submit", "تایید و ذخیره" }
                    }
                }
            }

            div {
                class: "modal-footer",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "بستن"
                }
                Button {
                    variant: ButtonVariant::Danger,
                    disabled: deleting(),
                    onclick: ondelete,
                    "حذف"
                }
            }
        }
    }
}

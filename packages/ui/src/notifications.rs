use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::state::sleep;

/// How long a notification stays on screen.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    next_id: u64,
    pub entries: Vec<Notice>,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Notice {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Show a notification and remove it after [`NOTICE_LIFETIME`].
///
/// The timer runs in the root scope, so the notice is dismissed even when the
/// caller unmounts right away.
pub fn notify(
    notifications: &mut Signal<Notifications>,
    level: NoticeLevel,
    message: impl Into<String>,
) {
    let id = notifications.write().push(level, message);
    let mut notifications = *notifications;
    spawn_forever(async move {
        sleep(NOTICE_LIFETIME).await;
        notifications.write().dismiss(id);
    });
}

#[component]
pub fn NotificationStack() -> Element {
    let mut notifications = use_notifications();
    let entries = notifications().entries.clone();

    rsx! {
        div {
            class: "fixed bottom-4 left-4 flex flex-col gap-2",
            style: "z-index: 3000",
            for entry in entries {
                div {
                    key: "{entry.id}",
                    class: match entry.level {
                        NoticeLevel::Success => "notice notice-success",
                        NoticeLevel::Error => "notice notice-error",
                    },
                    onclick: move |_| notifications.write().dismiss(entry.id),
                    "{entry.message}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use dioxus::dioxus_core::VirtualDom;

    use super::*;
    use crate::test_support::drive;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut notifications = Notifications::default();
        let first = notifications.push(NoticeLevel::Success, "saved");
        let second = notifications.push(NoticeLevel::Error, "failed");
        assert!(second > first);
        assert_eq!(notifications.entries.len(), 2);
    }

    #[test]
    fn test_dismiss_removes_only_that_entry() {
        let mut notifications = Notifications::default();
        let first = notifications.push(NoticeLevel::Success, "saved");
        notifications.push(NoticeLevel::Error, "failed");

        notifications.dismiss(first);
        let messages: Vec<_> = notifications.entries.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["failed"]);
    }

    thread_local! {
        static SHOWN: Cell<usize> = const { Cell::new(0) };
    }

    #[component]
    fn SaveAndClose(on_done: EventHandler<()>) -> Element {
        let mut notifications = use_notifications();
        use_effect(move || {
            notify(&mut notifications, NoticeLevel::Success, "saved");
            on_done.call(());
        });
        rsx! {}
    }

    #[component]
    fn Host() -> Element {
        let notifications = use_context_provider(|| Signal::new(Notifications::default()));
        let mut open = use_signal(|| true);
        SHOWN.with(|shown| shown.set(notifications.read().entries.len()));

        rsx! {
            if open() {
                SaveAndClose { on_done: move |_| open.set(false) }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_is_dismissed_after_its_caller_unmounts() {
        let mut dom = VirtualDom::new(Host);
        dom.rebuild_in_place();

        drive(&mut dom, Duration::from_millis(500)).await;
        assert_eq!(SHOWN.with(Cell::get), 1);

        drive(&mut dom, NOTICE_LIFETIME).await;
        assert_eq!(SHOWN.with(Cell::get), 0);
    }
}

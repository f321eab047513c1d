use dioxus::prelude::*;

const FIELD_CLASS: &str = "w-full bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none focus:border-primary-500";

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label {
            class: "block text-sm font-medium text-neutral-700",
            r#for: "{html_for}",
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    value: String,
    #[props(default)] readonly: bool,
    #[props(default)] invalid: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "{FIELD_CLASS} {class}",
            class: if invalid { "border-red-500" },
            class: if readonly { "bg-neutral-100 cursor-not-allowed" },
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            readonly: readonly,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn TextArea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    value: String,
    #[props(default = 3)] rows: u32,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "{FIELD_CLASS} {class}",
            rows: "{rows}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

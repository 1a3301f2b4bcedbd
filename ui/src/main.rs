use dioxus::prelude::*;
mod api;
mod form;

use api::ApiClient;
use contact_types::{Field, FieldKind};
use form::{ContactForm, STATUS_DISMISS_MS};
use gloo_timers::future::TimeoutFuture;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// Contact page
#[component]
fn Home() -> Element {
    let mut form = use_signal(ContactForm::default);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();

        let Some(submission) = form.write().begin_submit() else {
            return;
        };

        spawn(async move {
            let result = ApiClient::new().submit(&submission).await.map(|_| ());
            if let Err(e) = &result {
                tracing::error!("Form error: {e}");
            }

            let dismiss = form.write().finish_submit(result);
            if let Some(id) = dismiss {
                TimeoutFuture::new(STATUS_DISMISS_MS).await;
                form.write().dismiss_status(id);
            }
        });
    };

    let submitting = form.read().is_submitting();
    let status = form
        .read()
        .status()
        .map(|s| (format!("form-message {}", s.kind.class()), s.text));

    rsx! {
        section {
            id: "contact",
            class: "contact",
            h2 { class: "section-title", "Get In Touch" }

            form {
                class: "contact-form",
                onsubmit: onsubmit,

                for field in Field::ALL {
                    FormField { key: "{field}", field: field, form: form }
                }

                button {
                    r#type: "submit",
                    class: "btn-submit",
                    disabled: submitting,
                    if submitting { "Sending..." } else { "Send Message" }
                }

                if let Some((class, text)) = status {
                    div { id: "form-message", class: class, "{text}" }
                }
            }
        }
    }
}

#[component]
fn FormField(field: Field, form: Signal<ContactForm>) -> Element {
    let mut form = form;
    let id = field.key();
    let label = field.label();
    let value = form.read().value(field).to_string();
    let error = form.read().error(field);
    let class = if error.is_some() { "form-control error" } else { "form-control" };
    let input_type = if field.kind() == FieldKind::Email { "email" } else { "text" };

    rsx! {
        div {
            class: "form-group",
            label { r#for: id, "{label}" }

            if field.kind() == FieldKind::Multiline {
                textarea {
                    id: id,
                    name: id,
                    class: class,
                    rows: "5",
                    value: "{value}",
                    oninput: move |evt: FormEvent| {
                        form.write().set_value(field, evt.value());
                    },
                    onblur: move |_| {
                        form.write().validate(field);
                    },
                }
            } else {
                input {
                    id: id,
                    name: id,
                    class: class,
                    r#type: input_type,
                    value: "{value}",
                    oninput: move |evt: FormEvent| {
                        form.write().set_value(field, evt.value());
                    },
                    onblur: move |_| {
                        form.write().validate(field);
                    },
                }
            }

            if let Some(message) = error {
                span { class: "field-error", "{message}" }
            }
        }
    }
}

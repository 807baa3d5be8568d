//! Film Form Component
//!
//! Add / edit modal. Inputs write straight into the controller's form state;
//! submission, validation and closing all go through the controller.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::forms::{Field, FormKind, FormPhase, FormState};
use crate::store::{form_state, use_ui_store};

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Image => "url",
        Field::Year => "number",
        _ => "text",
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Image => "https://...",
        Field::Year => "1999",
        Field::Genre => "Drama, Comedia...",
        Field::Rating => "1 - 10",
        _ => "",
    }
}

/// Modal form for creating or editing a movie
#[component]
pub fn FilmForm(kind: FormKind) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let form = Memo::new(move |_| form_state(store, kind));
    let heading_id = format!("{}-modal-title", kind.prefix());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.spawn(move |controller| async move {
            let _ = controller.submit(kind).await;
        });
    };
    let on_cancel = move |_| {
        ctx.controller().cancel(kind);
    };

    let field_row = move |field: Field| {
        let id = ctx.bindings.field(kind, field);
        let value = move || form.with(|state| state.fields.get(field).to_string());
        let error = move || form.with(|state| state.error(field).map(ToString::to_string));
        let invalid = move || form.with(|state| state.error(field).is_some());
        let error_id = format!("{}-error", id);
        let described_by = {
            let error_id = error_id.clone();
            move || invalid().then(|| error_id.clone())
        };
        let on_input = move |ev: web_sys::Event| {
            ctx.controller().set_field(kind, field, event_target_value(&ev));
        };
        let on_blur = move |_| {
            ctx.controller().check_field(kind, field);
        };

        let control = match field {
            Field::Description => view! {
                <textarea
                    id=id.clone()
                    name=field.name()
                    rows="4"
                    required=field.is_required()
                    aria-invalid=move || invalid().to_string()
                    aria-describedby=described_by
                    prop:value=value
                    on:input=on_input
                    on:blur=on_blur
                ></textarea>
            }
            .into_any(),
            _ => view! {
                <input
                    id=id.clone()
                    type=input_type(field)
                    name=field.name()
                    placeholder=placeholder(field)
                    inputmode=(field == Field::Rating).then_some("decimal")
                    required=field.is_required()
                    aria-invalid=move || invalid().to_string()
                    aria-describedby=described_by
                    prop:value=value
                    on:input=on_input
                    on:blur=on_blur
                />
            }
            .into_any(),
        };

        view! {
            <div class="form-group">
                <label for=id>
                    {field.label()}
                    {field.is_required().then_some(" *")}
                </label>
                {control}
                {move || error().map(|message| view! {
                    <p class="field-error" id=error_id.clone() role="alert">{message}</p>
                })}
            </div>
        }
    };

    let status = move || {
        form.with(|state| match &state.phase {
            FormPhase::Failed(reason) => Some(format!("No se pudo guardar: {}", reason)),
            _ => None,
        })
    };
    let submitting = move || form.with(FormState::is_submitting);

    view! {
        <Show when=move || form.with(FormState::is_open)>
            <div
                id=ctx.bindings.modal(kind)
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby=heading_id.clone()
            >
                <div class="modal-header">
                    <h2 id=heading_id.clone()>{kind.heading()}</h2>
                    <button
                        type="button"
                        class="modal-close"
                        aria-label="Cerrar"
                        on:click=on_cancel
                    >
                        "×"
                    </button>
                </div>
                <form id=ctx.bindings.form(kind) class="film-form" novalidate=true on:submit=on_submit>
                    {Field::ALL.into_iter().map(field_row).collect_view()}
                    {move || status().map(|message| view! {
                        <p class="form-error" role="alert">{message}</p>
                    })}
                    <div class="form-actions">
                        <button type="button" class="btn btn-secondary" on:click=on_cancel>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=submitting>
                            {move || if submitting() { "Guardando..." } else { kind.submit_label() }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

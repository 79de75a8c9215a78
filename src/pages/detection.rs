//! Health detection page: detection-type tabs, the shared upload capture
//! area, the submit flow, and the rendered result.
//!
//! Setup runs from several triggers (mount, tab switches, a periodic
//! style-assertion timer), so everything one-shot goes through the
//! session guards.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::drop_zone::{PhotoDropZone, FILE_INPUT_ID};
use crate::components::result_card::ResultCard;
use crate::detection::DetectionType;
use crate::results::ResultDisplay;
use crate::session::{self, SessionGuards};
use crate::upload::{PromptGuard, UploadState};

pub const SUBMIT_BUTTON_ID: &str = "detect-submit-btn";

/// How often the style-assertion timer re-applies the submit control's
/// visibility. The host page's own scripts have been seen to hide it.
const STYLE_ASSERT_PERIOD_MS: i32 = 500;

#[component]
pub fn DetectionPage() -> impl IntoView {
    let (tab, set_tab) = signal(DetectionType::Breed);
    let upload = RwSignal::new(UploadState::default());
    let (submitting, set_submitting) = signal(false);
    let (result, set_result) = signal::<Option<ResultDisplay>>(None);

    let guards = StoredValue::new_local(SessionGuards::default());
    let prompt_guard = StoredValue::new(PromptGuard::default());

    // Safe to call from every trigger; the guards keep it one-shot.
    let ensure_initialized = move || {
        guards.with_value(|g| {
            // Alt+S submits from anywhere on the page.
            if !g.bindings.is_bound(session::DOCUMENT_TARGET, "keydown") {
                g.bindings.bind_document_once("keydown", |ev: web_sys::Event| {
                    if let Some(key_ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() {
                        if key_ev.alt_key() && key_ev.key() == "s" {
                            click_element(SUBMIT_BUTTON_ID);
                        }
                    }
                });
            }
            session::start_interval(
                &g.latches,
                "detect-style-assert",
                STYLE_ASSERT_PERIOD_MS,
                reassert_submit_visible,
            );
        });
    };

    Effect::new(move |_| ensure_initialized());

    // Opens the native picker if the prompt guard allows it: at most once
    // per second, and never while an image is already selected.
    let prompt_for_file = move || {
        let now = js_sys::Date::now() as u64;
        let has_uploaded = upload.with_untracked(|state| state.has_uploaded);
        let allowed = prompt_guard
            .try_update_value(|g| g.try_prompt(now, has_uploaded))
            .unwrap_or(false);
        if allowed {
            click_element(FILE_INPUT_ID);
        }
    };

    let select_tab = move |t: DetectionType| {
        set_tab.set(t);
        set_result.set(None);
        ensure_initialized();
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let state = upload.get_untracked();
        let Some(bytes) = state.bytes else {
            alert("Please choose a pet photo first");
            prompt_for_file();
            return;
        };

        let kind = tab.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            match api::predict(kind, &bytes, &state.mime, &state.file_name).await {
                Ok(resp) => {
                    let preview = state.preview_data_url.clone();
                    let display = ResultDisplay::from_response(
                        kind,
                        &resp,
                        preview.as_deref(),
                        preview.as_deref(),
                    );
                    set_result.set(Some(display));
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("predict failed: {err}").into());
                    alert(&format!("Analysis failed: {err}"));
                }
            }
            set_submitting.set(false);
        });
    };

    let on_reupload = Callback::new(move |_: ()| {
        upload.update(|state| state.clear());
        set_result.set(None);
        // The explicit re-upload action bypasses the cooldown.
        prompt_guard.update_value(|g| g.reset());
        let now = js_sys::Date::now() as u64;
        let allowed = prompt_guard
            .try_update_value(|g| g.try_prompt(now, false))
            .unwrap_or(false);
        if allowed {
            click_element(FILE_INPUT_ID);
        }
    });

    view! {
        <div class="page detection-page">
            <style>{include_str!("detection.css")}</style>

            <h2>"Health Detection"</h2>
            <p class="page-description">{move || tab.get().description()}</p>

            <div class="detect-tabs">
                {DetectionType::ALL.iter().map(|&t| view! {
                    <button
                        class="tab-btn"
                        class:active=move || tab.get() == t
                        on:click=move |_| select_tab(t)
                    >
                        {t.label()}
                    </button>
                }).collect::<Vec<_>>()}
            </div>

            <PhotoDropZone upload=upload />

            <div class="detect-actions">
                <button
                    id=SUBMIT_BUTTON_ID
                    class="btn btn-primary detect-submit"
                    disabled=move || submitting.get()
                    on:click=on_submit
                >
                    <Show
                        when=move || submitting.get()
                        fallback=|| view! { <span>"Start Analysis"</span> }
                    >
                        <span class="spinner spinner-inline"></span>
                        <span>"Analyzing..."</span>
                    </Show>
                </button>
                <p class="shortcut-hint">"Tip: press Alt+S to start the analysis"</p>
            </div>

            {move || result.get().map(|display| view! {
                <ResultCard display=display on_reupload=on_reupload />
            })}
        </div>
    }
}

/// Click an element by id; silently no-ops when the element is missing.
fn click_element(id: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id));
    match element {
        Some(el) => {
            if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
                html.click();
            }
        }
        None => {
            web_sys::console::warn_1(&format!("click_element: no element \"{id}\"").into());
        }
    }
}

/// Periodically re-applied: the submit control must stay visible even if
/// host-page styling fights it.
fn reassert_submit_visible() {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SUBMIT_BUTTON_ID))
    {
        let _ = el.set_attribute("style", "visibility: visible; opacity: 1;");
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

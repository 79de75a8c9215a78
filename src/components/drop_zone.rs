//! Photo capture area with drag-and-drop and browse.
//!
//! Picker changes and dropped files funnel into the same `select_file`
//! handler, which is the only writer of the shared [`UploadState`].

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::upload::{self, UploadState};

/// Id of the hidden file input; the submission pipeline clicks it through
/// the prompt guard when no image is selected yet.
pub const FILE_INPUT_ID: &str = "pet-file-input";

#[component]
pub fn PhotoDropZone(upload: RwSignal<UploadState>) -> impl IntoView {
    let drop_zone_el = NodeRef::<Div>::new();
    let (is_over, set_is_over) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let (status, set_status) = signal::<Option<String>>(None);

    // The single capture path. A selection that fails validation or
    // decoding leaves the previous state untouched.
    let select_file = move |file: web_sys::File| {
        set_is_loading.set(true);
        set_status.set(None);
        spawn_local(async move {
            match upload::read_file(file).await {
                Ok(image) => {
                    upload.update(|state| state.accept(image));
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("upload rejected: {err}").into());
                    set_status.set(Some(err.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);

        if let Some(dt) = ev.data_transfer() {
            if let Some(files) = dt.files() {
                if let Some(file) = files.get(0) {
                    select_file(file);
                }
            }
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            select_file(file);
        }
        // Clear the input so picking the same file again still fires
        // a change event.
        input.set_value("");
    };

    view! {
        <div class="upload-capture">
            <Show
                when=move || upload.with(|state| state.preview_data_url.is_some())
                fallback=move || view! {
                    <div
                        node_ref=drop_zone_el
                        class="drop-zone"
                        class:drop-zone-active=move || is_over.get()
                        class:drop-zone-loading=move || is_loading.get()
                        on:dragover=move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            set_is_over.set(true);
                        }
                        on:dragleave=move |_| set_is_over.set(false)
                        on:drop=on_drop
                    >
                        <Show
                            when=move || is_loading.get()
                            fallback=move || view! {
                                <div class="drop-zone-content">
                                    <div class="drop-icon">"[camera]"</div>
                                    <p class="drop-main">"Drop a photo of your pet here"</p>
                                    <p class="drop-hint">"or"</p>
                                    <label for=FILE_INPUT_ID class="btn btn-secondary">
                                        "Browse Files"
                                    </label>
                                    <p class="drop-formats">"Supports JPEG, PNG, GIF, WebP"</p>
                                </div>
                            }
                        >
                            <div class="drop-zone-loading-content">
                                <div class="spinner"></div>
                                <p>"Loading image..."</p>
                            </div>
                        </Show>
                    </div>
                }
            >
                <div class="upload-preview">
                    <img
                        class="preview-image"
                        src=move || upload.with(|state| state.preview_data_url.clone().unwrap_or_default())
                        alt="Selected pet photo"
                    />
                    <label for=FILE_INPUT_ID class="btn btn-secondary change-image-btn">
                        "Change Photo"
                    </label>
                </div>
            </Show>

            <input
                type="file"
                id=FILE_INPUT_ID
                accept="image/*"
                style="display: none"
                on:change=on_input_change
            />

            {move || status.get().map(|msg| view! {
                <p class="upload-status">{msg}</p>
            })}
        </div>
    }
}

/// Helper to get the event target as a concrete element type.
fn event_target<T: wasm_bindgen::JsCast>(ev: &web_sys::Event) -> T {
    ev.target().unwrap().dyn_into::<T>().unwrap()
}

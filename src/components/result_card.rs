//! Result card for a completed detection.
//!
//! The displayed image walks the precomputed candidate list: each load
//! failure advances one step, and the final placeholder entry always
//! loads. Breed results get the full card set; other detections show the
//! advisory text returned by the service.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::detection::DetectionType;
use crate::results::{ResultDisplay, PLACEHOLDER_IMAGE};

#[component]
pub fn ResultCard(
    display: ResultDisplay,
    #[prop(into)] on_reupload: Callback<()>,
) -> impl IntoView {
    let card_el = NodeRef::<Div>::new();

    let candidates = StoredValue::new(display.candidates.clone());
    let (img_index, set_img_index) = signal(0usize);

    let current_src = move || {
        candidates.with_value(|c| {
            c.get(img_index.get())
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
        })
    };

    // Advance the fallback chain when the current source fails to load.
    let on_img_error = move |_| {
        let len = candidates.with_value(|c| c.len());
        set_img_index.update(|index| {
            if *index + 1 < len {
                *index += 1;
            }
        });
    };

    // Bring the freshly rendered card into view.
    Effect::new(move |_| {
        if let Some(el) = card_el.get() {
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            options.set_block(web_sys::ScrollLogicalPosition::Start);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let is_breed = display.detection == DetectionType::Breed;
    let headline = display.headline.clone();
    let summary = display.summary.clone().unwrap_or_default();
    let confidence_text = display.confidence_text.clone();
    let bar_style = format!("width: {}%", display.confidence_percent);
    let processing_time = display.processing_time.clone();
    let image_id = display.image_id.clone();
    let model_version = display.model_version.clone();
    let device = display.device.clone();
    let resolution = display.resolution.clone();
    let completed_at = String::from(
        js_sys::Date::new_0().to_locale_string("en-US", &JsValue::UNDEFINED),
    );

    view! {
        <div node_ref=card_el class="result-card">
            <style>{include_str!("result_card.css")}</style>

            <div class="result-wrapper">
                <div class="result-image-section">
                    <img src=current_src alt=headline.clone() on:error=on_img_error />
                </div>

                <div class="result-info-section">
                    {if is_breed {
                        view! {
                            <div class="result-detail">
                                <div class="breed-card">
                                    <h2 class="breed-name">{headline.clone()}</h2>
                                    <div class="percentage-bar">
                                        <div class="percentage-fill" style=bar_style.clone()></div>
                                    </div>
                                    <div class="percentage-row">
                                        <span>"Match"</span>
                                        <span>{confidence_text.clone()}</span>
                                    </div>
                                </div>

                                <div class="info-card">
                                    <h3>"Image Info"</h3>
                                    <div class="info-grid">
                                        <span>"Image ID: " {image_id.clone()}</span>
                                        <span>"Processing time: " {processing_time.clone()}</span>
                                    </div>
                                </div>

                                <div class="info-card">
                                    <h3>"AI Model"</h3>
                                    <div class="info-grid info-grid-single">
                                        <span>"Model version: " {model_version.clone()}</span>
                                        <span>"Device: " {device.clone()}</span>
                                        <span>"Input resolution: " {resolution.clone()}</span>
                                    </div>
                                </div>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="advisory-card">
                                <h2 class="advisory-title">{headline.clone()}</h2>
                                <p class="advisory-text">{summary.clone()}</p>
                                <p class="advisory-meta">"Completed: " {completed_at.clone()}</p>
                            </div>
                        }.into_any()
                    }}

                    <div class="result-actions">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| on_reupload.run(())
                        >
                            "Upload Another Photo"
                        </button>
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.alert_with_message("Sharing is coming soon!");
                                }
                            }
                        >
                            "Share"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

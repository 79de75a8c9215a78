//! Modal form for creating and editing a pet profile.
//!
//! One signal per scalar field, keyed row lists for the vaccination,
//! deworming, and medical-history records, and an avatar upload that
//! reuses the shared file-decoding path.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::profiles::{Allergies, Deworming, MedicalRecord, PetProfile, Vaccination};
use crate::upload;

const SPECIES_OPTIONS: &[&str] = &["dog", "cat", "rabbit", "bird", "hamster", "other"];

const AVATAR_INPUT_ID: &str = "pet-avatar-input";

#[component]
pub fn PetForm(
    initial: Option<PetProfile>,
    #[prop(into)] on_save: Callback<PetProfile>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let initial = initial.unwrap_or_default();
    let is_edit = !initial.id.is_empty();
    let existing = StoredValue::new((initial.id.clone(), initial.created_at.clone()));

    // Scalar fields
    let (name, set_name) = signal(initial.name.clone());
    let (species, set_species) = signal(initial.species.clone());
    let (gender, set_gender) = signal(initial.gender.clone());
    let (neutered, set_neutered) = signal(initial.neutered.clone());
    let (birthday, set_birthday) = signal(initial.birthday.clone());
    let (age, set_age) = signal(initial.age.clone());
    let (weight, set_weight) = signal(initial.weight.clone());
    let (notes, set_notes) = signal(initial.notes.clone());
    let (food_allergy, set_food_allergy) = signal(initial.allergies.food.clone());
    let (medicine_allergy, set_medicine_allergy) = signal(initial.allergies.medicine.clone());
    let (environment_allergy, set_environment_allergy) =
        signal(initial.allergies.environment.clone());

    // Avatar (data URL; empty = no photo)
    let (avatar, set_avatar) = signal(initial.avatar.clone());
    let (avatar_status, set_avatar_status) = signal::<Option<String>>(None);

    // Record rows, keyed so edits don't recreate inputs. Fresh rows get
    // ids above every initial index.
    let (vaccinations, set_vaccinations) = signal::<Vec<(u32, Vaccination)>>(
        initial
            .vaccinations
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, row)| (i as u32, row))
            .collect(),
    );
    let (dewormings, set_dewormings) = signal::<Vec<(u32, Deworming)>>(
        initial
            .dewormings
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, row)| (i as u32, row))
            .collect(),
    );
    let (medical, set_medical) = signal::<Vec<(u32, MedicalRecord)>>(
        initial
            .medical_history
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, row)| (i as u32, row))
            .collect(),
    );
    let next_row = StoredValue::new(
        (initial.vaccinations.len() + initial.dewormings.len() + initial.medical_history.len())
            as u32,
    );
    let alloc_row = move || {
        next_row
            .try_update_value(|n| {
                *n += 1;
                *n
            })
            .unwrap_or(0)
    };

    let (form_status, set_form_status) = signal::<Option<String>>(None);

    let on_avatar_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            set_avatar_status.set(Some("Processing photo...".to_string()));
            spawn_local(async move {
                match upload::read_file(file).await {
                    Ok(image) => {
                        set_avatar.set(image.data_url);
                        set_avatar_status.set(Some("Photo ready".to_string()));
                    }
                    Err(err) => {
                        set_avatar_status.set(Some(err.to_string()));
                    }
                }
            });
        }
        input.set_value("");
    };

    let update_vaccination = move |row_id: u32, apply: fn(&mut Vaccination, String), value: String| {
        set_vaccinations.update(|rows| {
            if let Some((_, row)) = rows.iter_mut().find(|(id, _)| *id == row_id) {
                apply(row, value);
            }
        });
    };
    let update_deworming = move |row_id: u32, apply: fn(&mut Deworming, String), value: String| {
        set_dewormings.update(|rows| {
            if let Some((_, row)) = rows.iter_mut().find(|(id, _)| *id == row_id) {
                apply(row, value);
            }
        });
    };
    let update_medical = move |row_id: u32, apply: fn(&mut MedicalRecord, String), value: String| {
        set_medical.update(|rows| {
            if let Some((_, row)) = rows.iter_mut().find(|(id, _)| *id == row_id) {
                apply(row, value);
            }
        });
    };

    let do_save = move |_| {
        if name.get().trim().is_empty() || species.get().trim().is_empty() {
            set_form_status.set(Some("Name and species are required".to_string()));
            return;
        }

        let (id, created_at) = existing.get_value();
        let profile = PetProfile {
            id,
            name: name.get().trim().to_string(),
            species: species.get(),
            gender: gender.get(),
            neutered: neutered.get(),
            birthday: birthday.get(),
            age: age.get(),
            weight: weight.get(),
            notes: notes.get(),
            avatar: avatar.get(),
            allergies: Allergies {
                food: food_allergy.get(),
                medicine: medicine_allergy.get(),
                environment: environment_allergy.get(),
            },
            vaccinations: vaccinations
                .get()
                .into_iter()
                .map(|(_, row)| row)
                .filter(|row| row != &Vaccination::default())
                .collect(),
            dewormings: dewormings
                .get()
                .into_iter()
                .map(|(_, row)| row)
                .filter(|row| row != &Deworming::default())
                .collect(),
            medical_history: medical
                .get()
                .into_iter()
                .map(|(_, row)| row)
                .filter(|row| row != &MedicalRecord::default())
                .collect(),
            created_at,
            updated_at: String::new(),
        };
        on_save.run(profile);
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_cancel.run(())>
            <div class="modal pet-form" on:click=|ev| ev.stop_propagation()>
                <style>{include_str!("pet_form.css")}</style>

                <h3 class="modal-title">
                    {if is_edit { "Edit Pet Profile" } else { "Add Pet Profile" }}
                </h3>

                <div class="form-section avatar-section">
                    <Show
                        when=move || !avatar.get().is_empty()
                        fallback=|| view! {
                            <div class="avatar-preview avatar-preview-empty">"\u{1f43e}"</div>
                        }
                    >
                        <img class="avatar-preview" src=move || avatar.get() alt="Pet photo" />
                    </Show>
                    <label for=AVATAR_INPUT_ID class="btn btn-secondary">"Upload Photo"</label>
                    <input
                        type="file"
                        id=AVATAR_INPUT_ID
                        accept="image/*"
                        style="display: none"
                        on:change=on_avatar_change
                    />
                    {move || avatar_status.get().map(|msg| view! {
                        <span class="status-text">{msg}</span>
                    })}
                </div>

                <div class="form-section">
                    <div class="form-grid">
                        <div class="form-group">
                            <label>"Name *"</label>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Species *"</label>
                            <select
                                class="input"
                                on:change=move |ev| set_species.set(event_target_value(&ev))
                            >
                                <option value="" selected=initial.species.is_empty()>
                                    "Choose..."
                                </option>
                                {SPECIES_OPTIONS.iter().map(|&option| view! {
                                    <option value=option selected=initial.species == option>
                                        {option}
                                    </option>
                                }).collect::<Vec<_>>()}
                            </select>
                        </div>
                        <div class="form-group">
                            <label>"Gender"</label>
                            <select
                                class="input"
                                on:change=move |ev| set_gender.set(event_target_value(&ev))
                            >
                                <option value="" selected=initial.gender.is_empty()>"Unknown"</option>
                                <option value="male" selected=initial.gender == "male">"Male"</option>
                                <option value="female" selected=initial.gender == "female">"Female"</option>
                            </select>
                        </div>
                        <div class="form-group">
                            <label>"Neutered"</label>
                            <select
                                class="input"
                                on:change=move |ev| set_neutered.set(event_target_value(&ev))
                            >
                                <option value="" selected=initial.neutered.is_empty()>"Unknown"</option>
                                <option value="yes" selected=initial.neutered == "yes">"Yes"</option>
                                <option value="no" selected=initial.neutered == "no">"No"</option>
                            </select>
                        </div>
                        <div class="form-group">
                            <label>"Birthday"</label>
                            <input
                                type="date"
                                class="input"
                                prop:value=move || birthday.get()
                                on:input=move |ev| set_birthday.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Age (years)"</label>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || age.get()
                                on:input=move |ev| set_age.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Weight (kg)"</label>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || weight.get()
                                on:input=move |ev| set_weight.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                </div>

                <div class="form-section">
                    <h4>"Allergies"</h4>
                    <div class="form-grid">
                        <div class="form-group">
                            <label>"Food"</label>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || food_allergy.get()
                                on:input=move |ev| set_food_allergy.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Medicine"</label>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || medicine_allergy.get()
                                on:input=move |ev| set_medicine_allergy.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Environment"</label>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || environment_allergy.get()
                                on:input=move |ev| set_environment_allergy.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                </div>

                <div class="form-section">
                    <div class="section-header">
                        <h4>"Vaccinations"</h4>
                        <button
                            class="btn btn-secondary btn-small"
                            on:click=move |_| {
                                let id = alloc_row();
                                set_vaccinations.update(|rows| rows.push((id, Vaccination::default())));
                            }
                        >
                            "+ Add"
                        </button>
                    </div>
                    <For
                        each=move || vaccinations.get()
                        key=|(id, _)| *id
                        children=move |(row_id, row): (u32, Vaccination)| {
                            view! {
                                <div class="record-row">
                                    <input
                                        type="text"
                                        class="input"
                                        placeholder="Vaccine"
                                        prop:value=row.vaccine.clone()
                                        on:input=move |ev| update_vaccination(
                                            row_id,
                                            |r, v| r.vaccine = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="date"
                                        class="input"
                                        prop:value=row.date.clone()
                                        on:input=move |ev| update_vaccination(
                                            row_id,
                                            |r, v| r.date = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="date"
                                        class="input"
                                        prop:value=row.next_date.clone()
                                        on:input=move |ev| update_vaccination(
                                            row_id,
                                            |r, v| r.next_date = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <button
                                        class="btn btn-danger btn-small"
                                        on:click=move |_| set_vaccinations.update(|rows| {
                                            rows.retain(|(id, _)| *id != row_id);
                                        })
                                    >
                                        "x"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>

                <div class="form-section">
                    <div class="section-header">
                        <h4>"Dewormings"</h4>
                        <button
                            class="btn btn-secondary btn-small"
                            on:click=move |_| {
                                let id = alloc_row();
                                set_dewormings.update(|rows| rows.push((id, Deworming::default())));
                            }
                        >
                            "+ Add"
                        </button>
                    </div>
                    <For
                        each=move || dewormings.get()
                        key=|(id, _)| *id
                        children=move |(row_id, row): (u32, Deworming)| {
                            view! {
                                <div class="record-row">
                                    <input
                                        type="text"
                                        class="input"
                                        placeholder="Internal / external"
                                        prop:value=row.treatment.clone()
                                        on:input=move |ev| update_deworming(
                                            row_id,
                                            |r, v| r.treatment = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="text"
                                        class="input"
                                        placeholder="Medicine"
                                        prop:value=row.medicine.clone()
                                        on:input=move |ev| update_deworming(
                                            row_id,
                                            |r, v| r.medicine = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="date"
                                        class="input"
                                        prop:value=row.date.clone()
                                        on:input=move |ev| update_deworming(
                                            row_id,
                                            |r, v| r.date = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="text"
                                        class="input input-narrow"
                                        placeholder="Cycle (days)"
                                        prop:value=row.cycle_days.clone()
                                        on:input=move |ev| update_deworming(
                                            row_id,
                                            |r, v| r.cycle_days = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <button
                                        class="btn btn-danger btn-small"
                                        on:click=move |_| set_dewormings.update(|rows| {
                                            rows.retain(|(id, _)| *id != row_id);
                                        })
                                    >
                                        "x"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>

                <div class="form-section">
                    <div class="section-header">
                        <h4>"Medical History"</h4>
                        <button
                            class="btn btn-secondary btn-small"
                            on:click=move |_| {
                                let id = alloc_row();
                                set_medical.update(|rows| rows.push((id, MedicalRecord::default())));
                            }
                        >
                            "+ Add"
                        </button>
                    </div>
                    <For
                        each=move || medical.get()
                        key=|(id, _)| *id
                        children=move |(row_id, row): (u32, MedicalRecord)| {
                            view! {
                                <div class="record-row">
                                    <input
                                        type="text"
                                        class="input"
                                        placeholder="Disease"
                                        prop:value=row.disease.clone()
                                        on:input=move |ev| update_medical(
                                            row_id,
                                            |r, v| r.disease = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="date"
                                        class="input"
                                        prop:value=row.date.clone()
                                        on:input=move |ev| update_medical(
                                            row_id,
                                            |r, v| r.date = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <input
                                        type="text"
                                        class="input"
                                        placeholder="Outcome"
                                        prop:value=row.result.clone()
                                        on:input=move |ev| update_medical(
                                            row_id,
                                            |r, v| r.result = v,
                                            event_target_value(&ev),
                                        )
                                    />
                                    <button
                                        class="btn btn-danger btn-small"
                                        on:click=move |_| set_medical.update(|rows| {
                                            rows.retain(|(id, _)| *id != row_id);
                                        })
                                    >
                                        "x"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>

                <div class="form-section">
                    <div class="form-group">
                        <label>"Notes"</label>
                        <textarea
                            class="input"
                            prop:value=move || notes.get()
                            on:input=move |ev| set_notes.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                </div>

                {move || form_status.get().map(|msg| view! {
                    <p class="form-status">{msg}</p>
                })}

                <div class="modal-actions">
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn-primary" on:click=do_save>
                        "Save Profile"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Helper to get the event target as a concrete element type.
fn event_target<T: wasm_bindgen::JsCast>(ev: &web_sys::Event) -> T {
    ev.target().unwrap().dyn_into::<T>().unwrap()
}

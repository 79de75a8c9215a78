//! Pet profile management: list, create, edit, and delete, all backed by
//! the local profile store.

use leptos::prelude::*;

use crate::components::pet_card::PetCard;
use crate::components::pet_form::PetForm;
use crate::profiles::{
    LocalStorageBackend, PetProfile, ProfileStore, SaveOutcome, Timestamp,
};

#[component]
pub fn PetsPage() -> impl IntoView {
    let store = StoredValue::new(ProfileStore::new(LocalStorageBackend));

    let (pets, set_pets) = signal::<Vec<PetProfile>>(Vec::new());
    let (show_form, set_show_form) = signal(false);
    let (editing, set_editing) = signal::<Option<PetProfile>>(None);
    let (confirm_delete, set_confirm_delete) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);

    let refresh = move || {
        set_pets.set(store.with_value(|s| s.list()));
    };

    Effect::new(move |_| refresh());

    let open_new = move |_| {
        set_editing.set(None);
        set_show_form.set(true);
        set_notice.set(None);
    };

    let on_edit = Callback::new(move |id: String| {
        let pet = pets.get_untracked().into_iter().find(|p| p.id == id);
        if pet.is_some() {
            set_editing.set(pet);
            set_show_form.set(true);
            set_notice.set(None);
        }
    });

    let on_delete = Callback::new(move |id: String| {
        set_confirm_delete.set(Some(id));
    });

    let do_delete = move |_| {
        let Some(id) = confirm_delete.get_untracked() else {
            return;
        };
        set_confirm_delete.set(None);
        match store.try_update_value(|s| s.delete(&id)) {
            Some(Ok(())) => set_notice.set(Some("Profile deleted".to_string())),
            Some(Err(err)) => {
                set_notice.set(Some(format!("Could not delete profile: {err}")))
            }
            None => {}
        }
        refresh();
    };

    let on_save = Callback::new(move |profile: PetProfile| {
        let outcome = store.try_update_value(|s| s.save(profile, &Timestamp::now()));
        match outcome {
            Some(Ok(outcome)) => {
                web_sys::console::log_1(
                    &format!("saved pet profile {}", outcome.id()).into(),
                );
                let message = match outcome {
                    SaveOutcome::Saved { .. } => "Profile saved".to_string(),
                    SaveOutcome::SavedWithoutMedia { .. } => {
                        "Profile saved, but the photo was too large to keep".to_string()
                    }
                };
                set_notice.set(Some(message));
            }
            Some(Err(err)) => {
                set_notice.set(Some(format!("Could not save profile: {err}")));
            }
            None => {}
        }
        set_show_form.set(false);
        set_editing.set(None);
        refresh();
    });

    let on_cancel = Callback::new(move |_: ()| {
        set_show_form.set(false);
        set_editing.set(None);
    });

    view! {
        <div class="page pets-page">
            <style>{include_str!("pets.css")}</style>

            <div class="pets-header">
                <div>
                    <h2>"My Pets"</h2>
                    <p class="page-description">
                        "Profiles are stored in this browser only."
                    </p>
                </div>
                <button class="btn btn-primary" on:click=open_new>"+ Add Pet"</button>
            </div>

            {move || notice.get().map(|msg| view! {
                <div class="notice" on:click=move |_| set_notice.set(None)>
                    {msg}
                </div>
            })}

            {move || {
                let list = pets.get();
                if list.is_empty() {
                    view! {
                        <div class="pets-empty">
                            <p>"No pets yet. Add your first profile to get started."</p>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="pets-grid">
                            {list.into_iter().map(|pet| view! {
                                <PetCard pet=pet on_edit=on_edit on_delete=on_delete />
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_any()
                }
            }}

            {move || show_form.get().then(|| {
                let initial = editing.get();
                view! {
                    <PetForm initial=initial on_save=on_save on_cancel=on_cancel />
                }
            })}

            {move || confirm_delete.get().map(|_| view! {
                <div class="modal-overlay" on:click=move |_| set_confirm_delete.set(None)>
                    <div class="modal confirm-dialog" on:click=|ev| ev.stop_propagation()>
                        <h3>"Delete this profile?"</h3>
                        <p>"This removes the pet and all of its records from this browser."</p>
                        <div class="modal-actions">
                            <button
                                class="btn btn-secondary"
                                on:click=move |_| set_confirm_delete.set(None)
                            >
                                "Cancel"
                            </button>
                            <button class="btn btn-danger" on:click=do_delete>
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

//! Card view of one pet profile.

use leptos::prelude::*;

use crate::profiles::PetProfile;

#[component]
pub fn PetCard(
    pet: PetProfile,
    #[prop(into)] on_edit: Callback<String>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let edit_id = pet.id.clone();
    let delete_id = pet.id.clone();

    let icon = species_icon(&pet.species);
    let has_avatar = pet.avatar.starts_with("data:image");
    let avatar = pet.avatar.clone();

    let gender_line = join_present(&[
        pet.gender.as_str(),
        if pet.neutered == "yes" { "neutered" } else { "" },
    ]);
    let age_line = if pet.age.is_empty() {
        pet.birthday.clone()
    } else {
        format!("{} yrs", pet.age)
    };
    let weight_line = if pet.weight.is_empty() {
        String::new()
    } else {
        format!("{} kg", pet.weight)
    };

    let allergies = [
        ("food", pet.allergies.food.clone()),
        ("medicine", pet.allergies.medicine.clone()),
        ("environment", pet.allergies.environment.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(kind, value)| format!("{kind}: {value}"))
    .collect::<Vec<_>>();

    let vaccination_count = pet.vaccinations.len();
    let deworming_count = pet.dewormings.len();
    let medical_history = pet.medical_history.clone();
    let notes = pet.notes.clone();

    view! {
        <div class="pet-card">
            <div class="pet-card-header">
                {if has_avatar {
                    view! {
                        <img class="pet-card-avatar" src=avatar.clone() alt=pet.name.clone() />
                    }.into_any()
                } else {
                    view! {
                        <div class="pet-card-avatar pet-card-avatar-fallback">{icon}</div>
                    }.into_any()
                }}
                <div class="pet-card-title">
                    <h3>{pet.name.clone()}</h3>
                    <span class="pet-card-species">{icon} " " {pet.species.clone()}</span>
                </div>
            </div>

            <div class="pet-card-body">
                {(!gender_line.is_empty()).then(|| view! {
                    <div class="pet-card-row">{gender_line.clone()}</div>
                })}
                {(!age_line.is_empty()).then(|| view! {
                    <div class="pet-card-row">"Age: " {age_line.clone()}</div>
                })}
                {(!weight_line.is_empty()).then(|| view! {
                    <div class="pet-card-row">"Weight: " {weight_line.clone()}</div>
                })}

                {(!allergies.is_empty()).then(|| view! {
                    <div class="pet-card-allergies">
                        <span class="pet-card-label">"Allergies"</span>
                        {allergies.iter().map(|a| view! {
                            <span class="allergy-chip">{a.clone()}</span>
                        }).collect::<Vec<_>>()}
                    </div>
                })}

                <div class="pet-card-counts">
                    <span>{vaccination_count} " vaccinations"</span>
                    <span>{deworming_count} " dewormings"</span>
                </div>

                {(!medical_history.is_empty()).then(|| view! {
                    <div class="pet-card-history">
                        <span class="pet-card-label">"Medical History"</span>
                        <ul>
                            {medical_history.iter().map(|record| view! {
                                <li>
                                    {record.disease.clone()}
                                    {(!record.date.is_empty())
                                        .then(|| format!(" ({})", record.date))}
                                    {(!record.result.is_empty())
                                        .then(|| format!(" - {}", record.result))}
                                </li>
                            }).collect::<Vec<_>>()}
                        </ul>
                    </div>
                })}

                {(!notes.is_empty()).then(|| view! {
                    <p class="pet-card-notes">{notes.clone()}</p>
                })}
            </div>

            <div class="pet-card-actions">
                <button class="btn btn-secondary" on:click=move |_| on_edit.run(edit_id.clone())>
                    "Edit"
                </button>
                <button class="btn btn-danger" on:click=move |_| on_delete.run(delete_id.clone())>
                    "Delete"
                </button>
            </div>
        </div>
    }
}

fn species_icon(species: &str) -> &'static str {
    match species.to_lowercase().as_str() {
        "dog" => "\u{1f415}",
        "cat" => "\u{1f408}",
        "rabbit" => "\u{1f407}",
        "bird" => "\u{1f426}",
        "hamster" => "\u{1f439}",
        _ => "\u{1f43e}",
    }
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

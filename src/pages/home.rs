use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home-page">
            <h2>"Welcome to PawCloud"</h2>
            <p class="page-description">
                "AI-assisted health checks and a health record book for your pets."
            </p>

            <div class="card-grid">
                <div class="card">
                    <h3>"Health Detection"</h3>
                    <p>"Upload a photo for breed identification or a quick health screen"</p>
                    <a href="/detect" class="btn btn-primary">"Start a Check"</a>
                </div>
                <div class="card">
                    <h3>"My Pets"</h3>
                    <p>"Keep profiles, vaccinations, deworming and medical history in one place"</p>
                    <a href="/pets" class="btn btn-primary">"Open Profiles"</a>
                </div>
            </div>

            <div class="how-it-works">
                <h3>"How It Works"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Snap"</strong>
                            <p>"Take a clear, well-lit photo of your pet or the area of concern"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Analyze"</strong>
                            <p>"Our classifier checks the photo and returns a result in seconds"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Track"</strong>
                            <p>"Save findings to your pet's profile and watch trends over time"</p>
                        </div>
                    </div>
                </div>
            </div>

            <p class="home-disclaimer">
                "Results are informational only. For anything urgent, contact a veterinarian."
            </p>
        </div>
    }
}

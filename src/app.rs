use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::sidebar::Sidebar;
use crate::pages::detection::DetectionPage;
use crate::pages::home::HomePage;
use crate::pages::pets::PetsPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/detect") view=DetectionPage />
                        <Route path=path!("/pets") view=PetsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

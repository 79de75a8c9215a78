use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"PawCloud"</h1>
                <p class="sidebar-subtitle">"Pet Health Assistant"</p>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Home"</a>
                </li>
                <li class="nav-item">
                    <a href="/detect" class="nav-link">"Health Detection"</a>
                </li>
                <li class="nav-item">
                    <a href="/pets" class="nav-link">"My Pets"</a>
                </li>
            </ul>
        </nav>
    }
}

mod api;
mod app;
mod breeds;
mod components;
mod detection;
mod pages;
mod profiles;
mod results;
mod session;
mod upload;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}

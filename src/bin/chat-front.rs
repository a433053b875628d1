use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use fincoach::actuators::chat::front::App;

fn main() {
    dioxus::logger::init(Level::INFO).expect("Failed to initialize logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(desktop!({
            use dioxus::desktop::{Config, WindowBuilder};
            use tao::window::Theme;
            Config::new().with_menu(None).with_window(
                WindowBuilder::default()
                    .with_title("Finance AI")
                    .with_theme(Some(Theme::Dark)),
            )
        }))
        .launch(App);
}

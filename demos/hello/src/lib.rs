use pewter::{
    app::{inject, App, Root},
    dom::{
        builder::{div, h1, nav, p},
        TagBuilder,
    },
    effect::set_interval,
    signal::signal::{Mutable, SignalExt},
};
use pewter_router::{Router, RouterHandle};
use wasm_bindgen::prelude::*;

fn shell() -> TagBuilder {
    let router = inject::<RouterHandle>().expect("router is installed before mount");

    let seconds = Mutable::new(0u64);
    let uptime = seconds.signal().map(|v| format!("{v}s"));
    let interval = set_interval(std::time::Duration::from_secs(1), move || {
        seconds.replace_with(|v| *v + 1);
    });

    div()
        .child(h1().text("pewter"))
        .child(
            nav()
                .child(router.link("/", "home"))
                .child(router.link("/about", "about")),
        )
        .child(p().text("current route: ").text_signal(router.signal()))
        .child(p().bind(interval).text("uptime: ").text_signal(uptime))
}

#[wasm_bindgen(start)]
pub fn main() {
    let mut config = tracing_wasm::WASMLayerConfigBuilder::new();
    config.set_report_logs_in_timings(false);
    config.set_console_config(tracing_wasm::ConsoleConfig::ReportWithoutConsoleColor);
    tracing_wasm::set_as_global_default_with_config(config.build());
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let window = web_sys::window().unwrap();
    let doc = window.document().unwrap();
    let root = doc.create_element("div").unwrap();
    root.set_id("app");
    doc.body().unwrap().append_child(&root).unwrap();

    let mut app = match App::new(Root::view(shell)).install(Router::new()) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(%err, "bootstrap aborted during plugin installation");
            return;
        }
    };

    match app.mount("#app") {
        Ok(()) => {
            tracing::info!("application is live");
            // The page owns the application from here on.
            app.forget();
        }
        Err(err) => {
            tracing::error!(%err, "bootstrap aborted during mount");
        }
    }
}

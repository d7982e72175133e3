#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use console_ui::state::State;
use console_ui::{ConsoleApp, storage};

#[cfg(not(target_arch = "wasm32"))]
mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context as _;
    use console_business::BusinessConfig;

    // Log to stderr (if you run with `RUST_LOG=debug`).
    // Clipboard errors from egui_winit are noise for a form-only app.
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    // Commands are spawned onto this runtime from the UI thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the tokio runtime")?;
    let _guard = runtime.enter();

    let config = BusinessConfig::from_env().context("invalid configuration")?;
    log::info!("Using API base URL {}", config.api_base_url);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Resource Console",
        native_options,
        Box::new(move |cc| {
            let session = storage::load_session(cc.storage);
            let state = State::new(config, session);
            Ok(Box::new(ConsoleApp::new(state)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe stopped: {err}"))
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use console_business::{BusinessConfig, Route};
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let window = web_sys::window().expect("No window");
        let document = window.document().expect("No document");

        let canvas = document
            .get_element_by_id("egui_canvas")
            .expect("Failed to find egui_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("egui_canvas was not a HtmlCanvasElement");

        let initial_route = window
            .location()
            .pathname()
            .ok()
            .and_then(|path| Route::from_path(&path))
            .unwrap_or_default();

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| {
                    let session = storage::load_session(cc.storage);
                    let mut state = State::new(BusinessConfig::default(), session);
                    if initial_route != Route::Login {
                        state.navigate(initial_route);
                    }
                    Ok(Box::new(ConsoleApp::new(state)))
                }),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

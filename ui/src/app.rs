use console_business::{Route, Session};
use log::info;

use crate::{pages, state::State, storage, widgets};

/// The console's `eframe` application.
pub struct ConsoleApp {
    state: State,
    /// Session generation last written to storage.
    persisted_generation: u64,
    waker_installed: bool,
}

impl ConsoleApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        let persisted_generation = state.ctx.state::<Session>().generation();
        Self {
            state,
            persisted_generation,
            waker_installed: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn install_waker(&mut self, ctx: &egui::Context) {
        if self.waker_installed {
            return;
        }
        let egui_ctx = ctx.clone();
        self.state
            .ctx
            .set_waker(move || egui_ctx.request_repaint());
        self.waker_installed = true;
    }

    /// Persist the session once per sign-in or sign-out.
    fn persist_session(&mut self, frame: &mut eframe::Frame) {
        let session = self.state.ctx.state::<Session>();
        if session.generation() == self.persisted_generation {
            return;
        }
        if let Some(storage) = frame.storage_mut() {
            storage::save_session(session, storage);
            info!("Session persisted (signed in: {})", session.is_authenticated());
        }
        self.persisted_generation = session.generation();
    }

    fn show_route(&mut self, ui: &mut egui::Ui) {
        let route = self.state.route();
        if route.requires_session() && !self.state.ctx.state::<Session>().is_authenticated() {
            self.state.navigate(Route::Login);
            return;
        }

        match route {
            Route::Login => {
                pages::login_page(&mut self.state, ui);
            }
            Route::Home => {
                pages::home_page(&mut self.state, ui);
            }
            Route::Employees | Route::Departments | Route::Projects => {
                if let Some(kind) = route.entity() {
                    pages::entities_page(&mut self.state, ui, kind);
                }
            }
        }
    }
}

impl eframe::App for ConsoleApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.install_waker(ctx);

        // Apply results published by finished commands
        self.state.ctx.sync_updates();
        self.persist_session(frame);

        if self.state.route() != Route::Login {
            egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
                egui::MenuBar::new().ui(ui, |ui| {
                    widgets::nav_bar(&mut self.state, ui);
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_route(ui);
        });

        // Run commands queued during this frame
        self.state.ctx.flush_commands();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage::save_session(self.state.ctx.state::<Session>(), storage);
    }
}

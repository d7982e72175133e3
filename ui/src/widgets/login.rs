//! Login widget for user authentication.
//!
//! Displays a centered login form with username, password and a
//! "Remember Me" checkbox. Failures are shown inline above the form.

use console_business::{AuthStatus, LoginCommand, LoginInput};
use console_states::StateCtx;
use egui::{Align, Layout, Response, RichText, Ui};

use crate::utils::colors::{COLOR_AMBER, COLOR_RED};

pub const APP_TITLE: &str = "Resource Console";

/// Displays the login form, or a spinner while the credentials are checked.
pub fn login_widget(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let auth_status = state_ctx.state::<AuthStatus>().clone();

    match auth_status {
        AuthStatus::Authenticating => show_loading(ui),
        AuthStatus::Failed(error) => show_login_form(state_ctx, ui, Some(&error)),
        AuthStatus::Idle | AuthStatus::Authenticated { .. } => {
            show_login_form(state_ctx, ui, None)
        }
    }
}

fn show_loading(ui: &mut Ui) -> Response {
    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(20.0);
        ui.heading(APP_TITLE);
        ui.add_space(40.0);

        ui.spinner();
        ui.label(RichText::new("Authenticating...").color(COLOR_AMBER));
    })
    .response
}

fn show_login_form(state_ctx: &mut StateCtx, ui: &mut Ui, error: Option<&str>) -> Response {
    let login_input = state_ctx.state::<LoginInput>();

    let mut username = login_input.username.clone();
    let mut password = login_input.password.clone();
    let mut remember_me = login_input.remember_me;
    let mut should_login = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading(APP_TITLE);
            ui.add_space(40.0);

            if let Some(err) = error {
                ui.colored_label(COLOR_RED, err);
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label("Username:");
                ui.text_edit_singleline(&mut username);
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Password:");
                let password_response =
                    ui.add(egui::TextEdit::singleline(&mut password).password(true));

                if password_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    should_login = true;
                }
            });

            ui.add_space(8.0);
            ui.checkbox(&mut remember_me, "Remember Me");
            ui.add_space(16.0);

            if ui.button("Login").clicked() {
                should_login = true;
            }
        })
        .response;

    let login_input = state_ctx.state_mut::<LoginInput>();
    if login_input.username != username {
        login_input.username = username;
    }
    if login_input.password != password {
        login_input.password = password;
    }
    login_input.remember_me = remember_me;

    // Empty fields are rejected by the command itself, without a request.
    if should_login {
        state_ctx.dispatch::<LoginCommand>();
    }

    response
}

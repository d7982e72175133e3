//! Home page for authenticated users.
//!
//! Greets the user and links to every entity view.

use console_business::{AuthStatus, EntityKind, Route};
use egui::{Response, RichText, Ui};

use crate::state::State;
use crate::utils::colors::COLOR_GREEN;

/// Renders the landing page with one card per entity view.
pub fn home_page(state: &mut State, ui: &mut Ui) -> Response {
    let username = match state.ctx.state::<AuthStatus>() {
        AuthStatus::Authenticated { username } => Some(username.clone()),
        _ => None,
    };
    let mut target = None;

    let response = ui
        .vertical(|ui| {
            ui.heading("Home");
            if let Some(username) = &username {
                ui.label(RichText::new(format!("Welcome, {username}")).color(COLOR_GREEN));
            }
            ui.add_space(16.0);

            ui.horizontal_wrapped(|ui| {
                for kind in EntityKind::ALL {
                    egui::Frame::group(ui.style())
                        .inner_margin(egui::Margin::same(12))
                        .show(ui, |ui| {
                            ui.vertical(|ui| {
                                ui.label(format!("Browse /{}", kind.service()));
                                if ui.button(format!("Open {}", kind.title())).clicked() {
                                    target = Some(Route::from(kind));
                                }
                            });
                        });
                }
            });
        })
        .response;

    if let Some(route) = target {
        state.navigate(route);
    }

    response
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod home_page_test {
    use console_business::{AuthStatus, Route, Session};
    use kittest::Queryable;

    use crate::test_utils::TestCtx;

    #[tokio::test]
    async fn test_home_page_shows_welcome_and_cards() {
        let mut ctx = TestCtx::new(|ui, state| {
            super::home_page(state, ui);
        })
        .await;

        let harness = ctx.harness_mut();
        harness.state_mut().ctx.update::<AuthStatus>(|status| {
            *status = AuthStatus::Authenticated {
                username: "TestUser".to_owned(),
            };
        });
        harness.step();

        assert!(
            harness.query_by_label_contains("Welcome, TestUser").is_some(),
            "Home page should greet the user"
        );
        for label in ["Open Employees", "Open Departments", "Open Projects"] {
            assert!(
                harness.query_by_label(label).is_some(),
                "'{label}' should be displayed"
            );
        }
    }

    #[tokio::test]
    async fn test_card_opens_entity_view() {
        let mut ctx = TestCtx::new(|ui, state| {
            super::home_page(state, ui);
        })
        .await;

        let harness = ctx.harness_mut();
        harness
            .state_mut()
            .ctx
            .state_mut::<Session>()
            .sign_in("jwt".to_owned(), None, false);
        harness.step();

        harness.get_by_label("Open Employees").click();
        harness.step();

        assert_eq!(harness.state().route(), Route::Employees);
    }
}

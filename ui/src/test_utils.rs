//! Harness helpers for widget tests inside the crate.

use egui_kittest::Harness;
use wiremock::MockServer;

use crate::state::State;

pub struct TestCtx<'a> {
    _mock_server: MockServer,
    harness: Harness<'a, State>,
}

impl<'a> TestCtx<'a> {
    pub async fn new(app: impl FnMut(&mut egui::Ui, &mut State) + 'a) -> Self {
        let mock_server = MockServer::start().await;
        let state = State::test(mock_server.uri());
        let harness = Harness::new_ui_state(app, state);

        Self {
            _mock_server: mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, State> {
        &mut self.harness
    }
}

use console_business::{BusinessConfig, Route, Session, install};
use console_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default(), Session::default())
    }
}

impl State {
    pub fn new(config: BusinessConfig, session: Session) -> Self {
        let mut ctx = StateCtx::new();
        install(&mut ctx, config, session);
        Self { ctx }
    }

    /// State pointed at a mock backend, starting signed out.
    pub fn test(base_url: String) -> Self {
        Self::new(BusinessConfig::new(base_url), Session::default())
    }

    /// Open `route`, falling back to login while signed out.
    pub fn navigate(&mut self, route: Route) {
        let signed_in = self.ctx.state::<Session>().is_authenticated();
        let route = if route.requires_session() && !signed_in {
            Route::Login
        } else {
            route
        };
        self.ctx.update::<Route>(|current| *current = route);
    }

    pub fn route(&self) -> Route {
        *self.ctx.state::<Route>()
    }
}

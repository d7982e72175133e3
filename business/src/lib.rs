//! Business layer of the resource console: backend access, session,
//! header inference and the state behind every page. No egui in here.

pub mod api;
mod config;
mod entity_table;
mod error;
pub mod headers;
pub mod http;
mod login;
mod pagination;
pub mod record;
mod route;
mod session;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_utils;

use console_states::StateCtx;

pub use api::{ApiClient, PageData};
pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL};
pub use entity_table::{
    ColumnSort, EntityTableState, EntityTablesState, FALLBACK_ERROR, FetchEntityPageCommand,
    FetchRequest, PendingFetch, SortOrder, TableStatus, ensure_loaded, handle_pagination,
    request_fetch,
};
pub use error::{ApiError, ApiResult};
pub use headers::{EntityKind, HeaderMap, HeaderProvider, humanize_key, infer_headers};
pub use login::{
    AuthStatus, LoginCommand, LoginFailure, LoginInput, LogoutCommand, validate_input,
};
pub use pagination::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PaginationEvent, PaginationState, PaginationView,
};
pub use record::{EntityRecord, FieldMap, JsonFields};
pub use route::Route;
pub use session::{MemoryStore, REFRESH_TOKEN_KEY, Session, SessionStore, TOKEN_KEY};

/// Register every business state and command.
///
/// A restored, authenticated session skips the login page.
pub fn install(ctx: &mut StateCtx, config: BusinessConfig, session: Session) {
    let route = if session.is_authenticated() {
        Route::Home
    } else {
        Route::Login
    };

    ctx.add_state(EntityTablesState::new(config.default_page_size));
    ctx.add_state(config);
    ctx.add_state(session);
    ctx.add_state(route);
    ctx.add_state(LoginInput::default());
    ctx.add_state(AuthStatus::default());
    ctx.add_state(PendingFetch::default());

    ctx.record_command(LoginCommand);
    ctx.record_command(LogoutCommand);
    ctx.record_command(FetchEntityPageCommand);
}

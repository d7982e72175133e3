use console_business::{LoginInput, Route, Session};
use kittest::Queryable;
use serde_json::json;

use crate::common::TestCtx;

mod common;

/// Tests that the signed-out app opens on the login form.
#[tokio::test]
async fn test_login_form_displayed() {
    let mut ctx = TestCtx::new_app().await;

    let harness = ctx.harness_mut();
    harness.step();

    assert!(
        harness.query_by_label_contains("Resource Console").is_some(),
        "Heading should be displayed"
    );
    assert!(
        harness.query_by_label_contains("Username").is_some(),
        "Username label should be displayed"
    );
    assert!(
        harness.query_by_label_contains("Password").is_some(),
        "Password label should be displayed"
    );
    assert!(
        harness.query_by_label("Logout").is_none(),
        "Navigation bar should be hidden on the login page"
    );
}

/// Tests that valid credentials store the session and open Home.
#[tokio::test]
async fn test_login_navigates_home() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_login(
        "ada",
        "secret",
        200,
        json!({"status": "success", "message": "ok", "data": {"token": "jwt", "refreshToken": "refresh"}}),
    )
    .await;

    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .ctx
        .update::<LoginInput>(|input| {
            input.username = "ada".to_owned();
            input.password = "secret".to_owned();
        });
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Login").click();
    ctx.step_and_settle().await;

    let harness = ctx.harness_mut();
    let state = harness.state().state();
    assert_eq!(state.route(), Route::Home);
    assert_eq!(state.ctx.state::<Session>().token(), Some("jwt"));

    harness.step();
    assert!(
        harness.query_by_label_contains("Welcome, ada").is_some(),
        "Home page should greet the user"
    );
    assert!(
        harness.query_by_label("Logout").is_some(),
        "Navigation bar should be visible"
    );
}

/// Tests that rejected credentials keep the user on the login page.
#[tokio::test]
async fn test_rejected_login_shows_error() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_login(
        "ada",
        "wrong",
        401,
        json!({"status": "error", "message": "Invalid password"}),
    )
    .await;

    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .ctx
        .update::<LoginInput>(|input| {
            input.username = "ada".to_owned();
            input.password = "wrong".to_owned();
        });
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Login").click();
    ctx.step_and_settle().await;

    let harness = ctx.harness_mut();
    harness.step();
    assert_eq!(harness.state().state().route(), Route::Login);
    assert!(
        harness
            .query_by_label_contains("Invalid username or password")
            .is_some(),
        "Credential error should be shown inline"
    );
}

/// Tests that a response without a token does not sign in.
#[tokio::test]
async fn test_login_without_token_stays_signed_out() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_login(
        "ada",
        "secret",
        200,
        json!({"status": "success", "data": {"refreshToken": "refresh"}}),
    )
    .await;

    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .ctx
        .update::<LoginInput>(|input| {
            input.username = "ada".to_owned();
            input.password = "secret".to_owned();
        });
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Login").click();
    ctx.step_and_settle().await;

    let state = ctx.harness_mut().state().state();
    assert_eq!(state.route(), Route::Login);
    assert!(!state.ctx.state::<Session>().is_authenticated());
}

/// Tests that Logout returns to the login form.
#[tokio::test]
async fn test_logout_returns_to_login() {
    let mut ctx = TestCtx::new_signed_in_app().await;

    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Logout").click();
    ctx.step_and_settle().await;

    let harness = ctx.harness_mut();
    assert_eq!(harness.state().state().route(), Route::Login);
    assert!(
        !harness
            .state()
            .state()
            .ctx
            .state::<Session>()
            .is_authenticated()
    );
    assert!(
        harness.query_by_label("Login").is_some(),
        "Login form should be displayed after logout"
    );
}

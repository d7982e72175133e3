use console_business::{EntityKind, EntityTablesState, PaginationEvent, handle_pagination};
use kittest::{NodeT as _, Queryable};

use crate::common::{TestCtx, sample_employee, sample_page};

mod common;

fn current_page(ctx: &mut TestCtx<'_>) -> u32 {
    ctx.harness_mut()
        .state()
        .state()
        .ctx
        .state::<EntityTablesState>()
        .table(EntityKind::Employees)
        .pagination()
        .current_page
}

async fn open_employees(ctx: &mut TestCtx<'_>) {
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Employees").click();
    ctx.step_and_settle().await;
    ctx.harness_mut().step();
}

/// Tests that Next requests the following page and the server's page number
/// is reflected in the control.
#[tokio::test]
async fn test_next_fetches_following_page() {
    let mut ctx = TestCtx::new_signed_in_app().await;
    ctx.mock_page(
        "employees",
        1,
        10,
        sample_page(vec![sample_employee(1)], 0, 10, 30),
    )
    .await;
    ctx.mock_page(
        "employees",
        2,
        10,
        sample_page(vec![sample_employee(11)], 1, 10, 30),
    )
    .await;

    open_employees(&mut ctx).await;
    assert_eq!(current_page(&mut ctx), 1);

    ctx.harness_mut().get_by_label("Next").click();
    ctx.step_and_settle().await;

    assert_eq!(current_page(&mut ctx), 2);
    assert!(
        ctx.harness_mut().query_by_label("First11").is_some(),
        "Second page rows should be displayed"
    );
    assert!(
        ctx.harness_mut()
            .query_by_label("Showing 11 to 11 of 30")
            .is_some(),
        "Range text should follow the page"
    );
}

/// Tests that the page shown comes from the server, not the request.
#[tokio::test]
async fn test_server_clamped_page_wins() {
    let mut ctx = TestCtx::new_signed_in_app().await;
    ctx.mock_page(
        "employees",
        1,
        10,
        sample_page(vec![sample_employee(1)], 0, 10, 30),
    )
    .await;
    ctx.mock_page(
        "employees",
        3,
        10,
        sample_page(vec![sample_employee(21)], 2, 10, 30),
    )
    .await;

    open_employees(&mut ctx).await;

    ctx.harness_mut().get_by_label("Last").click();
    ctx.step_and_settle().await;

    assert_eq!(current_page(&mut ctx), 3);
    assert!(
        ctx.harness_mut().get_by_label("Next").accesskit_node().is_disabled(),
        "Next should be disabled on the last page"
    );
    assert!(
        !ctx.harness_mut().get_by_label("Previous").accesskit_node().is_disabled(),
        "Previous should be enabled on the last page"
    );
}

/// Tests that a page-size change goes back to the first page.
#[tokio::test]
async fn test_page_size_change_requests_first_page() {
    let mut ctx = TestCtx::new_signed_in_app().await;
    ctx.mock_page(
        "employees",
        1,
        10,
        sample_page(vec![sample_employee(1)], 0, 10, 30),
    )
    .await;
    ctx.mock_page(
        "employees",
        2,
        10,
        sample_page(vec![sample_employee(11)], 1, 10, 30),
    )
    .await;
    ctx.mock_page(
        "employees",
        1,
        25,
        sample_page(vec![sample_employee(1)], 0, 25, 30),
    )
    .await;

    open_employees(&mut ctx).await;
    ctx.harness_mut().get_by_label("Next").click();
    ctx.step_and_settle().await;
    assert_eq!(current_page(&mut ctx), 2);

    handle_pagination(
        &mut ctx.harness_mut().state_mut().state_mut().ctx,
        EntityKind::Employees,
        PaginationEvent::PageSizeChanged(25),
    );
    assert_eq!(current_page(&mut ctx), 1);
    ctx.step_and_settle().await;

    let pagination = *ctx
        .harness_mut()
        .state()
        .state()
        .ctx
        .state::<EntityTablesState>()
        .table(EntityKind::Employees)
        .pagination();
    assert_eq!(pagination.page_size, 25);
    assert_eq!(pagination.total_pages, 2);
}

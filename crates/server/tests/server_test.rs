//! # Server Endpoint Tests
//!
//! Integration tests for the public `quickabout-server` endpoints: root,
//! health check, and the paste guide.

mod common;

use anyhow::Result;
use common::TestApp;

#[tokio::test]
async fn test_root_and_health_check_endpoints() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // --- Test Root Endpoint ---
    let root_response = app.client.get(app.url("/")).send().await?;

    // Assert
    assert!(root_response.status().is_success());
    assert_eq!("QuickAbout server is running.", root_response.text().await?);

    // --- Test Health Check Endpoint ---
    let health_response = app.client.get(app.url("/health")).send().await?;

    assert!(health_response.status().is_success());
    assert_eq!("OK", health_response.text().await?);

    Ok(())
}

#[tokio::test]
async fn test_guide_lists_paste_steps_without_login() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app.client.get(app.url("/guide")).send().await?;

    assert!(response.status().is_success());
    let guide = response.text().await?;
    for step in [
        "Admin Panel",
        "Products > Categories",
        "Edit",
        "</>",
        "Show 'About' tab",
        "YES",
        "Save",
    ] {
        assert!(guide.contains(step), "guide is missing '{step}':\n{guide}");
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app.client.get(app.url("/prompt")).send().await?;

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}

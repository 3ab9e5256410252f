//! # General Route Handlers
//!
//! The root, health check, and paste guide endpoints. None of them require a
//! session.

/// The steps an operator follows to publish a generated snippet.
pub const PASTE_GUIDE: &str = "How to add the snippet to a category page:
1. Open the Admin Panel.
2. Go to Products > Categories and click Edit on the category.
3. In the About section, click the </> code view button.
4. Paste the snippet HTML.
5. Set \"Show 'About' tab\" to YES.
6. Click Save.
";

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "QuickAbout server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the `/guide` endpoint.
pub async fn guide_handler() -> &'static str {
    PASTE_GUIDE
}

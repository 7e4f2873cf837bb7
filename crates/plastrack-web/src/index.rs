//! Landing page route.

use crate::pages;
use axum::response::Html;

/// Shows links to the other views.
pub async fn index() -> Html<String> {
    Html(pages::index_page())
}

use axum::response::Html;

/// Serve the embedded index page.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

//! Landing page route

use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Cafe API</title>
</head>
<body>
    <h1>Cafe &amp; Wifi API</h1>
    <p>A directory of cafes to work from.</p>
    <ul>
        <li><code>GET /random</code> - one cafe, picked at random</li>
        <li><code>GET /all</code> - every cafe</li>
        <li><code>GET /search?loc=&lt;location&gt;</code> - cafes at a location</li>
        <li><code>POST /add</code> - add a cafe (form-encoded)</li>
        <li><code>PUT /update-price/&lt;id&gt;?new_price=&lt;price&gt;</code> - update a coffee price</li>
        <li><code>DELETE /report-closed/&lt;id&gt;?api_key=&lt;key&gt;</code> - remove a closed cafe</li>
    </ul>
</body>
</html>
"#;

/// GET / - Static landing page
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

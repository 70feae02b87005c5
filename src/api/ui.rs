//! Static index page listing the available endpoints.

use axum::response::Html;

const INDEX_HTML: &str = r#"
<h2>Weather Station REST API v1.1</h2>
<table>
    <tr>
        <th>Method</th>
        <th>URI</th>
        <th>Description</th>
    </tr>
    <tr>
        <td>GET</td>
        <td><a href="/measurements/all">/measurements/all</a></td>
        <td>Returns the 20 most recent measurements in the
            <a href="https://www.cumuluswiki.org/a/Realtime.txt">Cumulus realtime.txt format</a>
        </td>
    </tr>
    <tr>
        <td>GET</td>
        <td><a href="/measurements/latest">/measurements/latest</a></td>
        <td>Returns the most recent measurement in the
            <a href="https://www.cumuluswiki.org/a/Realtime.txt">Cumulus realtime.txt format</a>
        </td>
    </tr>
    <tr>
        <td>POST</td>
        <td>/measurements/insert/&#60;token&#62;</td>
        <td>Stores a new measurement consisting of temperature, humidity and pressure</td>
    </tr>
    <tr>
        <td>GET</td>
        <td><a href="/predictions/latest">/predictions/latest</a></td>
        <td>Returns the features and classes of the last 5 ML predictions,
            together with the current measurement values</td>
    </tr>
    <tr>
        <td>POST</td>
        <td>/predictions/insert/&#60;token&#62;</td>
        <td>Stores the current prediction, unless one was already stored
            within the last hour</td>
    </tr>
</table>
"#;

/// GET /
///
/// Static availability page with the endpoint table.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

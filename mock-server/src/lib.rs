//! Stand-in for the instant answer endpoint.
//!
//! # Design
//! A single `GET /` route. Known queries (`python`, `rust`, `list`,
//! `garbage`) get recorded or deliberately odd bodies; any other query gets
//! an empty answer whose lowercase `meta` object echoes the raw query string,
//! the user agent and the flags, so clients can check what went over the
//! wire. Only `format=json` is served.

use std::collections::HashMap;

use axum::{
    extract::{Query, RawQuery},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Recorded answer for `q=python`: a disambiguation page whose related
/// topics are three results with icons.
pub const PYTHON_RESPONSE: &str = include_str!("../../test-vectors/python_response.json");

/// Recorded answer for `q=rust`: an article with an infobox, a related topic
/// group and provider metadata.
pub const INFOBOX_RESPONSE: &str = include_str!("../../test-vectors/infobox_response.json");

pub fn app() -> Router {
    Router::new().route("/", get(instant_answer))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn instant_answer(
    Query(params): Query<HashMap<String, String>>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let format = params.get("format").map(String::as_str).unwrap_or_default();
    if format != "json" {
        return (StatusCode::BAD_REQUEST, "unsupported format").into_response();
    }
    let q = params.get("q").map(String::as_str).unwrap_or_default();
    tracing::debug!(q, "instant answer request");

    match q {
        "python" => json_body(PYTHON_RESPONSE.to_string()),
        "rust" => json_body(INFOBOX_RESPONSE.to_string()),
        "list" => json_body(r#"[1, "x", true]"#.to_string()),
        "garbage" => json_body("Not JSON".to_string()),
        _ => {
            let raw_query = raw_query.unwrap_or_default();
            json_body(echo_document(q, &raw_query, &params, &headers).to_string())
        }
    }
}

fn json_body(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/x-javascript")],
        body,
    )
        .into_response()
}

/// An otherwise empty answer whose `meta` object reports what the server
/// received.
fn echo_document(
    q: &str,
    raw_query: &str,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
) -> serde_json::Value {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let flag = |name: &str| params.get(name).cloned().unwrap_or_default();
    json!({
        "Abstract": "",
        "AbstractSource": "",
        "AbstractText": "",
        "AbstractURL": "",
        "Answer": "",
        "AnswerType": "",
        "Definition": "",
        "DefinitionSource": "",
        "DefinitionURL": "",
        "Entity": "",
        "Heading": q,
        "Image": "",
        "ImageHeight": 0,
        "ImageIsLogo": 0,
        "ImageWidth": 0,
        "Infobox": "",
        "Redirect": "",
        "RelatedTopics": [],
        "Results": [],
        "Type": "",
        "meta": {
            "raw_query": raw_query,
            "user_agent": user_agent,
            "no_redirect": flag("no_redirect"),
            "no_html": flag("no_html"),
            "skip_disambig": flag("skip_disambig"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_responses_are_json() {
        for raw in [PYTHON_RESPONSE, INFOBOX_RESPONSE] {
            let value: serde_json::Value = serde_json::from_str(raw).unwrap();
            assert!(value.get("Heading").is_some());
        }
    }

    #[test]
    fn echo_document_reports_flags_and_user_agent() {
        let params: HashMap<String, String> =
            [("no_html".to_string(), "1".to_string())].into_iter().collect();
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, "tests/1.0".parse().unwrap());

        let doc = echo_document("hello", "q=hello&format=json&no_html=1", &params, &headers);
        assert_eq!(doc["Heading"], "hello");
        assert_eq!(doc["meta"]["user_agent"], "tests/1.0");
        assert_eq!(doc["meta"]["no_html"], "1");
        assert_eq!(doc["meta"]["no_redirect"], "");
        assert_eq!(doc["meta"]["raw_query"], "q=hello&format=json&no_html=1");
    }

    #[test]
    fn echo_document_has_every_response_key() {
        let doc = echo_document("x", "", &HashMap::new(), &HeaderMap::new());
        assert_eq!(doc.as_object().unwrap().len(), 21);
    }
}

//! End-to-end queries against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in a background tokio runtime,
//! then drives `query` over real HTTP with `UreqTransport`. The mock serves
//! recorded API documents, so decoding is checked against hand-built record
//! trees.

use std::net::SocketAddr;
use std::sync::OnceLock;

use duckduck_core::{
    query, secure_query, ApiError, Container, Icon, Map, QueryOptions, Record, RequestFlags,
    Response, SearchResult, Shape, UreqTransport, Value,
};

/// Start the mock server once for the whole test binary.
fn server_addr() -> SocketAddr {
    static ADDR: OnceLock<SocketAddr> = OnceLock::new();
    *ADDR.get_or_init(|| {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });
        addr
    })
}

fn options() -> QueryOptions {
    QueryOptions {
        host: server_addr().to_string(),
        ..Default::default()
    }
}

fn icon(url: &str) -> Value {
    Value::from(Record::Icon(Icon {
        url: url.into(),
        width: "".into(),
        height: "".into(),
    }))
}

fn result(first_url: &str, icon_url: &str, result: &str, text: &str) -> Value {
    Value::from(Record::Result(SearchResult {
        first_url: first_url.into(),
        icon: icon(icon_url),
        result: result.into(),
        text: text.into(),
    }))
}

fn expected_python_response() -> Value {
    Value::from(Record::Response(Box::new(Response {
        r#abstract: "".into(),
        abstract_source: "Wikipedia".into(),
        abstract_text: "".into(),
        abstract_url: "https://en.wikipedia.org/wiki/Python".into(),
        answer: "".into(),
        answer_type: "".into(),
        definition: "".into(),
        definition_source: "".into(),
        definition_url: "".into(),
        entity: "".into(),
        heading: "Python".into(),
        image: "".into(),
        image_height: 0_i64.into(),
        image_is_logo: 0_i64.into(),
        image_width: 0_i64.into(),
        infobox: "".into(),
        redirect: "".into(),
        related_topics: Value::Array(vec![
            result(
                "https://duckduckgo.com/Python_(programming",
                "https://duckduckgo.com/i/7eec482b.png",
                "<a href=\"https://duckduckgo.com/Python_(programmin",
                "Python (programming language)A widely used general",
            ),
            result(
                "https://duckduckgo.com/Monty_Python",
                "https://duckduckgo.com/i/4eec9e83.jpg",
                "<a href=\"https://duckduckgo.com/Monty_Python\">Mo",
                "Monty PythonA British surreal comedy group who",
            ),
            result(
                "https://duckduckgo.com/Colt_Python",
                "https://duckduckgo.com/i/7e29c05b.jpg",
                "<a href=\"https://duckduckgo.com/Colt_Python\">Co",
                "Colt PythonA.357 Magnum caliber revolver formerly",
            ),
        ]),
        results: Value::Array(Vec::new()),
        r#type: "D".into(),
        meta: None,
    })))
}

#[test]
fn python_query_builds_record_tree() {
    let value = query(&UreqTransport::new(), "python", &options()).unwrap();
    assert_eq!(value, expected_python_response());
}

#[test]
fn python_query_as_maps() {
    let options = QueryOptions {
        container: Container::Map,
        ..options()
    };
    let value = query(&UreqTransport::new(), "python", &options).unwrap();

    // Same content as the record tree, only without types.
    let expected = serde_json::to_value(expected_python_response()).unwrap();
    assert_eq!(serde_json::to_value(&value).unwrap(), expected);

    let map = value.as_object().unwrap();
    assert_eq!(map["heading"], Value::from("Python"));
    let topics = map["related_topics"].as_array().unwrap();
    assert!(topics.iter().all(|t| t.as_object().is_some()));
    let first_icon = topics[0].as_object().unwrap()["icon"].as_object().unwrap();
    assert_eq!(
        first_icon["url"],
        Value::from("https://duckduckgo.com/i/7eec482b.png")
    );
}

#[test]
fn infobox_query_types_nested_shapes() {
    let options = QueryOptions {
        strict: true,
        ..options()
    };
    let value = query(&UreqTransport::new(), "rust", &options).unwrap();
    let Some(Record::Response(response)) = value.as_record() else {
        panic!("expected a response record, got {value:?}");
    };

    let Some(Record::Infobox(infobox)) = response.infobox.as_record() else {
        panic!("expected an infobox record");
    };
    let content = infobox.content.as_array().unwrap();
    assert_eq!(content[0].shape(), Some(Shape::Content));
    // The second row has no sort_order; it stays a generic mapping.
    assert!(content[1].as_object().is_some());
    assert_eq!(infobox.meta.as_array().unwrap()[0].shape(), Some(Shape::Meta));

    let related = response.related_topics.as_array().unwrap();
    assert_eq!(related[0].shape(), Some(Shape::Result));
    let Some(Record::RelatedTopic(group)) = related[1].as_record() else {
        panic!("expected a related topic group");
    };
    assert_eq!(group.name, Value::from("See also"));
    assert_eq!(group.topics.as_array().unwrap()[0].shape(), Some(Shape::Result));

    // Provider metadata is a free-form mapping, normalized but untyped.
    let meta = response.meta.as_ref().unwrap().as_object().unwrap();
    assert_eq!(meta["src_name"], Value::from("Wikipedia"));
    assert!(meta["attribution"].is_null());
    let mut maintainer = Map::new();
    maintainer.insert("github".to_string(), "duckduckgo".into());
    assert_eq!(meta["maintainer"], Value::Object(maintainer));
}

#[test]
fn request_carries_user_agent_and_flags() {
    let options = QueryOptions {
        user_agent: "integration-tests/2.0".to_string(),
        flags: RequestFlags {
            no_html: true,
            skip_disambig: true,
            ..Default::default()
        },
        ..options()
    };
    let value = query(&UreqTransport::new(), "echo me", &options).unwrap();
    let Some(Record::Response(response)) = value.as_record() else {
        panic!("expected a response record, got {value:?}");
    };
    assert_eq!(response.heading, Value::from("echo me"));

    let meta = response.meta.as_ref().unwrap().as_object().unwrap();
    assert_eq!(meta["user_agent"], Value::from("integration-tests/2.0"));
    assert_eq!(meta["no_html"], Value::from("1"));
    assert_eq!(meta["skip_disambig"], Value::from("1"));
    assert_eq!(meta["no_redirect"], Value::from(""));
}

#[test]
fn query_string_goes_over_the_wire_as_built() {
    let options = QueryOptions {
        flags: RequestFlags::all(),
        ..options()
    };
    let value = query(&UreqTransport::new(), "a~b*c d", &options).unwrap();
    let Some(Record::Response(response)) = value.as_record() else {
        panic!("expected a response record, got {value:?}");
    };
    let meta = response.meta.as_ref().unwrap().as_object().unwrap();
    assert_eq!(
        meta["raw_query"],
        Value::from("q=a~b%2Ac+d&format=json&no_redirect=1&no_html=1&skip_disambig=1")
    );
}

#[test]
fn bare_list_is_returned_as_is() {
    let value = query(&UreqTransport::new(), "list", &options()).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![1_i64.into(), "x".into(), true.into()])
    );
}

#[test]
fn malformed_body_is_deserialization_error() {
    let err = query(&UreqTransport::new(), "garbage", &options()).unwrap_err();
    assert!(matches!(err, ApiError::Deserialization(_)), "{err:?}");
}

#[test]
fn unreachable_host_is_connection_error() {
    let options = QueryOptions {
        host: "127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let err = query(&UreqTransport::new(), "python", &options).unwrap_err();
    assert!(matches!(err, ApiError::Connection(_)), "{err:?}");
}

#[test]
fn secure_query_against_plain_server_fails_to_connect() {
    // The mock only speaks plain HTTP, so a TLS handshake cannot succeed.
    let err = secure_query(&UreqTransport::new(), "python", &options()).unwrap_err();
    assert!(matches!(err, ApiError::Connection(_)), "{err:?}");
}

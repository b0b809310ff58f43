use accept_events::protocol::constants::headers::ACCEPT_EVENTS;
use accept_events::protocol::format_announcement;
use accept_events::{
    AcceptEvents, AcceptEventsLayer, Negotiator, ParamValue, Preference, Preferences,
    ProtocolList, ServerConfig, SkipReason,
};
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Method, Request};
use axum::routing::get;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

fn header(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_EVENTS, HeaderValue::from_static(value));
    headers
}

#[test]
fn test_single_entry_properties() {
    for (raw, q) in [("a;q=0.5", 0.5), ("a;q=0", 0.0), ("a;q=1", 1.0), ("a;q=0.001", 0.001)] {
        let prefs = Negotiator::new().rank(raw, "/").unwrap();
        assert_eq!(prefs.len(), 1, "for {}", raw);
        assert_eq!(prefs.best().protocol, "a");
        assert_eq!(prefs.best().quality(), q);
        assert_eq!(prefs.best().specificity(), 0);
    }
}

#[test]
fn test_specificity_tie_break() {
    let n = Negotiator::new().negotiate(
        &Method::GET,
        "/events",
        &header("a;q=1, b;q=0.5, c;q=1;foo=bar"),
    );
    let prefs = n.preferences.unwrap();
    assert_eq!(prefs.protocols().collect::<Vec<_>>(), ["c", "a", "b"]);
    assert_eq!(
        prefs.best().param("foo"),
        Some(&ParamValue::Token("bar".into()))
    );
}

#[test]
fn test_string_and_token_protocols_mix() {
    let prefs = Negotiator::new()
        .rank("\"web push\";q=0.8, sse;version=2, poll;q=0.8", "/")
        .unwrap();
    assert_eq!(
        prefs.protocols().collect::<Vec<_>>(),
        ["sse", "web push", "poll"]
    );
    assert_eq!(prefs.to_string(), "sse;version=2, \"web push\";q=0.8, poll;q=0.8");
}

#[test]
fn test_ranking_is_idempotent() {
    let prefs = Negotiator::new()
        .rank("d;q=0.2, c;x=1, b, a;q=0.2;y=2", "/")
        .unwrap();
    let reranked = Preferences::new(prefs.clone().into_vec()).unwrap();
    assert_eq!(prefs, reranked);
    assert_eq!(prefs.protocols().collect::<Vec<_>>(), ["c", "b", "a", "d"]);
}

#[test]
fn test_rerank_of_rendered_list_is_stable() {
    let prefs = Negotiator::new().rank("x;q=0.3, y;k=v, z", "/").unwrap();
    let again = Negotiator::new().rank(&prefs.to_string(), "/").unwrap();
    assert_eq!(prefs, again);
}

#[test]
fn test_binary_and_date_params_keep_their_entry() {
    let prefs = Negotiator::new()
        .rank("sse;sig=:aGk=:, poll;q=0.1;since=@1700000000", "/")
        .unwrap();
    assert_eq!(prefs.protocols().collect::<Vec<_>>(), ["sse", "poll"]);
    assert_eq!(prefs.best().specificity(), 1);
    assert_eq!(
        prefs.best().param("sig"),
        Some(&ParamValue::ByteSequence(b"hi".to_vec()))
    );
    assert_eq!(prefs.to_string(), "sse;sig=:aGk=:, poll;q=0.1;since=@1700000000");
}

#[test]
fn test_fail_open_reasons() {
    let negotiator = Negotiator::new().protocols(ProtocolList::new(["sse"]));
    let cases = [
        ("a b c", SkipReason::ParseFailed),
        ("", SkipReason::NoPreferences),
        ("42, (sse)", SkipReason::NoPreferences),
        ("poll, websocket", SkipReason::NoSupportedProtocols),
    ];
    for (raw, reason) in cases {
        let n = negotiator.negotiate(&Method::GET, "/", &header(raw));
        assert!(n.preferences.is_none(), "for {:?}", raw);
        assert_eq!(n.skipped, Some(reason), "for {:?}", raw);
        assert!(n.announce);
    }
}

#[test]
fn test_builder_preference_round_trip_through_display() {
    let pref = Preference::new("sse")
        .with_quality(0.25)
        .with_param("retry", ParamValue::Integer(3000));
    assert_eq!(pref.to_string(), "sse;q=0.25;retry=3000");
}

#[test]
fn test_format_announcement() {
    assert_eq!(format_announcement(["sse", "long-poll"]), "sse, long-poll");
}

#[tokio::test]
async fn test_continuation_runs_exactly_once_for_every_outcome() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let app = Router::new()
        .route(
            "/{*path}",
            get(move |AcceptEvents(_): AcceptEvents| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    "ok"
                }
            })
            .post(|| async { "posted" }),
        )
        .layer(
            AcceptEventsLayer::with_config(ServerConfig::default())
                .urls(|path: &str| path != "/health")
                .protocols(ProtocolList::new(["a", "b", "c"]))
                .middleware(),
        );

    let cases: [(&str, Option<&str>); 7] = [
        ("/events", Some("a;q=0.5")),
        ("/events", Some("a;q=1, b;q=0.5, c;q=1;foo=bar")),
        ("/events", Some("a b c")),
        ("/events", Some("zzz")),
        ("/events", Some("a;q=7")),
        ("/events", None),
        ("/health", Some("a")),
    ];

    for (i, (path, value)) in cases.iter().enumerate() {
        let mut builder = Request::builder().uri(*path);
        if let Some(value) = value {
            builder = builder.header(ACCEPT_EVENTS, *value);
        }
        let res = app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.status().is_success());
        assert_eq!(calls.load(Ordering::SeqCst), i + 1, "case {:?}", (path, value));
    }
}

#[tokio::test]
async fn test_route_gate_hides_capability() {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/events", get(|| async { "ok" }))
        .layer(
            AcceptEventsLayer::new()
                .urls(|path: &str| path == "/events")
                .middleware(),
        );

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(ACCEPT_EVENTS, "sse")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(!res.headers().contains_key(ACCEPT_EVENTS));

    let res = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.headers().get(ACCEPT_EVENTS).unwrap(), "");
}

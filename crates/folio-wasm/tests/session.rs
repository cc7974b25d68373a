use expect_test::expect;
use folio_wasm::{PortfolioSession, SessionSetup, WasmPortfolioSession};
use serde_json::{json, Value};

fn setup_json() -> String {
    json!({
        "elements": [
            { "node": { "kind": "id", "value": "nav" } },
            { "node": { "kind": "id", "value": "year" } },
            { "node": { "kind": "id", "value": "about" } },
            { "node": { "kind": "nav_link", "value": "about" } },
            { "node": { "kind": "query", "value": ".form" } },
            {
                "node": { "kind": "query", "value": ".form button[type=\"submit\"]" },
                "html": "Send Message"
            }
        ]
    })
    .to_string()
}

fn dispatch(session: &mut WasmPortfolioSession, event: Value) -> Value {
    let result = session
        .dispatch_json(&event.to_string())
        .expect("dispatch succeeds");
    serde_json::from_str(&result).expect("dispatch result is json")
}

#[test]
fn ready_then_certificate_click_over_json() {
    let mut session = WasmPortfolioSession::new(&setup_json()).expect("session");

    let ready = dispatch(
        &mut session,
        json!({ "type": "ready", "nav_hrefs": ["#about", "#missing"], "year": 2026 }),
    );
    assert_eq!(ready["outcome"]["prevent_default"], json!(false));
    let ops: Vec<&str> = ready["mutations"]
        .as_array()
        .expect("mutations")
        .iter()
        .filter_map(|mutation| mutation["op"].as_str())
        .collect();
    assert_eq!(ops, vec!["text", "observe_sections", "append_to_body"]);
    assert_eq!(ready["mutations"][1]["sections"], json!(["about"]));

    let click = dispatch(
        &mut session,
        json!({
            "type": "click",
            "path": [
                { "tag": "button", "classes": ["view-cert"], "attributes": [["data-cert", "css-certificate"]] },
                { "tag": "body" }
            ]
        }),
    );
    let last = click["mutations"]
        .as_array()
        .and_then(|mutations| mutations.last())
        .expect("image request");
    assert_eq!(
        last,
        &json!({ "op": "request_image", "path": "certificates/css-certificate.jpg", "token": 1 })
    );

    let snapshot: Value =
        serde_json::from_str(&session.snapshot_json().expect("snapshot")).expect("json");
    assert_eq!(
        snapshot["modal"],
        json!({ "state": "loading", "id": "css-certificate", "token": 1 })
    );

    dispatch(
        &mut session,
        json!({ "type": "certificate_image", "token": 1, "outcome": "failed" }),
    );
    let snapshot: Value =
        serde_json::from_str(&session.snapshot_json().expect("snapshot")).expect("json");
    assert_eq!(
        snapshot["modal"],
        json!({
            "state": "error",
            "id": "css-certificate",
            "cause": { "kind": "image_failed", "path": "certificates/css-certificate.jpg" }
        })
    );
}

#[test]
fn invalid_inputs_are_reported_as_strings() {
    let error = WasmPortfolioSession::new("{").err().expect("invalid setup");
    assert!(error.starts_with("invalid session setup json"), "{error}");

    let mut session = WasmPortfolioSession::new("{}").expect("empty setup");
    let error = session
        .dispatch_json(r#"{"type":"teleport"}"#)
        .expect_err("unknown event");
    assert!(error.starts_with("invalid page event json"), "{error}");

    let error = WasmPortfolioSession::new(
        &json!({ "config_toml": "[scroll_spy]\ntop_margin_percent = 90.0" }).to_string(),
    )
    .err()
    .expect("invalid band");
    assert!(error.starts_with("scroll-spy margins 90% + 70%"), "{error}");
}

#[test]
fn custom_catalog_replaces_builtin() {
    let setup = SessionSetup {
        catalog_toml: Some(
            r#"
            [[certificate]]
            id = "rust"
            title = "Rust in Action"
            image_path = "certs/rust.png"
            download_name = "Rust-Certificate"
            "#
            .to_string(),
        ),
        ..SessionSetup::default()
    };
    let session = PortfolioSession::new(setup).expect("session");
    let certificates = session.certificates();
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0].download_file_name(), "Rust-Certificate.png");
}

#[test]
fn contact_flow_trace_through_session() {
    let setup: SessionSetup = serde_json::from_str(&setup_json()).expect("setup");
    let mut session = PortfolioSession::new(setup).expect("session");
    let submitted = session.dispatch(folio_ui::PageEvent::Submit);
    assert!(submitted.outcome.prevent_default);
    assert!(session.snapshot().contact_sending);

    let finished = session.dispatch(folio_ui::PageEvent::TimerFired {
        token: folio_ui::RequestToken(1),
    });
    let trace: String = finished
        .mutations
        .iter()
        .map(|mutation| format!("{mutation}\n"))
        .collect();
    expect![[r#"
        alert "Thank you for your message! I'll get back to you soon."
        reset .form
        inner-html .form button[type="submit"] Send Message
        disabled .form button[type="submit"] false
    "#]]
    .assert_eq(&trace);
    assert!(!session.snapshot().contact_sending);
}

#[test]
fn snapshot_names_the_visible_certificate() {
    let mut session = WasmPortfolioSession::new(&setup_json()).expect("session");
    dispatch(&mut session, json!({ "type": "ready", "year": 2026 }));
    dispatch(
        &mut session,
        json!({
            "type": "click",
            "path": [
                { "tag": "button", "classes": ["view-cert"], "attributes": [["data-cert", "css-certificate"]] }
            ]
        }),
    );
    insta::assert_snapshot!(
        session.snapshot_json().expect("snapshot"),
        @r#"{"modal":{"state":"loading","id":"css-certificate","token":1},"certificate_id":"css-certificate","active_section":null,"drawer_open":false,"contact_sending":false}"#
    );

    dispatch(&mut session, json!({ "type": "key_down", "key": "Escape" }));
    insta::assert_snapshot!(
        session.snapshot_json().expect("snapshot"),
        @r#"{"modal":{"state":"closed"},"certificate_id":null,"active_section":null,"drawer_open":false,"contact_sending":false}"#
    );
}

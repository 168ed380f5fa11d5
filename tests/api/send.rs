use serde_json::json;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{valid_submission, TestApp};

/// Mount a mock email API answering with the given status
async fn mock_email_api(app: &TestApp, status: u16, expected_calls: u64) {
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(&app.email_server)
        .await;
}

#[tokio::test]
async fn send_returns_a_200_for_a_valid_submission() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 1).await;

    let response = app.post_send(&valid_submission()).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": true, "message": "Email sent successfully!"})
    );
}

#[tokio::test]
async fn send_relays_the_submission_to_the_operator_inbox() {
    let app = TestApp::spawn().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(bearer_token("my-secret-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_send(&json!({
        "name": "Alice",
        "email": "alice@example.com",
        "message": "Hello from the portfolio"
    }))
    .await
    .error_for_status()
    .unwrap();

    let emails = app.relayed_emails().await;
    assert_eq!(emails.len(), 1);
    let email = &emails[0];
    assert_eq!(email["from"], app.settings.email.sender_email.as_str());
    assert_eq!(email["to"], app.settings.email.recipient_email.as_str());
    assert_eq!(email["reply_to"], "alice@example.com");
    assert_eq!(email["subject"], "New message from Alice");
    for body in [&email["html"], &email["text"]] {
        let body = body.as_str().unwrap();
        assert!(body.contains("Alice"));
        assert!(body.contains("alice@example.com"));
        assert!(body.contains("Hello from the portfolio"));
    }
}

#[tokio::test]
async fn send_returns_a_400_when_data_is_missing() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 0).await;
    let test_cases = vec![
        (
            json!({"email": "alice@example.com", "message": "Hello"}),
            "missing the name",
        ),
        (json!({"name": "Alice", "message": "Hello"}), "missing the email"),
        (
            json!({"name": "Alice", "email": "alice@example.com"}),
            "missing the message",
        ),
        (
            json!({"name": null, "email": "alice@example.com", "message": "Hello"}),
            "a null name",
        ),
        (json!({}), "missing every field"),
    ];

    for (body, description) in test_cases {
        let response = app.post_send(&body).await;

        assert_eq!(
            400,
            response.status(),
            "The API did not fail with 400 Bad Request when the payload was {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "All fields are required."})
        );
    }
}

#[tokio::test]
async fn send_returns_a_400_when_fields_are_present_but_empty() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 0).await;
    let test_cases = vec![
        (
            json!({"name": "", "email": "a@b.com", "message": "hi"}),
            "empty name",
        ),
        (
            json!({"name": "Alice", "email": "", "message": "hi"}),
            "empty email",
        ),
        (
            json!({"name": "Alice", "email": "a@b.com", "message": "   \n"}),
            "blank message",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_send(&body).await;

        assert_eq!(
            400,
            response.status(),
            "The API did not return a 400 Bad Request when the payload had an {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "All fields are required."})
        );
    }
}

#[tokio::test]
async fn send_returns_a_400_when_fields_are_invalid() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 0).await;
    let long_name = "a".repeat(257);
    let test_cases = vec![
        (
            json!({"name": "Alice", "email": "definitely-not-an-email", "message": "hi"}),
            "an invalid email",
        ),
        (
            json!({"name": long_name, "email": "a@b.com", "message": "hi"}),
            "a name that is too long",
        ),
        (
            json!({"name": "Alice\r\nBcc: evil@attacker.com", "email": "a@b.com", "message": "hi"}),
            "a name with an injected header line",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_send(&body).await;

        assert_eq!(
            400,
            response.status(),
            "The API did not return a 400 Bad Request for {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn send_returns_a_400_for_bodies_that_are_not_a_submission() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 0).await;
    let test_cases = vec![
        ("{\"name\": \"Alice\"", "application/json", "truncated JSON"),
        (
            "{\"name\": 42, \"email\": \"a@b.com\", \"message\": \"hi\"}",
            "application/json",
            "a number as name",
        ),
        ("[1, 2, 3]", "application/json", "an array"),
        (
            "name=Alice&email=a%40b.com&message=hi",
            "application/x-www-form-urlencoded",
            "a form body",
        ),
    ];

    for (body, content_type, description) in test_cases {
        let response = app.post_send_raw(body, content_type).await;

        assert_eq!(
            400,
            response.status(),
            "The API did not return a 400 Bad Request for {description}"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "All fields are required."})
        );
    }
}

#[tokio::test]
async fn send_returns_a_500_when_the_email_api_fails() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 500, 1).await;

    let response = app.post_send(&valid_submission()).await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": false, "message": "Failed to send email."})
    );
}

#[tokio::test]
async fn send_does_not_leak_the_provider_error() {
    let app = TestApp::spawn().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid api key sk_live_123"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_send(&valid_submission()).await;

    assert_eq!(response.status(), 500);
    let body = response.text().await.unwrap();
    assert!(!body.contains("sk_live_123"));
    assert!(!body.contains("422"));
}

#[tokio::test]
async fn send_escapes_markup_in_the_relayed_html() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 1).await;

    app.post_send(&json!({
        "name": "<script>alert(1)</script>",
        "email": "alice@example.com",
        "message": "<b>bold</b> & \"quoted\""
    }))
    .await
    .error_for_status()
    .unwrap();

    let emails = app.relayed_emails().await;
    let html = emails[0]["html"].as_str().unwrap();
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
}

#[tokio::test]
async fn send_turns_newlines_into_line_breaks_in_the_relayed_html() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 1).await;

    app.post_send(&json!({
        "name": "Alice",
        "email": "alice@example.com",
        "message": "line1\nline2"
    }))
    .await
    .error_for_status()
    .unwrap();

    let emails = app.relayed_emails().await;
    let html = emails[0]["html"].as_str().unwrap();
    let text = emails[0]["text"].as_str().unwrap();
    assert!(html.contains("line1<br />line2"));
    assert!(!html.contains("line1\nline2"));
    assert!(text.contains("line1\nline2"));
}

#[tokio::test]
async fn concurrent_submissions_are_relayed_independently() {
    let app = TestApp::spawn().await;
    mock_email_api(&app, 200, 3).await;

    let submission = |i: u8| {
        json!({
            "name": format!("Sender {i}"),
            "email": format!("sender{i}@example.com"),
            "message": "Hello"
        })
    };
    let (first, second, third) = (submission(0), submission(1), submission(2));
    let responses = tokio::join!(
        app.post_send(&first),
        app.post_send(&second),
        app.post_send(&third)
    );

    for response in [responses.0, responses.1, responses.2] {
        assert_eq!(response.status(), 200);
    }
    let mut subjects: Vec<String> = app
        .relayed_emails()
        .await
        .iter()
        .map(|email| email["subject"].as_str().unwrap().to_owned())
        .collect();
    subjects.sort();
    assert_eq!(
        subjects,
        vec![
            "New message from Sender 0",
            "New message from Sender 1",
            "New message from Sender 2"
        ]
    );
}

use super::*;
use crate::ai::testing::StubTransport;
use crate::ai::{Role, TransportError};

#[tokio::test]
async fn query_wraps_prompt_as_user_message() {
    let gateway = AiGateway::new(StubTransport::replying("hello"));

    let response = gateway.query("  hi there \n").await;

    assert_eq!(response, AiResponse::ok("hello"));
    let sent = gateway.transport().last_messages();
    assert_eq!(sent, vec![AiMessage::user("hi there")]);
}

#[tokio::test]
async fn oversize_input_never_reaches_transport() {
    let gateway = AiGateway::new(StubTransport::replying("unused")).with_max_input_chars(10);

    let response = gateway.query(&"x".repeat(11)).await;

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Input exceeds maximum length of 10 characters")
    );
    assert_eq!(gateway.transport().calls(), 0);
}

#[tokio::test]
async fn template_ops_budget_the_caller_input() {
    let gateway = AiGateway::new(StubTransport::replying("ok")).with_max_input_chars(10);

    assert!(gateway.explain(&"x".repeat(10), Some("rust")).await.success);
    assert!(gateway.transport().last_messages()[1].content.chars().count() > 10);

    let response = gateway.scan(&"x".repeat(11), ScanKind::Bugs).await;
    assert!(!response.success);
    assert_eq!(gateway.transport().calls(), 1);
}

#[tokio::test]
async fn limit_counts_chars_not_bytes() {
    let gateway = AiGateway::new(StubTransport::replying("ok")).with_max_input_chars(4);
    assert!(gateway.query("日本語だ").await.success);
    assert_eq!(gateway.transport().calls(), 1);
}

#[tokio::test]
async fn upstream_error_is_returned_verbatim() {
    let gateway = AiGateway::new(StubTransport::failing("rate limited"));

    let response = gateway.chat(vec![AiMessage::user("x")]).await;

    assert_eq!(response, AiResponse::failure("rate limited"));
    assert_eq!(gateway.transport().calls(), 1);
}

#[tokio::test]
async fn try_chat_distinguishes_validation_from_upstream() {
    let gateway = AiGateway::new(StubTransport::failing("down"));

    let err = gateway.try_chat(Vec::new()).await.unwrap_err();
    assert!(matches!(err, AiError::NoMessages));
    assert!(err.is_validation());

    let err = gateway.try_chat(vec![AiMessage::user("x")]).await.unwrap_err();
    assert!(matches!(err, AiError::Transport(TransportError::Upstream(_))));
    assert!(!err.is_validation());
}

#[tokio::test]
async fn chat_keeps_roles_and_order() {
    let gateway = AiGateway::new(StubTransport::replying("ok"));
    let history = vec![
        AiMessage::system("be brief"),
        AiMessage::user("q1"),
        AiMessage::assistant("a1"),
        AiMessage::user("q2"),
    ];

    gateway.chat(history.clone()).await;

    assert_eq!(gateway.transport().last_messages(), history);
}

#[tokio::test]
async fn convenience_ops_send_system_prompt() {
    let gateway = AiGateway::new(StubTransport::replying("done"));

    let response = gateway.tests("fn add() {}", Some("jest")).await;
    assert!(response.success);

    let sent = gateway.transport().last_messages();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].role, Role::System);
    assert!(sent[1].content.contains("using jest"));
    assert!(sent[1].content.contains("fn add() {}"));
}

#[tokio::test]
async fn scan_uses_requested_kind() {
    let gateway = AiGateway::new(StubTransport::replying("report"));
    gateway.scan("src/main.rs", ScanKind::Security).await;
    assert!(gateway.transport().last_messages()[1]
        .content
        .starts_with("Scan for security vulnerabilities"));
}

#[tokio::test]
async fn overlapping_requests_complete_independently() {
    let gateway = AiGateway::new(StubTransport::replying("same"));
    let (a, b) = tokio::join!(gateway.query("one"), gateway.explain("two", None));
    assert!(a.success && b.success);
    assert_eq!(gateway.transport().calls(), 2);
}

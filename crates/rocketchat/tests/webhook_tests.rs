#![allow(clippy::unwrap_used, clippy::expect_used)]
use {
    mockito::Matcher,
    rocketchat_notify::{
        Attachment, Error, Message, RocketChatRoute, WebhookChannel, WebhookClient, WebhookConfig,
    },
    serde_json::json,
};

struct Route(Option<&'static str>);

impl RocketChatRoute for Route {
    fn rocket_chat_route(&self) -> Option<String> {
        self.0.map(str::to_owned)
    }
}

fn channel(base_url: &str, token: &str, default_channel: Option<&str>) -> WebhookChannel {
    let config = WebhookConfig::new(base_url, token, default_channel.map(str::to_owned));
    WebhookChannel::new(WebhookClient::new(config))
}

#[tokio::test]
async fn posts_the_message_to_the_hook_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hooks/:token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"text": "hello", "channel": ":channel"})))
        .with_status(200)
        .create_async()
        .await;

    let channel = channel(&server.url(), ":token", Some(":channel"));
    let message = Message::new("hello").from(":token").to(":channel");
    channel.send(&Route(None), &message).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn resolved_destination_overwrites_the_payload_channel() {
    // No channel on the message; the recipient route decides.
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hooks/tok")
        .match_body(Matcher::Json(json!({"text": "hello", "channel": "#routed"})))
        .with_status(200)
        .create_async()
        .await;

    let channel = channel(&server.url(), "tok", Some("#default"));
    channel
        .send(&Route(Some("#routed")), &Message::new("hello"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn falls_back_to_the_configured_default_channel() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hooks/tok")
        .match_body(Matcher::Json(json!({"text": "hello", "channel": "#default"})))
        .with_status(200)
        .create_async()
        .await;

    let channel = channel(&server.url(), "tok", Some("#default"));
    channel.send(&Route(None), &Message::new("hello")).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn message_channel_override_wins_over_route_and_default() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hooks/tok")
        .match_body(Matcher::Json(json!({"text": "hello", "channel": "#override"})))
        .with_status(200)
        .create_async()
        .await;

    let channel = channel(&server.url(), "tok", Some("#default"));
    let message = Message::new("hello").to("#override");
    channel.send(&Route(Some("#routed")), &message).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn serializes_attachments_into_the_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hooks/tok")
        .match_body(Matcher::Json(json!({
            "text": "deployed",
            "channel": "#ops",
            "attachments": [
                {"color": "#36a64f", "title": "v1.2.3"},
                {"title": "changelog", "collapsed": false},
            ],
        })))
        .with_status(200)
        .create_async()
        .await;

    let channel = channel(&server.url(), "tok", None);
    let message = Message::new("deployed")
        .to("#ops")
        .attachment(Attachment::new().color("#36a64f").title("v1.2.3"))
        .unwrap()
        .attachment(Attachment::new().title("changelog").collapsed(false))
        .unwrap();
    channel.send(&Route(None), &message).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn missing_channel_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let channel = channel(&server.url(), ":token", None);
    let err = channel
        .send(&Route(None), &Message::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingChannel));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let channel = channel(&server.url(), "", None);
    let message = Message::new("hello").to(":channel");
    let err = channel.send(&Route(None), &message).await.unwrap_err();

    assert!(matches!(err, Error::MissingToken));
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_maps_to_rejected_with_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/hooks/tok")
        .with_status(422)
        .with_body(r#"{"error":"invalid"}"#)
        .create_async()
        .await;

    let channel = channel(&server.url(), "tok", Some("#ops"));
    let err = channel
        .send(&Route(None), &Message::new("hello"))
        .await
        .unwrap_err();

    match err {
        Error::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, r#"{"error":"invalid"}"#);
        },
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_maps_to_transport() {
    // Port 9 (discard) is closed; the connection is refused immediately.
    let channel = channel("http://127.0.0.1:9", "tok", Some("#ops"));
    let err = channel
        .send(&Route(None), &Message::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
}

#[tokio::test]
async fn rejection_error_renders_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/hooks/tok")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let channel = channel(&server.url(), "tok", Some("#ops"));
    let err = channel
        .send(&Route(None), &Message::new("hello"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "rocket.chat responded with an error `500 - boom`"
    );
}

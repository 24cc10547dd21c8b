//! Mock Telegram API Server for testing
//!
//! Uses wiremock to answer `sendMessage` the way the Bot API does.

use serde_json::{json, Value};
use teloxide::{types::CallbackQuery, Bot};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Bot pointed at the mock server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(TEST_TOKEN).set_api_url(url)
    }

    /// Answer every sendMessage with a successful private chat message
    pub async fn mock_send_message_ok(&self) {
        Mock::given(method("POST"))
            .and(path_regex(api_path("sendMessage")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message(111)))
            .mount(&self.server)
            .await;
    }

    /// Answer sendMessage for `chat_id` with a Bot API error
    pub async fn mock_send_message_error_for(&self, chat_id: i64) {
        Mock::given(method("POST"))
            .and(path_regex(api_path("sendMessage")))
            .and(move |req: &Request| request_chat_id(req) == Some(chat_id))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Acknowledge every answerCallbackQuery
    pub async fn mock_answer_callback_query(&self) {
        Mock::given(method("POST"))
            .and(path_regex(api_path("answerCallbackQuery")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
            .mount(&self.server)
            .await;
    }

    /// Answer every editMessageText with the edited message
    pub async fn mock_edit_message_text(&self) {
        let mut edited = sent_message(111);
        edited["result"]["edit_date"] = json!(1640995260);

        Mock::given(method("POST"))
            .and(path_regex(api_path("editMessageText")))
            .respond_with(ResponseTemplate::new(200).set_body_json(edited))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all sendMessage requests received so far
    pub async fn sent_messages(&self) -> Vec<Value> {
        self.requests_to("sendMessage").await
    }

    /// Bodies of all editMessageText requests received so far
    pub async fn edited_messages(&self) -> Vec<Value> {
        self.requests_to("editMessageText").await
    }

    /// Bodies of all requests to the given Bot API method
    pub async fn requests_to(&self, api_method: &str) -> Vec<Value> {
        let suffix = format!("/{}", api_method).to_ascii_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().to_ascii_lowercase().ends_with(&suffix))
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

/// Callback query as Telegram delivers it when an admin presses an inline
/// button under a bot message in their private chat
pub fn callback_query(admin_id: i64, data: &str) -> CallbackQuery {
    serde_json::from_value(json!({
        "id": "4382bfdwdsb323b2d9",
        "from": {
            "id": admin_id,
            "is_bot": false,
            "first_name": "Admin"
        },
        "message": sent_message(admin_id)["result"].clone(),
        "chat_instance": "-8165112738383312734",
        "data": data
    }))
    .expect("valid callback query")
}

/// Bot API method names are case-insensitive and teloxide sends them in
/// PascalCase (`SendMessage`), so match the method path case-insensitively
fn api_path(api_method: &str) -> String {
    format!("(?i)^/bot{}/{}$", regex_escape(TEST_TOKEN), api_method)
}

fn regex_escape(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            let escape = !c.is_ascii_alphanumeric() && c != '_' && c != ':';
            escape.then_some('\\').into_iter().chain(std::iter::once(c))
        })
        .collect()
}

fn request_chat_id(req: &Request) -> Option<i64> {
    let body: Value = serde_json::from_slice(&req.body).ok()?;
    body.get("chat_id")?.as_i64()
}

fn sent_message(chat_id: i64) -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 123,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "TestBot",
                "username": "test_bot"
            },
            "chat": {
                "id": chat_id,
                "first_name": "Admin",
                "type": "private"
            },
            "date": 1640995200,
            "text": "Test message"
        }
    })
}

//! End-to-end tests for event handling with a stub process API.

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use senta_client::{ActionResult, ProcessAction, ProcessApi, RemoteError, RemoteProcess};
use senta_core::Settings;
use senta_telegram::{BotHandler, Dispatch, InboundEvent, Reply, MAX_MESSAGE_LEN};
use teloxide::types::{ChatId, InlineKeyboardButtonKind};

type ListFn = dyn Fn() -> senta_client::Result<Vec<RemoteProcess>> + Send + Sync;
type ActionFn = dyn Fn(ProcessAction, u64) -> senta_client::Result<ActionResult> + Send + Sync;

/// Process API double that records every call.
struct StubApi {
    list: Box<ListFn>,
    action: Box<ActionFn>,
    calls: Mutex<Vec<String>>,
}

impl StubApi {
    fn new() -> Self {
        Self {
            list: Box::new(|| Ok(Vec::new())),
            action: Box::new(|action, _| {
                Ok(ActionResult {
                    message: format!("{} ok", action),
                })
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_list<F>(mut self, f: F) -> Self
    where
        F: Fn() -> senta_client::Result<Vec<RemoteProcess>> + Send + Sync + 'static,
    {
        self.list = Box::new(f);
        self
    }

    fn with_action<F>(mut self, f: F) -> Self
    where
        F: Fn(ProcessAction, u64) -> senta_client::Result<ActionResult> + Send + Sync + 'static,
    {
        self.action = Box::new(f);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessApi for StubApi {
    async fn list_processes(&self) -> senta_client::Result<Vec<RemoteProcess>> {
        self.calls.lock().unwrap().push("list".to_string());
        (self.list)()
    }

    async fn perform_action(
        &self,
        action: ProcessAction,
        id: u64,
    ) -> senta_client::Result<ActionResult> {
        self.calls.lock().unwrap().push(format!("{}/{}", action, id));
        (self.action)(action, id)
    }
}

fn settings(accepted_users: &[&str]) -> Arc<Settings> {
    Arc::new(Settings {
        tlg_token: "123:abc".into(),
        server: "http://astra.test".into(),
        api_token: "key".into(),
        accepted_users: accepted_users.iter().map(|u| u.to_string()).collect(),
    })
}

fn handler(settings: Arc<Settings>, api: Arc<StubApi>) -> BotHandler {
    BotHandler::new(settings, api)
}

fn text(user: Option<&str>, text: &str) -> InboundEvent {
    InboundEvent::Text {
        chat_id: ChatId(100),
        username: user.map(str::to_string),
        text: text.to_string(),
    }
}

fn callback(user: Option<&str>, data: &str) -> InboundEvent {
    InboundEvent::Callback {
        chat_id: ChatId(100),
        username: user.map(str::to_string),
        data: data.to_string(),
    }
}

fn replies(dispatch: Dispatch) -> Vec<Reply> {
    match dispatch {
        Dispatch::Replies(replies) => replies,
        other => panic!("expected replies, got {:?}", other),
    }
}

fn button_payloads(reply: &Reply) -> Vec<String> {
    reply
        .keyboard
        .as_ref()
        .map(|kb| {
            kb.inline_keyboard
                .iter()
                .flatten()
                .filter_map(|b| match &b.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_start_shows_list_button() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&text(Some("alice"), "/start")).await);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text, "Choose an action:");
    assert_eq!(button_payloads(&out[0]), vec!["list_processes"]);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_process_command_shows_three_buttons() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&text(Some("alice"), "/process_42")).await);
    assert_eq!(out.len(), 1);
    assert_eq!(
        button_payloads(&out[0]),
        vec!["process_start_42", "process_stop_42", "process_restart_42"]
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_process_command_invalid() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&text(None, "/process")).await);
    assert_eq!(out, vec![Reply::text("Invalid command format. Usage: /process_<id>")]);
}

#[tokio::test]
async fn test_unknown_text_is_ignored() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&[]), Arc::clone(&api));

    assert_eq!(handler.handle(&text(Some("alice"), "hello")).await, Dispatch::Ignored);
    assert_eq!(handler.handle(&callback(Some("alice"), "noop")).await, Dispatch::Ignored);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_list_processes_formats_and_resends_menu() {
    let api = Arc::new(StubApi::new().with_list(|| {
        Ok(vec![
            RemoteProcess { id: 1, name: "web".into(), is_active: true },
            RemoteProcess { id: 2, name: "db".into(), is_active: false },
        ])
    }));
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "list_processes")).await);
    assert_eq!(out.len(), 2);

    let lines: Vec<&str> = out[0].text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("web") && lines[0].contains("/process_1"));
    assert!(lines[1].contains("db") && lines[1].contains("/process_2"));
    assert!(lines[0].contains("🟢") && lines[1].contains("🔴"));
    assert!(out[0].keyboard.is_none());

    assert_eq!(button_payloads(&out[1]), vec!["list_processes"]);
    assert_eq!(api.calls(), vec!["list"]);
}

#[tokio::test]
async fn test_large_listing_is_split_before_menu() {
    let api = Arc::new(StubApi::new().with_list(|| {
        Ok((0..600)
            .map(|id| RemoteProcess {
                id,
                name: format!("service-{}", id),
                is_active: true,
            })
            .collect())
    }));
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "list_processes")).await);
    assert!(out.len() > 2);

    let (menu, listing) = out.split_last().unwrap();
    assert_eq!(button_payloads(menu), vec!["list_processes"]);
    for reply in listing {
        assert!(reply.keyboard.is_none());
        assert!(reply.text.encode_utf16().count() <= MAX_MESSAGE_LEN);
    }

    let text: String = listing.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(text.lines().count(), 600);
    assert!(text.lines().last().unwrap().ends_with("/process_599"));
    assert_eq!(api.calls(), vec!["list"]);
}

#[tokio::test]
async fn test_list_processes_failure() {
    let api = Arc::new(StubApi::new().with_list(|| {
        Err(RemoteError::Status {
            status: 503,
            body: String::new(),
        })
    }));
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "list_processes")).await);
    assert_eq!(
        out,
        vec![Reply::text(
            "Failed to fetch processes: request failed with status 503"
        )]
    );
}

#[tokio::test]
async fn test_restart_success_message_verbatim() {
    let api = Arc::new(StubApi::new().with_action(|_, _| {
        Ok(ActionResult {
            message: "restarted".into(),
        })
    }));
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "process_restart_9")).await);
    assert_eq!(out, vec![Reply::text("restarted")]);
    assert_eq!(api.calls(), vec!["restart/9"]);
}

#[tokio::test]
async fn test_stop_unknown_process() {
    let api = Arc::new(StubApi::new().with_action(|_, _| Err(RemoteError::ProcessNotFound)));
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "process_stop_7")).await);
    assert_eq!(out, vec![Reply::text("Process not found")]);
    assert_eq!(api.calls(), vec!["stop/7"]);
}

#[tokio::test]
async fn test_action_generic_failure() {
    let api = Arc::new(StubApi::new().with_action(|_, _| {
        Err(RemoteError::Status {
            status: 500,
            body: "internal error".into(),
        })
    }));
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "process_start_3")).await);
    assert_eq!(out.len(), 1);
    assert!(out[0].text.starts_with("Failed to start process: "));
    assert!(out[0].text.contains("internal error"));
}

#[tokio::test]
async fn test_malformed_payload_makes_no_remote_call() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&[]), Arc::clone(&api));

    let out = replies(handler.handle(&callback(Some("alice"), "process_start")).await);
    assert_eq!(out, vec![Reply::text("Usage: button 'start_process_<id>'")]);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_allow_list_drops_strangers() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&["alice"]), Arc::clone(&api));

    assert_eq!(handler.handle(&text(Some("bob"), "/start")).await, Dispatch::Dropped);
    assert_eq!(
        handler.handle(&callback(Some("bob"), "process_stop_1")).await,
        Dispatch::Dropped
    );
    assert_eq!(
        handler.handle(&callback(None, "list_processes")).await,
        Dispatch::Dropped
    );
    assert!(api.calls().is_empty());

    let out = replies(handler.handle(&callback(Some("alice"), "process_stop_1")).await);
    assert_eq!(out, vec![Reply::text("stop ok")]);
    assert_eq!(api.calls(), vec!["stop/1"]);
}

#[tokio::test]
async fn test_allow_list_applies_before_parsing() {
    let api = Arc::new(StubApi::new());
    let handler = handler(settings(&["alice"]), Arc::clone(&api));

    // malformed input from a stranger gets no usage hint either
    assert_eq!(handler.handle(&text(Some("bob"), "/process")).await, Dispatch::Dropped);
}

#[tokio::test]
async fn test_handler_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tlg_token":"1:x","server":"http://astra.test","api_token":"k","accepted_users":["alice"]}}"#
    )
    .unwrap();

    let settings = Arc::new(Settings::load(file.path()).unwrap());
    let api = Arc::new(StubApi::new());
    let handler = BotHandler::new(Arc::clone(&settings), api);

    assert_eq!(handler.settings().accepted_users, vec!["alice"]);
    assert_eq!(handler.handle(&text(Some("carol"), "/start")).await, Dispatch::Dropped);
    assert!(matches!(
        handler.handle(&text(Some("alice"), "/start")).await,
        Dispatch::Replies(_)
    ));
}

//! BDD test world for the homework bot

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cucumber::World;
use homework_bot::api_client::PracticumClient;
use homework_bot::config::{PracticumConfig, TelegramConfig};
use homework_bot::error::{FormatError, HttpError, NotifierError};
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::telegram::TelegramNotifier;
use homework_bot::{CycleOutcome, PollLoop, Watermark};
use tokio_util::sync::CancellationToken;

pub const CHAT_ID: &str = "42";

/// A recorded form POST
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedPost {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client that replays scripted GET replies and records POSTs.
///
/// With an empty script a GET answers with no homeworks and echoes
/// `from_date` back as `current_date`.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    gets: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    post_reply: Mutex<Option<Result<HttpResponse, HttpError>>>,
    posts: Mutex<Vec<RecordedPost>>,
    from_dates: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn push_get(&self, reply: Result<HttpResponse, HttpError>) {
        self.gets.lock().unwrap().push_back(reply);
    }

    pub fn push_body(&self, status: u16, body: &str) {
        self.push_get(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn set_post_reply(&self, reply: Result<HttpResponse, HttpError>) {
        *self.post_reply.lock().unwrap() = Some(reply);
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.posts()
            .iter()
            .filter_map(|p| p.param("text").map(str::to_string))
            .collect()
    }

    /// `from_date` of every GET, in order
    pub fn from_dates(&self) -> Vec<String> {
        self.from_dates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let from_date = query
            .iter()
            .find(|(k, _)| *k == "from_date")
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| "0".to_string());
        self.from_dates.lock().unwrap().push(from_date.clone());
        if let Some(reply) = self.gets.lock().unwrap().pop_front() {
            return reply;
        }
        Ok(HttpResponse {
            status: 200,
            body: format!(r#"{{"homeworks": [], "current_date": {}}}"#, from_date),
        })
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        match self.post_reply.lock().unwrap().clone() {
            Some(reply) => reply,
            None => Ok(HttpResponse {
                status: 200,
                body: r#"{"ok":true}"#.to_string(),
            }),
        }
    }
}

pub fn practicum_config() -> PracticumConfig {
    PracticumConfig {
        endpoint: "http://practicum.test/api/user_api/homework_statuses/".to_string(),
        token: "practicum-token".to_string(),
        request_timeout_seconds: 5,
    }
}

pub fn telegram_config() -> TelegramConfig {
    TelegramConfig {
        bot_token: "123:abc".to_string(),
        chat_id: CHAT_ID.to_string(),
        api_base: "http://telegram.test".to_string(),
    }
}

#[derive(Debug, Default, World)]
pub struct HomeworkWorld {
    // Poll loop testing
    pub initial_watermark: Option<i64>,
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub poll_loop: Option<PollLoop>,
    pub outcomes: Vec<CycleOutcome>,

    // Formatter testing
    pub record: Option<serde_json::Value>,
    pub formatted: Option<Result<String, FormatError>>,

    // Notifier testing
    pub notifier: Option<TelegramNotifier>,
    pub delivery: Option<Result<(), NotifierError>>,
}

impl HomeworkWorld {
    pub fn http(&mut self) -> Arc<ScriptedHttpClient> {
        Arc::clone(
            self.http
                .get_or_insert_with(|| Arc::new(ScriptedHttpClient::default())),
        )
    }

    pub fn poll_loop(&mut self) -> &mut PollLoop {
        if self.poll_loop.is_none() {
            let http: Arc<dyn HttpClient> = self.http();
            let api = Arc::new(PracticumClient::new(&practicum_config(), Arc::clone(&http)));
            let notifier = Arc::new(TelegramNotifier::new(&telegram_config(), http));
            let initial = Watermark::from_secs(self.initial_watermark.unwrap_or(1000));
            self.poll_loop = Some(PollLoop::new(
                api,
                notifier,
                Duration::from_millis(10),
                initial,
                CancellationToken::new(),
            ));
        }
        self.poll_loop.as_mut().expect("poll loop just built")
    }

    pub fn last_outcome(&self) -> &CycleOutcome {
        self.outcomes.last().expect("no poll cycle has run")
    }
}

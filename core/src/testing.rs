//! In-process doubles shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::navigation::{ConfirmDialog, Navigator, Prompt, Route};

type Reply = Result<HttpResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// Replays queued responses in order and records every request it sees.
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

/// Holds back a gated reply until the test releases it.
pub(crate) struct Gate(oneshot::Sender<Reply>);

impl Gate {
    pub(crate) fn respond(self, status: u16, body: &str) {
        let _ = self.0.send(Ok(response(status, body)));
    }

    pub(crate) fn fail(self, message: &str) {
        let _ = self.0.send(Err(TransportError::Network(message.to_string())));
    }
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push_ok(&self, status: u16, body: &str) {
        self.push(Scripted::Ready(Ok(response(status, body))));
    }

    pub(crate) fn push_network_error(&self, message: &str) {
        self.push(Scripted::Ready(Err(TransportError::Network(message.to_string()))));
    }

    pub(crate) fn push_gated(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gated(rx));
        Gate(tx)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(&self, reply: Scripted) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl crate::transport::Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_string()))),
            None => Err(TransportError::Network("no scripted reply".to_string())),
        }
    }
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

pub(crate) fn product_json(id: u64, title: &str, price: f64) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "price": price,
        "description": "",
        "category": "misc",
        "image": "https://img.test/p.png",
        "rating": { "rate": 4.0, "count": 10 }
    })
    .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NavEvent {
    Navigate(Route),
    Replace(Route),
    Back,
}

/// Navigator that only remembers what it was asked to do.
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub(crate) fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.events.lock().unwrap().push(NavEvent::Navigate(route));
    }

    fn replace(&self, route: Route) {
        self.events.lock().unwrap().push(NavEvent::Replace(route));
    }

    fn go_back(&self) {
        self.events.lock().unwrap().push(NavEvent::Back);
    }
}

/// Dialog that always gives the same answer and counts how often it was shown.
pub(crate) struct FixedDialog {
    answer: bool,
    shown: AtomicUsize,
}

impl FixedDialog {
    pub(crate) fn new(answer: bool) -> Self {
        Self {
            answer,
            shown: AtomicUsize::new(0),
        }
    }

    pub(crate) fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmDialog for FixedDialog {
    async fn confirm(&self, _prompt: &Prompt) -> bool {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

//! In-process transport for tests and offline runs.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{FetchError, Request, Response, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Respond(Response),
    Fail(FailureKind),
}

#[derive(Debug, Clone, Copy)]
enum FailureKind {
    Timeout,
    Refused,
}

/// A programmable [`Transport`].
///
/// Replies are keyed by path plus query (`/products?limit=0`). Unknown
/// paths answer 404. A held reply blocks the request until the test
/// releases it through the returned sender, which makes overlapping
/// fetches deterministic.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    held: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Response>>>>,
    requests: Mutex<Vec<String>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with a 200 JSON body.
    pub fn respond_json(&self, path: impl Into<String>, body: serde_json::Value) -> &Self {
        self.respond(path, Response::json_body(200, &body))
    }

    /// Answer `path` with an arbitrary response.
    pub fn respond(&self, path: impl Into<String>, response: Response) -> &Self {
        lock(&self.replies).insert(path.into(), Reply::Respond(response));
        self
    }

    /// Answer `path` with a raw, non-JSON body.
    pub fn respond_raw(&self, path: impl Into<String>, status: u16, body: &str) -> &Self {
        self.respond(path, Response::new(status, HashMap::new(), body.as_bytes().to_vec()))
    }

    /// Fail requests to `path` with a timeout.
    pub fn time_out(&self, path: impl Into<String>) -> &Self {
        lock(&self.replies).insert(path.into(), Reply::Fail(FailureKind::Timeout));
        self
    }

    /// Fail requests to `path` as if the connection was refused.
    pub fn refuse(&self, path: impl Into<String>) -> &Self {
        lock(&self.replies).insert(path.into(), Reply::Fail(FailureKind::Refused));
        self
    }

    /// Hold the next request to `path` until a response is sent.
    ///
    /// Dropping the sender fails the request.
    pub fn hold(&self, path: impl Into<String>) -> oneshot::Sender<Response> {
        let (tx, rx) = oneshot::channel();
        lock(&self.held).entry(path.into()).or_default().push_back(rx);
        tx
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    /// Number of requests made to `path`.
    pub fn request_count(&self, path: &str) -> usize {
        lock(&self.requests).iter().filter(|p| *p == path).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let key = request.path_and_query();
        lock(&self.requests).push(key.clone());

        let held = lock(&self.held).get_mut(&key).and_then(VecDeque::pop_front);
        if let Some(rx) = held {
            return rx
                .await
                .map_err(|_| FetchError::RequestError(format!("held request to {} dropped", key)));
        }

        let reply = lock(&self.replies).get(&key).cloned();
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(FailureKind::Timeout)) => Err(FetchError::Timeout),
            Some(Reply::Fail(FailureKind::Refused)) => {
                Err(FetchError::RequestError(format!("connection refused: {}", key)))
            }
            None => Ok(Response::json_body(
                404,
                &serde_json::json!({ "message": format!("{} not found", key) }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use serde_json::json;

    fn get(path: &str) -> Request {
        Request::get(Url::parse(&format!("https://catalog.test{}", path)).unwrap())
    }

    #[tokio::test]
    async fn test_programmed_reply() {
        let mock = MockTransport::new();
        mock.respond_json("/products/1", json!({"id": 1}));

        let resp = mock.send(get("/products/1")).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(mock.requests(), vec!["/products/1".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let mock = MockTransport::new();
        let resp = mock.send(get("/nope")).await.unwrap();
        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn test_failures() {
        let mock = MockTransport::new();
        mock.time_out("/slow").refuse("/down");

        assert!(matches!(mock.send(get("/slow")).await, Err(FetchError::Timeout)));
        assert!(matches!(mock.send(get("/down")).await, Err(FetchError::RequestError(_))));
    }

    #[tokio::test]
    async fn test_held_reply_waits_for_release() {
        let mock = std::sync::Arc::new(MockTransport::new());
        let release = mock.hold("/products");

        let pending = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.send(get("/products")).await })
        };
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        release.send(Response::json_body(200, &json!({"products": []}))).unwrap();
        let resp = pending.await.unwrap().unwrap();
        assert!(resp.is_success());
    }
}

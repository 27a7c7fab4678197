//! Minimal backend stand-in that replays a fixed set of records at `GET /logs`.

use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::entry::RawLogRecord;
use crate::error::{FeedError, Result};
use crate::source::TEAM_HEADER;

pub struct ReplayServer {
    server: Arc<Server>,
    body: Arc<Vec<u8>>,
}

impl ReplayServer {
    /// Binds `addr` (port 0 picks a free port) and prepares `records` as the
    /// response body, in the given order.
    pub fn bind(addr: &str, records: &[RawLogRecord]) -> Result<Self> {
        let server = Server::http(addr).map_err(|e| FeedError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        let body = serde_json::to_vec(records)?;
        Ok(Self {
            server: Arc::new(server),
            body: Arc::new(body),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves requests on the calling thread until the server is unblocked.
    pub fn serve(&self) {
        for request in self.server.incoming_requests() {
            handle_request(request, &self.body);
        }
    }

    /// Serves requests on a background thread.
    pub fn spawn(self) -> Result<ReplayHandle> {
        let server = Arc::clone(&self.server);
        let thread = std::thread::Builder::new()
            .name("activity-feed-replay".into())
            .spawn(move || self.serve())?;
        Ok(ReplayHandle { server, thread })
    }
}

/// Running replay server. Dropping it without [`ReplayHandle::shutdown`]
/// leaves the thread serving.
pub struct ReplayHandle {
    server: Arc<Server>,
    thread: JoinHandle<()>,
}

impl ReplayHandle {
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown(self) {
        self.server.unblock();
        let _ = self.thread.join();
    }
}

fn handle_request(request: Request, body: &[u8]) {
    let path = request.url().split('?').next().unwrap_or("/").to_string();
    let team = request
        .headers()
        .iter()
        .find(|header| header.field.equiv(TEAM_HEADER))
        .map(|header| header.value.to_string());
    tracing::debug!(method = %request.method(), path = %path, team = ?team, "replay request");

    if *request.method() != Method::Get {
        return respond_error(request, 405, "Method not allowed");
    }

    match path.as_str() {
        "/logs" | "/logs/graph" => respond_body(request, body.to_vec()),
        _ => respond_error(request, 404, "Not found"),
    }
}

fn respond_body(request: Request, body: Vec<u8>) {
    let mut response = Response::from_data(body);
    if let Ok(header) = Header::from_bytes(b"Content-Type".as_slice(), b"application/json".as_slice()) {
        response.add_header(header);
    }
    if let Err(e) = request.respond(response) {
        respond_failed(e);
    }
}

fn respond_error(request: Request, code: u16, msg: &str) {
    if let Err(e) = request.respond(Response::from_string(msg).with_status_code(code)) {
        respond_failed(e);
    }
}

fn respond_failed(e: impl Display) {
    tracing::warn!(error = %e, "failed to write replay response");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;

    #[test]
    fn test_serves_logs_and_rejects_other_paths() {
        let records = vec![RawLogRecord {
            id: EntryId::Int(1),
            kind: 7,
            description: "joined the team".to_string(),
            object: "alice".to_string(),
            issue_id: None,
            date: "2021-06-01 09:00:00".to_string(),
        }];
        let handle = ReplayServer::bind("127.0.0.1:0", &records)
            .unwrap()
            .spawn()
            .unwrap();
        let addr = handle.local_addr().unwrap();

        let body = ureq::get(&format!("http://{}/logs", addr))
            .call()
            .unwrap()
            .body_mut()
            .read_to_string()
            .unwrap();
        let served: Vec<RawLogRecord> = serde_json::from_str(&body).unwrap();
        assert_eq!(served, records);

        let missing = ureq::get(&format!("http://{}/issues", addr)).call();
        assert!(matches!(missing, Err(ureq::Error::StatusCode(404))));

        handle.shutdown();
    }
}

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use tiny_http::{Response, Server, StatusCode};

/// Loopback HTTP server answering requests with a fixed sequence of responses.
pub struct CorpusServer {
    server: Arc<Server>,
    hits: Arc<AtomicUsize>,
    handle: Option<JoinHandle<()>>,
    url: String,
}

impl CorpusServer {
    pub fn serve(responses: Vec<(u16, Vec<u8>)>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind test server"));
        let addr = server
            .server_addr()
            .to_ip()
            .expect("test server listens on ip");
        let url = format!("http://{addr}/input.txt");

        let hits = Arc::new(AtomicUsize::new(0));
        let handle = {
            let server = Arc::clone(&server);
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                let mut responses = responses.into_iter();
                for request in server.incoming_requests() {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let (status, body) = responses
                        .next()
                        .unwrap_or_else(|| (500, b"no more responses".to_vec()));
                    let response = Response::from_data(body).with_status_code(StatusCode(status));
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            hits,
            handle: Some(handle),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for CorpusServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// URL pointing at a loopback port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/input.txt")
}

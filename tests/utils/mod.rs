//! Test utilities for running a local echo API stand-in.
//!
//! The server collects each request body before invoking a shared handler,
//! so tests can both script responses and assert on what the client sent.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use serde_json::{Value, json};
use std::io::ErrorKind;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Shared handler invoked for each request, with its body already collected.
pub type Handler = Arc<Mutex<Box<dyn FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send>>>;

/// Handle returned by [`start_server`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// Start an HTTP/1 server on an ephemeral port.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
pub async fn start_server() -> Result<(SocketAddr, Handler, ShutdownHandle), std::io::Error> {
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::from("No handler"))
            .expect("failed to create default response")
    })));
    let handler_clone = handler.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                            let h = h.clone();
                            async move {
                                let (parts, body) = req.into_parts();
                                let bytes = body
                                    .collect()
                                    .await
                                    .map(|b| b.to_bytes())
                                    .unwrap_or_default();
                                let req = Request::from_parts(parts, bytes);
                                let mut f = h.lock().expect("lock handler in service");
                                Ok::<_, std::convert::Infallible>((f)(&req))
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok((addr, handler, ShutdownHandle { join, stop: tx }))
}

/// Replace the server's handler.
pub fn set_handler<F>(handler: &Handler, f: F)
where
    F: FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send + 'static,
{
    *handler.lock().expect("lock handler") = Box::new(f);
}

/// Build a JSON response with `status`.
pub fn json_response(status: StatusCode, body: &Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::from(body.to_string()))
        .expect("build response")
}

/// Respond the way the deployed echo service does: describe the request and
/// hand back its body verbatim.
pub fn echo_handler(req: &Request<Bytes>) -> Response<Full<Bytes>> {
    let body = String::from_utf8(req.body().to_vec()).expect("utf8 request body");
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let echoed = json!({
        "request": {
            "method": req.method().as_str(),
            "path": req.uri().path(),
            "headers": { "Content-Type": content_type },
            "body": body,
        },
        "message": "Request successfully echoed",
        "processedAt": "2024-01-01T00:00:00Z",
    });
    json_response(StatusCode::OK, &echoed)
}

/// Requests observed by [`recording_handler`], oldest first.
#[derive(Clone, Default)]
pub struct Seen(pub Arc<Mutex<Vec<(String, Option<String>, Bytes)>>>);

impl Seen {
    /// Method, content type and body of every request so far.
    pub fn take(&self) -> Vec<(String, Option<String>, Bytes)> {
        std::mem::take(&mut *self.0.lock().expect("lock seen"))
    }
}

/// Wrap `respond` so every request is recorded in `seen` first.
pub fn recording_handler<F>(
    seen: &Seen,
    mut respond: F,
) -> impl FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send + 'static
where
    F: FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send + 'static,
{
    let seen = seen.clone();
    move |req| {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.0.lock().expect("lock seen").push((
            req.method().as_str().to_string(),
            content_type,
            req.body().clone(),
        ));
        respond(req)
    }
}

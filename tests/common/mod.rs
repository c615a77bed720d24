//! In-process HTTPS stand-in for a Vexata array.
//!
//! Serves canned responses per (method, path) over TLS with a self-signed
//! certificate generated by rcgen, and records every request it sees.
//! [`MockArray::start`] speaks HTTP/1.1 only; [`MockArray::start_h2`]
//! negotiates HTTP/2 over ALPN.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::TcpListener as StdTcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::{http1, http2};
use hyper::service::service_fn;
use hyper::{Request, Response, Version};
use hyper_util::rt::{TokioExecutor, TokioIo};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use vexata_api::{ClientConfig, TlsVerification};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
/// base64("admin:secret")
pub const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub version: Version,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct State {
    routes: HashMap<(String, String), Route>,
    requests: Vec<RecordedRequest>,
}

pub struct MockArray {
    pub port: u16,
    pub cert_path: PathBuf,
    state: Arc<Mutex<State>>,
    _dir: tempfile::TempDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Protocol {
    Http1,
    Http2,
}

impl MockArray {
    pub fn start() -> Self {
        Self::start_with(Protocol::Http1)
    }

    pub fn start_h2() -> Self {
        Self::start_with(Protocol::Http2)
    }

    fn start_with(protocol: Protocol) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let params =
            rcgen::CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
                .unwrap();
        let key_pair = rcgen::KeyPair::generate().unwrap();
        let cert = params.self_signed(&key_pair).unwrap();

        let cert_path = dir.path().join("array.pem");
        std::fs::write(&cert_path, cert.pem()).expect("Failed to write cert");

        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let mut server_config = rustls::ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .unwrap()
            .with_no_client_auth()
            .with_single_cert(vec![cert.der().clone()], key)
            .expect("TLS configuration error");
        server_config.alpn_protocols = match protocol {
            Protocol::Http1 => vec![b"http/1.1".to_vec()],
            Protocol::Http2 => vec![b"h2".to_vec()],
        };
        let acceptor = TlsAcceptor::from(Arc::new(server_config));

        let listener = StdTcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        listener.set_nonblocking(true).unwrap();
        let port = listener.local_addr().unwrap().port();

        let state = Arc::new(Mutex::new(State::default()));
        let server_state = state.clone();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(serve(listener, acceptor, protocol, server_state));
        });

        MockArray {
            port,
            cert_path,
            state,
            _dir: dir,
        }
    }

    /// Answer `method path` with `status` and `body`
    pub fn route(&self, method: &str, path: &str, status: u16, body: &str) {
        self.route_delayed(method, path, status, body, Duration::ZERO);
    }

    pub fn route_delayed(&self, method: &str, path: &str, status: u16, body: &str, delay: Duration) {
        self.state.lock().unwrap().routes.insert(
            (method.to_string(), path.to_string()),
            Route {
                status,
                body: body.to_string(),
                delay,
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    /// Client config trusting the mock's certificate
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            host: "127.0.0.1".to_string(),
            port: Some(self.port),
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
            tls: TlsVerification::VerifyWith(self.cert_path.clone()),
            timeout_ms: 5000,
        }
    }
}

async fn serve(
    listener: StdTcpListener,
    acceptor: TlsAcceptor,
    protocol: Protocol,
    state: Arc<Mutex<State>>,
) {
    let listener = TcpListener::from_std(listener).expect("Failed to adopt listener");
    loop {
        let Ok((stream, _)) = listener.accept().await else {
            continue;
        };
        let acceptor = acceptor.clone();
        let state = state.clone();
        tokio::spawn(async move {
            let Ok(tls) = acceptor.accept(stream).await else {
                return;
            };
            let service = service_fn(move |req| handle(req, state.clone()));
            let io = TokioIo::new(tls);
            let _ = match protocol {
                Protocol::Http1 => http1::Builder::new().serve_connection(io, service).await,
                Protocol::Http2 => {
                    http2::Builder::new(TokioExecutor::new())
                        .serve_connection(io, service)
                        .await
                }
            };
        });
    }
}

async fn handle(
    req: Request<Incoming>,
    state: Arc<Mutex<State>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let version = req.version();
    let query = req.uri().query().map(|q| q.to_string());
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let authorization = header("authorization");
    let content_type = header("content-type");
    let body = req
        .into_body()
        .collect()
        .await
        .map(|c| c.to_bytes().to_vec())
        .unwrap_or_default();

    let route = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            version,
            query,
            authorization,
            content_type,
            body,
        });
        state.routes.get(&(method, path)).cloned()
    };

    let route = route.unwrap_or(Route {
        status: 404,
        body: r#"{"error":"no route"}"#.to_string(),
        delay: Duration::ZERO,
    });
    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }

    let response = Response::builder()
        .status(route.status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(route.body)))
        .unwrap();
    Ok(response)
}

/// A local port nothing listens on
pub fn closed_port() -> u16 {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

//! The web server: route registration and the accept loop.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinSet;
use tokio::time::timeout;

use crate::request::{HttpRequest, Method, parse_request};
use crate::response::{
    HttpResponse, StatusCode, content_type_for, render_from_string, render_http_message,
};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{
    AfterHookFn, AfterHookFuture, BeforeHookFn, BeforeHookFuture, HandlerFn, HandlerFuture, Route,
    StatusHandlerFn,
};
use crate::server::router::{PathParams, RoutePattern};

/// How long a connection may stay silent mid-request before the read gives up.
const READ_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Routing and hook state shared with connection tasks.
///
/// Populated during setup, read-only while serving.
pub(crate) struct ServerState {
    pub(crate) routes: RwLock<Vec<Route>>,
    pub(crate) before_hooks: RwLock<Vec<BeforeHookFn>>,
    pub(crate) after_hooks: RwLock<Vec<AfterHookFn>>,
    pub(crate) status_handlers: RwLock<HashMap<StatusCode, StatusHandlerFn>>,
}

/// Locate the blank line separating the request head from the body.
fn find_head_end(input: &[u8]) -> Option<usize> {
    input.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Read the declared body length out of a raw request head.
fn content_length_of(head: &[u8]) -> usize {
    for line in head.split(|&b| b == b'\n') {
        let Ok(line) = std::str::from_utf8(line) else {
            continue;
        };
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("Content-Length") {
                return value.trim().parse().unwrap_or(0);
            }
        }
    }
    0
}

/// The main type of the web server. Owns the route table and the hooks,
/// accepts connections and dispatches requests.
pub struct WebServer {
    /// The server configuration.
    pub config: ServerConfig,
    pub(crate) state: Arc<ServerState>,
}

impl Default for WebServer {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

impl WebServer {
    /// Create a new web server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: Arc::new(ServerState {
                routes: RwLock::new(Vec::new()),
                before_hooks: RwLock::new(Vec::new()),
                after_hooks: RwLock::new(Vec::new()),
                status_handlers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register a handler for a path.
    ///
    /// The path is matched exactly, except for dynamic segments of the form
    /// `<kind:name>` (see [`RoutePattern`]). A request path carrying a query
    /// string matches the route registered for its query-less prefix. The
    /// handler is invoked for any method; HEAD and TRACE are answered by the
    /// server itself.
    pub async fn add_route<F, Fut>(&self, path: impl Into<String>, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let path = path.into();
        let pattern = RoutePattern::parse(&path)?;
        let handler: HandlerFn = Arc::new(
            move |request: HttpRequest, params: PathParams| -> HandlerFuture {
                Box::pin(handler(request, params))
            },
        );

        self.state.routes.write().await.push(Route { pattern, handler });
        Ok(())
    }

    /// Register a hook that runs before dispatch, in registration order.
    ///
    /// A hook returning `Some(response)` answers the request immediately;
    /// the route handler and the after-hooks are skipped.
    pub async fn before_request<F, Fut>(&self, hook: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<HttpResponse>> + Send + 'static,
    {
        let hook: BeforeHookFn = Arc::new(
            move |request: HttpRequest| -> BeforeHookFuture { Box::pin(hook(request)) },
        );
        self.state.before_hooks.write().await.push(hook);
    }

    /// Register a hook that runs after the handler, mapping its response.
    pub async fn after_request<F, Fut>(&self, hook: F)
    where
        F: Fn(HttpRequest, HttpResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HttpResponse> + Send + 'static,
    {
        let hook: AfterHookFn = Arc::new(
            move |request: HttpRequest, response: HttpResponse| -> AfterHookFuture {
                Box::pin(hook(request, response))
            },
        );
        self.state.after_hooks.write().await.push(hook);
    }

    /// Register a custom page for a status code the server emits itself.
    ///
    /// Without one, error pages default to `<h1>reason phrase</h1>`.
    pub async fn add_status_handler<F>(&self, status: StatusCode, handler: F)
    where
        F: Fn(StatusCode) -> HttpResponse + Send + Sync + 'static,
    {
        self.state
            .status_handlers
            .write()
            .await
            .insert(status, Arc::new(handler));
    }

    /// Serve a file at `/<path>`.
    ///
    /// The file is read once at registration time; the content type is
    /// derived from its extension.
    pub async fn add_static_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let body = tokio::fs::read(path).await?;
        let content_type = content_type_for(path.extension().and_then(|e| e.to_str()));
        let template = HttpResponse::new(StatusCode::Ok)
            .with_content_type(content_type)
            .with_header("Connection", "close")
            .with_body_bytes(body);

        let route_path = format!(
            "/{}",
            path.to_string_lossy().trim_start_matches("./").trim_start_matches('/')
        );
        self.add_route(route_path, move |_request, _params| {
            let response = template.clone();
            async move { Ok(response) }
        })
        .await
    }

    /// Display the server banner and registered routes.
    async fn display_server_info(&self) {
        let banner = include_str!("../banner.txt");
        info!("\n{banner}");

        let routes = self.state.routes.read().await;
        if routes.is_empty() {
            warn!("No routes registered, every request will be answered with 404");
        } else {
            info!("Registered routes:");
            for route in routes.iter() {
                info!("  {}", route.pattern.path());
            }
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server is running and accessible at http://{addr}", addr = self.config.addr);
        info!("Ctrl + C to stop the server");
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        // Spawn a task to handle Ctrl+C
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection.
    async fn handle_new_connection(
        mut socket: tokio::net::TcpStream,
        addr: SocketAddr,
        semaphore: Arc<tokio::sync::Semaphore>,
        state: Arc<ServerState>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        // Try to acquire a permit from the semaphore
        let permit = match semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                // Send a 503 Service Unavailable response
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body_string("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        // Spawn a task to handle the connection
        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, addr, state, read_buffer_size).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Handle connection accept errors. Returns true when the loop should stop.
    async fn handle_accept_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>, shutdown_timeout: Duration) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let _ = timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        info!("Server shutdown complete");
    }

    /// Start the server and serve until the process is told to stop.
    ///
    /// Blocks the calling task: binds the listener, accepts connections and
    /// dispatches each one on its own task until Ctrl+C arrives.
    pub async fn run(&self) -> Result<(), Error> {
        // Display server information
        self.display_server_info().await;

        // Set up the TCP listener
        let listener = self.setup_listener().await?;

        // Create a semaphore to limit concurrent connections
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.config.max_connections));

        // Create a channel for shutdown signaling
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        // Set up a Ctrl+C handler for graceful shutdown
        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                // Check for shutdown signal
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                // Accept new connections
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.state.clone(),
                                self.config.read_buffer_size,
                                &mut tasks
                            ).await;
                        },
                        Err(e) => {
                            if Self::handle_accept_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        // Perform graceful shutdown
        Self::perform_shutdown(&mut tasks, self.config.shutdown_timeout).await;

        Ok(())
    }

    /// Read one request from the socket.
    ///
    /// Reads until the blank line that ends the head, then until the declared
    /// `Content-Length` is satisfied. An idle timeout during the head phase
    /// abandons the request; during the body phase it hands over what arrived.
    async fn read_request(
        socket: &mut (impl AsyncRead + Unpin),
        read_buffer_size: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0; read_buffer_size];
        let mut request_bytes = Vec::new();

        let head_end = loop {
            let n = match timeout(READ_IDLE_TIMEOUT, socket.read(&mut buf)).await {
                Ok(result) => result?,
                Err(_) => return Ok(Vec::new()),
            };
            if n == 0 {
                return Ok(request_bytes);
            }
            request_bytes.extend_from_slice(&buf[..n]);
            if let Some(pos) = find_head_end(&request_bytes) {
                break pos;
            }
        };

        let content_length = content_length_of(&request_bytes[..head_end]);
        while request_bytes.len() < head_end + 4 + content_length {
            let n = match timeout(READ_IDLE_TIMEOUT, socket.read(&mut buf)).await {
                Ok(result) => result?,
                Err(_) => break,
            };
            if n == 0 {
                break;
            }
            request_bytes.extend_from_slice(&buf[..n]);
        }

        Ok(request_bytes)
    }

    /// The page for a status code the server emits itself.
    async fn status_page(state: &ServerState, status: StatusCode) -> HttpResponse {
        let handlers = state.status_handlers.read().await;
        match handlers.get(&status) {
            Some(handler) => handler(status),
            None => render_from_string(format!("<h1>{}</h1>", status.reason_phrase()))
                .with_status(status),
        }
    }

    /// One access-log line per served request.
    fn log_access(peer: SocketAddr, request: Option<&HttpRequest>, status: StatusCode) {
        match request {
            Some(request) => info!(
                "{ip} \"{method} {path}\" -> {code}",
                ip = peer.ip(),
                method = request.method,
                path = request.path,
                code = status.as_u16()
            ),
            None => info!("{ip} \"?\" -> {code}", ip = peer.ip(), code = status.as_u16()),
        }
    }

    /// Handle a single connection: read, parse, dispatch, respond.
    ///
    /// Parse failures, unmatched paths and handler errors are answered with
    /// their status pages; only I/O failures propagate.
    pub(crate) async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        peer: SocketAddr,
        state: Arc<ServerState>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let raw = Self::read_request(socket, read_buffer_size).await?;
        if raw.is_empty() || raw == b"\r\n\r\n" {
            return Ok(()); // Connection closed without a request
        }

        // Parse the HTTP request
        let request = match parse_request(&raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejecting malformed request from {peer}: {e}");
                let response = Self::status_page(&state, StatusCode::BadRequest).await;
                socket.write_all(&response.to_bytes()).await?;
                Self::log_access(peer, None, StatusCode::BadRequest);
                return Ok(());
            }
        };

        // Before-request hooks may answer early
        let before_hooks = state.before_hooks.read().await.clone();
        for hook in before_hooks {
            if let Some(response) = hook(request.clone()).await {
                let status = response.status;
                socket.write_all(&response.to_bytes()).await?;
                Self::log_access(peer, Some(&request), status);
                return Ok(());
            }
        }

        // Find a matching route
        let matched = {
            let routes = state.routes.read().await;
            routes.iter().find_map(|route| {
                route
                    .pattern
                    .matches(&request.path)
                    .map(|params| (route.handler.clone(), params))
            })
        };

        let mut response = match matched {
            Some((handler, params)) => match request.method {
                // The server answers HEAD and TRACE itself
                Method::HEAD => HttpResponse::new(StatusCode::Ok),
                Method::TRACE => render_http_message(request.to_string()),
                _ => match handler(request.clone(), params).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!("Handler error for {path}: {e}", path = request.path);
                        Self::status_page(&state, StatusCode::InternalServerError).await
                    }
                },
            },
            None => Self::status_page(&state, StatusCode::NotFound).await,
        };

        // After-request hooks see the final response
        let after_hooks = state.after_hooks.read().await.clone();
        for hook in after_hooks {
            response = hook(request.clone(), response).await;
        }

        let status = response.status;
        socket.write_all(&response.to_bytes()).await?;
        Self::log_access(peer, Some(&request), status);
        Ok(())
    }
}

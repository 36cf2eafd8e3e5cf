use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use docbrain::{api, config, logging, processing};

#[tokio::main]
async fn main() {
    config::init_config();
    logging::init_tracing();

    let service = Arc::new(processing::PipelineService::new());
    let app = api::create_router(service);

    let listener = bind_listener().await.expect("no usable listen port");
    let addr = listener.local_addr().expect("listener address");
    tracing::info!(%addr, "docbrain listening");
    axum::serve(listener, app).await.expect("server error");
}

/// Bind `SERVER_PORT` when configured; otherwise walk the 8100-8199 range and take
/// the first free port, reporting the last bind error if the whole range is taken.
async fn bind_listener() -> io::Result<TcpListener> {
    if let Some(port) = config::get_config().server_port {
        return TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await;
    }

    let mut last_error = None;
    for port in 8100..=8199u16 {
        match TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await {
            Ok(listener) => return Ok(listener),
            Err(err) => last_error = Some(err),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "port range 8100-8199 exhausted")
    }))
}

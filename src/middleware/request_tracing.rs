use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::ConnectInfo,
    http::{HeaderValue, Request},
    middleware::Next,
    response::IntoResponse,
};
use log::info;

#[derive(Clone)]
pub struct RequestTraceData {
    id: String,
}

impl RequestTraceData {
    pub fn get_id(&self) -> String {
        return self.id.clone();
    }
}

fn remote_ip<T>(req: &Request<T>) -> String {
    match req.extensions().get::<ConnectInfo<SocketAddr>>().copied() {
        Some(ConnectInfo(socket_addr)) => socket_addr.ip().to_string(),
        None => String::from("unknown"),
    }
}

fn user_agent<T>(req: &Request<T>) -> &str {
    req.headers()
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("not-set")
}

pub async fn request_tracing<T>(mut req: Request<T>, next: Next<T>) -> impl IntoResponse {
    let request_id = nanoid::nanoid!(10);
    let started = Instant::now();

    info!(
        "[{}] {} '{}' {} {}",
        request_id,
        remote_ip(&req),
        user_agent(&req),
        req.method().as_str(),
        req.uri()
    );

    req.extensions_mut().insert(RequestTraceData {
        id: request_id.clone(),
    });
    let mut response = next.run(req).await;

    response
        .headers_mut()
        .insert("X-Request-Id", HeaderValue::from_str(&request_id).unwrap());

    info!(
        "[{}] {} in {}ms",
        request_id,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}

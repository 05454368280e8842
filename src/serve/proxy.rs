use axum::http::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Request, Response, StatusCode,
};
use hyper::{client::HttpConnector, Body, Client};
use tracing::*;

use crate::config::ProxyRule;

const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Forwards matching requests to their backend origin.
#[derive(Clone)]
pub struct Proxy {
    rules: Vec<ProxyRule>,
    client: Client<HttpConnector, Body>,
}

impl Proxy {
    pub fn new(rules: Vec<ProxyRule>) -> Self {
        Self {
            rules,
            client: Client::new(),
        }
    }

    pub fn rule_for(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub async fn forward(&self, rule: &ProxyRule, req: Request<Body>) -> Response<Body> {
        let (mut parts, body) = req.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let uri = match rule.forward_uri(path_and_query) {
            Ok(uri) => uri,
            Err(e) => {
                warn!("proxy: {}", e);
                return failure(StatusCode::BAD_GATEWAY);
            }
        };

        strip_hop_by_hop(&mut parts.headers);

        if rule.change_origin {
            if let Some(authority) = uri.authority() {
                match HeaderValue::from_str(authority.as_str()) {
                    Ok(host) => {
                        parts.headers.insert(header::HOST, host);
                    }
                    Err(e) => warn!("proxy: host: {}", e),
                }
            }
        }

        debug!(method = %parts.method, %uri, "proxy:forward");

        parts.uri = uri;

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(mut response) => {
                strip_hop_by_hop(response.headers_mut());
                response
            }
            Err(e) => {
                warn!(target = %rule.target, "proxy: {}", e);
                failure(StatusCode::GATEWAY_TIMEOUT)
            }
        }
    }
}

/// Drops connection-scoped headers, including any the `Connection` header names.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP.iter().chain(listed.iter()) {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

fn failure(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

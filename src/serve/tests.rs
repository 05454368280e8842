use anyhow::Result;
use axum::{
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
};
use std::net::TcpListener;
use tempfile::TempDir;

use super::*;
use crate::config::ProxyRule;

async fn spawn_backend(router: Router) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    tokio::spawn(axum::Server::from_tcp(listener)?.serve(router.into_make_service()));

    Ok(addr)
}

/// Backend that answers with the URI and Host header it received.
async fn spawn_echo_backend() -> Result<SocketAddr> {
    async fn echo(uri: Uri, headers: HeaderMap) -> String {
        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("-");
        format!("{} {}", uri, host)
    }

    spawn_backend(Router::new().fallback(echo)).await
}

/// Backend that lists the request header names it received and answers with
/// connection-scoped headers of its own.
async fn spawn_header_backend() -> Result<SocketAddr> {
    async fn names(headers: HeaderMap) -> impl IntoResponse {
        let mut names: Vec<&str> = headers.keys().map(|name| name.as_str()).collect();
        names.sort();

        (
            [
                ("keep-alive", "timeout=5"),
                ("proxy-authenticate", "Basic"),
                ("x-backend", "yes"),
            ],
            names.join(","),
        )
    }

    spawn_backend(Router::new().fallback(names)).await
}

fn unused_addr() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?)
}

fn bundle() -> Result<TempDir> {
    let dist = tempfile::tempdir()?;
    std::fs::write(dist.path().join("index.html"), "<html>shell</html>")?;
    std::fs::write(dist.path().join("app.js"), "console.log('app')")?;
    Ok(dist)
}

fn config(dist: &TempDir, rule: ProxyRule) -> DevConfig {
    DevConfig {
        dist: dist.path().to_owned(),
        proxy: vec![rule],
        ..Default::default()
    }
}

async fn get(app: Router, uri: &str) -> Result<(StatusCode, String)> {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "localhost:8080")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await?;

    Ok((status, String::from_utf8(body.to_vec())?))
}

#[tokio::test]
async fn it_forwards_api_requests_with_origin_rewritten() -> Result<()> {
    let backend = spawn_echo_backend().await?;
    let dist = bundle()?;
    let app = app(&config(
        &dist,
        ProxyRule::new("/api", &format!("http://{}", backend)),
    ));

    let (status, body) = get(app, "/api/players?season=2024").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("/api/players?season=2024 {}", backend));

    Ok(())
}

#[tokio::test]
async fn it_keeps_the_host_without_change_origin() -> Result<()> {
    let backend = spawn_echo_backend().await?;
    let dist = bundle()?;
    let rule = ProxyRule {
        change_origin: false,
        ..ProxyRule::new("/api", &format!("http://{}", backend))
    };

    let (_, body) = get(app(&config(&dist, rule)), "/api/match/12").await?;

    assert_eq!(body, "/api/match/12 localhost:8080");

    Ok(())
}

#[tokio::test]
async fn it_applies_prefix_rewrites() -> Result<()> {
    let backend = spawn_echo_backend().await?;
    let dist = bundle()?;
    let rule = ProxyRule {
        rewrite: Some("/v2".to_owned()),
        ..ProxyRule::new("/api", &format!("http://{}", backend))
    };

    let (_, body) = get(app(&config(&dist, rule)), "/api/team/api/distinct").await?;

    assert_eq!(body, format!("/v2/team/api/distinct {}", backend));

    Ok(())
}

#[tokio::test]
async fn it_answers_gateway_timeout_when_the_backend_is_down() -> Result<()> {
    let backend = unused_addr()?;
    let dist = bundle()?;
    let app = app(&config(
        &dist,
        ProxyRule::new("/api", &format!("http://{}", backend)),
    ));

    let (status, _) = get(app, "/api/players").await?;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

    Ok(())
}

#[tokio::test]
async fn it_drops_hop_by_hop_headers_both_ways() -> Result<()> {
    let backend = spawn_header_backend().await?;
    let dist = bundle()?;
    let app = app(&config(
        &dist,
        ProxyRule::new("/api", &format!("http://{}", backend)),
    ));

    let request = Request::builder()
        .uri("/api/players")
        .header(header::HOST, "localhost:8080")
        .header(header::CONNECTION, "close, x-hop")
        .header("x-hop", "1")
        .header("keep-alive", "timeout=5")
        .header(header::UPGRADE, "websocket")
        .header("x-kept", "1")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("keep-alive").is_none());
    assert!(response.headers().get(header::PROXY_AUTHENTICATE).is_none());
    assert_eq!(
        response.headers().get("x-backend").and_then(|v| v.to_str().ok()),
        Some("yes")
    );

    let body = hyper::body::to_bytes(response.into_body()).await?;
    let received: Vec<&str> = std::str::from_utf8(&body)?.split(',').collect();

    assert!(received.contains(&"x-kept"), "{:?}", received);
    for hop in ["connection", "keep-alive", "upgrade", "x-hop"] {
        assert!(!received.contains(&hop), "{} reached the backend", hop);
    }

    Ok(())
}

#[tokio::test]
async fn it_serves_bundle_files() -> Result<()> {
    let dist = bundle()?;
    let app = app(&config(&dist, ProxyRule::new("/api", "http://localhost:5000")));

    let (status, body) = get(app.clone(), "/app.js").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log('app')");

    let (status, body) = get(app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>shell</html>");

    Ok(())
}

#[tokio::test]
async fn it_serves_the_shell_for_history_urls() -> Result<()> {
    let dist = bundle()?;
    let app = app(&config(&dist, ProxyRule::new("/api", "http://localhost:5000")));

    for uri in ["/hero/Ahri", "/team/T1?tab=roster", "/not/a/route"] {
        let (status, body) = get(app.clone(), uri).await?;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, "<html>shell</html>", "{}", uri);
    }

    Ok(())
}

#[test]
fn it_lets_flags_override_the_config() {
    let cmd = Command {
        listen: Some(SocketAddr::from(([0, 0, 0, 0], 9000))),
        dist: None,
    };

    let config = cmd.configure(&DevConfig::default());

    assert_eq!(config.listen, SocketAddr::from(([0, 0, 0, 0], 9000)));
    assert_eq!(config.dist, PathBuf::from("web/dist"));
}

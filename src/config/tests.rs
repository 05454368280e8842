use anyhow::Result;

use super::*;

#[test]
fn it_defaults_to_the_backend_on_port_5000() -> Result<()> {
    let config = DevConfig::load(None)?;

    assert_eq!(config.proxy, vec![ProxyRule::new("/api", "http://localhost:5000")]);
    assert!(config.proxy[0].change_origin);
    assert_eq!(config.build.output_dir, PathBuf::from("../app/static/dist"));
    assert_eq!(config.build.assets_dir, "static");
    config.validate()?;

    Ok(())
}

#[test]
fn it_forwards_api_paths_to_the_target() -> Result<()> {
    let rule = ProxyRule::new("/api", "http://localhost:5000");

    assert!(rule.matches("/api/players"));
    assert!(!rule.matches("/player"));
    assert_eq!(
        rule.forward_uri("/api/players")?.to_string(),
        "http://localhost:5000/api/players"
    );
    assert_eq!(
        rule.forward_uri("/api/match/?page=2")?.to_string(),
        "http://localhost:5000/api/match/?page=2"
    );

    Ok(())
}

#[test]
fn it_rewrites_the_prefix_when_asked() -> Result<()> {
    let rule = ProxyRule {
        rewrite: Some("/v1".to_owned()),
        ..ProxyRule::new("/api", "http://localhost:5000/")
    };

    assert_eq!(
        rule.forward_uri("/api/team/api/distinct")?.to_string(),
        "http://localhost:5000/v1/team/api/distinct"
    );

    let rule = ProxyRule {
        rewrite: Some("".to_owned()),
        ..ProxyRule::new("/api", "http://localhost:5000")
    };

    assert_eq!(rule.forward_uri("/api")?.to_string(), "http://localhost:5000/");

    Ok(())
}

#[test]
fn it_parses_partial_files() -> Result<()> {
    let config = DevConfig::from_toml(
        r#"
        listen = "0.0.0.0:3000"

        [[proxy]]
        prefix = "/api"
        target = "http://10.0.0.5:5000"
        change_origin = false

        [build]
        output_dir = "out"
        "#,
    )?;

    assert_eq!(config.listen, SocketAddr::from(([0, 0, 0, 0], 3000)));
    assert_eq!(config.dist, PathBuf::from("web/dist"));
    assert_eq!(config.proxy.len(), 1);
    assert!(!config.proxy[0].change_origin);
    assert_eq!(config.proxy[0].rewrite, None);
    assert_eq!(config.build.output_dir, PathBuf::from("out"));
    assert_eq!(config.build.assets_dir, "static");

    Ok(())
}

#[test]
fn it_rejects_bad_rules() {
    let parse = |prefix: &str, target: &str| {
        DevConfig::from_toml(&format!(
            "[[proxy]]\nprefix = \"{}\"\ntarget = \"{}\"\n",
            prefix, target
        ))
    };

    assert!(matches!(
        parse("api", "http://localhost:5000"),
        Err(ConfigError::InvalidPrefix(_))
    ));

    for target in [
        "localhost:5000",
        "https://localhost:5000",
        "http://localhost:5000/api",
        "not a uri",
    ] {
        assert!(
            matches!(parse("/api", target), Err(ConfigError::InvalidTarget(_))),
            "{}",
            target
        );
    }

    assert!(matches!(
        DevConfig::from_toml("listen = 5"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn it_reports_missing_files() {
    let err = DevConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}

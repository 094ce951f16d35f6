//! End-to-end static serving, fallback substitution, and redirects.

use std::net::SocketAddr;

use edgeserve::ServeConfig;

mod common;

fn static_config(root: &std::path::Path, url: &str) -> ServeConfig {
    let mut config = ServeConfig::default();
    config.static_site.path = root.to_string_lossy().into_owned();
    config.static_site.url = url.to_string();
    config
}

#[tokio::test]
async fn existing_file_is_served_with_its_bytes() {
    let edge_addr: SocketAddr = "127.0.0.1:28411".parse().unwrap();
    let root = common::unique_temp_dir("serve");
    std::fs::write(root.join("app.js"), "console.log('app');").unwrap();
    std::fs::write(root.join("index.html"), "<html>shell</html>").unwrap();

    common::start_edge(edge_addr, static_config(&root, "/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/app.js"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "console.log('app');");
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn percent_encoded_filename_is_served_not_substituted() {
    let edge_addr: SocketAddr = "127.0.0.1:28481".parse().unwrap();
    let root = common::unique_temp_dir("encodedname");
    std::fs::write(root.join("hello world.txt"), "spaced").unwrap();
    std::fs::write(root.join("index.html"), "<html>shell</html>").unwrap();

    common::start_edge(edge_addr, static_config(&root, "/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/hello%20world.txt"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "spaced");
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn missing_path_gets_the_fallback_document_as_200() {
    let edge_addr: SocketAddr = "127.0.0.1:28421".parse().unwrap();
    let root = common::unique_temp_dir("fallback");
    std::fs::write(root.join("index.html"), "<html><body>spa</body></html>").unwrap();

    common::start_edge(edge_addr, static_config(&root, "/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/client/side/route"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(
        response.text().await.unwrap(),
        "<html><body>spa</body></html>"
    );
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn missing_fallback_document_is_a_500_with_no_body() {
    let edge_addr: SocketAddr = "127.0.0.1:28431".parse().unwrap();
    let root = common::unique_temp_dir("nofallback");

    common::start_edge(edge_addr, static_config(&root, "/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/missing"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    assert!(response.text().await.unwrap().is_empty());
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn static_prefix_is_stripped_before_lookup() {
    let edge_addr: SocketAddr = "127.0.0.1:28441".parse().unwrap();
    let root = common::unique_temp_dir("strip");
    std::fs::write(root.join("hello.txt"), "hi").unwrap();

    common::start_edge(edge_addr, static_config(&root, "/app/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/app/hello.txt"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "hi");
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn unmatched_path_is_a_plain_404() {
    let edge_addr: SocketAddr = "127.0.0.1:28451".parse().unwrap();
    let root = common::unique_temp_dir("unmatched");
    std::fs::write(root.join("index.html"), "<html>app</html>").unwrap();

    common::start_edge(edge_addr, static_config(&root, "/app/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/elsewhere"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn configured_redirect_covers_every_subpath() {
    let edge_addr: SocketAddr = "127.0.0.1:28461".parse().unwrap();
    let root = common::unique_temp_dir("redirect");
    std::fs::write(root.join("index.html"), "<html>app</html>").unwrap();

    let mut config = static_config(&root, "/");
    config.redirects.redirect_uri = "https://example.com/login".to_string();
    common::start_edge(edge_addr, config).await;

    let client = common::test_client();
    for path in ["/redirect", "/redirect/deep/sub/path"] {
        let response = client
            .get(format!("http://{edge_addr}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 302);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "https://example.com/login"
        );
    }
    let _ = std::fs::remove_dir_all(root);
}

#[tokio::test]
async fn unconfigured_redirect_prefix_falls_through() {
    let edge_addr: SocketAddr = "127.0.0.1:28471".parse().unwrap();
    let root = common::unique_temp_dir("noredirect");
    std::fs::write(root.join("index.html"), "<html>app</html>").unwrap();

    // Static mounted away from "/" so /redirect matches nothing at all.
    common::start_edge(edge_addr, static_config(&root, "/app/")).await;

    let response = common::test_client()
        .get(format!("http://{edge_addr}/redirect/anything"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let _ = std::fs::remove_dir_all(root);
}

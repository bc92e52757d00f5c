use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::Memory;
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}{}", addr.ip(), addr.port(), cfg.server.base_path);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_product_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // Create
    let res = c.post(format!("{}/products", app.base_url))
        .json(&json!({"description": "Widget", "price": 9.99, "quantity": 10}))
        .send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await?;
    let id = created["productId"].as_i64().expect("productId");
    assert!(id > 0);

    // Read
    let res = c.get(format!("{}/products/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    // Update
    let res = c.put(format!("{}/products/{}", app.base_url, id))
        .json(&json!({"description": "Widget XL", "price": 12.5, "quantity": 4}))
        .send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated, json!({"productId": id, "description": "Widget XL", "price": 12.5, "quantity": 4}));

    // List
    let res = c.get(format!("{}/products", app.base_url)).send().await?;
    let list: Value = res.json().await?;
    assert_eq!(list, json!([updated]));

    // Delete
    let res = c.delete(format!("{}/products/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"deleted": true}));

    let res = c.get(format!("{}/products/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..8 {
        let c = c.clone();
        let url = format!("{}/products", app.base_url);
        tasks.push(tokio::spawn(async move {
            let res = c.post(url).json(&json!({"description": format!("item {i}"), "quantity": i})).send().await?;
            res.json::<Value>().await
        }));
    }

    let mut ids = Vec::new();
    for t in tasks {
        let body = t.await??;
        ids.push(body["productId"].as_i64().expect("productId"));
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    Ok(())
}

#[tokio::test]
async fn run_until_serves_given_config_and_stops_on_signal() -> anyhow::Result<()> {
    let mut cfg = AppConfig::default();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = 0;
    cfg.storage.backend = StorageBackend::Memory;

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(server::startup::run_until(cfg, async {
        let _ = rx.await;
    }));
    tx.send(()).ok();

    let res = tokio::time::timeout(std::time::Duration::from_secs(5), handle).await??;
    assert!(res.is_ok());
    Ok(())
}

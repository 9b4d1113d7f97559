use reqwest::StatusCode;
use serde_json::json;

use raze_api::app::{build_app, AppConfig};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port. The webhook URL
        // points at a closed port: deliveries must fail without affecting
        // any request handling below.
        let app = build_app(AppConfig {
            waitlist_webhook_url: "http://127.0.0.1:9/webhook/raze-waitlist".to_string(),
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn cart_line(product_id: i64, color: &str, size: &str, quantity: i64) -> serde_json::Value {
    json!({
        "product_id": product_id,
        "color": color,
        "size": size,
        "quantity": quantity,
        "product_name": "Performance T-Shirt",
    })
}

async fn available(client: &reqwest::Client, base: &str, product_id: i64, color: &str, size: &str) -> i64 {
    let body: serde_json::Value = client
        .get(format!("{base}/inventory/check/{product_id}/{color}/{size}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["available"].as_i64().unwrap()
}

#[tokio::test]
async fn health_and_seeded_inventory() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let items: serde_json::Value = client
        .get(format!("{}/inventory", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // Launch catalog: 8 tee variants + 8 shorts variants.
    assert_eq!(items.as_array().unwrap().len(), 16);

    assert_eq!(available(&client, &srv.base_url, 1, "Black", "M").await, 25);
    assert_eq!(available(&client, &srv.base_url, 99, "Black", "M").await, 0);
}

#[tokio::test]
async fn reserve_is_all_or_nothing_over_http() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Drain Black/M (25 seeded), then a mixed cart with one bad line must
    // leave the good line unreserved too.
    let res = client
        .post(format!("{}/inventory/reserve", srv.base_url))
        .json(&json!([cart_line(1, "Black", "M", 25)]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(available(&client, &srv.base_url, 1, "Black", "M").await, 0);

    let res = client
        .post(format!("{}/inventory/reserve", srv.base_url))
        .json(&json!([
            cart_line(1, "Black", "S", 2),
            cart_line(1, "Black", "M", 1),
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    // The S line was rolled back.
    assert_eq!(available(&client, &srv.base_url, 1, "Black", "S").await, 20);

    // Release restores the drained variant.
    client
        .post(format!("{}/inventory/release", srv.base_url))
        .json(&json!([cart_line(1, "Black", "M", 25)]))
        .send()
        .await
        .unwrap();
    assert_eq!(available(&client, &srv.base_url, 1, "Black", "M").await, 25);
}

#[tokio::test]
async fn commit_deducts_stock_without_changing_availability() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cart = json!([cart_line(1, "White", "XS", 2)]);
    client
        .post(format!("{}/inventory/reserve", srv.base_url))
        .json(&cart)
        .send()
        .await
        .unwrap();
    assert_eq!(available(&client, &srv.base_url, 1, "White", "XS").await, 13);

    let res = client
        .post(format!("{}/inventory/commit", srv.base_url))
        .json(&cart)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(available(&client, &srv.base_url, 1, "White", "XS").await, 13);

    let stats: serde_json::Value = client
        .get(format!("{}/inventory/stats", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // 15+20+25+20 twice for tees, minus the 2 committed.
    assert_eq!(stats["total_items"], 158);
    assert_eq!(stats["total_reserved"], 0);
}

#[tokio::test]
async fn admin_quantity_updates() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/inventory/update", srv.base_url))
        .json(&json!({"product_id": 2, "color": "Black", "size": "M", "quantity": 30}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(available(&client, &srv.base_url, 2, "Black", "M").await, 30);

    let res = client
        .post(format!("{}/inventory/update", srv.base_url))
        .json(&json!({"product_id": 42, "color": "Black", "size": "M", "quantity": 30}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/inventory/bulk-update", srv.base_url))
        .json(&json!({"items": [
            {"product_id": 3, "color": "Black", "size": "S", "quantity": 10},
            {"product_id": 42, "color": "Black", "size": "S", "quantity": 10},
        ]}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["updated"], 1);
}

#[tokio::test]
async fn waitlist_join_merge_verify_redeem_flow() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let join = |force_add: bool, selections: serde_json::Value| {
        json!({
            "email": "kai@raze.dev",
            "product_id": 1,
            "product_name": "Performance T-Shirt",
            "variant": "Black / Cyan",
            "size_selections": selections,
            "force_add": force_add,
        })
    };

    // First join.
    let body: serde_json::Value = client
        .post(format!("{}/waitlist/join", srv.base_url))
        .json(&join(false, json!([{"size": "M", "quantity": 1}, {"size": "L", "quantity": 2}])))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["is_update"], false);
    let code = body["access_code"].as_str().unwrap().to_string();
    assert!(code.starts_with("RAZE-"));

    // Re-join without force_add: idempotent peek, same code.
    let body: serde_json::Value = client
        .post(format!("{}/waitlist/join", srv.base_url))
        .json(&join(false, json!([{"size": "M", "quantity": 5}])))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["access_code"].as_str().unwrap(), code);
    assert_eq!(body["is_update"], false);

    // force_add merges {M:1} into {M:1, L:2}.
    let body: serde_json::Value = client
        .post(format!("{}/waitlist/join", srv.base_url))
        .json(&join(true, json!([{"size": "M", "quantity": 1}])))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["is_update"], true);
    assert_eq!(body["total_items"], "L x2, M x2");

    // check reflects the merged entry.
    let body: serde_json::Value = client
        .post(format!("{}/waitlist/check", srv.base_url))
        .json(&json!({"email": "KAI@raze.dev", "product_id": 1, "variant": "Black / Cyan"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["exists"], true);
    assert_eq!(body["current_sizes"]["M"], 2);

    // verify, redeem, verify again.
    let body: serde_json::Value = client
        .get(format!("{}/waitlist/verify/{}", srv.base_url, code))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["email"], "kai@raze.dev");

    let res = client
        .post(format!("{}/waitlist/redeem/{}", srv.base_url, code))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = client
        .get(format!("{}/waitlist/verify/{}", srv.base_url, code))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "This code has already been used");
}

#[tokio::test]
async fn waitlist_status_and_admin_listing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for i in 0..3 {
        client
            .post(format!("{}/waitlist/join", srv.base_url))
            .json(&json!({
                "email": format!("u{i}@raze.dev"),
                "product_id": 1,
                "product_name": "Performance T-Shirt",
                "variant": "Black / Cyan",
                "size_selections": [{"size": "M", "quantity": 1}],
            }))
            .send()
            .await
            .unwrap();
    }

    let status: serde_json::Value = client
        .get(format!("{}/waitlist/status", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["total_spots"], 100);
    assert_eq!(status["spots_taken"], 3);
    assert_eq!(status["spots_remaining"], 97);
    assert_eq!(status["is_full"], false);

    let stats: serde_json::Value = client
        .get(format!("{}/waitlist/stats", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total_waitlist"], 2850);

    let admin: serde_json::Value = client
        .get(format!("{}/waitlist/admin", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin["total"], 3);
    let positions: Vec<i64> = admin["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

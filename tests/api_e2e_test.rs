use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use daybook::{db::Db, router};
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn get(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.ready().await.unwrap().call(request).await.unwrap();

    let status_code = response.status();

    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    (status_code, body)
}

async fn post(app: &mut Router, uri: &str, request_body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(String::from(request_body)))
        .unwrap();
    let response = app.ready().await.unwrap().call(request).await.unwrap();

    let status_code = response.status();

    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    (status_code, body)
}

async fn record(app: &mut Router, compact: &str) {
    let (status_code, body) = post(
        app,
        "/api/transaction",
        &format!(r#"{{"data":"{}"}}"#, compact),
    )
    .await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"message": "Transaction saved"}));
}

#[tokio::test]
async fn api_e2e_test() {
    tracing_subscriber::fmt().with_thread_ids(true).init();

    let db = Db::open_in_memory().unwrap();
    let mut app = router(db);

    //
    // An empty day reports zeros everywhere
    //
    let (status_code, body) = get(&mut app, "/api/sells").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_sells": 0}));

    let (status_code, body) = get(&mut app, "/api/buys").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_buys": 0}));

    let (status_code, body) = get(&mut app, "/api/sells-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_amount": 0, "customer_count": 0}));

    let (status_code, body) = get(&mut app, "/api/buys-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_amount": 0, "product_count": 0}));

    let (status_code, body) = get(&mut app, "/api/revenue-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(
        body,
        json!({"total_revenue": 0, "due_to_customers": 0, "due_from_suppliers": 0})
    );

    //
    // Record a cash sell, a due sell, a due buy and a cash buy
    //
    record(&mut app, "#1AB100").await;
    record(&mut app, "#0XY50").await;
    record(&mut app, "*0CD30").await;
    record(&mut app, "*1EF20").await;

    //
    // Totals, summaries and the revenue breakdown reflect the four records
    //
    let (status_code, body) = get(&mut app, "/api/sells").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_sells": 150}));

    let (status_code, body) = get(&mut app, "/api/buys").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_buys": 50}));

    let (status_code, body) = get(&mut app, "/api/sells-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_amount": 150, "customer_count": 2}));

    let (status_code, body) = get(&mut app, "/api/buys-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_amount": 50, "product_count": 2}));

    let (status_code, body) = get(&mut app, "/api/revenue-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(
        body,
        json!({"total_revenue": 150, "due_to_customers": 50, "due_from_suppliers": 30})
    );

    //
    // A repeat customer raises the totals but not the distinct count
    //
    record(&mut app, "#1AB25").await;

    let (status_code, body) = get(&mut app, "/api/sells").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_sells": 175}));

    let (status_code, body) = get(&mut app, "/api/sells-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_amount": 175, "customer_count": 2}));

    let (status_code, body) = get(&mut app, "/api/revenue-summary").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(
        body,
        json!({"total_revenue": 175, "due_to_customers": 50, "due_from_suppliers": 30})
    );

    //
    // Client errors: missing payload, empty payload, bad marker, bad amount
    //
    let (status_code, body) = post(&mut app, "/api/transaction", "{}").await;
    assert_eq!(status_code, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No data provided"}));

    let (status_code, body) = post(&mut app, "/api/transaction", r#"{"data":""}"#).await;
    assert_eq!(status_code, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No data provided"}));

    let (status_code, body) = post(&mut app, "/api/transaction", r#"{"data":"ZZ1AB100"}"#).await;
    assert_eq!(status_code, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid data format"}));

    let (status_code, body) = post(&mut app, "/api/transaction", r#"{"data":"*1ABxyz"}"#).await;
    assert_eq!(status_code, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid amount"}));

    //
    // Rejected writes leave the totals untouched
    //
    let (status_code, body) = get(&mut app, "/api/sells").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_sells": 175}));

    //
    // Unknown routes answer a JSON 404
    //
    let (status_code, body) = get(&mut app, "/api/unknown").await;
    assert_eq!(status_code, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Unknown route: GET /api/unknown"}));

    //
    // A buy pushing the day's total past i64 turns the buy reports into
    // server errors; the sell reports stay readable
    //
    record(&mut app, "*1GG9223372036854775807").await;

    let (status_code, body) = get(&mut app, "/api/buys").await;
    assert_eq!(status_code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Error"}));

    let (status_code, body) = get(&mut app, "/api/buys-summary").await;
    assert_eq!(status_code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Error"}));

    let (status_code, body) = get(&mut app, "/api/sells").await;
    assert_eq!(status_code, StatusCode::OK);
    assert_eq!(body, json!({"total_sells": 175}));

    //
    // Every response carries the request id header
    //
    let request = Request::builder()
        .uri("/api/sells")
        .body(Body::empty())
        .unwrap();
    let response = app.ready().await.unwrap().call(request).await.unwrap();
    assert!(response.headers().contains_key("X-Request-Id"));
}

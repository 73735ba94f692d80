use std::net::{Ipv6Addr, SocketAddr};

use daybook::{db::Db, router};
use log::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_thread_ids(true).init();

    let db_path = std::env::var("DAYBOOK_DB").unwrap_or_else(|_| String::from("daybook.db"));
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000);

    let db = Db::open(&db_path).unwrap();
    info!("ledger open at {}, serving on port {}", db_path, port);

    let app = router(db);

    axum::Server::bind(&SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)))
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .unwrap();
}

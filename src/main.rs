use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventnest_server::clients::{
    http_client, ConsoleMailer, HttpIdentityVerifier, Mailer, PaystackGateway, SmtpMailer,
};
use eventnest_server::config::Config;
use eventnest_server::realtime::ChatHub;
use eventnest_server::routes::create_routes;
use eventnest_server::state::AppState;
use eventnest_server::store::PgStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("eventnest_server=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let client = http_client(config.http_timeout).expect("Failed to build HTTP client");

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(
            SmtpMailer::new(smtp, &config.mail_from).expect("Failed to configure SMTP mailer"),
        ),
        None => {
            tracing::warn!("SMTP not configured; emails will be logged instead of sent");
            Arc::new(ConsoleMailer)
        }
    };

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        mailer,
        gateway: Arc::new(PaystackGateway::new(
            client.clone(),
            config.paystack_base_url.clone(),
            config.paystack_secret_key.clone(),
        )),
        identity: Arc::new(HttpIdentityVerifier::new(client, config.auth_url.clone())),
        chat_hub: ChatHub::new(),
        config: Arc::new(config),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = create_routes(state);

    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}

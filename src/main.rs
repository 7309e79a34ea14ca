use std::net::TcpListener;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use userhub::configuration::get_configuration;
use userhub::email_client::{EmailClient, SenderEmail};
use userhub::startup::run;
use userhub::telemetry::init_telemetry;
use userhub::users::{PgUserStore, UserStore};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting application");

    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    let connection_string = configuration.database.connection_string();
    tracing::info!("Attempting to connect to database");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create connection pool: {}", e);
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Database connection error",
            )
        })?;

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, "Migration error")
    })?;

    tracing::info!("Database ready");

    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));

    let sender = SenderEmail::parse(configuration.email.sender.clone()).map_err(|e| {
        tracing::error!("Invalid sender address in configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Email configuration error")
    })?;
    let email_client = EmailClient::new(
        configuration.email.base_url.clone(),
        sender,
        reqwest::Client::new(),
    );

    let address = format!("127.0.0.1:{}", configuration.application.port);
    tracing::info!("Binding server to address: {}", address);

    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, store, email_client, configuration)?;
    tracing::info!("Server started successfully");

    let _ = server.await;

    Ok(())
}

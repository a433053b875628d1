use std::env::VarError;

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    dotenvy::dotenv().ok();
    fincoach::config::validate();

    let database_url = std::env::var("CHAT_DATABASE_URL").expect("CHAT_DATABASE_URL must be set");
    let port = match std::env::var("PORT") {
        Ok(port) => Some(port.parse::<u16>().expect("Invalid PORT")),
        Err(VarError::NotPresent) => None,
        Err(err) => panic!("Failed to parse PORT: {}", err),
    };

    fincoach::actuators::chat::back::serve(database_url.into(), port).await
}

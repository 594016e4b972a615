use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("Google Translate test double listening at http://127.0.0.1:3000");
    info!("Valid API key: '{}'", tmgmt_google_test::VALID_KEY);

    axum::serve(listener, tmgmt_google_test::router()).await?;

    Ok(())
}

use dotenv::dotenv;
use tracing::{info, warn};

use underwriting_backend::app::app::App;
use underwriting_backend::util::logger::Logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file before the logger reads LOG_DIR / RUST_LOG
    let dotenv_result = dotenv();

    // Guards must live until shutdown so buffered file logs get flushed.
    let _logger = Logger::new()?;

    info!("🚀 Starting Underwriting Backend");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await?;
    app.start().await
}

use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = fyyur_backend::run().await {
        error!("Server stopped: {}", e);
        eprintln!("fyyur_backend: {}", e);
        std::process::exit(1);
    }
}

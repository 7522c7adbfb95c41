#[tokio::main]
async fn main() {
    if let Err(err) = qradar_rest::cli::run().await {
        eprintln!("qradar-rest: {}", err);
        std::process::exit(1);
    }
}

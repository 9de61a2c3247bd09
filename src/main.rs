#[tokio::main]
async fn main() {
    if let Err(e) = payment_intake::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

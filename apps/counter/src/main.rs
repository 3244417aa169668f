//! # Brew Counter Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    brew_counter::run().await
}

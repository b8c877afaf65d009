use std::sync::Arc;

use mewt_php::{PhpLanguageEngine, run_main};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_main(Arc::new(PhpLanguageEngine::new())).await?;
    Ok(())
}

//! Live provider checks. Run with `cargo test -p folio_models --features api`
//! and `FOLIO_TEST_API_KEY`, `FOLIO_TEST_BASE_URL`, `FOLIO_TEST_MODEL` set.

use folio_core::{InterfaceFormat, ModelConfig};
use folio_interface::FolioDriver;
use folio_models::create_driver;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_openai_compatible_invoke() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ModelConfig::builder()
        .interface_format(InterfaceFormat::OpenAI)
        .base_url(std::env::var("FOLIO_TEST_BASE_URL")?)
        .model_name(std::env::var("FOLIO_TEST_MODEL")?)
        .api_key(std::env::var("FOLIO_TEST_API_KEY")?)
        .max_tokens(16u32)
        .build()?;

    let driver = create_driver(&config)?;
    let text = driver.invoke("Reply with the single word: ready").await?;

    assert!(!text.trim().is_empty(), "Should receive non-empty response");
    println!("Response: {}", text);
    Ok(())
}

use anyhow::Result;
use cap_validator::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    serve().await
}

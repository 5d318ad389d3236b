use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::core::Validator;
use crate::lsp::backend::Backend;
use crate::profile::ProfileRegistry;
use crate::Config;

/// Start the LSP server
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .target(env_logger::Target::Stderr)
        .init();

    let registry = ProfileRegistry::with_builtin();
    let profiles = registry.select(&config.profiles)?;
    log::info!("starting cap-ls with {} profile(s)", profiles.len());

    let validator = Validator::new().with_profiles(profiles);

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config.clone(), validator.clone()))
            .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}

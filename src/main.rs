use mypets::adapters::{FileStorage, ReqwestHttpClient};
use mypets::api::PetClient;
use mypets::cli::{execute, parse_args, run_cli_command, CliContext, USAGE};
use mypets::config::AppConfig;
use mypets::state::ThemeStore;
use mypets::traits::KeyValueStorage;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(mypets::config::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if let Some(result) = run_cli_command(&command) {
        return result;
    }

    let config = AppConfig::from_env();
    init_tracing(&config);
    debug!(?config, "starting");

    let storage: Arc<dyn KeyValueStorage> = match &config.data_dir {
        Some(dir) => Arc::new(FileStorage::in_dir(dir)),
        None => Arc::new(FileStorage::new().wrap_err("could not locate a data directory")?),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        // Terminals do not report a colour scheme, so `system` resolves to light.
        let theme = ThemeStore::load(storage, None).await;
        let client = PetClient::with_base_url(ReqwestHttpClient::new(), config.api_url.clone());
        let ctx = CliContext::new(client, theme);

        let mut stdout = std::io::stdout().lock();
        execute(&ctx, command, &mut stdout).await
    })
}

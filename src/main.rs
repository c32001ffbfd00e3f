use clap::{CommandFactory, Parser};
use ouilookup::config::{print_completion, CachePaths, CliConfig};
use ouilookup::core::QuerySession;
use ouilookup::utils::logger;
use ouilookup::LookupError;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.quiet);

    if let Some(shell) = config.completion {
        print_completion(shell);
        return;
    }

    tracing::debug!("CLI config: {:?}", config);

    let paths = match CachePaths::resolve() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!("cache directory: {}", paths.data_dir().display());

    let session = match QuerySession::new(config, paths) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = session.run().await {
        eprintln!("❌ {e}");
        if let Some(hint) = e.recovery_suggestion() {
            eprintln!("💡 {hint}");
        }
        if matches!(e, LookupError::CacheUnavailable { .. }) {
            eprintln!("{}", CliConfig::command().render_usage());
        }
        std::process::exit(1);
    }
}

use clap::Parser;
use imdb_etl::utils::{logger, validation::Validate};
use imdb_etl::{
    AwardsExtractor, CliConfig, EtlEngine, EtlError, HttpFetcher, LocalStorage, Orchestrator,
    TomlConfig, TopListExtractor,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting imdb-etl");

    match run(&cli).await {
        Ok(output_path) => {
            tracing::info!("Finished processing.");
            println!();
            println!("Result is at {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Processing was unsuccessful: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &CliConfig) -> Result<String, EtlError> {
    let config = cli.resolve()?;
    config.validate()?;
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let engine = build_engine(&config)?;
    engine.run().await
}

type Engine = EtlEngine<HttpFetcher, TopListExtractor, AwardsExtractor, LocalStorage>;

fn build_engine(config: &TomlConfig) -> Result<Engine, EtlError> {
    let fetcher = HttpFetcher::new(&config.source.user_agent, config.timeout())?;
    let orchestrator = Orchestrator::new(
        fetcher,
        TopListExtractor::new(config.source.base_url.clone()),
        config.awards_extractor()?,
        config.source.top_list_url.clone(),
        config.scoring,
    );

    Ok(EtlEngine::new(
        orchestrator,
        LocalStorage::new(),
        config.limit(),
        config.load_settings()?,
    ))
}

use sln_diagram::cli::Args;
use sln_diagram::prelude::*;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\nAn error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    let args = Args::parse_args();
    let config = args.into_config()?;

    let logger: Arc<dyn ConsoleLogger> = Arc::new(ColorConsoleLogger::new());

    let feeds = config
        .package_feeds
        .iter()
        .map(|feed| {
            NugetFeedClient::new(feed).map(|client| Arc::new(client) as Arc<dyn FeedClient>)
        })
        .collect::<Result<Vec<_>>>()?;

    let reader: Arc<dyn SolutionReader> = Arc::new(MsbuildSolutionReader::new());
    let renderer: Arc<dyn DiagramRenderer> = Arc::new(D2Cli::new(Arc::clone(&logger)));

    let generator = DependencyGenerator::new(config, reader, feeds, renderer, logger)?;

    generator.create_diagrams().await
}

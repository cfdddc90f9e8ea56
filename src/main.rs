mod cli;
mod config;

use cli::Args;
use config::Settings;
use containersec::prelude::*;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version arrive here too, printed to stdout
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }

    process::exit(ExitCode::Success.as_i32());
}

async fn run(args: Args) -> Result<()> {
    // Merge CLI flags, config file and defaults
    let cwd = std::env::current_dir()?;
    let config = config::load_for_args(&args, &cwd)?;
    let settings = Settings::resolve(args, config)?;

    // Create adapters (Dependency Injection)
    let image_source = RepositoryListReader::new();
    let provisioner = DockerProvisioner::from_command_line(&settings.container_cli)?;
    let scanner = AnchoreClient::new(
        &settings.scanner_url,
        ScannerCredentials::new(settings.username.clone(), settings.password.clone()),
    )?;
    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = GenerateReportUseCase::new(
        image_source,
        provisioner,
        scanner,
        presenter,
        progress_reporter,
    );

    // Execute use case
    use_case.execute(settings.to_request()).await?;

    if let Some(ref path) = settings.output {
        eprintln!("📄 Report written to: {}", path.display());
    }

    Ok(())
}

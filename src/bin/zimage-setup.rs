use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use zimage_api::observability::logging;
use zimage_api::provision::{
    self, deploy::DEFAULT_CLI, DeployCli, SetupError, ALLOWED_ORIGINS, API_BASE_URL,
    API_SECRET_KEY,
};

#[derive(Parser)]
#[command(name = "zimage-setup")]
#[command(about = "Provision secrets and deploy the Z-Image cloud function", long_about = None)]
struct Cli {
    /// Public URL of the deployed API. Prompted for when omitted.
    #[arg(short, long)]
    url: Option<String>,

    /// Comma-separated allowed origins. Prompted for when omitted.
    #[arg(short, long)]
    origins: Option<String>,

    /// Local secrets file to update.
    #[arg(long, default_value = ".env.local")]
    secrets_file: PathBuf,

    /// Cloud function name.
    #[arg(long, default_value = "zimage-api")]
    function: String,

    /// Deployment CLI program.
    #[arg(long, default_value = DEFAULT_CLI)]
    cli: String,

    /// Only write the local secrets file.
    #[arg(long)]
    skip_deploy: bool,
}

fn main() -> ExitCode {
    logging::init_logging("warn");
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {
            println!("Setup complete.");
            ExitCode::SUCCESS
        }
        Err(e @ SetupError::Deployment { .. }) => {
            eprintln!("Error: {e}");
            eprintln!(
                "hint: check that `{}` is installed and logged in, then rerun zimage-setup",
                cli.cli
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SetupError> {
    let raw_url = match &cli.url {
        Some(url) => url.clone(),
        None => prompt("Deployment URL", None)?,
    };
    let url = provision::parse_deployment_url(&raw_url)?;

    let default_origins = provision::default_allowed_origins(&url);
    let origins = match &cli.origins {
        Some(origins) => origins.clone(),
        None => prompt("Allowed origins", Some(&default_origins))?,
    };

    let key = provision::generate_api_key();
    provision::write_secrets_file(
        &cli.secrets_file,
        &[(API_SECRET_KEY, key.as_str()), (API_BASE_URL, url.as_str())],
    )?;
    println!("Wrote {} and {} to {}", API_SECRET_KEY, API_BASE_URL, cli.secrets_file.display());

    if cli.skip_deploy {
        println!("Skipping deployment.");
        return Ok(());
    }

    let deployer = DeployCli::new(cli.cli.as_str());
    deployer.push_config(
        &cli.function,
        &[(API_SECRET_KEY, key.as_str()), (ALLOWED_ORIGINS, origins.as_str())],
    )?;
    println!("Pushed function configuration for {}", cli.function);

    deployer.deploy(&cli.function)?;
    println!("Deployed {}", cli.function);
    Ok(())
}

fn prompt(label: &str, default: Option<&str>) -> io::Result<String> {
    match default {
        Some(d) => print!("{label} [{d}]: "),
        None => print!("{label}: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim();

    Ok(match (answer.is_empty(), default) {
        (true, Some(d)) => d.to_string(),
        _ => answer.to_string(),
    })
}

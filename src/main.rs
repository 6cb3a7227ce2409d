//! survey-adjust: Ausgleichung von Vermessungsnetzen mit GNU Gama.
//!
//! Liest eine Netzdatei (TOML), startet gama-local, gibt das Protokoll aus und
//! schreibt optional die ausgeglichenen Koordinaten als JSON.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use survey_adjust::app::{load_network, write_coordinates_json};
use survey_adjust::{adjust, write_document, AdjustOptions, MemoryCoordinateStore, RequestBuilder};

const USAGE: &str = "Aufruf: survey-adjust <netz.toml> [--json <koordinaten.json>] \
                     [--config <optionen.toml>] [--request-only]";

fn main() -> ExitCode {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    match AppRunner::run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Default)]
struct CliArgs {
    network: PathBuf,
    json_output: Option<PathBuf>,
    config: Option<PathBuf>,
    request_only: bool,
    help: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut network: Option<PathBuf> = None;
        let mut cli = CliArgs::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => {
                    cli.json_output = Some(args.next().context("--json ohne Dateiname")?.into())
                }
                "--config" => {
                    cli.config = Some(args.next().context("--config ohne Dateiname")?.into())
                }
                "--request-only" => cli.request_only = true,
                "-h" | "--help" => {
                    cli.help = true;
                    return Ok(cli);
                }
                other if other.starts_with("--") => bail!("Unbekannte Option {}\n{}", other, USAGE),
                other => {
                    if network.replace(PathBuf::from(other)).is_some() {
                        bail!("Nur eine Netzdatei erlaubt\n{}", USAGE);
                    }
                }
            }
        }

        cli.network = network.context(USAGE)?;
        Ok(cli)
    }
}

struct AppRunner;

impl AppRunner {
    fn run(args: impl Iterator<Item = String>) -> Result<()> {
        let cli = CliArgs::parse(args)?;
        if cli.help {
            println!("{}", USAGE);
            return Ok(());
        }

        log::info!("survey-adjust v{} startet...", env!("CARGO_PKG_VERSION"));

        let config_path = cli.config.clone().unwrap_or_else(AdjustOptions::config_path);
        let options = AdjustOptions::load_from_file(&config_path);

        let loaded = load_network(&cli.network)?;
        let parameters = loaded.parameters.unwrap_or(options.parameters);

        // Netz vor der Programmsuche pruefen
        let document = RequestBuilder::new(&loaded.model, &parameters)
            .with_role_marking(options.role_marking)
            .build()?;

        if cli.request_only {
            print!("{}", write_document(&document));
            return Ok(());
        }

        let solver = options.solver()?;
        let mut store = MemoryCoordinateStore::new();
        let outcome = adjust(
            &loaded.model,
            &parameters,
            options.role_marking,
            &solver,
            &mut store,
        )?;

        println!("{}", outcome.report);

        if let Some(ref path) = cli.json_output {
            write_coordinates_json(&store, path)?;
        }

        Ok(())
    }
}

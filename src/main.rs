use clap::Parser;
use scorm_cmi::utils::{logger, validation::Validate};
use scorm_cmi::{CheckDocument, CheckRunner};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cmi-check")]
#[command(about = "Replay data-model writes against a score schema and print the result")]
struct Cli {
    #[arg(long, short)]
    config: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    json_logs: bool,

    #[arg(long, help = "Pretty-print the snapshot")]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    let document = match CheckDocument::from_file(&cli.config).and_then(|doc| {
        doc.validate()?;
        Ok(doc)
    }) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let report = match CheckRunner::new(document).run() {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Check failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    for rejected in &report.rejected {
        eprintln!(
            "rejected {} = {:?} (error code {})",
            rejected.target, rejected.value, rejected.code
        );
    }

    let output = if cli.pretty {
        serde_json::to_string_pretty(&report.snapshot)?
    } else {
        serde_json::to_string(&report.snapshot)?
    };
    println!("{}", output);

    if !report.is_clean() {
        std::process::exit(2);
    }

    Ok(())
}

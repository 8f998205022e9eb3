use clap::Parser;
use pkgconfig_cli::{
    common::GlobalOpts,
    generate::{self, GenerateArgs, GenerateStatus},
};
use pkgconfig_logger as logger;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gen-dart-package-config")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Generate package_config.json from the build's package list",
    long_about = "Reads the package list collected by the build and converts it into a \
                  package_config.json (config version 2) for the Dart toolchain."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(flatten)]
    args: GenerateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) =
        logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.log_file.as_deref())
    {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    // RUST_LOG overrides the -v level for library diagnostics.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logger::verbosity_to_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match generate::handle_generate(&cli.args) {
        Ok(GenerateStatus::Written { .. }) => ExitCode::SUCCESS,
        Ok(GenerateStatus::DuplicateRoot(duplicate)) => {
            generate::report_duplicate_root(&duplicate);
            ExitCode::from(1)
        }
        Err(e) => {
            logger::error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

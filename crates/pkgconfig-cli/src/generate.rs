//! Package config generation command

use anyhow::{Context, Result};
use clap::Args;
use pkgconfig_config::Settings;
use pkgconfig_logger as logger;
use pkgconfig_manifest::{
    collect_packages, load_descriptors, write_to_path, CollectOptions, CollectOutcome,
    DuplicateRoot, PackageConfig, VersionResolver, YamlPubspecParser,
};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the package list generated by the build
    #[arg(long)]
    pub input: PathBuf,

    /// Path to the package_config.json to write
    #[arg(long)]
    pub output: PathBuf,

    /// Path to the source tree root
    #[arg(long)]
    pub root: PathBuf,

    /// Settings file (defaults to $DART_PKGCONFIG_CONFIG when set)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail when two packages share a root directory
    #[arg(long)]
    pub check_duplicate_roots: bool,

    /// Language version for packages that declare none
    #[arg(long, value_name = "VERSION")]
    pub default_language_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateStatus {
    Written { packages: usize },
    DuplicateRoot(DuplicateRoot),
}

/// Read the build manifest and write the package config
pub fn handle_generate(args: &GenerateArgs) -> Result<GenerateStatus> {
    let settings = Settings::load(args.config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(
            args.default_language_version.clone(),
            args.check_duplicate_roots,
        );
    if let Some(path) = Settings::path(args.config.as_deref()) {
        logger::info(&format!("Using settings from {}", path.display()));
    }
    logger::debug(&format!("Source root: {}", args.root.display()));
    logger::debug(&format!("Settings: {:?}", settings));

    logger::step(&format!("Reading {}", args.input.display()));
    let descriptors = load_descriptors(&args.input)?;

    let output_dir = output_directory(&args.output)?;
    logger::step(&format!(
        "Resolving {} packages relative to {}",
        descriptors.len(),
        output_dir.display()
    ));

    let resolver = VersionResolver::new(YamlPubspecParser, settings.default_language_version);
    let options = CollectOptions {
        check_duplicate_roots: settings.check_duplicate_roots,
    };
    let packages = match collect_packages(&descriptors, &output_dir, &resolver, options)? {
        CollectOutcome::Packages(packages) => packages,
        CollectOutcome::DuplicateRoot(duplicate) => {
            return Ok(GenerateStatus::DuplicateRoot(duplicate))
        }
    };

    let config = PackageConfig::new(packages, settings.generator);
    write_to_path(&config, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    logger::success(&format!(
        "Wrote {} packages to {}",
        config.packages.len(),
        args.output.display()
    ));
    Ok(GenerateStatus::Written {
        packages: config.packages.len(),
    })
}

/// Directory that will contain the output file, as an absolute path
fn output_directory(output: &Path) -> Result<PathBuf> {
    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(output)
    };
    absolute
        .parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Output path has no parent directory: {}", output.display()))
}

/// Lines printed when two packages share a root
pub fn duplicate_root_report(duplicate: &DuplicateRoot) -> Vec<String> {
    vec![
        "Failed to create package_config.json file".to_string(),
        format!(
            "The following packages contain the same package root {}",
            duplicate.root_uri
        ),
        format!("  - {}", duplicate.root_uri),
        format!("  - {}", duplicate.root_uri),
    ]
}

/// Explain a duplicate package root on stdout
pub fn report_duplicate_root(duplicate: &DuplicateRoot) {
    logger::debug(&format!(
        "Packages {} and {} share root {}",
        duplicate.first, duplicate.second, duplicate.root_uri
    ));
    for line in duplicate_root_report(duplicate) {
        println!("{}", line);
    }
}

//! Package config writer
//!
//! The output is written to a temporary file next to the destination and
//! renamed into place, so readers never observe a half-written config.
//! The result keeps the mode of the file it replaces; a new file gets the
//! umask default.

use crate::errors::ManifestError;
use crate::types::PackageConfig;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write a package config to `output_path`
pub fn write_to_path(config: &PackageConfig, output_path: &Path) -> Result<(), ManifestError> {
    debug!("Writing package config to: {:?}", output_path);

    let json = config.to_json_string().map_err(ManifestError::Serialize)?;

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = temp_file_in(dir)?;
    if let Ok(existing) = fs::metadata(output_path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(output_path)
        .map_err(|source| ManifestError::Persist {
            path: output_path.to_path_buf(),
            source,
        })?;

    info!("Package config written to: {:?}", output_path);
    info!("Total packages: {}", config.packages.len());

    Ok(())
}

#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // 0o666 is masked by the umask at creation, as with a plain create.
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Read a previously generated package config
pub fn read_from_path(config_path: &Path) -> Result<PackageConfig, ManifestError> {
    debug!("Reading package config from: {:?}", config_path);

    let content = fs::read_to_string(config_path)?;
    let config: PackageConfig = serde_json::from_str(&content).map_err(ManifestError::ParseConfig)?;

    debug!("Package config version: {}", config.config_version);
    Ok(config)
}

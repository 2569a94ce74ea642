//! Helpers shared by the `analyze` and `tree` commands: locating and loading
//! the configuration and rendering diagnostics.

use std::path::{Path, PathBuf};

use regscan_config::ScanConfig;
use regscan_diagnostics::{Diagnostic, DiagnosticRenderer, Severity, TerminalRenderer};

use crate::GlobalArgs;

/// A loaded configuration and the directory relative paths in it resolve
/// against.
pub struct Settings {
    /// The configuration, or the defaults if no file was found.
    pub config: ScanConfig,
    /// Directory of the configuration file, or the working directory.
    pub root: PathBuf,
}

impl Settings {
    /// The result cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.config.cache.dir)
    }
}

/// Loads the configuration named by `--config`, or the nearest
/// `regscan.toml` above the working directory.
pub fn resolve_settings(global: &GlobalArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    resolve_settings_from(global.config.as_deref(), &cwd)
}

/// Like [`resolve_settings`], starting the search at `cwd`.
///
/// An explicit path may name the file itself or the directory holding it.
/// Without one, a missing file means defaults.
pub fn resolve_settings_from(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<Settings, Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        if path.is_dir() {
            let config = regscan_config::load_config(path)?;
            return Ok(Settings {
                config,
                root: path.to_path_buf(),
            });
        }
        let config = regscan_config::load_config_file(path)?;
        return Ok(Settings {
            config,
            root: parent_dir(path),
        });
    }

    match regscan_config::find_config(cwd) {
        Some(path) => {
            tracing::debug!("using {}", path.display());
            Ok(Settings {
                config: regscan_config::load_config_file(&path)?,
                root: parent_dir(&path),
            })
        }
        None => Ok(Settings {
            config: ScanConfig::default(),
            root: cwd.to_path_buf(),
        }),
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    file.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Whether a diagnostic of `severity` is shown under the global flags.
///
/// Notes need `--verbose`; `--quiet` keeps only errors.
pub fn is_shown(severity: Severity, global: &GlobalArgs) -> bool {
    match severity {
        Severity::Error => true,
        Severity::Warning => !global.quiet,
        Severity::Note => global.verbose && !global.quiet,
    }
}

/// Writes the diagnostics allowed by the global flags to stderr.
pub fn render_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics.iter().filter(|d| is_shown(d.severity, global)) {
        eprint!("{}", renderer.render(diag));
    }
}

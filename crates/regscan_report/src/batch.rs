//! Source discovery and the parallel per-file pipeline.
//!
//! Each file is read, fingerprinted, dumped by the syntax tool and analyzed
//! on its own. A file that fails becomes a [`FileFailure`] and never stops
//! the rest of the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regscan_analysis::{analyze_dump, FileAnalysis};
use regscan_cache::ResultCache;
use regscan_common::ContentHash;
use regscan_config::{ScanConfig, ScanSettings};
use regscan_diagnostics::{codes, Diagnostic, DiagnosticSink};
use regscan_tree::TreeError;
use serde::Serialize;

use crate::aggregate::AnalysisResult;
use crate::tool::SyntaxTool;

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    /// The file, as given or discovered.
    pub file: String,
    /// Diagnostic code of the failure, e.g. `E102`.
    pub code: String,
    /// What went wrong.
    pub message: String,
}

/// The outcome of analyzing a set of paths.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Merged results of every file that succeeded.
    pub result: AnalysisResult,
    /// Files that failed, in discovery order.
    pub failures: Vec<FileFailure>,
    /// Number of files attempted.
    pub files_scanned: usize,
    /// Number of files served from the cache.
    pub cache_hits: usize,
}

/// Lists the source files under `dir`, depth first with entries sorted by
/// name.
///
/// Only files whose extension is accepted by `scan` are returned. When
/// `recursive` is false only the direct children of `dir` are considered.
pub fn discover_source_files(
    dir: &Path,
    recursive: bool,
    scan: &ScanSettings,
) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_dir(dir, recursive, scan, &mut files)?;
    Ok(files)
}

fn walk_dir(
    dir: &Path,
    recursive: bool,
    scan: &ScanSettings,
    files: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if recursive {
                walk_dir(&path, recursive, scan, files)?;
            }
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| scan.accepts_extension(e))
        {
            files.push(path);
        }
    }
    Ok(())
}

enum Analyzed {
    Fresh(FileAnalysis),
    Cached(FileAnalysis),
}

/// Runs the per-file pipeline over many paths.
pub struct BatchAnalyzer<'a> {
    tool: &'a dyn SyntaxTool,
    config: &'a ScanConfig,
    cache: Option<&'a dyn ResultCache>,
    recursive: bool,
    settings: Vec<u8>,
}

impl<'a> BatchAnalyzer<'a> {
    /// Creates an analyzer that dumps files with `tool` and reads the tree
    /// vocabulary and discovery settings from `config`.
    pub fn new(tool: &'a dyn SyntaxTool, config: &'a ScanConfig) -> Self {
        let mut settings = tool.signature().into_bytes();
        settings.push(0);
        settings.extend(serde_json::to_vec(&config.tags).unwrap_or_default());
        Self {
            tool,
            config,
            cache: None,
            recursive: config.scan.recursive,
            settings,
        }
    }

    /// Consults and fills `cache` for every file.
    pub fn with_cache(mut self, cache: &'a dyn ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Overrides whether directories are descended into.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Fingerprint of a file's bytes together with the tool signature and
    /// the tag vocabulary.
    pub fn fingerprint(&self, source: &[u8]) -> ContentHash {
        ContentHash::from_parts([source, self.settings.as_slice()])
    }

    /// Expands `paths` into the list of files to analyze.
    ///
    /// Files are taken as given; directories are walked. A path that cannot
    /// be listed is returned as a failure.
    pub fn collect_files(
        &self,
        paths: &[PathBuf],
        sink: &DiagnosticSink,
    ) -> Vec<Result<PathBuf, FileFailure>> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                files.push(Ok(path.clone()));
                continue;
            }
            match discover_source_files(path, self.recursive, &self.config.scan) {
                Ok(found) => files.extend(found.into_iter().map(Ok)),
                Err(e) => files.push(Err(fail(
                    sink,
                    Diagnostic::error(
                        codes::SOURCE_UNREADABLE,
                        format!("cannot read {}: {e}", path.display()),
                    )
                    .in_file(path),
                ))),
            }
        }
        files
    }

    /// Analyzes every file under `paths` and merges the results.
    ///
    /// Files run in parallel; results, failures and diagnostics are still
    /// reported in discovery order.
    pub fn analyze_paths(&self, paths: &[PathBuf], sink: &DiagnosticSink) -> BatchOutcome {
        let files = self.collect_files(paths, sink);
        let run = || {
            files
                .par_iter()
                .map(|file| {
                    let file_sink = DiagnosticSink::new();
                    let outcome = match file {
                        Ok(path) => self.analyze_file(path, &file_sink),
                        Err(failure) => Err(failure.clone()),
                    };
                    (outcome, file_sink.take_all())
                })
                .collect::<Vec<_>>()
        };
        let results = match self.config.scan.jobs {
            0 => run(),
            jobs => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    tracing::warn!("cannot build a pool of {jobs} threads: {e}; using the default");
                    run()
                }
            },
        };

        let mut outcome = BatchOutcome {
            files_scanned: files.len(),
            ..BatchOutcome::default()
        };
        let mut merged = Vec::with_capacity(results.len());
        for (result, diags) in results {
            sink.extend(diags);
            match result {
                Ok(Analyzed::Fresh(analysis)) => merged.push(AnalysisResult::from(analysis)),
                Ok(Analyzed::Cached(analysis)) => {
                    outcome.cache_hits += 1;
                    merged.push(AnalysisResult::from(analysis));
                }
                Err(failure) => outcome.failures.push(failure),
            }
        }
        outcome.result = AnalysisResult::merge_all(merged);
        outcome
    }

    fn analyze_file(&self, path: &Path, sink: &DiagnosticSink) -> Result<Analyzed, FileFailure> {
        let file = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| {
            fail(
                sink,
                Diagnostic::error(codes::SOURCE_UNREADABLE, format!("cannot read source: {e}"))
                    .in_file(path),
            )
        })?;

        let fingerprint = self.fingerprint(&bytes);
        if let Some(hit) = self.cache.and_then(|c| c.get(&file, &fingerprint)) {
            tracing::debug!(file = %file, "cache hit");
            return Ok(Analyzed::Cached(hit));
        }

        let output = self.tool.print_tree(path).map_err(|e| {
            fail(
                sink,
                Diagnostic::error(codes::TOOL_FAILURE, e.to_string())
                    .in_file(path)
                    .with_help("check the [tool] section of regscan.toml"),
            )
        })?;

        let analysis = match analyze_dump(&output.stdout, &bytes, &file, &self.config.tags, sink) {
            Ok(analysis) => analysis,
            Err(TreeError::ParseFailure { lines }) if !output.success() => {
                let status = output
                    .exit_code
                    .map_or_else(|| "a signal".to_string(), |c| format!("status {c}"));
                let mut diag = Diagnostic::error(
                    codes::TOOL_FAILURE,
                    format!("syntax tool exited with {status} and printed no tree"),
                )
                .in_file(path)
                .with_note(format!("{lines} line(s) of output"));
                if let Some(first) = output.stderr.lines().find(|l| !l.trim().is_empty()) {
                    diag = diag.with_note(first.trim().to_string());
                }
                return Err(fail(sink, diag));
            }
            Err(e) => {
                return Err(fail(
                    sink,
                    Diagnostic::error(codes::PARSE_FAILURE, e.to_string()).in_file(path),
                ));
            }
        };

        if let Some(cache) = self.cache {
            if let Err(e) = cache.set(&file, fingerprint, &analysis) {
                tracing::warn!(file = %file, "cannot cache analysis: {e}");
            }
        }
        Ok(Analyzed::Fresh(analysis))
    }
}

/// Records `diag` and turns it into the matching failure.
fn fail(sink: &DiagnosticSink, diag: Diagnostic) -> FileFailure {
    let failure = FileFailure {
        file: diag
            .file
            .as_ref()
            .map(|f| f.display().to_string())
            .unwrap_or_default(),
        code: diag.code.to_string(),
        message: diag.message.clone(),
    };
    tracing::warn!(file = %failure.file, code = %failure.code, "{}", failure.message);
    sink.emit(diag);
    failure
}

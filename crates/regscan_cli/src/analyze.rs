//! `regscan analyze`: classify the registers of a set of files.
//!
//! 1. Load `regscan.toml` (or defaults)
//! 2. Pick the syntax tool, or a saved dump with `--tree-dump`
//! 3. Open the result cache unless disabled
//! 4. Analyze every file in parallel and merge the results
//! 5. Render diagnostics, then the filtered report

use regscan_cache::DiskCache;
use regscan_diagnostics::DiagnosticSink;
use regscan_report::{
    BatchAnalyzer, CommandTool, RegisterReport, ReportFilter, SavedDump, SyntaxTool,
};

use crate::pipeline::{render_diagnostics, resolve_settings};
use crate::{AnalyzeArgs, GlobalArgs, ReportFormat};

/// Version string cache entries are written under.
const CACHE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the `regscan analyze` command.
///
/// Returns exit code 0 if every file was analyzed, 1 if any failed.
pub fn run(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = resolve_settings(global)?;
    let config = &settings.config;

    let tool: Box<dyn SyntaxTool> = match &args.tree_dump {
        Some(dump) => {
            if args.paths.len() != 1 || !args.paths[0].is_file() {
                return Err("--tree-dump needs exactly one source file".into());
            }
            Box::new(SavedDump::new(dump))
        }
        None => Box::new(CommandTool::from_config(&config.tool)),
    };

    // A saved dump can change without its source changing.
    let use_cache = config.cache.enabled && !args.no_cache && args.tree_dump.is_none();
    let cache = use_cache.then(|| DiskCache::open(&settings.cache_dir(), CACHE_VERSION));

    let mut analyzer = BatchAnalyzer::new(tool.as_ref(), config);
    if args.recursive {
        analyzer = analyzer.recursive(true);
    }
    if let Some(cache) = &cache {
        analyzer = analyzer.with_cache(cache);
    }

    let sink = DiagnosticSink::new();
    let outcome = analyzer.analyze_paths(&args.paths, &sink);

    if let Some(cache) = &cache {
        if let Err(e) = cache.save() {
            tracing::warn!("cannot save cache: {e}");
        }
    }

    render_diagnostics(&sink.take_all(), global);

    let filter = ReportFilter {
        module: args.module.clone(),
        classification: args.classification,
    };
    let report = RegisterReport::new(&outcome.result, &outcome.failures, &filter);

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                eprintln!(
                    "   Scanned {} file(s), {} from cache",
                    outcome.files_scanned, outcome.cache_hits
                );
            }
            print!("{}", report.render_text());
        }
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    if outcome.failures.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

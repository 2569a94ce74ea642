//! `regscan tree`: print the parse tree of one file.

use regscan_diagnostics::{codes, Diagnostic};
use regscan_report::{CommandTool, SavedDump, SyntaxTool};

use crate::pipeline::{render_diagnostics, resolve_settings};
use crate::{GlobalArgs, TreeArgs};

/// Runs the `regscan tree` command.
///
/// Returns exit code 1 if the dump yields no tree.
pub fn run(args: &TreeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let output = match &args.tree_dump {
        Some(dump) => SavedDump::new(dump).print_tree(&args.file)?,
        None => {
            let settings = resolve_settings(global)?;
            CommandTool::from_config(&settings.config.tool).print_tree(&args.file)?
        }
    };

    match regscan_tree::reconstruct(&output.stdout) {
        Ok(tree) => {
            print!("{tree}");
            Ok(0)
        }
        Err(e) => {
            let mut diag = Diagnostic::error(codes::PARSE_FAILURE, e.to_string()).in_file(&args.file);
            if let Some(first) = output.stderr.lines().find(|l| !l.trim().is_empty()) {
                diag = diag.with_note(first.trim().to_string());
            }
            render_diagnostics(&[diag], global);
            Ok(1)
        }
    }
}

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use comfy_table::Table;

use rigid_cli::check::{CheckOptions, CheckSummary, run_check};
use rigid_core::DisplayMode;

use crate::cli::{CheckArgs, DisplayArg};
use crate::summary::{apply_table_style, print_summary};

const BUILTIN_RULES: &[(&str, &str)] = &[
    ("integer", "Cast to an integer (action: error | zero | drop_row)"),
    ("float", "Cast to a float (action: error | zero | drop_row)"),
    ("boolean", "Parse true/false/yes/no/t/f/1/0 (allow_null, action)"),
    ("bytes", "Encode on read, decode on write (encoding)"),
    ("contains", "Require every substring in strings"),
    ("unique", "Reject repeated values (action: error | drop_row)"),
    ("drop", "Replace the value with an empty string"),
    ("strip", "Trim leading/trailing chars, whitespace by default"),
    ("capitalize_words", "Upper-case letters after separators (cap_first)"),
    ("upc_a", "Zero-pad to a 12-digit UPC-A code (strict checks the check digit)"),
    ("lower", "Lower-case the value"),
    ("upper", "Upper-case the value"),
    ("none_to_empty_string", "Turn null into an empty string"),
    ("remove_linebreaks", "Strip leading/trailing CR and LF"),
    ("replace_value", "Map through replacements (missing: error | default | drop_row | passthrough)"),
    ("static", "Replace the value with a fixed value"),
    ("cary", "Fill blanks with the last non-empty value (action)"),
];

pub fn run_rules() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Rule", "Description"]);
    apply_table_style(&mut table);
    for (name, description) in BUILTIN_RULES {
        table.add_row(vec![*name, *description]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_check_command(args: &CheckArgs) -> Result<CheckSummary> {
    let options = CheckOptions {
        input: args.input.clone(),
        rules: args.rules.clone(),
        keyed: args.keyed,
        header: !args.no_header,
        display: args.display.map(|display| match display {
            DisplayArg::None => DisplayMode::None,
            DisplayArg::Simple => DisplayMode::Simple,
        }),
    };
    let (summary, output_label) = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output: {}", path.display()))?;
            let summary = run_check(&options, BufWriter::new(file))?;
            (summary, path.display().to_string())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let summary = run_check(&options, &mut handle)?;
            handle.flush().context("flush stdout")?;
            (summary, "stdout".to_string())
        }
    };
    print_summary(&summary, &output_label);
    Ok(summary)
}

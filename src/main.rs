//! Ledgergrid - apply edits to a view-builder grid, then print, export or save it

mod config;

use anyhow::{Context, Result, anyhow};
use config::{Config, load_config};
use ledgergrid_core::storage::{render_markdown, write_markdown};
use ledgergrid_core::{Document, StyleChange};
use ledgergrid_engine::engine::format_number;
use log::debug;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: ledgergrid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                         Grid to open (.json)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e, --edit <ADDR=INPUT>        Set a cell, e.g. A3==SUM(A1:A2) (can be repeated)");
    eprintln!("  -s, --style <ADDR:ATTR=VALUE>  Style a cell, e.g. A3:bold=true (can be repeated)");
    eprintln!("  -c, --command <FORMULA>        Evaluate a formula against the grid and print it");
    eprintln!("  -o, --output <FILE>            Export to markdown file");
    eprintln!("  -w, --save                     Save the grid back to [FILE]");
    eprintln!("      --save-as <FILE>           Save the grid to another file");
    eprintln!("      --config <FILE>            Read settings from FILE");
    eprintln!("      --no-config                Ignore the user config file");
    eprintln!("  -h, --help                     Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    file_path: Option<PathBuf>,
    edits: Vec<(String, String)>,
    styles: Vec<(String, String, String)>,
    command: Option<String>,
    output_file: Option<PathBuf>,
    save: bool,
    save_as: Option<PathBuf>,
    config_file: Option<PathBuf>,
    no_config: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = |name: &str| -> Result<String, String> {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{} requires a value", name))
        };
        match arg {
            "-h" | "--help" => opts.help = true,
            "-e" | "--edit" => {
                let edit = value("--edit")?;
                let (addr, input) = edit
                    .split_once('=')
                    .ok_or_else(|| format!("Expected ADDR=INPUT, got '{}'", edit))?;
                opts.edits.push((addr.trim().to_string(), input.to_string()));
            }
            "-s" | "--style" => {
                let style = value("--style")?;
                let parsed = style
                    .split_once(':')
                    .and_then(|(addr, rest)| rest.split_once('=').map(|(a, v)| (addr, a, v)));
                let Some((addr, attr, val)) = parsed else {
                    return Err(format!("Expected ADDR:ATTR=VALUE, got '{}'", style));
                };
                opts.styles
                    .push((addr.trim().to_string(), attr.to_string(), val.to_string()));
            }
            "-c" | "--command" => opts.command = Some(value("--command")?),
            "-o" | "--output" => opts.output_file = Some(PathBuf::from(value("--output")?)),
            "-w" | "--save" => opts.save = true,
            "--save-as" => opts.save_as = Some(PathBuf::from(value("--save-as")?)),
            "--config" => opts.config_file = Some(PathBuf::from(value("--config")?)),
            "--no-config" => opts.no_config = true,
            a if a.starts_with('-') => return Err(format!("Unknown option: {}", a)),
            _ => {
                if opts.file_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                opts.file_path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    Ok(opts)
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Apply the requested edits and produce output. Returns the process exit code.
fn run(opts: &Options, config: &Config) -> Result<i32> {
    let mut doc = Document::with_file(opts.file_path.clone())
        .with_context(|| format!("Failed to open {:?}", opts.file_path))?;

    for (addr, input) in &opts.edits {
        doc.update_cell(addr, input)
            .with_context(|| format!("Failed to edit {}", addr))?;
    }
    for (addr, attr, value) in &opts.styles {
        let change = StyleChange::parse(attr, value).map_err(|e| anyhow!(e))?;
        doc.apply_style(addr, change)
            .with_context(|| format!("Failed to style {}", addr))?;
    }
    debug!("{} cell(s) in grid", doc.len());

    if let Some(path) = &opts.save_as {
        let saved = doc.save_as(path)?;
        eprintln!("Saved to {}", saved.display());
    } else if opts.save {
        let saved = doc.save_file()?;
        eprintln!("Saved to {}", saved.display());
    }

    if let Some(formula) = &opts.command {
        return match doc.evaluate(formula) {
            Ok(value) => {
                println!("{}", format_number(value, config.decimals));
                Ok(0)
            }
            Err(err) => {
                println!("#ERR: {}", err);
                Ok(1)
            }
        };
    }

    if let Some(output_path) = &opts.output_file {
        write_markdown(output_path, &doc, config.decimals)?;
        eprintln!("Exported to {}", output_path.display());
    } else {
        print!("{}", render_markdown(&doc, config.decimals));
    }

    if config.show_issues {
        for (cell_ref, issue) in doc.issues() {
            eprintln!("{}: {}", cell_ref, issue);
        }
    }
    Ok(0)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_usage();
            std::process::exit(1);
        }
    };
    if opts.help {
        print_usage();
        return;
    }

    let (config, warnings) = if opts.no_config {
        (Config::default(), Vec::new())
    } else {
        load_config(opts.config_file.as_deref())
    };
    init_logging(&config.log_level);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    match run(&opts, &config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_edits_keep_formula_equals() {
        let opts = parse_args(&args(&["-e", "A1=5", "--edit", "A3==SUM(A1:A2)"])).unwrap();
        assert_eq!(
            opts.edits,
            vec![
                ("A1".to_string(), "5".to_string()),
                ("A3".to_string(), "=SUM(A1:A2)".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_style_and_file() {
        let opts = parse_args(&args(&["grid.json", "-s", "B2:align=right", "-w"])).unwrap();
        assert_eq!(opts.file_path, Some(PathBuf::from("grid.json")));
        assert_eq!(
            opts.styles,
            vec![("B2".to_string(), "align".to_string(), "right".to_string())]
        );
        assert!(opts.save);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["-e"])).is_err());
        assert!(parse_args(&args(&["-e", "A1"])).is_err());
        assert!(parse_args(&args(&["-s", "A1=bold"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
    }
}

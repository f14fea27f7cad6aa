//! Command-line interface for testdoc
//! This binary inspects the inline test and doc blocks of a source file.
//!
//! Usage:
//!   testdoc parse `<path>` [--format `<format>`] [--line-numbers]  - Print the parsed tree
//!   testdoc tokens `<path>`                                       - Print the token stream
//!   testdoc tests `<path>` [--json]                               - List test cases per owner
//!   testdoc docs `<path>` [--json]                                - List doc text per owner
//!   testdoc blocks `<path>`                                       - List test/doc block line ranges
//!   testdoc strip `<path>` [--kind `<kind>`]                      - Print the source without blocks
//!
//! Every subcommand accepts `--config <file>` to layer a TOML file over the built-in defaults
//! (`./testdoc.toml` is used when present). `TESTDOC_<SECTION>__<KEY>` variables override
//! the file, and `parse` flags override both.
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `testdoc=warn`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fmt;
use std::path::Path;
use testdoc::testdoc::ast::{format_source_context, ParseError, Program};
use testdoc::testdoc::consumers::extraction::{extract_docs, extract_tests};
use testdoc::testdoc::consumers::visibility::{block_ranges, hide_blocks, BlockKind};
use testdoc::testdoc::formats::FormatRegistry;
use testdoc::testdoc::lexing::Tokenizer;
use testdoc::testdoc::{parse_with_options, ParseOptions};
use testdoc_config::{ConfigError, Loader, OutputConfig, TestdocConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Everything that ends a run with a non-zero exit code
enum CliError {
    Io(String, std::io::Error),
    Config(ConfigError),
    Parse { error: ParseError, source: String },
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(path, err) => write!(f, "Error reading {}: {}", path, err),
            CliError::Config(err) => write!(f, "Configuration error: {}", err),
            CliError::Parse { error, source } => {
                writeln!(f, "Error: {}", error)?;
                write!(f, "{}", format_source_context(source, error.position()))
            }
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file")
        .required(true)
        .index(1)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print JSON instead of text")
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("testdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect inline test: and doc: blocks in source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print its tree")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["treeviz", "json", "yaml"])
                        .help("Output format, overriding output.format from the config"),
                )
                .arg(
                    Arg::new("line-numbers")
                        .long("line-numbers")
                        .help("Prefix treeviz lines with source line numbers")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("tests")
                .about("List the test cases of every definition")
                .arg(path_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("docs")
                .about("List the doc text of every definition")
                .arg(path_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("blocks")
                .about("List the line ranges of test and doc blocks")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("strip")
                .about("Print the source with test and doc blocks removed")
                .arg(path_arg())
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .short('k')
                        .value_parser(["test", "doc", "all"])
                        .default_value("all")
                        .help("Which blocks to remove"),
                ),
        )
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("testdoc=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = cli().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let Some((name, sub)) = matches.subcommand() else {
        return Ok(());
    };
    let config = load_config(sub)?;
    let path = sub
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    let source =
        std::fs::read_to_string(path).map_err(|err| CliError::Io(path.to_string(), err))?;
    debug!(command = name, path, bytes = source.len(), "running");

    let output = match name {
        "tokens" => handle_tokens_command(&source)?,
        "parse" => {
            let program = parse_source(&source, &config)?;
            handle_parse_command(&program, &config.output)?
        }
        "tests" => {
            let program = parse_source(&source, &config)?;
            handle_tests_command(&program, &source, sub.get_flag("json"))?
        }
        "docs" => {
            let program = parse_source(&source, &config)?;
            handle_docs_command(&program, sub.get_flag("json"))?
        }
        "blocks" => {
            let program = parse_source(&source, &config)?;
            handle_blocks_command(&program)
        }
        "strip" => {
            let program = parse_source(&source, &config)?;
            let kinds = match sub.get_one::<String>("kind").map(String::as_str) {
                Some("test") => vec![BlockKind::Test],
                Some("doc") => vec![BlockKind::Doc],
                _ => vec![BlockKind::Test, BlockKind::Doc],
            };
            hide_blocks(&source, &program, &kinds)
        }
        _ => String::new(),
    };

    print!("{}", output);
    Ok(())
}

/// Defaults, then the config file, then `TESTDOC_*` variables, then `parse` flags
fn load_config(sub: &ArgMatches) -> Result<TestdocConfig, CliError> {
    let mut loader = match sub.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(Path::new(path)),
        None => Loader::new().with_optional_file("testdoc.toml"),
    };
    loader = loader.with_environment("TESTDOC");
    // Only `parse` defines these arguments.
    if let Ok(Some(format)) = sub.try_get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str());
    }
    if let Ok(Some(true)) = sub.try_get_one::<bool>("line-numbers") {
        loader = loader.set_override("output.show_line_numbers", true);
    }
    loader.build().map_err(CliError::Config)
}

fn parse_source(source: &str, config: &TestdocConfig) -> Result<Program, CliError> {
    let options = ParseOptions::from(&config.parser);
    parse_with_options(source, &options).map_err(|error| CliError::Parse {
        error,
        source: source.to_string(),
    })
}

fn handle_parse_command(program: &Program, output: &OutputConfig) -> Result<String, CliError> {
    FormatRegistry::default()
        .render(program, output)
        .map_err(|err| CliError::Output(err.to_string()))
}

fn handle_tokens_command(source: &str) -> Result<String, CliError> {
    let mut output = String::new();
    for token in Tokenizer::new(source) {
        let token = token.map_err(|err| CliError::Parse {
            error: err.into(),
            source: source.to_string(),
        })?;
        output.push_str(&format!("{:>7}  {}\n", token.range.start.to_string(), token.kind));
    }
    Ok(output)
}

fn owner_label(owner: &Option<String>) -> &str {
    owner.as_deref().unwrap_or("<module>")
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|err| CliError::Output(err.to_string()))
}

fn handle_tests_command(program: &Program, source: &str, json: bool) -> Result<String, CliError> {
    let groups = extract_tests(program, source);
    if json {
        return to_json(&groups);
    }

    let mut output = String::new();
    for group in &groups {
        output.push_str(&format!("{}\n", owner_label(&group.owner)));
        for case in &group.cases {
            for statement in &case.setup {
                output.push_str(&format!("      {}\n", statement));
            }
            output.push_str(&format!(
                "  {:>3} {} == {}: \"{}\"\n",
                case.line, case.left, case.right, case.message
            ));
        }
    }
    Ok(output)
}

fn handle_docs_command(program: &Program, json: bool) -> Result<String, CliError> {
    let docs = extract_docs(program);
    if json {
        return to_json(&docs);
    }

    let mut output = String::new();
    for doc in &docs {
        output.push_str(&format!("{}\n", owner_label(&doc.owner)));
        for line in doc.text.lines() {
            if line.is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("    {}\n", line));
            }
        }
    }
    Ok(output)
}

fn handle_blocks_command(program: &Program) -> String {
    block_ranges(program)
        .iter()
        .map(|range| {
            format!(
                "{} {}-{} {}\n",
                range.kind,
                range.start_line + 1,
                range.end_line + 1,
                owner_label(&range.owner)
            )
        })
        .collect()
}

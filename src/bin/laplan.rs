//! Command-line interface for laplan
//! Parses City of Los Angeles zoning strings, one at a time or a whole column at once.
//!
//! Usage:
//!   laplan parse `<code>`... [--format `<format>`]                 - Parse zoning strings
//!   laplan batch `<path>` [--format `<format>`] [--crosswalk `<file>`] - Parse one code per line
//!   laplan vocab [--kind `<kind>`]                                - List the zoning vocabulary

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use laplan::batch::{self, output, BatchParser, Crosswalk, OutputFormat};
use laplan::config::{LaplanConfig, Loader};
use laplan::zoning::vocabulary::{self, TagInfo};
use laplan::zoning::{ParsedZoning, ZoningParser};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::warn;

/// Looked up in the working directory when `--config` is not given
const LOCAL_CONFIG: &str = "laplan.toml";

fn main() {
    let matches = Command::new("laplan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and tabulate City of Los Angeles zoning strings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse zoning strings and print their components")
                .arg(
                    Arg::new("codes")
                        .help("Zoning strings, e.g. '[Q]C1.5-1VLD-RIO'")
                        .required(true)
                        .num_args(1..),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["json", "yaml"])
                        .help("Output format (default: output.format from config)"),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Parse a file with one zoning string per line ('-' reads stdin)")
                .arg(
                    Arg::new("path")
                        .help("Input file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["json", "yaml", "tsv"])
                        .help("Output format (default: output.format from config)"),
                )
                .arg(
                    Arg::new("crosswalk")
                        .long("crosswalk")
                        .help("JSON file of manually fixed rows, keyed by ZONE_CMPLT"),
                )
                .arg(
                    Arg::new("threads")
                        .long("threads")
                        .short('j')
                        .value_parser(value_parser!(u32))
                        .help("Parser worker threads (0 = one per core)"),
                ),
        )
        .subcommand(
            Command::new("vocab")
                .about("List the zoning vocabulary")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .short('k')
                        .value_parser([
                            "zone-classes",
                            "height-districts",
                            "overlays",
                            "specific-plans",
                        ])
                        .default_value("zone-classes"),
                ),
        )
        .get_matches();

    laplan::logging::init(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let config = load_config(&matches, parse_matches);
            let codes: Vec<&String> = parse_matches
                .get_many::<String>("codes")
                .map(|codes| codes.collect())
                .unwrap_or_default();
            handle_parse_command(&config, &codes);
        }
        Some(("batch", batch_matches)) => {
            let config = load_config(&matches, batch_matches);
            let path = batch_matches
                .get_one::<String>("path")
                .expect("path is required");
            let crosswalk = batch_matches.get_one::<String>("crosswalk");
            handle_batch_command(&config, path, crosswalk.map(String::as_str));
        }
        Some(("vocab", vocab_matches)) => {
            let kind = vocab_matches
                .get_one::<String>("kind")
                .expect("kind has a default");
            handle_vocab_command(kind);
        }
        _ => unreachable!(),
    }
}

/// Build the configuration: defaults, then the config file, then CLI flags
fn load_config(matches: &ArgMatches, sub_matches: &ArgMatches) -> LaplanConfig {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };

    if let Some(format) = sub_matches.try_get_one::<String>("format").ok().flatten() {
        loader = loader
            .set_override("output.format", format.as_str())
            .unwrap_or_else(|e| exit_with_error(e));
    }
    if let Some(threads) = sub_matches.try_get_one::<u32>("threads").ok().flatten() {
        loader = loader
            .set_override("batch.threads", i64::from(*threads))
            .unwrap_or_else(|e| exit_with_error(e));
    }

    loader.build().unwrap_or_else(|e| exit_with_error(e))
}

fn exit_with_error(error: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

#[derive(Serialize)]
struct ParsedEntry<'a> {
    code: &'a str,
    #[serde(flatten)]
    parsed: ParsedZoning,
}

/// Handle the parse command
fn handle_parse_command(config: &LaplanConfig, codes: &[&String]) {
    let parser = ZoningParser::from_config(&config.parser);
    let mut entries = Vec::new();
    let mut failed = false;

    for code in codes {
        match parser.parse(code) {
            Ok(parsed) => entries.push(ParsedEntry {
                code: code.as_str(),
                parsed,
            }),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    let format = match config.output.format {
        OutputFormat::Tsv => {
            warn!("output.format = tsv only applies to batch rows; printing json");
            OutputFormat::Json
        }
        format => format,
    };

    if !entries.is_empty() {
        let rendered = output::render_value(&entries, format)
            .unwrap_or_else(|e| exit_with_error(e));
        print!("{}", rendered);
    }
    if failed {
        std::process::exit(1);
    }
}

/// Handle the batch command
fn handle_batch_command(config: &LaplanConfig, path: &str, crosswalk: Option<&str>) {
    let read = if path == "-" {
        batch::read_codes(io::stdin().lock())
    } else {
        File::open(path)
            .map_err(|source| laplan::Error::Read {
                path: path.into(),
                source,
            })
            .and_then(|file| batch::read_codes(BufReader::new(file)))
    };
    let codes = read.unwrap_or_else(|e| exit_with_error(e));

    let mut batch = BatchParser::from_config(config);
    if let Some(crosswalk) = crosswalk {
        let crosswalk = Crosswalk::load(crosswalk).unwrap_or_else(|e| exit_with_error(e));
        batch = batch.with_crosswalk(crosswalk);
    }

    let report = batch.run(codes.as_slice()).unwrap_or_else(|e| exit_with_error(e));
    let rendered = output::render_rows(&report.rows, config.output.format)
        .unwrap_or_else(|e| exit_with_error(e));
    print!("{}", rendered);
}

/// Handle the vocab command
fn handle_vocab_command(kind: &str) {
    match kind {
        "zone-classes" => {
            for class in vocabulary::zone_classes() {
                println!("{}\t{}", class.code(), class.category());
            }
        }
        "height-districts" => print_codes(vocabulary::HEIGHT_DISTRICTS),
        "overlays" => print_tags(vocabulary::SUPPLEMENTAL_USES),
        "specific-plans" => print_tags(vocabulary::SPECIFIC_PLANS),
        _ => unreachable!(),
    }
}

fn print_codes(codes: &[&str]) {
    for code in codes {
        println!("{}", code);
    }
}

fn print_tags(tags: &[TagInfo]) {
    for tag in tags {
        println!("{}\t{}", tag.code, tag.description);
    }
}

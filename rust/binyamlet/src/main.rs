//! Command-line checker and canonicalizer for block-style YAML documents.
//!
//! Usage: yamlet [OPTIONS] [FILE]
//!
//! Options:
//!   --check                Parse only; exit 0 when valid, 1 when invalid
//!   -o, --output <FILE>    Write the re-serialized document to FILE
//!   --indent <N>           Spaces per nesting level (default 2, minimum 2)
//!   --max-length <N>       Fold plain scalars longer than N columns; 0 disables
//!   --seq-map-newline      Start maps in sequences on their own line
//!   --map-scalar-newline   Start scalar map values on their own line
//!   -h, --help             Print help
//!   -V, --version          Print version
//!
//! Reads from FILE, or stdin when FILE is omitted or `-`. The default
//! mode parses the document and writes its canonical form to stdout.

use libyamlet::{parse_from_reader, serialize, serialize_file, SerializeConfig};
use std::io::{self, Write};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut config = SerializeConfig::default();
    let mut check_only = false;
    let mut output_file: Option<String> = None;
    let mut input_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("yamlet {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--check" => {
                check_only = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(args[i].clone());
            }
            "--indent" => {
                i += 1;
                config.spaces = parse_number(&args, i, "--indent");
            }
            "--max-length" => {
                i += 1;
                config.scalar_max_length = parse_number(&args, i, "--max-length");
            }
            "--seq-map-newline" => {
                config.sequence_map_newline = true;
            }
            "--map-scalar-newline" => {
                config.map_scalar_newline = true;
            }
            "-" => {
                // Explicit stdin; input_path stays None.
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            arg => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input files not supported");
                    process::exit(1);
                }
                input_path = Some(arg.to_string());
            }
        }
        i += 1;
    }

    let root = match &input_path {
        Some(path) => libyamlet::parse_file(path),
        None => parse_from_reader(io::stdin()),
    };

    let root = match root {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if check_only {
        return;
    }

    let result = match &output_file {
        Some(path) => serialize_file(&root, &config, path),
        None => serialize(&root, &config).map(|text| {
            let _ = io::stdout().write_all(text.as_bytes());
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_number(args: &[String], i: usize, option: &str) -> usize {
    if i >= args.len() {
        eprintln!("Error: {} requires a number", option);
        process::exit(1);
    }
    match args[i].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: {} requires a number, got: {}", option, args[i]);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!("yamlet - block-style YAML checker and canonicalizer");
    println!();
    println!("Usage: yamlet [OPTIONS] [FILE]");
    println!();
    println!("Reads a document from FILE (or stdin) and writes its canonical");
    println!("form to stdout.");
    println!();
    println!("Options:");
    println!("  --check                Parse only; exit 0 when valid");
    println!("  -o, --output <FILE>    Write output to FILE");
    println!("  --indent <N>           Spaces per nesting level (default 2)");
    println!("  --max-length <N>       Fold scalars longer than N; 0 disables");
    println!("  --seq-map-newline      Maps in sequences start on their own line");
    println!("  --map-scalar-newline   Scalar map values start on their own line");
    println!("  -h, --help             Print help");
    println!("  -V, --version          Print version");
}

/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use lanada::diagnostics::DiagnosticPrinter;
use lanada::{output_sink, Config, Interpreter};

/// Lanada runs small Lua-flavored scripts straight from source.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run.
    #[arg(required_unless_present = "print_config")]
    script: Option<PathBuf>,

    /// JSON file with runtime limits (`max_call_depth`, `step_limit`,
    /// `random_seed`).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Abort after this many executed statements.
    #[arg(long, value_name = "N")]
    step_limit: Option<u64>,

    /// Seed for `math.random`.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// How errors are reported on stderr.
    #[arg(long, value_enum, default_value_t = ErrorFormat::Human)]
    error_format: ErrorFormat,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,

    /// Log pipeline stages to stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ErrorFormat {
    Human,
    Json,
}

/// Installs the `ftlog` backend behind the `log` facade. The returned guard
/// flushes pending records when `main` returns.
fn init_logging(verbose: u8) -> Option<ftlog::LoggerGuard> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match ftlog::Builder::new().max_log_level(level).try_init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging disabled: {}", e);
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    if args.step_limit.is_some() {
        config.step_limit = args.step_limit;
    }
    if args.seed.is_some() {
        config.random_seed = args.seed;
    }

    if args.print_config {
        println!("{}", config.to_json());
        return ExitCode::SUCCESS;
    }

    let Some(script) = args.script else {
        eprintln!("no script given");
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(&script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read the script '{}': {}", script.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut interpreter = Interpreter::new(config, output_sink(|line: &str| println!("{}", line)));

    match lanada::execute(&source, &mut interpreter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let printer = DiagnosticPrinter::new(script.display().to_string(), source);
            match args.error_format {
                ErrorFormat::Human => printer.print(&err),
                ErrorFormat::Json => eprintln!("{}", printer.render_json(&err)),
            }
            ExitCode::FAILURE
        }
    }
}

use shell_split::bootconfig::{self, BootConfigError};
use shell_split::{split_bytes_with, SplitError};

use log::{debug, error, LevelFilter};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

const SHELL_SPLIT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    bootconfig: bool,
    // `None` or "-" reads from stdin
    input: Option<PathBuf>,
    separators: String,
    verbose: bool,
    version: bool,
}

impl CliOptions {
    fn reads_stdin(&self) -> bool {
        match &self.input {
            Some(path) => path.as_os_str() == "-",
            None => !self.bootconfig,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RuntimeError {
    #[error("{0}: {1}")]
    Io(String, #[source] io::Error),
    #[error("{0}")]
    BootConfig(#[from] BootConfigError),
    #[error("failed to split line {0}: {1}")]
    Split(usize, #[source] SplitError),
}

fn help() {
    println!(
        "Usage:
shell-split --version
shell-split [-v|--verbose] [-s|--separators CHARS] [FILE|-]
shell-split [-v|--verbose] --bootconfig [FILE|-]

Without --bootconfig every line of FILE (or stdin) is split at whitespace
and any of CHARS. With --bootconfig FILE defaults to ${}, or {}.",
        bootconfig::SOURCE_PATH_ENV,
        bootconfig::DEFAULT_SOURCE_PATH,
    );
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut cfg = CliOptions::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match &arg[..] {
            "--bootconfig" => cfg.bootconfig = true,
            "-s" | "--separators" => match args.next() {
                Some(chars) => cfg.separators = chars,
                None => return Err(format!("Missing value for {arg}")),
            },
            "-v" | "--verbose" => cfg.verbose = true,
            "--version" => cfg.version = true,
            _ if arg.starts_with('-') && arg != "-" => return Err(format!("Unknown argument: {arg}")),
            _ if cfg.input.is_some() => return Err(format!("Unexpected argument: {arg}")),
            _ => cfg.input = Some(PathBuf::from(&arg)),
        }
    }

    if cfg.bootconfig && !cfg.separators.is_empty() {
        return Err("--separators can't be used with --bootconfig".into());
    }

    Ok(cfg)
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn read_input(cfg: &CliOptions) -> Result<Vec<u8>, RuntimeError> {
    let mut buf = Vec::new();

    match &cfg.input {
        Some(path) if !cfg.reads_stdin() => {
            buf = fs::read(path).map_err(|e| RuntimeError::Io(format!("failed to read {path:?}"), e))?;
        }
        _ => {
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|e| RuntimeError::Io("failed to read stdin".into(), e))?;
        }
    }

    Ok(buf)
}

fn split_lines(input: &[u8], separators: &str) -> Result<Vec<Vec<String>>, RuntimeError> {
    let mut lines = Vec::new();

    for (n, line) in input.split(|b| *b == b'\n').enumerate() {
        let fields = split_bytes_with(line, |c| c.is_whitespace() || separators.contains(c))
            .map_err(|e| RuntimeError::Split(n + 1, e))?;
        if fields.is_empty() {
            continue;
        }
        debug!("line {}: {} fields", n + 1, fields.len());
        lines.push(fields.into_iter().map(str::to_owned).collect());
    }

    Ok(lines)
}

fn run(cfg: &CliOptions) -> Result<(), RuntimeError> {
    if cfg.bootconfig {
        let entries = if cfg.reads_stdin() {
            bootconfig::parse_entries(io::stdin().lock())?
        } else {
            let path = cfg.input.clone().unwrap_or_else(bootconfig::source_path);
            bootconfig::load_from_file(&path)?
        };

        for entry in entries {
            println!("{entry}");
        }
    } else {
        let input = read_input(cfg)?;

        for fields in split_lines(&input, &cfg.separators)? {
            println!("{fields:?}");
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let cfg = match parse_args(args) {
        Ok(cfg) => cfg,
        Err(msg) => {
            println!("Error: {msg}");
            help();
            process::exit(1)
        }
    };

    let _ = simplelog::SimpleLogger::init(log_level(cfg.verbose), simplelog::Config::default());

    if cfg.version {
        println!("shell-split {SHELL_SPLIT_VERSION}");
        process::exit(0);
    }

    debug!("Starting shell-split with {cfg:?}");

    if let Err(e) = run(&cfg) {
        error!("{e}");
        process::exit(1);
    }
}

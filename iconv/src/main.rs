//! iconv-compatible converter between Unicode encoding forms.
//!
//! Usage:
//!   iconv -f <from-encoding> -t <to-encoding> [--on-error skip|stop|mark] [file...]
//!   iconv -l

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use codeunits::{registry, FormKind, Policy};

/// Convert text between UTF-8, UTF-16, UTF-32 and wchar_t.
#[derive(Debug, Parser)]
#[command(name = "iconv", version)]
struct Args {
    /// Source encoding
    #[arg(
        short = 'f',
        long = "from-code",
        value_name = "ENCODING",
        required_unless_present = "list"
    )]
    from: Option<String>,

    /// Target encoding
    #[arg(
        short = 't',
        long = "to-code",
        value_name = "ENCODING",
        required_unless_present = "list"
    )]
    to: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// What to do with input that does not decode
    #[arg(long = "on-error", value_enum, default_value_t = OnError::Stop)]
    on_error: OnError,

    /// Omit invalid input (same as --on-error skip)
    #[arg(short = 'c')]
    omit_invalid: bool,

    /// List available encodings
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print a summary line on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Input files (default: stdin)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnError {
    /// Drop invalid input
    Skip,
    /// Fail at the first invalid input
    Stop,
    /// Replace each invalid region with U+FFFD
    Mark,
}

impl Args {
    fn policy(&self) -> Policy {
        if self.omit_invalid {
            return Policy::Skip;
        }
        match self.on_error {
            OnError::Skip => Policy::Skip,
            OnError::Stop => Policy::Stop,
            OnError::Mark => Policy::Mark,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("iconv: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if args.list {
        print!("{}", list_encodings());
        return Ok(());
    }

    // clap enforces both unless listing
    let from = args.from.as_deref().unwrap_or_default();
    let to = args.to.as_deref().unwrap_or_default();

    let input = read_input(&args.inputs)?;
    let output = convert(&input, from, to, args.policy())?;

    if args.verbose {
        eprintln!(
            "iconv: {} -> {} ({}): read {} bytes, wrote {} bytes",
            from,
            to,
            args.policy(),
            input.len(),
            output.len()
        );
    }

    match &args.output {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            file.write_all(&output)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => io::stdout()
            .write_all(&output)
            .context("writing output")?,
    }

    Ok(())
}

fn convert(input: &[u8], from: &str, to: &str, policy: Policy) -> Result<Vec<u8>> {
    registry::transcode(input, from, to, policy)
        .with_context(|| format!("converting from {} to {}", from, to))
}

fn read_input(paths: &[PathBuf]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if paths.is_empty() {
        io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }

    for path in paths {
        let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        file.read_to_end(&mut buf)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    Ok(buf)
}

fn list_encodings() -> String {
    let mut listing = String::new();
    for form in [FormKind::Utf8, FormKind::Utf16, FormKind::Utf32] {
        let mut names: Vec<_> = registry::encodings()
            .filter(|enc| enc.form() == form)
            .map(|enc| enc.name())
            .collect();
        if names.is_empty() {
            continue;
        }
        names.sort_unstable();

        listing.push_str(&format!("{}:\n", form));
        for name in names {
            listing.push_str(&format!("  {}\n", name));
        }
    }
    listing
}

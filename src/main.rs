use clap::Parser;
use clap::error::ErrorKind;
use highlight::Highlighter;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

mod cli;

use cli::Cli;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug)]
enum CliError {
    Args(clap::Error),
    Read { path: String, source: io::Error },
    Write(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Args(err) => write!(f, "{}", err.to_string().trim_end()),
            CliError::Read { path, source } => write!(f, "failed to read {path}: {source}"),
            CliError::Write(source) => write!(f, "failed to write output: {source}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Args(err) => Some(err),
            CliError::Read { source, .. } | CliError::Write(source) => Some(source),
        }
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::Read {
        path: path.display().to_string(),
        source,
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(read_err)
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = read_input(&cli.input)?;
    let mut dom = html::parse_document(&input);
    log::debug!(target: "textmark", "parsed {} bytes from {}", input.len(), cli.input.display());

    let highlighter = Highlighter::new(cli.config());
    if cli.remove {
        highlighter.remove_highlight(&mut dom, &cli.class_name);
    } else {
        highlighter.highlight_text(&mut dom, &cli.options());
    }

    let mut out = io::stdout().lock();
    out.write_all(html::serialize::to_html(&dom).as_bytes())
        .and_then(|()| out.write_all(b"\n"))
        .and_then(|()| out.flush())
        .map_err(CliError::Write)
}

fn main() -> ExitCode {
    env_logger::init();
    let result = Cli::try_parse()
        .or_else(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => Err(CliError::Args(err)),
        })
        .and_then(|cli| run(&cli));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!(target: "textmark", "{err}");
            eprintln!("textmark: {err}");
            ExitCode::FAILURE
        }
    }
}

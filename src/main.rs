// rath: parse rath source and print its syntax tree

mod args;

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use rath::{optimizer, Parser, SourceFile};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::Args;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error: could not read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Error: could not read standard input: {0}")]
    Stdin(io::Error),
    #[error(transparent)]
    Compile(#[from] rath::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(args.log_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    for source in collect_sources(args)? {
        compile(args, &source)?;
    }
    Ok(())
}

/// Files first, then `-e` snippets; standard input when neither is given
fn collect_sources(args: &Args) -> Result<Vec<SourceFile>, CliError> {
    let mut sources = Vec::new();

    for path in &args.files {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        sources.push(SourceFile::new(path.display().to_string(), text));
    }

    for snippet in &args.snippets {
        sources.push(SourceFile::new("<eval>", snippet.as_str()));
    }

    if sources.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(CliError::Stdin)?;
        sources.push(SourceFile::new("<stdin>", text));
    }

    Ok(sources)
}

fn compile(args: &Args, source: &SourceFile) -> Result<(), CliError> {
    let mut parser = Parser::with_config(source, args.parser_config())?;
    let mut tree = parser.parse()?;

    if !args.no_fold {
        tree = tree.map(|tree| optimizer::fold(tree, source)).transpose()?;
    } else {
        debug!(file = source.name(), "constant folding disabled");
    }

    match tree {
        Some(tree) => println!("{}", tree),
        None => info!(file = source.name(), "no statements"),
    }
    Ok(())
}

//! Command-line arguments for the `rath` binary

use clap::{value_parser, ArgAction};
use rath::parser::DEFAULT_MAX_DEPTH;
use rath::ParserConfig;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Parses rath source and prints its syntax tree"
)]
pub struct Args {
    /// Source files to parse. Standard input is read when no file or
    /// snippet is given.
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Parse a source snippet given on the command line
    #[clap(short = 'e', long = "eval", value_name = "SOURCE")]
    pub snippets: Vec<String>,

    /// Print the tree as parsed, without constant folding
    #[clap(long)]
    pub no_fold: bool,

    /// Maximum expression nesting depth
    #[clap(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=1), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl Args {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default().with_max_depth(self.max_depth)
    }

    /// Level from `-v[v]` or `-q`; `RUST_LOG` still takes precedence.
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-1 => LevelFilter::OFF,
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from("rath a.rath b.rath --no-fold".split(' '))
            .expect("could not parse test string");
        assert_eq!(args.files[0], Path::new("a.rath"));
        assert_eq!(args.files.len(), 2);
        assert!(args.no_fold);
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(args.log_level_filter(), LevelFilter::WARN);
    }

    #[test]
    fn test_snippets_and_depth() {
        let args = Args::try_parse_from(["rath", "-e", "1 + 2", "-e", "x", "--max-depth", "16", "-vv"])
            .expect("could not parse test string");
        assert!(args.files.is_empty());
        assert_eq!(args.snippets, vec!["1 + 2", "x"]);
        assert_eq!(args.parser_config().max_depth, 16);
        assert_eq!(args.log_level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["rath", "-v", "-q"]).is_err());
    }
}

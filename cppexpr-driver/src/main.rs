//! C++ Expression Parser Driver
//!
//! Command-line front end for the expression parser: parse expressions
//! given inline, from a file or from stdin, and print the resulting trees
//! or the token stream.

use clap::{Parser, Subcommand, ValueEnum};
use cppexpr_common::{CompilerError, ErrorReporter, SourceLocation};
use cppexpr_frontend::{to_json, Expression, Frontend, NodeCounter, ParserConfig, ParsingContext, Token};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cppexpr")]
#[command(about = "C++ expression parser")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and print its tree
    Parse {
        /// File holding the expression; stdin when neither this nor --expr is given
        input: Option<PathBuf>,

        /// Expression text given on the command line
        #[arg(short, long)]
        expr: Option<String>,

        /// How to print the tree
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Sexpr)]
        format: OutputFormat,

        /// Start as if inside a template argument list
        #[arg(long)]
        template_arguments: bool,

        /// Override the nesting limit
        #[arg(long)]
        max_depth: Option<usize>,

        /// JSON parser configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Treat every non-empty line as a separate expression
        #[arg(long)]
        lines: bool,

        /// Print node counts to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Print the token stream the parser would see
    Tokens {
        /// File to tokenize; stdin when neither this nor --expr is given
        input: Option<PathBuf>,

        /// Text given on the command line
        #[arg(short, long)]
        expr: Option<String>,

        /// Emit JSON instead of one token per line
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Re-printed C++ source
    Source,
    /// Prefix notation, one node per parenthesis
    Sexpr,
    /// Serialized tree
    Json,
    /// Rust debug representation
    Debug,
}

/// One token row of `cppexpr tokens --json`
#[derive(Debug, Serialize)]
struct TokenRow {
    token: String,
    line: u32,
    column: u32,
    offset: usize,
}

impl From<&Token> for TokenRow {
    fn from(token: &Token) -> Self {
        Self {
            token: token.token_type.to_string(),
            line: token.span.start.line,
            column: token.span.start.column,
            offset: token.span.start.offset,
        }
    }
}

struct ParseOptions {
    format: OutputFormat,
    config: ParserConfig,
    template_arguments: bool,
    lines: bool,
    stats: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            expr,
            format,
            template_arguments,
            max_depth,
            config,
            lines,
            stats,
        } => load_config(config.as_deref(), max_depth).and_then(|config| {
            let options = ParseOptions {
                format,
                config,
                template_arguments,
                lines,
                stats,
            };
            parse_command(input.as_deref(), expr, &options)
        }),
        Commands::Tokens { input, expr, json } => tokens_command(input.as_deref(), expr, json).map(|()| true),
    };

    match result {
        Ok(true) => {}
        // Diagnostics are already on stderr
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Configuration file first, then command-line overrides
fn load_config(path: Option<&Path>, max_depth: Option<usize>) -> Result<ParserConfig, CompilerError> {
    let mut config = match path {
        Some(path) => {
            info!("loading parser configuration from {}", path.display());
            ParserConfig::load(path)?
        }
        None => ParserConfig::default(),
    };
    if let Some(max_depth) = max_depth {
        config.max_depth = max_depth;
    }
    Ok(config.validated())
}

/// The text to work on and the name used in locations
fn read_source(input: Option<&Path>, expr: Option<String>) -> Result<(String, String), CompilerError> {
    if let Some(expr) = expr {
        return Ok((expr, "<command-line>".to_string()));
    }
    match input {
        Some(path) => {
            info!("reading {}", path.display());
            Ok((fs::read_to_string(path)?, path.display().to_string()))
        }
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok((source, "<stdin>".to_string()))
        }
    }
}

fn render(expr: &Expression, format: OutputFormat) -> Result<String, CompilerError> {
    match format {
        OutputFormat::Source => Ok(expr.to_string()),
        OutputFormat::Sexpr => Ok(expr.to_sexpr()),
        OutputFormat::Json => to_json(expr),
        OutputFormat::Debug => Ok(format!("{:#?}", expr)),
    }
}

fn parse_one(source: &str, start: SourceLocation, options: &ParseOptions) -> Result<Expression, CompilerError> {
    let context = if options.template_arguments {
        ParsingContext::in_template_arguments()
    } else {
        ParsingContext::new()
    };
    Frontend::parse_expression_at(source, start, options.config.clone(), context)
}

/// Every non-empty line with the location of its first character
fn split_lines<'a>(source: &'a str, filename: &str) -> Vec<(SourceLocation, &'a str)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);
        if !line.trim().is_empty() {
            lines.push((SourceLocation::new(filename, index as u32 + 1, 1, offset), line));
        }
        offset += raw.len();
    }
    lines
}

/// Parse and print every expression; `Ok(false)` when any of them failed
fn parse_command(input: Option<&Path>, expr: Option<String>, options: &ParseOptions) -> Result<bool, CompilerError> {
    let (source, filename) = read_source(input, expr)?;

    let expressions = if options.lines {
        split_lines(&source, &filename)
    } else {
        vec![(SourceLocation::new(&filename, 1, 1, 0), source.as_str())]
    };
    debug!("parsing {} expression(s) from {}", expressions.len(), filename);

    let mut reporter = ErrorReporter::new();
    for (start, text) in expressions {
        match parse_one(text, start, options) {
            Ok(expr) => {
                println!("{}", render(&expr, options.format)?);
                if options.stats {
                    let counts = NodeCounter::count(&expr);
                    eprintln!(
                        "{} expressions, {} type-ids, {} names",
                        counts.expressions, counts.type_ids, counts.names
                    );
                }
            }
            Err(err) => {
                reporter.report(&err);
            }
        }
    }

    if reporter.has_errors() {
        reporter.print_diagnostics();
        eprintln!("{}", reporter.summary());
        return Ok(false);
    }
    Ok(true)
}

fn tokens_command(input: Option<&Path>, expr: Option<String>, json: bool) -> Result<(), CompilerError> {
    let (source, filename) = read_source(input, expr)?;
    let tokens = Frontend::tokenize_source(&source, &filename)?;

    if json {
        let rows: Vec<TokenRow> = tokens.iter().map(TokenRow::from).collect();
        let text = serde_json::to_string_pretty(&rows).map_err(|e| CompilerError::InternalError {
            message: format!("failed to serialize tokens: {e}"),
        })?;
        println!("{}", text);
    } else {
        for token in &tokens {
            println!("{}\t{}", token.span.start, token.token_type);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(format: OutputFormat) -> ParseOptions {
        ParseOptions {
            format,
            config: ParserConfig::default(),
            template_arguments: false,
            lines: false,
            stats: false,
        }
    }

    fn start() -> SourceLocation {
        SourceLocation::new("test.cpp", 1, 1, 0)
    }

    #[test]
    fn test_render_formats() {
        let expr = parse_one("a+b*c", start(), &options(OutputFormat::Sexpr)).unwrap();
        assert_eq!(render(&expr, OutputFormat::Sexpr).unwrap(), "(+ a (* b c))");
        assert_eq!(render(&expr, OutputFormat::Source).unwrap(), "a + b * c");
        assert!(render(&expr, OutputFormat::Json).unwrap().contains("\"Binary\""));
    }

    #[test]
    fn test_template_argument_option() {
        let mut opts = options(OutputFormat::Sexpr);
        assert!(parse_one("a > b", start(), &opts).is_ok());
        opts.template_arguments = true;
        assert!(parse_one("a > b", start(), &opts).is_err());
    }

    #[test]
    fn test_command_line_overrides_depth() {
        let config = load_config(None, Some(16)).unwrap();
        assert_eq!(config.max_depth, 16);
        assert!(config.memoize);
    }

    #[test]
    fn test_inline_expression_source() {
        let (source, filename) = read_source(None, Some("x".to_string())).unwrap();
        assert_eq!(source, "x");
        assert_eq!(filename, "<command-line>");
    }

    #[test]
    fn test_split_lines_keeps_file_positions() {
        let lines = split_lines("a + b\r\n\n  \nf(x\n", "exprs.txt");
        let texts: Vec<&str> = lines.iter().map(|(_, text)| *text).collect();
        assert_eq!(texts, vec!["a + b", "f(x"]);
        assert_eq!(lines[1].0, SourceLocation::new("exprs.txt", 4, 1, 11));
    }

    #[test]
    fn test_lines_report_the_failing_line() {
        let (start, text) = split_lines("a\nb\nc +\n", "exprs.txt").remove(2);
        match parse_one(text, start, &options(OutputFormat::Sexpr)).unwrap_err() {
            CompilerError::ParseError { span, .. } => {
                assert_eq!(span.start.line, 3);
                assert_eq!(span.start.offset, 7);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_parse_is_not_an_internal_error() {
        let mut opts = options(OutputFormat::Sexpr);
        assert!(parse_command(None, Some("a + b".to_string()), &opts).unwrap());
        assert!(!parse_command(None, Some("a +".to_string()), &opts).unwrap());
        opts.lines = true;
        assert!(!parse_command(None, Some("a\nb +".to_string()), &opts).unwrap());
    }

    #[test]
    fn test_token_rows() {
        let tokens = Frontend::tokenize_source("a >> b", "test.cpp").unwrap();
        let rows: Vec<TokenRow> = tokens.iter().map(TokenRow::from).collect();
        let kinds: Vec<&str> = rows.iter().map(|row| row.token.as_str()).collect();
        assert_eq!(kinds, vec!["a", ">", ">", "b", "end of input"]);
        assert_eq!(rows[2].offset, 3);
    }
}

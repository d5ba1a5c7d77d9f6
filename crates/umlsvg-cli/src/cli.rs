//! Command-line interface for the umlsvg utility
//!
//! Reads PlantUML class diagram source, reports diagnostics and writes SVG.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use umlsvg::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use umlsvg::core::{Diagnostic, PipelineOptions, RenderConfig};
use umlsvg::plugins::class::{scan, Token};
use umlsvg::plugins::Orchestrator;

/// umlsvg - Compile PlantUML class diagrams to SVG
#[derive(Parser)]
#[command(name = "umlsvg")]
#[command(about = "Compile PlantUML class diagrams into SVG images")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a class diagram to SVG
    Render {
        /// Input file containing the class diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the SVG image (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Refuse to render diagrams with semantic diagnostics
        #[arg(long)]
        strict: bool,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Check a class diagram and report diagnostics without rendering
    Check {
        /// Input file to check (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Also fail on recovered lexical and syntax diagnostics
        #[arg(long)]
        strict: bool,
    },

    /// Print the token stream of a class diagram
    Tokens {
        /// Input file to scan (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// One token as printed by the `tokens` command
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenRecord {
    pub kind: String,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        Self {
            kind: format!("{:?}", token.kind),
            lexeme: token.lexeme.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct UmlSvgApp;

impl UmlSvgApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("umlsvg v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                strict,
                width,
                height,
            } => self.render_command(input, output, strict, width, height, cli.verbose),
            Commands::Check { input, strict } => self.check_command(input, strict, cli.verbose),
            Commands::Tokens { input, json } => self.tokens_command(input, json, cli.verbose),
        }
    }

    fn build_config(width: Option<u32>, height: Option<u32>) -> RenderConfig {
        let defaults = RenderConfig::default();
        match (width, height) {
            (None, None) => defaults,
            (w, h) => defaults.with_canvas(w.unwrap_or(defaults.width), h.unwrap_or(defaults.height)),
        }
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        strict: bool,
        width: Option<u32>,
        height: Option<u32>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let orchestrator = Orchestrator::with_config(Self::build_config(width, height))
            .with_options(PipelineOptions { strict });
        let compilation = orchestrator.process(&content)?;
        Self::report(&compilation.diagnostics);

        let svg = compilation
            .svg
            .ok_or_else(|| anyhow!("pipeline produced no SVG output"))?;

        if verbose {
            eprintln!(
                "Rendered {} classes and {} relationships",
                compilation.diagram.class_count(),
                compilation.diagram.relationship_count()
            );
        }

        self.write_output(output, &svg)
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, strict: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let compilation = match Orchestrator::new().compile(&content) {
            Ok(compilation) => compilation,
            Err(e) => {
                println!("✗ Invalid class diagram: {}", e);
                return Err(e.into());
            }
        };

        for diagnostic in &compilation.diagnostics {
            println!("{}: {}", diagnostic.stage(), diagnostic);
        }

        let failing = if strict {
            compilation.diagnostics.len()
        } else {
            compilation.semantic_count()
        };
        debug!(failing, strict, "Check completed");

        if failing > 0 {
            println!("✗ {} problem(s) found", failing);
            return Err(anyhow!("class diagram has {} problem(s)", failing));
        }

        println!(
            "✓ Valid class diagram ({} classes, {} relationships)",
            compilation.diagram.class_count(),
            compilation.diagram.relationship_count()
        );
        Ok(())
    }

    /// Handle the tokens command
    fn tokens_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let scanned = scan(&content);

        if verbose {
            eprintln!("Scanned {} tokens", scanned.tokens.len());
        }
        Self::report(&scanned.diagnostics);

        let listing = Self::format_tokens(&scanned.tokens, json)?;
        self.write_output(None, &listing)
    }

    /// Token listing as JSON or as one `line:column kind lexeme` row per token
    pub fn format_tokens(tokens: &[Token], json: bool) -> Result<String> {
        if json {
            let records: Vec<TokenRecord> = tokens.iter().map(TokenRecord::from).collect();
            return Ok(serde_json::to_string_pretty(&records)?);
        }

        Ok(tokens
            .iter()
            .map(|t| format!("{}:{}\t{:?}\t{:?}", t.line, t.column, t.kind, t.lexeme))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn report(diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            eprintln!("warning: {}", diagnostic);
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                write!(stdout, "{}", content)?;
                if !content.is_empty() && !content.ends_with('\n') {
                    writeln!(stdout)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const VALID: &str = "@startuml\nclass A\nclass B\nA --> B : uses\n@enduml\n";

    fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec![
            "umlsvg",
            "render",
            "--input",
            "diagram.puml",
            "--output",
            "diagram.svg",
            "--strict",
            "--width",
            "800",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                input,
                output,
                strict,
                width,
                height,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "diagram.puml");
                assert_eq!(output.unwrap().to_string_lossy(), "diagram.svg");
                assert!(strict);
                assert_eq!(width, Some(800));
                assert_eq!(height, None);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_command() {
        let cli = Cli::try_parse_from(vec!["umlsvg", "check"]).unwrap();

        match cli.command {
            Commands::Check { input, strict } => {
                assert!(input.is_none());
                assert!(!strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parsing_tokens_command() {
        let cli = Cli::try_parse_from(vec!["umlsvg", "tokens", "--json", "-i", "-"]).unwrap();

        match cli.command {
            Commands::Tokens { input, json } => {
                assert!(json);
                assert_eq!(input.unwrap().to_string_lossy(), "-");
            }
            _ => panic!("Expected Tokens command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(vec![
            "umlsvg",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "check",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_build_config() {
        assert_eq!(UmlSvgApp::build_config(None, None), RenderConfig::default());

        let config = UmlSvgApp::build_config(Some(700), None);
        assert_eq!(config.width, 700);
        assert_eq!(config.height, 1200);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempdir().unwrap();
        let path = write_source(&dir, "diagram.puml", VALID);

        let content = UmlSvgApp::new().read_input(Some(path)).unwrap();
        assert_eq!(content, VALID);
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempdir().unwrap();
        let err = UmlSvgApp::new()
            .read_input(Some(dir.path().join("missing.puml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.svg");

        UmlSvgApp::new().write_output(Some(path.clone()), "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_render_command_writes_svg() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", VALID);
        let output = dir.path().join("diagram.svg");

        UmlSvgApp::new()
            .render_command(Some(input), Some(output.clone()), false, Some(900), Some(700), false)
            .unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"900\""));
        assert!(svg.contains("uses"));
    }

    #[test]
    fn test_render_command_strict_rejects() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", "@startuml\nA --> B\n@enduml\n");
        let output = dir.path().join("diagram.svg");

        let result = UmlSvgApp::new().render_command(
            Some(input),
            Some(output.clone()),
            true,
            None,
            None,
            false,
        );

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_render_command_non_strict_proceeds() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", "@startuml\nA --> B\n@enduml\n");
        let output = dir.path().join("diagram.svg");

        UmlSvgApp::new()
            .render_command(Some(input), Some(output.clone()), false, None, None, false)
            .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_check_command_valid() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", VALID);
        assert!(UmlSvgApp::new().check_command(Some(input), false, false).is_ok());
    }

    #[test]
    fn test_check_command_semantic_failure() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", "@startuml\nclass A\nclass A\n@enduml\n");
        assert!(UmlSvgApp::new().check_command(Some(input), false, false).is_err());
    }

    #[test]
    fn test_check_command_syntax_failure() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", "class A\n");
        assert!(UmlSvgApp::new().check_command(Some(input), false, false).is_err());
    }

    #[test]
    fn test_check_command_strict_counts_recovered_diagnostics() {
        let dir = tempdir().unwrap();
        let input = write_source(&dir, "diagram.puml", "@startuml\nclass A $\n@enduml\n");

        assert!(UmlSvgApp::new().check_command(Some(input.clone()), false, false).is_ok());
        assert!(UmlSvgApp::new().check_command(Some(input), true, false).is_err());
    }

    #[test]
    fn test_format_tokens_json() {
        let scanned = scan("class A");
        let listing = UmlSvgApp::format_tokens(&scanned.tokens, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&listing).unwrap();

        assert_eq!(value[0]["kind"], "Class");
        assert_eq!(value[1]["lexeme"], "A");
        assert_eq!(value[1]["column"], 7);
        assert_eq!(value[2]["kind"], "Eof");
    }

    #[test]
    fn test_format_tokens_plain() {
        let scanned = scan("A --> B");
        let listing = UmlSvgApp::format_tokens(&scanned.tokens, false).unwrap();
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1:3\tAssociation\t\"-->\"");
    }

    #[test]
    fn test_token_record_from_token() {
        let token = Token::new(umlsvg::plugins::class::TokenKind::Identifier, "Order", 2, 5);
        assert_eq!(
            TokenRecord::from(&token),
            TokenRecord {
                kind: "Identifier".to_string(),
                lexeme: "Order".to_string(),
                line: 2,
                column: 5,
            }
        );
    }
}

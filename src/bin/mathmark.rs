//! Command-line front end: render a file or stdin to an HTML fragment.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mathmark::{MathBackend, RenderConfig, Renderer};

/// Render text with inline `$...$` and block `$$...$$` math to safe HTML.
#[derive(Debug, Parser)]
#[command(name = "mathmark", version, about)]
struct Cli {
    /// Input file; reads stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(long, env = "MATHMARK_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Math backend: katex, mathjax, mathml or katex-html. Overrides the config file.
    #[arg(long, value_name = "NAME")]
    backend: Option<MathBackend>,

    /// Markup emitted for each newline. Overrides the config file.
    #[arg(long, value_name = "MARKUP")]
    line_break: Option<String>,

    /// Wrap the fragment in a complete HTML document with the backend's head content.
    #[arg(long)]
    standalone: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target = "mathmark::cli", error = %err, "render failed");
            eprintln!("mathmark: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> mathmark::Result<()> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(line_break) = &cli.line_break {
        config.line_break = line_break.clone();
    }

    let input = read_input(cli.input.as_ref())?;
    info!(
        target = "mathmark::cli",
        backend = %config.backend,
        bytes = input.len(),
        "rendering"
    );

    let renderer = Renderer::new(config);
    let fragment = renderer.render(&input);
    let html = if cli.standalone {
        standalone_document(&fragment, renderer.head_content().as_deref())
    } else {
        fragment
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn standalone_document(body: &str, head: Option<&str>) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{}\n</head>\n<body>\n{}\n</body>\n</html>",
        head.unwrap_or(""),
        body
    )
}

//! alg-to-img: turn cube algorithms into VisualCube images.
//!
//! This binary can run in two modes:
//! - CLI mode: print renderer URLs for algorithms, optionally downloading them
//! - Daemon mode: JSON-RPC server for editor and UI integration

use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context as _};
use tracing::debug;

use alg_to_img::cli::Cli;
use alg_to_img::config::AppConfig;
use alg_to_img::notation::sanitize;
use alg_to_img::package::package;
use alg_to_img::proxy::ImageFetcher;
use alg_to_img::rpc::{run_server, ServerState};
use alg_to_img::visualcube::generate_images;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let mut config = AppConfig::from_env();
    if let Some(ref renderer) = cli.renderer {
        config.renderer_url = renderer.clone();
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .with_target(false)
        .init();

    if let Some(problem) = config.validate() {
        bail!("invalid configuration: {}", problem);
    }

    if cli.is_daemon_mode() {
        run_daemon_mode(config)
    } else if cli.is_cli_mode() {
        run_cli_mode(&cli, &config)
    } else {
        print_usage();
        Ok(())
    }
}

/// Collects the raw algorithm text from `--alg` values and `--input`.
fn read_input(cli: &Cli) -> anyhow::Result<String> {
    let mut text = cli.algs.join("\n");

    if let Some(ref path) = cli.input {
        let content = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read algorithms from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read algorithms from {}", path.display()))?
        };
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&content);
    }

    Ok(text)
}

/// Runs the CLI mode.
fn run_cli_mode(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let options = cli.render_options();
    if let Some(problem) = options.validate() {
        bail!("invalid options: {}", problem);
    }

    let sanitized = sanitize(&read_input(cli)?);
    if sanitized.is_empty() {
        eprintln!("No valid algorithms in input.");
        return Ok(());
    }
    debug!(count = sanitized.algorithms.len(), "sanitized input");

    let images = generate_images(&config.renderer_url, &sanitized.algorithms, &options);
    for image in &images {
        println!("{}\t{}", image.alg, image.url);
    }

    if !cli.download {
        return Ok(());
    }

    let output_dir = cli.output_directory(config.effective_output_path());
    eprintln!();
    eprintln!("Downloading {} image(s) to {}", images.len(), output_dir.display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let fetcher = Arc::new(ImageFetcher::new(config.timeout())?);

    let artifact = runtime
        .block_on(package(fetcher, &images, config.max_concurrent))?
        .context("nothing to download")?;

    for skipped in artifact.skipped() {
        eprintln!(
            "  skipped #{} ({}): [{}] {}",
            skipped.position, skipped.alg, skipped.code, skipped.reason
        );
    }

    let path = artifact.write_to(&output_dir)?;
    eprintln!("Saved {} image(s) to: {}", artifact.entries(), path.display());

    Ok(())
}

/// Runs the daemon mode (JSON-RPC server).
fn run_daemon_mode(config: AppConfig) -> anyhow::Result<()> {
    eprintln!("=== alg-to-img JSON-RPC Server ===");
    eprintln!("Reading from stdin, writing to stdout.");
    eprintln!("Renderer: {}", config.renderer_url);
    eprintln!("Session: {}", config.effective_session_path().display());
    eprintln!();

    let state = ServerState::new(config)?;
    run_server(state)?;
    Ok(())
}

/// Prints usage information.
fn print_usage() {
    eprintln!("alg-to-img: render cube algorithms as VisualCube images");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  Print image URLs:");
    eprintln!("    alg-to-img --alg \"R U R' U'\" --alg \"F2 B2\" --top-color white --stage oll");
    eprintln!();
    eprintln!("  Download images (alg.png or alg-imgs.zip):");
    eprintln!("    alg-to-img --input algs.txt --size 512 --download --output ./imgs");
    eprintln!();
    eprintln!("  Daemon mode (JSON-RPC server):");
    eprintln!("    alg-to-img --daemon");
    eprintln!();
    eprintln!("Run 'alg-to-img --help' for full options.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_usage_doesnt_panic() {
        print_usage();
    }
}

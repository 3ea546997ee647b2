use clap::{Parser, Subcommand};
use simple_folio::{config, generate, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "One-page photography portfolio generator")]
#[command(long_about = "\
One-page photography portfolio generator

Builds a single static page with a rotating hero slideshow, a photo grid
with a lightbox viewer, and about/contact sections. The hero list, the
gallery and all copy live in config.toml.

Content structure:

  content/
  ├── config.toml        # Site config: [site], [hero], [[gallery]], [about], [contact], [colors]
  ├── about.md           # About section (optional; falls back to [about] paragraphs)
  └── assets/            # Images and other files → copied to the output root

Hosting under a sub-path (e.g. GitHub project pages):
  site.base_path in config.toml < SIMPLE_FOLIO_BASE_PATH < --base-path

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".simple-folio-temp", global = true)]
    temp_dir: PathBuf,

    /// Sub-path the site is served from (overrides config and environment)
    #[arg(long, global = true)]
    base_path: Option<String>,

    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let env_base_path = std::env::var(config::BASE_PATH_ENV).ok();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source, cli.base_path.as_deref(), env_base_path.as_deref())?;
            write_manifest(&cli.temp_dir, &manifest)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let mut manifest = generate::load_manifest(&manifest_path)?;
            config::apply_base_path_override(
                &mut manifest.config,
                cli.base_path.as_deref(),
                env_base_path.as_deref(),
            )?;
            let report = generate::generate_site(
                &manifest,
                &cli.source,
                &cli.output,
                generate::BuildClock::now(),
            )?;
            output::print_generate_output(&manifest, &report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source, cli.base_path.as_deref(), env_base_path.as_deref())?;
            write_manifest(&cli.temp_dir, &manifest)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate_site(
                &manifest,
                &cli.source,
                &cli.output,
                generate::BuildClock::now(),
            )?;
            output::print_generate_output(&manifest, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source, cli.base_path.as_deref(), env_base_path.as_deref())?;
            output::print_scan_output(&manifest, &cli.source);
            if manifest.missing_images.is_empty() {
                println!("==> Content is valid");
            } else {
                println!(
                    "==> Content is valid ({} missing images will show the placeholder)",
                    manifest.missing_images.len()
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn write_manifest(
    temp_dir: &Path,
    manifest: &simple_folio::types::Manifest,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    log::debug!("wrote {}", manifest_path.display());
    Ok(manifest_path)
}

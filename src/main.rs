use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use termdown::Config;

#[derive(Parser)]
#[command(name = "termdown")]
#[command(about = "Render concept definitions with links to related concepts")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// JSON file with the related concepts links resolve against
    #[arg(short, long)]
    concepts: Option<PathBuf>,

    /// Display language (overrides the config)
    #[arg(short, long)]
    lang: Option<String>,

    /// Config file
    #[arg(long, default_value = "termdown.toml")]
    config: PathBuf,

    /// Output HTML file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing config file is normal; an invalid one is reported once logging is up
    let (mut config, config_error) = match Config::load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::compiled_default(), Some(e)),
    };
    if let Some(lang) = cli.lang {
        config.language.active = lang;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = config_error {
        tracing::warn!(path = %cli.config.display(), "ignoring config: {e}");
    }

    // Read input file
    let markdown = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let concepts = match &cli.concepts {
        Some(path) => termdown::load_concepts(path)?,
        None => Vec::new(),
    };

    let html = termdown::markdown_links_to_html(&markdown, &concepts, &config);

    match cli.output {
        Some(output) => {
            fs::write(&output, html).with_context(|| format!("writing {}", output.display()))?;
            tracing::info!("created {}", output.display());
        }
        None => println!("{html}"),
    }

    Ok(())
}

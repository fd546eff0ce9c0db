use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use code_frontmatter::{CodeFrontmatter, config::ExtractConfig, mdast, pipeline::Processor};
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Json,
    Html,
}

#[derive(Parser)]
struct Opts {
    /// Markdown document to process
    input: PathBuf,
    #[clap(short, long, env = "CODE_FRONTMATTER_CONFIG")]
    config: Option<PathBuf>,
    #[clap(short, long, value_enum, default_value_t = Output::Json)]
    output: Output,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ExtractConfig> {
    let Some(path) = path else {
        return Ok(ExtractConfig::default());
    };
    let config = std::fs::read_to_string(path).with_context(|| "read config")?;
    let config: ExtractConfig = serde_yaml::from_str(&config)
        .with_context(|| format!("parse config from {}", path.display()))?;
    config.validate().map_err(|msg| anyhow!("{msg}"))?;
    Ok(config)
}

fn run(opts: Opts) -> anyhow::Result<()> {
    let config = load_config(opts.config.as_ref())?;
    let src = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("read {}", opts.input.display()))?;
    let processor = Processor::new().with(CodeFrontmatter::new(config));
    let tree = processor
        .process(&src)
        .with_context(|| format!("process {}", opts.input.display()))?;
    let blocks = mdast::code_blocks(&tree);
    info!(
        blocks = blocks.len(),
        with_frontmatter = blocks.iter().filter(|b| b.frontmatter.is_some()).count(),
        "processed document"
    );
    match opts.output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
        Output::Html => print!("{}", mdast::to_html(&tree)),
    }
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(opts) {
        error!(?e, "critical error");
        std::process::exit(1);
    }
}

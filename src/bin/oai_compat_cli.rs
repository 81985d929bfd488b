//! oai-compat-cli - OpenAI 兼容方言调试工具
//!
//! Usage:
//!   oai-compat-cli models <dialect>                    List models
//!   oai-compat-cli chat <dialect> <model> <prompt>     One chat completion
//!   oai-compat-cli image <dialect> <prompt>            Generate one dall-e-3 image
//!   oai-compat-cli moderate <dialect> <text>           Moderate text

use ai_lib_openai_compat::{
    AccessConfig, ChatGenerateRequest, ChatHistoryEntry, ChatModel, CompatClient, Dialect,
    ImageModel, ImageRequest,
};
use anyhow::{bail, Context};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!(
        r#"oai-compat-cli - OpenAI 兼容方言调试工具

USAGE:
    oai-compat-cli <COMMAND> [ARGS] [OPTIONS]

COMMANDS:
    models <dialect>                   List models available to the dialect
    chat <dialect> <model> <prompt>    Run one chat completion
    image <dialect> <prompt>           Generate one image (dall-e-3)
    moderate <dialect> <text>          Moderate a piece of text
    version                            Show version information
    help                               Show this help message

OPTIONS:
    --key <api-key>                    API key (defaults to the dialect's env variable)
    --host <url>                       Host override

DIALECTS:
    azure, lmstudio, localai, mistral, oobabooga, openai, openrouter, togetherai

ENVIRONMENT:
    RUST_LOG                           Log filter (default: warn)"#
    );
}

/// Positional arguments with `--key`/`--host` pulled out.
struct Parsed {
    positional: Vec<String>,
    key: Option<String>,
    host: Option<String>,
}

fn parse(args: &[String]) -> anyhow::Result<Parsed> {
    let mut parsed = Parsed {
        positional: Vec::new(),
        key: None,
        host: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--key" => parsed.key = Some(iter.next().context("--key needs a value")?.clone()),
            "--host" => parsed.host = Some(iter.next().context("--host needs a value")?.clone()),
            _ => parsed.positional.push(arg.clone()),
        }
    }
    Ok(parsed)
}

fn access(parsed: &Parsed) -> anyhow::Result<AccessConfig> {
    let dialect: Dialect = parsed
        .positional
        .first()
        .context("missing <dialect>")?
        .parse()?;
    // the operator's own environment stands in for the shared server key
    let mut config = AccessConfig::new(dialect).use_shared_default_key(true);
    if let Some(key) = &parsed.key {
        config = config.with_api_key(key.clone());
    }
    if let Some(host) = &parsed.host {
        config = config.with_host(host.clone());
    }
    Ok(config)
}

fn arg(parsed: &Parsed, index: usize, name: &str) -> anyhow::Result<String> {
    parsed
        .positional
        .get(index)
        .cloned()
        .with_context(|| format!("missing <{}>", name))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        std::process::exit(1);
    };
    let parsed = parse(&args[2..])?;

    match command.as_str() {
        "version" | "--version" | "-V" => {
            println!("oai-compat-cli {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "models" | "chat" | "image" | "moderate" => {}
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }

    let client = CompatClient::builder().build()?;
    let config = access(&parsed)?;

    match command.as_str() {
        "models" => print_json(&client.list_models(&config).await?),
        "chat" => {
            let model = arg(&parsed, 1, "model")?;
            let prompt = arg(&parsed, 2, "prompt")?;
            let request =
                ChatGenerateRequest::new(ChatModel::new(model), vec![ChatHistoryEntry::user(prompt)]);
            print_json(&client.chat_generate(&config, &request).await?)
        }
        "image" => {
            let prompt = arg(&parsed, 1, "prompt")?;
            let request = ImageRequest::new(prompt, ImageModel::DallE3);
            print_json(&client.create_images(&config, &request).await?)
        }
        "moderate" => {
            let text = arg(&parsed, 1, "text")?;
            print_json(&client.moderate(&config, &text).await?)
        }
        other => bail!("unknown command: {other}"),
    }
}

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use promptgate::client::ImageMimeType;
use promptgate::client::gemini::GeminiClient;
use promptgate::consts::{
    AUTHOR, DEFAULT_HOST, DEFAULT_IMAGE_INSTRUCTION, DEFAULT_IMAGE_LOCATOR, DEFAULT_MODEL,
    DEFAULT_PORT,
};
use promptgate::dispatch::{DispatchConfig, Dispatcher};
use promptgate::server;
use promptgate::source::FsByteSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MimeArg {
    Jpeg,
    Png,
    Webp,
    Heic,
    Heif,
}

impl From<MimeArg> for ImageMimeType {
    fn from(arg: MimeArg) -> Self {
        match arg {
            MimeArg::Jpeg => ImageMimeType::Jpeg,
            MimeArg::Png => ImageMimeType::Png,
            MimeArg::Webp => ImageMimeType::Webp,
            MimeArg::Heic => ImageMimeType::Heic,
            MimeArg::Heif => ImageMimeType::Heif,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "promptgate",
    version,
    author = AUTHOR,
    about = "Prompt dispatch in front of Gemini."
)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "PROMPTGATE_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PROMPTGATE_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Gemini model name
    #[arg(short, long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Override the Gemini API root
    #[arg(long, env = "GEMINI_BASE_URL")]
    base_url: Option<String>,

    /// Image sent with every image prompt
    #[arg(long, env = "PROMPTGATE_IMAGE_PATH", default_value = DEFAULT_IMAGE_LOCATOR)]
    image_path: String,

    /// Instruction sent alongside the image
    #[arg(long, default_value = DEFAULT_IMAGE_INSTRUCTION)]
    image_instruction: String,

    /// Encoding of the image file
    #[arg(long, value_enum, default_value_t = MimeArg::Jpeg)]
    image_mime: MimeArg,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut client = GeminiClient::new(cli.api_key, Some(cli.model));
    if let Some(base_url) = cli.base_url {
        client = client.with_base_url(base_url);
    }

    let config = DispatchConfig {
        image_locator: cli.image_path,
        image_instruction: cli.image_instruction,
        image_mime: cli.image_mime.into(),
    };

    tracing::info!(
        model = client.model(),
        image = %config.image_locator,
        "dispatcher ready"
    );

    let dispatcher = Dispatcher::new(Arc::new(client), Arc::new(FsByteSource), config);
    let app = server::router(dispatcher);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

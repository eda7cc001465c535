use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use nl_core::{NewsletterBuilder, NewsletterStore, OutputLayout};
use nl_scrappers::{ArticleImageFetcher, FetchConfig, RssFeedSource};
use tracing::info;

mod logging;

const DEFAULT_FEED_URL: &str = "https://rss-feed-aggrigator.onrender.com/rss";

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds a Markdown newsletter from an RSS feed", long_about = None)]
pub struct Cli {
    /// RSS or Atom feed to read entries from
    #[arg(long, env = "NEWSLETTER_FEED_URL", default_value = DEFAULT_FEED_URL)]
    feed_url: String,
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Directory holding newsletter.md and images/
    #[arg(long, env = "NEWSLETTER_OUTPUT_DIR", default_value = "newsletter_output")]
    output_dir: PathBuf,
    #[arg(long, default_value = "file", help = "Where to keep the newsletter. Available backends: file (default), memory")]
    storage: String,
    #[arg(long, default_value = nl_inference::DEFAULT_MODEL, help = "Model to use for inference. Available models: mistral (default), dummy")]
    model: String,
    #[arg(long, default_value = nl_inference::DEFAULT_MODEL_NAME)]
    model_name: String,
    #[arg(long, default_value = nl_inference::DEFAULT_BASE_URL)]
    model_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the generate/download HTTP endpoints
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
    /// Run the pipeline once and save the result
    Generate {
        /// Print the run report as JSON
        #[arg(long)]
        report: bool,
    },
}

struct Components {
    builder: Arc<NewsletterBuilder>,
    store: Arc<dyn NewsletterStore>,
}

fn build_components(cli: &Cli) -> anyhow::Result<Components> {
    let model = nl_inference::create_model(nl_inference::Config {
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
        model_name: cli.model_name.clone(),
        base_url: cli.model_url.clone(),
    })?;
    info!("🧠 Inference model initialized (using {})", model.name());

    let layout = OutputLayout::new(&cli.output_dir);
    layout
        .ensure()
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

    let store = nl_storage::create_store(&cli.storage, &layout)?;
    info!("💾 Storage initialized (using {})", store.location());

    let fetch_config = FetchConfig::default();
    let feed = Arc::new(RssFeedSource::new(&cli.feed_url, &fetch_config)?);
    let images = Arc::new(ArticleImageFetcher::new(layout.clone(), &fetch_config)?);
    info!("🦗 Feed source ready: {}", cli.feed_url);

    Ok(Components {
        builder: Arc::new(NewsletterBuilder::new(feed, images, model, layout)),
        store,
    })
}

async fn serve(components: Components, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;

    let app = nl_web::create_app(nl_web::AppState::new(components.builder, components.store));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn generate(components: Components, print_report: bool) -> anyhow::Result<()> {
    let newsletter = components.builder.generate().await?;
    components
        .store
        .save(&newsletter.content)
        .await
        .context("Failed to save the newsletter")?;

    info!(
        "✨ Newsletter generated successfully ({} sections, {} degraded)",
        newsletter.report.entries.len(),
        newsletter.report.degraded_count()
    );
    if print_report {
        println!("{}", serde_json::to_string_pretty(&newsletter.report)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();
    let components = build_components(&cli)?;

    match cli.command {
        Commands::Serve { ref host, port } => serve(components, host, port).await,
        Commands::Generate { report } => generate(components, report).await,
    }
}

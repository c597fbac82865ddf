use anyhow::{bail, Context, Result};
use chartwise::advisor::{AdvisorClient, ChartAdvisor, GeminiProvider, StaticAdvisor};
use chartwise::config::{ProxyConfig, API_KEY_ENV, DEFAULT_ADDR, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use chartwise::parser::parse_pointer;
use chartwise::runtime;
use chartwise::server::{self, ProxyState};
use chartwise::session::{ChartView, Phase, Session};
use chartwise::{OutputFormat, RenderOptions};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chartwise")]
#[command(about = "Ask an LLM which chart fits a CSV file, then draw it", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the chart-type proxy (POST /api/getChartType)
    Serve(ServeArgs),
    /// Upload a CSV file, get a suggestion and render the chart
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "CHARTWISE_ADDR", default_value = DEFAULT_ADDR)]
    addr: SocketAddr,

    /// LLM provider credential
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier sent to the provider
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Provider base URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    provider_url: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// CSV file to upload, or '-' to read stdin
    input: String,

    /// Column used for labels (x axis, wedge names)
    #[arg(long)]
    label: Option<String>,

    /// Column used for values
    #[arg(long)]
    value: Option<String>,

    /// Draw this chart type instead of asking the advisor
    #[arg(long)]
    chart_type: Option<String>,

    /// Base URL of a running chart-type proxy
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    advisor_url: String,

    #[arg(long, value_enum, default_value = "svg")]
    format: OutputFormat,

    /// Canvas width in pixels (default depends on chart type)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (default depends on chart type)
    #[arg(long)]
    height: Option<u32>,

    /// Write the chart here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pointer position "X,Y" to render the hover state at
    #[arg(long, value_parser = parse_pointer)]
    hover: Option<(f64, f64)>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Render(args) => render(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let config = ProxyConfig {
        model: args.model,
        api_key: None,
        endpoint: args.provider_url,
    }
    .with_api_key(args.api_key);

    if config.api_key.is_none() {
        warn!("{} is not set; every chart-type request will fail", API_KEY_ENV);
    }

    let state = Arc::new(ProxyState {
        provider: Arc::new(GeminiProvider::new(&config)),
        model: config.model.clone(),
    });
    server::serve(args.addr, state).await
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read CSV from stdin")?;
        Ok(bytes)
    } else {
        std::fs::read(input).with_context(|| format!("Failed to read CSV file '{}'", input))
    }
}

async fn render(args: RenderArgs) -> Result<()> {
    let bytes = read_input(&args.input)?;

    let advisor: Box<dyn ChartAdvisor> = match &args.chart_type {
        Some(chart_type) => Box::new(StaticAdvisor::new(chart_type.as_str())),
        None => Box::new(AdvisorClient::new(&args.advisor_url)),
    };

    let mut session = Session::new();
    if session.upload(&bytes, advisor.as_ref()).await == Phase::Error {
        let message = session.notification().unwrap_or("Upload failed").to_string();
        session.dismiss();
        bail!(message);
    }

    if let Some(suggestion) = session.suggestion() {
        eprintln!("Suggested Chart: {}", suggestion);
    }
    if let Some(label) = &args.label {
        session.select_label_column(label)?;
    }
    if let Some(value) = &args.value {
        session.select_value_column(value)?;
    }

    match session.chart_view() {
        ChartView::Nothing => {
            println!("Columns: {}", session.columns().join(", "));
            Ok(())
        }
        ChartView::Unsupported(raw) => {
            warn!(suggestion = %raw, "No renderer for the suggested chart type");
            Ok(())
        }
        ChartView::Render {
            chart_type,
            data,
            label_column,
            value_column,
        } => {
            let options = RenderOptions {
                width: args.width,
                height: args.height,
                format: args.format,
            };
            let rendered = runtime::render_chart(
                chart_type,
                &data,
                &label_column,
                &value_column,
                &options,
                args.hover,
            )?;
            match rendered {
                Some(bytes) => write_output(&bytes, args.output.as_ref()),
                None => {
                    info!("Dataset has no rows; nothing drawn");
                    Ok(())
                }
            }
        }
    }
}

fn write_output(bytes: &[u8], output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(bytes)
                .context("Failed to write chart to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
            Ok(())
        }
    }
}

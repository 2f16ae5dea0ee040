use clap::Parser;
use dnstap_gen_domain::{CliOverrides, FailurePolicy, TransportKind};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod report;

#[derive(Parser)]
#[command(name = "dnstap-generator")]
#[command(version)]
#[command(about = "Streams synthetic dnstap traffic to a Frame Streams collector")]
struct Cli {
    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Records to generate per connection
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Parallel connections to the collector
    #[arg(short = 'c', long)]
    connections: Option<usize>,

    /// Transport to the collector (tcp, unix)
    #[arg(short = 't', long)]
    transport: Option<TransportKind>,

    /// Collector host, or socket path for the unix transport
    #[arg(short = 'i', long)]
    address: Option<String>,

    /// Collector port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Minimum random label length
    #[arg(long)]
    domain_min: Option<usize>,

    /// Maximum random label length
    #[arg(long)]
    domain_max: Option<usize>,

    /// Fixed query name, used verbatim
    #[arg(long)]
    qname: Option<String>,

    /// Fixed query type (A, AAAA, TXT, CNAME)
    #[arg(long)]
    qtype: Option<String>,

    /// Do not send query envelopes
    #[arg(long)]
    skip_queries: bool,

    /// Do not send response envelopes
    #[arg(long)]
    skip_replies: bool,

    /// Master seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Failure policy (fail-fast, isolate)
    #[arg(long, value_name = "POLICY")]
    on_error: Option<FailurePolicy>,

    /// Seconds to wait for the collector's ACCEPT
    #[arg(long, value_name = "SECS")]
    handshake_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            transport: self.transport,
            address: self.address.clone(),
            port: self.port,
            handshake_timeout_secs: self.handshake_timeout,
            count: self.count,
            connections: self.connections,
            domain_min: self.domain_min,
            domain_max: self.domain_max,
            qname: self.qname.clone(),
            qtype: self.qtype.clone(),
            skip_queries: self.skip_queries,
            skip_replies: self.skip_replies,
            seed: self.seed,
            on_error: self.on_error,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config.logging);

    info!("Starting dnstap-generator v{}", env!("CARGO_PKG_VERSION"));

    let load = bootstrap::resolve_load_config(&config)?;
    let generator = di::Generator::new(&load)?;

    let shutdown = CancellationToken::new();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping workers");
            interrupt.cancel();
        }
    });

    let run_report = generator.run_load.execute(shutdown).await;
    report::print(&run_report);

    if let Some(failure) = run_report.root_failure() {
        anyhow::bail!("{}", failure);
    }
    if !run_report.is_success() {
        anyhow::bail!("run cancelled before completion");
    }
    Ok(())
}

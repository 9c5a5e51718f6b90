// Copyright (c) 2025 - Cowboy AI, Inc.
//! New Site
//!
//! Provisions a new site in NetBox: the site, one rack per zone, PE
//! switches and servers. Prints the CSV device report to stdout; progress
//! goes to stderr.
//!
//! Run with: cargo run --bin new-site --features netbox -- \
//!     --site-name foo12 --pe-switch-count 2 --pe-switch-model dcs-7050x3 \
//!     --server-count 4 --server-model poweredge-r750
//!
//! Prerequisites:
//! 1. NetBox API accessible (via NETBOX_URL environment variable)
//! 2. NetBox API token set (via NETBOX_API_TOKEN environment variable)
//! 3. Device roles `pe` and `csvr` exist in NetBox

use anyhow::{Context, Result};
use clap::Parser;
use netbox_site_provisioner::{
    adapters::{NetBoxClient, NetBoxConfig},
    DeviceTypeRef, DryRunRepository, InventoryRepository, ProvisionRequest, SiteProvisioner,
};
use tracing::info;

/// Provision a new site
#[derive(Debug, Parser)]
#[command(name = "new-site", version, about, allow_negative_numbers = true)]
struct Args {
    /// Name of the new site
    #[arg(long)]
    site_name: String,

    /// Number of PE (provider edge) switches to create per zone
    #[arg(long)]
    pe_switch_count: i64,

    /// PE switch model (device type id or slug)
    #[arg(long)]
    pe_switch_model: DeviceTypeRef,

    /// Number of servers to create per zone
    #[arg(long)]
    server_count: i64,

    /// Server model (device type id or slug)
    #[arg(long)]
    server_model: DeviceTypeRef,

    /// NetBox base URL
    #[arg(long, env = "NETBOX_URL")]
    netbox_url: Option<String>,

    /// NetBox API token
    #[arg(long, env = "NETBOX_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Resolve roles and models but create nothing
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn netbox_config(&self) -> Result<NetBoxConfig> {
        let mut config = NetBoxConfig::from_env().context("Failed to load NetBox configuration")?;
        if let Some(url) = &self.netbox_url {
            config.base_url = url.clone();
        }
        if let Some(token) = &self.api_token {
            config.api_token = token.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}

async fn run<R: InventoryRepository>(repository: R, args: &Args) -> Result<String> {
    let pe_switch_model = repository
        .find_device_type(&args.pe_switch_model)
        .await
        .context("Failed to resolve PE switch model")?;
    let server_model = repository
        .find_device_type(&args.server_model)
        .await
        .context("Failed to resolve server model")?;

    let request = ProvisionRequest {
        site_name: args.site_name.clone(),
        pe_switch_count: args.pe_switch_count,
        pe_switch_model,
        server_count: args.server_count,
        server_model,
    };
    request.validate().context("Invalid parameters")?;

    let mut provisioner = SiteProvisioner::new(repository);
    let outcome = provisioner
        .provision(&request)
        .await
        .with_context(|| format!("Failed to provision site {}", args.site_name))?;

    Ok(outcome.report)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = args.netbox_config()?;
    info!("NetBox URL: {}", config.base_url);

    let client = NetBoxClient::new(config).context("Failed to create NetBox client")?;
    client
        .health_check()
        .await
        .context("NetBox is not reachable")?;

    let report = if args.dry_run {
        run(DryRunRepository::new(client), &args).await?
    } else {
        run(client, &args).await?
    };

    println!("{}", report);
    Ok(())
}

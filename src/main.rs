use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use shop_payment_gateways::application::registry::GatewayRegistry;
use shop_payment_gateways::domain::money::{Amount, Currency};
use shop_payment_gateways::domain::payment::{CallbackParams, Customer, PaymentData, Tenant};
use shop_payment_gateways::domain::ports::{GatewayDataStoreRef, PaymentGateway};
use shop_payment_gateways::infrastructure::in_memory::InMemoryGatewayDataStore;
#[cfg(feature = "storage-rocksdb")]
use shop_payment_gateways::infrastructure::rocksdb::RocksDBGatewayDataStore;
use shop_payment_gateways::infrastructure::settings::FilesSettings;
use shop_payment_gateways::interfaces::cli::callback_reader::CallbackReader;
use shop_payment_gateways::interfaces::cli::response_writer::ResponseWriter;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Platform permanent directory holding `payments/` and `tenants/`
    #[arg(long, env = "PAYMENTS_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered gateway ids
    Gateways,
    /// Start a payment and print the gateway response as JSON
    Purchase(PurchaseArgs),
    /// Handle a vendor notification and print the gateway response as JSON
    Acknowledge(AcknowledgeArgs),
}

#[derive(Args)]
struct PurchaseArgs {
    #[arg(long)]
    gateway: String,
    /// Tenant slug
    #[arg(long)]
    tenant: String,
    #[arg(long)]
    amount: Decimal,
    /// ISO 4217 code
    #[arg(long)]
    currency: Currency,
    /// Defaults to a random order id
    #[arg(long)]
    order_id: Option<Uuid>,
    /// Shop URL the acknowledgement URL is built from
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    return_url: Option<String>,
    #[arg(long)]
    cancel_url: Option<String>,
    #[arg(long)]
    ipn_url: Option<String>,
    #[arg(long)]
    customer_email: Option<String>,
    #[arg(long, requires = "customer_email")]
    customer_first_name: Option<String>,
    #[arg(long, requires = "customer_email")]
    customer_last_name: Option<String>,
    #[arg(long)]
    card_token: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args)]
struct AcknowledgeArgs {
    #[arg(long)]
    gateway: String,
    /// Tenant slug
    #[arg(long)]
    tenant: String,
    #[arg(long)]
    order_id: Option<Uuid>,
    /// Url-encoded callback parameters, or `-` to read them from stdin
    #[arg(long)]
    params: String,
}

fn tenant(slug: &str) -> Tenant {
    Tenant::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, slug.as_bytes()), slug)
}

fn open_data_store(db_path: Option<PathBuf>) -> Result<GatewayDataStoreRef> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBGatewayDataStore::open(path).into_diagnostic()?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Arc::new(InMemoryGatewayDataStore::new()))
        }
        None => Ok(Arc::new(InMemoryGatewayDataStore::new())),
    }
}

impl PurchaseArgs {
    fn payment_data(&self) -> PaymentData {
        let customer = self.customer_email.as_ref().map(|email| Customer {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()),
            email: email.clone(),
            first_name: self.customer_first_name.clone().unwrap_or_default(),
            last_name: self.customer_last_name.clone().unwrap_or_default(),
            birthday: None,
            nationality: None,
            country_of_residence: None,
        });

        PaymentData {
            base_url: self.base_url.clone(),
            order_id: Some(self.order_id.unwrap_or_else(Uuid::new_v4)),
            currency: Some(self.currency),
            customer,
            return_url: self.return_url.clone(),
            cancel_url: self.cancel_url.clone(),
            ipn_url: self.ipn_url.clone(),
            card: None,
            card_token: self.card_token.clone(),
            description: self.description.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let data_store = open_data_store(cli.db_path)?;
    let settings = FilesSettings::new(cli.data_dir);
    debug!(data_dir = %settings.permanent_directory().display(), "Using gateway configuration");
    let registry = GatewayRegistry::with_default_gateways(settings, data_store);

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    match cli.command {
        Command::Gateways => {
            writer.write_gateway_ids(&registry.ids()).into_diagnostic()?;
        }
        Command::Purchase(args) => {
            let amount = Amount::new(args.amount).into_diagnostic()?;
            let gateway = registry
                .create_gateway(&args.gateway, &tenant(&args.tenant))
                .into_diagnostic()?;
            let response = gateway
                .purchase(amount, &args.payment_data())
                .await
                .into_diagnostic()?;
            writer.write_response(&response).into_diagnostic()?;
        }
        Command::Acknowledge(args) => {
            let params = if args.params == "-" {
                CallbackReader::new(io::stdin().lock())
                    .params()
                    .into_diagnostic()?
            } else {
                CallbackParams::from_query(&args.params)
            };
            let gateway = registry
                .create_gateway(&args.gateway, &tenant(&args.tenant))
                .into_diagnostic()?;
            let response = match args.order_id {
                Some(order_id) => gateway.acknowledge_order(order_id, &params).await,
                None => gateway.acknowledge(&params).await,
            }
            .into_diagnostic()?;
            writer.write_response(&response).into_diagnostic()?;
        }
    }

    Ok(())
}

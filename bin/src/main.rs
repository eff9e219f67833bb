use std::{fs, path::PathBuf};

use alloy_primitives::U256;
use clap::Parser;
use eyre::WrapErr;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use efp_checkout::{RpcChainReader, StorageResolver};
use efp_listops::{
    config::DEFAULT_HOME_RPC_URL, Action, PlanRequest, Planner, StorageLocation, HOME_CHAIN_ID,
    KNOWN_CHAINS, LIST_REGISTRY,
};
use efp_types::{ChainId, ListIdentity, PendingEdit};

#[derive(Parser)]
#[command(name = "efp-checkout")]
#[command(about = "Plan the transactions needed to check out a cart of EFP list ops")]
struct Args {
    /// Cart file: JSON array of `{ opcode, target, tag? }` entries
    #[arg(long)]
    cart: PathBuf,

    /// Token id of the user's existing list
    #[arg(long)]
    list_id: Option<U256>,

    /// Chain a new list is stored on
    #[arg(long, default_value_t = HOME_CHAIN_ID)]
    chain: ChainId,

    /// Storage slot reserved for a new list
    #[arg(long, default_value_t = U256::ZERO)]
    mint_nonce: U256,

    /// A list was already minted this session
    #[arg(long)]
    minted: bool,

    /// Home chain RPC URL (registry reads)
    #[arg(long, env = "HOME_RPC_URL", default_value = DEFAULT_HOME_RPC_URL)]
    rpc_url: String,

    /// Storage location cache capacity
    #[arg(long, default_value = "64")]
    resolver_cache: u32,
}

#[derive(Serialize)]
struct PlanOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<StorageLocation>,
    actions: Vec<Action>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,efp_checkout=debug,efp_listops=debug")
        }))
        .init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.cart)
        .wrap_err_with(|| format!("reading cart {}", args.cart.display()))?;
    let cart: Vec<PendingEdit> = serde_json::from_str(&raw).wrap_err("parsing cart")?;

    info!(items = cart.len(), chain = args.chain, rpc = %args.rpc_url, "planning checkout");

    let identity = match args.list_id {
        Some(list_id) => ListIdentity::registered(list_id),
        None => ListIdentity::unregistered(args.mint_nonce),
    };

    let resolver = StorageResolver::new(
        RpcChainReader::new(&args.rpc_url),
        LIST_REGISTRY,
        KNOWN_CHAINS.to_vec(),
        args.resolver_cache,
    );
    let location = resolver.resolve(identity.list_id).await?;

    let req = PlanRequest {
        cart: &cart,
        identity: &identity,
        selected_chain: Some(args.chain),
        has_been_minted: args.minted,
        location,
    };
    let actions = Planner::default().plan(&req)?;

    for (index, action) in actions.iter().enumerate() {
        info!(index, label = %action.label, chain_id = action.chain_id, to = %action.call.to, "action");
    }

    println!("{}", serde_json::to_string_pretty(&PlanOutput { location, actions })?);

    Ok(())
}

//! Checkout planning: cart + registration state → ordered action queue.
//!
//! The queue is at most two actions long:
//! 1. `CreateList` on the home chain, only if the user has no list yet.
//! 2. `ApplyOperations` with every cart item, on the chain the list is stored on.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use bon::Builder;
use efp_types::{ChainId, ListIdentity, PendingEdit};
use thiserror::Error;

use crate::{
    abi::{applyListOpsCall, mintPrimaryListNoMetaCall},
    action::{Action, ActionKind, ContractCall},
    config::{find_chain, ChainInfo, HOME_CHAIN_ID, KNOWN_CHAINS, LIST_MINTER},
    location::StorageLocation,
    ops::{encode_ops, EncodeError},
};

/// Label of the list creation action.
pub const CREATE_LIST_LABEL: &str = "create list";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// No registered location and no chain selected for a new list.
    #[error("no target chain: list is not registered and no chain is selected")]
    NoTargetChain,
    /// A registered list was planned without its resolved location.
    #[error("list is registered but its storage location was not resolved")]
    UnresolvedLocation,
    #[error("chain {0} has no list records deployment")]
    UnknownChain(ChainId),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// Deployment the planner builds calls against (defaults are EFP mainnet).
#[derive(Debug, Clone, Builder)]
pub struct PlannerConfig {
    /// Chain hosting the registry and minter.
    #[builder(default = HOME_CHAIN_ID)]
    pub home_chain: ChainId,
    #[builder(default = LIST_MINTER)]
    pub list_minter: Address,
    /// Chains a list may be stored on.
    #[builder(default = KNOWN_CHAINS.to_vec())]
    pub chains: Vec<ChainInfo>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Inputs for one planning pass.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub cart: &'a [PendingEdit],
    pub identity: &'a ListIdentity,
    /// Chain picked by the user for a new list.
    pub selected_chain: Option<ChainId>,
    /// A `CreateList` action was already submitted this session.
    pub has_been_minted: bool,
    /// Resolved location of the registered list, if any.
    pub location: Option<StorageLocation>,
}

/// Builds action queues. Pure: nothing is sent anywhere.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Look up a chain the planner knows about.
    #[inline]
    pub fn chain(&self, id: ChainId) -> Option<&ChainInfo> {
        find_chain(&self.config.chains, id)
    }

    /// Location a new list gets: the selected chain's records contract at the mint nonce.
    pub fn fallback_location(
        &self,
        selected_chain: Option<ChainId>,
        identity: &ListIdentity,
    ) -> Result<StorageLocation, PlanError> {
        let chain_id = selected_chain.ok_or(PlanError::NoTargetChain)?;
        let chain = self.chain(chain_id).ok_or(PlanError::UnknownChain(chain_id))?;
        Ok(StorageLocation::new(chain.id, chain.list_records, identity.mint_nonce))
    }

    /// Build the ordered action queue for `req`.
    pub fn plan(&self, req: &PlanRequest<'_>) -> Result<Vec<Action>, PlanError> {
        let location = match (req.location, req.identity.is_registered()) {
            (Some(location), _) => location,
            (None, true) => return Err(PlanError::UnresolvedLocation),
            (None, false) => self.fallback_location(req.selected_chain, req.identity)?,
        };

        let ops = encode_ops(req.cart)?;
        let apply = apply_ops_action(location, ops);

        let needs_list = !req.identity.is_registered() && !req.has_been_minted;
        let actions = if needs_list {
            vec![self.create_list_action(location), apply]
        } else {
            vec![apply]
        };

        tracing::debug!(
            target: "efp_listops::plan",
            actions = actions.len(),
            ops = req.cart.len(),
            chain_id = location.chain_id,
            nonce = %location.nonce,
            "planned checkout"
        );

        Ok(actions)
    }

    fn create_list_action(&self, location: StorageLocation) -> Action {
        let input = mintPrimaryListNoMetaCall { listStorageLocation: location.encode() }.abi_encode();
        let call = ContractCall {
            chain_id: self.config.home_chain,
            to: self.config.list_minter,
            input: Bytes::from(input),
        };
        Action::new(ActionKind::CreateList { location }, CREATE_LIST_LABEL.to_string(), call)
    }
}

fn apply_ops_action(location: StorageLocation, ops: Vec<Bytes>) -> Action {
    let label = format!("{} list ops", ops.len());
    let input = applyListOpsCall { slot: location.nonce, ops: ops.clone() }.abi_encode();
    let call =
        ContractCall { chain_id: location.chain_id, to: location.contract, input: Bytes::from(input) };
    Action::new(ActionKind::ApplyOperations { nonce: location.nonce, ops }, label, call)
}

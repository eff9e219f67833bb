//! Checkout state machine.
//!
//! ```text
//! SelectChain ──confirm_chain──▶ InitiateTransactions ──initiate──▶ TransactionStatus
//!                                        ▲                              │
//!                                        └──advance (chain switch)──────┤
//!                                                                       └──advance (done)──▶ Finished
//! ```
//!
//! Every suspension point (registry read, chain switch, submission) is a guard
//! re-evaluated on the next call, so a rejected or failed step leaves the flow
//! where it was and can simply be triggered again.

use std::pin::Pin;

use alloy_primitives::{Address, B256};
use bon::Builder;
use efp_listops::{Action, ChainInfo, PlanRequest, Planner, PlannerConfig, LIST_REGISTRY};
use efp_types::{ChainId, PendingEdit};
use futures::stream::Stream;
use serde::Serialize;
use tokio::sync::broadcast;

use super::{
    events::CheckoutEvent,
    host::{ChainReader, Host, Wallet},
    resolver::StorageResolver,
    sync::{ChainSync, ChainSynchronizer},
    CheckoutError,
};

/// Query key invalidated once a checkout completes.
pub const FOLLOW_STATE_QUERY_KEY: &str = "follow state";

/// Where the checkout flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// User picks the chain a new list will be stored on.
    SelectChain,
    /// Current action is ready to be sent once the wallet is on its chain.
    InitiateTransactions,
    /// Current action is being (or has been) submitted.
    TransactionStatus,
    /// All actions submitted; session state reconciled.
    Finished,
}

/// Why a call made no progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StallReason {
    /// No action is queued at the current index.
    NoRequiredChain,
    /// No known chain is selected.
    NoSelectedChain,
    /// Wallet accepted a switch but still reports another chain.
    AwaitingChainSwitch,
    /// Current action has not been submitted yet.
    NotSubmitted,
}

/// Result of a controller operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Flow moved to a new step without submitting anything.
    Moved(Step),
    /// Action at `index` was accepted by the wallet.
    Submitted { index: usize, tx_hash: B256 },
    /// Nothing happened.
    Stalled(StallReason),
    Finished,
}

/// Builder for [`Checkout`].
#[derive(Debug, Clone, Builder)]
pub struct CheckoutConfig {
    /// Deployment actions are planned against (defaults to EFP mainnet).
    #[builder(default)]
    planner: PlannerConfig,

    /// List registry address on the home chain.
    #[builder(default = LIST_REGISTRY)]
    registry: Address,

    /// Storage location cache capacity.
    #[builder(default = 64)]
    resolver_cache_capacity: u32,

    /// Event channel capacity.
    #[builder(default = 1024)]
    event_capacity: usize,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Inputs the current queue was planned from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlanKey {
    selected_chain: Option<ChainId>,
    cart: Vec<PendingEdit>,
}

/// Drives one checkout session: plans the cart into actions and submits them
/// in order, switching the wallet between chains as needed.
pub struct Checkout<'h, W, R, H> {
    sync: ChainSynchronizer<W>,
    resolver: StorageResolver<R>,
    planner: Planner,
    host: &'h mut H,
    /// Host had a registered list when the session started.
    had_list: bool,
    selected_chain: Option<ChainId>,
    has_been_minted: bool,
    actions: Vec<Action>,
    step: Step,
    current: usize,
    planned_for: Option<PlanKey>,
    event_tx: broadcast::Sender<CheckoutEvent>,
}

impl<'h, W: Wallet, R: ChainReader, H: Host> Checkout<'h, W, R, H> {
    pub fn new(config: CheckoutConfig, wallet: W, reader: R, host: &'h mut H) -> Self {
        let CheckoutConfig { planner, registry, resolver_cache_capacity, event_capacity } = config;

        let had_list = host.identity().is_registered();
        let resolver =
            StorageResolver::new(reader, registry, planner.chains.clone(), resolver_cache_capacity);
        let selected_chain = Some(planner.home_chain);
        let (event_tx, _) = broadcast::channel(event_capacity);

        Self {
            sync: ChainSynchronizer::new(wallet),
            resolver,
            planner: Planner::new(planner),
            host,
            had_list,
            selected_chain,
            has_been_minted: false,
            actions: Vec::new(),
            step: entry_step(had_list, false),
            current: 0,
            planned_for: None,
            event_tx,
        }
    }

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Index of the action being worked on.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn current_action(&self) -> Option<&Action> {
        self.actions.get(self.current)
    }

    #[inline]
    pub fn selected_chain(&self) -> Option<ChainId> {
        self.selected_chain
    }

    pub fn selected_chain_info(&self) -> Option<&ChainInfo> {
        self.selected_chain.and_then(|id| self.planner.chain(id))
    }

    /// Chains a new list can be stored on.
    pub fn chains(&self) -> &[ChainInfo] {
        &self.planner.config().chains
    }

    /// A `CreateList` action was submitted this session.
    #[inline]
    pub fn has_been_minted(&self) -> bool {
        self.has_been_minted
    }

    #[inline]
    pub fn host(&self) -> &H {
        &*self.host
    }

    /// Host access for cart edits during the session. Edits made before any
    /// action is submitted are picked up by the next `initiate`.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut *self.host
    }

    #[inline]
    pub fn resolver(&self) -> &StorageResolver<R> {
        &self.resolver
    }

    /// Stream checkout events as they happen.
    pub fn subscribe(&self) -> Pin<Box<dyn Stream<Item = CheckoutEvent> + Send>> {
        let mut rx = self.event_tx.subscribe();
        Box::pin(async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok(event) => yield event,
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
        })
    }

    /// Chain the action at `index` must be sent on.
    #[inline]
    pub fn required_chain(&self, index: usize) -> Option<ChainId> {
        self.actions.get(index).map(|a| a.chain_id)
    }

    /// Pick the chain a new list will be stored on, and re-plan.
    ///
    /// Once a list was minted for one chain the selection can no longer move.
    pub async fn select_chain(&mut self, chain_id: ChainId) -> Result<usize, CheckoutError> {
        if self.planner.chain(chain_id).is_none() {
            return Err(CheckoutError::UnknownChain(chain_id));
        }
        if self.has_been_minted && self.selected_chain != Some(chain_id) {
            return Err(CheckoutError::ChainLocked(self.selected_chain.unwrap_or(chain_id)));
        }

        let previous = self.selected_chain.replace(chain_id);
        match self.replan().await {
            Ok(actions) => Ok(actions),
            Err(e) => {
                self.selected_chain = previous;
                Err(e)
            }
        }
    }

    /// Leave chain selection.
    pub fn confirm_chain(&mut self) -> Result<StepOutcome, CheckoutError> {
        if self.step != Step::SelectChain {
            return Err(CheckoutError::InvalidStep(self.step));
        }
        if self.selected_chain_info().is_none() {
            return Ok(self.stall(StallReason::NoSelectedChain));
        }

        self.set_step(Step::InitiateTransactions);
        Ok(StepOutcome::Moved(Step::InitiateTransactions))
    }

    /// Resolve the list location and rebuild the action queue.
    ///
    /// Keeps the existing queue once any of it has been submitted.
    pub async fn replan(&mut self) -> Result<usize, CheckoutError> {
        if self.queue_started() {
            tracing::debug!(
                target: "efp_checkout::checkout",
                actions = self.actions.len(),
                "queue already started, keeping it"
            );
            return Ok(self.actions.len());
        }

        let identity = self.host.identity();
        let location = self.resolver.resolve(identity.list_id).await?;

        let req = PlanRequest {
            cart: self.host.cart_items(),
            identity: &identity,
            selected_chain: self.selected_chain,
            has_been_minted: self.has_been_minted,
            location,
        };
        let actions = self.planner.plan(&req).map_err(|e| {
            tracing::error!(target: "efp_checkout::checkout", error = %e, "failed to plan checkout");
            CheckoutError::Plan(e)
        })?;

        let key = PlanKey { selected_chain: self.selected_chain, cart: req.cart.to_vec() };
        let chain_id = actions.last().map(|a| a.chain_id).unwrap_or_default();

        self.actions = actions;
        self.current = 0;
        self.planned_for = Some(key);
        self.emit(CheckoutEvent::Planned { actions: self.actions.len(), chain_id });

        Ok(self.actions.len())
    }

    /// Send the current action, switching chains first if needed.
    ///
    /// Also retries a current action whose submission failed.
    pub async fn initiate(&mut self) -> Result<StepOutcome, CheckoutError> {
        match self.step {
            Step::InitiateTransactions => {}
            Step::TransactionStatus if !self.current_submitted() => {}
            step => return Err(CheckoutError::InvalidStep(step)),
        }

        self.ensure_plan().await?;

        let index = self.current;
        let Some(required) = self.required_chain(index) else {
            return Ok(self.stall(StallReason::NoRequiredChain));
        };

        // A retry from TransactionStatus waits for the switch back in InitiateTransactions.
        if !self.sync.is_on(required) {
            self.set_step(Step::InitiateTransactions);
        }

        if self.switch_to(required).await? == ChainSync::Switched && !self.sync.is_on(required) {
            return Ok(self.stall(StallReason::AwaitingChainSwitch));
        }

        self.set_step(Step::TransactionStatus);
        self.execute(index).await
    }

    /// Move past a submitted action.
    ///
    /// The next action is sent right away when it is on the connected chain.
    /// Otherwise the wallet is switched and the flow goes back to
    /// `InitiateTransactions`. With nothing left, the session finishes.
    pub async fn advance(&mut self) -> Result<StepOutcome, CheckoutError> {
        if self.step != Step::TransactionStatus {
            return Err(CheckoutError::InvalidStep(self.step));
        }
        if !self.current_submitted() {
            return Ok(self.stall(StallReason::NotSubmitted));
        }

        let next = self.current + 1;
        let Some(required) = self.required_chain(next) else {
            return Ok(self.finish());
        };

        if !self.sync.is_on(required) {
            self.switch_to(required).await?;
            self.current = next;
            self.set_step(Step::InitiateTransactions);
            return Ok(StepOutcome::Moved(Step::InitiateTransactions));
        }

        self.current = next;
        self.execute(next).await
    }

    /// Reconcile host state after the last action and end the session.
    fn finish(&mut self) -> StepOutcome {
        let submitted = self.actions.iter().filter(|a| a.is_submitted()).count();
        let edits = self.host.cart_len();

        self.host.invalidate_queries(FOLLOW_STATE_QUERY_KEY);
        self.host.clear_cart();
        self.actions.clear();
        self.planned_for = None;
        self.current = 0;

        if self.had_list {
            self.host.refetch_profile();
            self.host.refetch_following();
        } else {
            self.host.refetch_lists();
        }
        self.host.navigate_to_profile();

        tracing::info!(
            target: "efp_checkout::checkout",
            submitted,
            edits,
            minted = self.has_been_minted,
            "checkout finished"
        );

        self.set_step(Step::Finished);
        self.emit(CheckoutEvent::Finished);
        StepOutcome::Finished
    }

    /// Drop the queue and go back to the entry step. The cart is kept.
    pub fn reset(&mut self) {
        self.actions.clear();
        self.planned_for = None;
        self.current = 0;
        self.set_step(entry_step(self.had_list, self.has_been_minted));
    }

    async fn ensure_plan(&mut self) -> Result<(), CheckoutError> {
        if !self.queue_started() && !self.plan_is_current() {
            self.replan().await?;
        }
        Ok(())
    }

    async fn switch_to(&self, chain_id: ChainId) -> Result<ChainSync, CheckoutError> {
        if !self.sync.is_on(chain_id) {
            self.emit(CheckoutEvent::ChainSwitchRequested { chain_id });
        }

        self.sync.ensure_chain(chain_id).await.inspect_err(|e| {
            self.emit(CheckoutEvent::ChainSwitchFailed { chain_id, reason: e.to_string() });
        })
    }

    async fn execute(&mut self, index: usize) -> Result<StepOutcome, CheckoutError> {
        let Some(action) = self.actions.get_mut(index) else {
            debug_assert!(false, "no action queued at {index}");
            return Ok(self.stall(StallReason::NoRequiredChain));
        };
        action.pending_confirmation = true;
        let label = action.label.clone();
        let call = action.call.clone();

        self.emit(CheckoutEvent::ActionPending { index, label: label.clone() });
        tracing::debug!(
            target: "efp_checkout::checkout",
            index,
            %label,
            chain_id = call.chain_id,
            to = %call.to,
            "submitting action"
        );

        let result = self.sync.submit(&label, &call).await;

        let action = &mut self.actions[index];
        action.pending_confirmation = false;

        match result {
            Ok(tx_hash) => {
                action.tx_hash = Some(tx_hash);
                if action.is_create_list() {
                    self.has_been_minted = true;
                }
                tracing::info!(
                    target: "efp_checkout::checkout",
                    index,
                    %label,
                    %tx_hash,
                    "action submitted"
                );
                self.emit(CheckoutEvent::ActionSubmitted { index, label, tx_hash });
                Ok(StepOutcome::Submitted { index, tx_hash })
            }
            Err(e) => {
                tracing::warn!(
                    target: "efp_checkout::checkout",
                    index,
                    %label,
                    error = %e,
                    "action failed"
                );
                self.emit(CheckoutEvent::ActionFailed { index, label, reason: e.to_string() });
                Err(e)
            }
        }
    }

    fn queue_started(&self) -> bool {
        self.actions.iter().any(Action::is_submitted)
    }

    fn current_submitted(&self) -> bool {
        self.current_action().is_some_and(Action::is_submitted)
    }

    fn plan_is_current(&self) -> bool {
        self.planned_for.as_ref().is_some_and(|key| {
            key.selected_chain == self.selected_chain && key.cart == self.host.cart_items()
        })
    }

    fn set_step(&mut self, step: Step) {
        if self.step == step {
            return;
        }
        tracing::debug!(target: "efp_checkout::checkout", from = ?self.step, to = ?step, "step");
        self.step = step;
        self.emit(CheckoutEvent::StepChanged { step });
    }

    fn stall(&self, reason: StallReason) -> StepOutcome {
        tracing::warn!(
            target: "efp_checkout::checkout",
            ?reason,
            step = ?self.step,
            index = self.current,
            "checkout stalled"
        );
        self.emit(CheckoutEvent::Stalled { reason });
        StepOutcome::Stalled(reason)
    }

    fn emit(&self, event: CheckoutEvent) {
        // No subscribers is fine.
        let _ = self.event_tx.send(event);
    }
}

fn entry_step(had_list: bool, has_been_minted: bool) -> Step {
    if had_list || has_been_minted {
        Step::InitiateTransactions
    } else {
        Step::SelectChain
    }
}

//! In-memory collaborators.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use efp_listops::{abi::getListStorageLocationCall, ContractCall, StorageLocation, LIST_REGISTRY};
use efp_types::{ChainId, ListIdentity, PendingEdit};

use crate::{CartStore, ChainReader, CheckoutError, Navigator, ProfileCache, Wallet, WalletError};

pub(super) fn tx_hash(n: u8) -> B256 {
    let mut bytes = [0u8; 32];
    bytes[31] = n;
    B256::from(bytes)
}

pub(super) fn location_blob(chain_id: ChainId, contract: Address, nonce: u64) -> Bytes {
    StorageLocation::new(chain_id, contract, U256::from(nonce)).encode()
}

#[derive(Debug, Default)]
pub(super) struct WalletState {
    pub connected: ChainId,
    /// Refuse every switch request.
    pub reject_switch: bool,
    /// Accept switch requests without actually switching.
    pub ignore_switch: bool,
    pub fail_submit: bool,
    pub switch_requests: Vec<ChainId>,
    pub submitted: Vec<ContractCall>,
}

#[derive(Clone, Default)]
pub(super) struct MockWallet(Arc<Mutex<WalletState>>);

impl MockWallet {
    pub fn on(chain_id: ChainId) -> Self {
        Self(Arc::new(Mutex::new(WalletState { connected: chain_id, ..Default::default() })))
    }

    pub fn state(&self) -> MutexGuard<'_, WalletState> {
        self.0.lock().unwrap()
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn connected_chain(&self) -> ChainId {
        self.state().connected
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError> {
        let mut state = self.state();
        state.switch_requests.push(chain_id);
        if state.reject_switch {
            return Err(WalletError::Rejected);
        }
        if !state.ignore_switch {
            state.connected = chain_id;
        }
        Ok(())
    }

    async fn submit(&self, call: &ContractCall) -> Result<B256, WalletError> {
        let mut state = self.state();
        if state.fail_submit {
            return Err(WalletError::Other("insufficient funds".to_string()));
        }
        state.submitted.push(call.clone());
        Ok(tx_hash(state.submitted.len() as u8))
    }
}

/// Registry stand-in: answers `getListStorageLocation` from a map.
#[derive(Clone, Default)]
pub(super) struct MockReader {
    locations: Arc<Mutex<HashMap<U256, Bytes>>>,
    calls: Arc<AtomicUsize>,
}

impl MockReader {
    pub fn with_location(list_id: u64, blob: Bytes) -> Self {
        let reader = Self::default();
        reader.set_location(list_id, blob);
        reader
    }

    pub fn set_location(&self, list_id: u64, blob: Bytes) {
        self.locations.lock().unwrap().insert(U256::from(list_id), blob);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, CheckoutError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(to, LIST_REGISTRY);

        let call = getListStorageLocationCall::abi_decode(&input)
            .map_err(|e| CheckoutError::Rpc(e.to_string()))?;
        let blob = self
            .locations
            .lock()
            .unwrap()
            .get(&call.tokenId)
            .cloned()
            .ok_or_else(|| CheckoutError::Rpc("execution reverted".to_string()))?;

        Ok(Bytes::from(blob.abi_encode()))
    }
}

#[derive(Debug, Default)]
pub(super) struct MockHost {
    pub cart: Vec<PendingEdit>,
    pub identity: ListIdentity,
    pub invalidated: Vec<String>,
    pub lists_refetched: usize,
    pub profile_refetched: usize,
    pub following_refetched: usize,
    pub navigated: usize,
}

impl MockHost {
    pub fn new(cart: Vec<PendingEdit>, identity: ListIdentity) -> Self {
        Self { cart, identity, ..Default::default() }
    }
}

impl CartStore for MockHost {
    fn cart_items(&self) -> &[PendingEdit] {
        &self.cart
    }

    fn clear_cart(&mut self) {
        self.cart.clear();
    }
}

impl ProfileCache for MockHost {
    fn identity(&self) -> ListIdentity {
        self.identity.clone()
    }

    fn invalidate_queries(&mut self, key: &str) {
        self.invalidated.push(key.to_string());
    }

    fn refetch_lists(&mut self) {
        self.lists_refetched += 1;
    }

    fn refetch_profile(&mut self) {
        self.profile_refetched += 1;
    }

    fn refetch_following(&mut self) {
        self.following_refetched += 1;
    }
}

impl Navigator for MockHost {
    fn navigate_to_profile(&mut self) {
        self.navigated += 1;
    }
}

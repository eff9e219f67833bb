//! Registry lookups of list storage locations, with LRU caching.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};
use efp_listops::{
    abi::getListStorageLocationCall,
    config::{find_chain, ChainInfo},
    decode_location, StorageLocation,
};
use efp_types::ListId;
use schnellru::{ByLength, LruMap};
use tokio::sync::RwLock;

use super::{host::ChainReader, CheckoutError};

/// Resolves where a registered list keeps its records.
///
/// Results are memoized per list id. Failures are not cached.
pub struct StorageResolver<R> {
    reader: R,
    registry: Address,
    chains: Vec<ChainInfo>,
    cache: RwLock<LruMap<ListId, StorageLocation, ByLength>>,
}

impl<R: ChainReader> StorageResolver<R> {
    /// Create a resolver.
    ///
    /// # Arguments
    /// * `reader` - Home chain reader the registry is called through
    /// * `registry` - List registry contract address
    /// * `chains` - Chains a location may point at
    /// * `cache_capacity` - Maximum number of locations to cache
    pub fn new(reader: R, registry: Address, chains: Vec<ChainInfo>, cache_capacity: u32) -> Self {
        Self {
            reader,
            registry,
            chains,
            cache: RwLock::new(LruMap::new(ByLength::new(cache_capacity))),
        }
    }

    #[inline]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Resolve the location of `list_id`. `None` means there is no list to resolve.
    pub async fn resolve(
        &self,
        list_id: Option<ListId>,
    ) -> Result<Option<StorageLocation>, CheckoutError> {
        let Some(list_id) = list_id else {
            return Ok(None);
        };

        {
            let mut cache = self.cache.write().await;
            if let Some(location) = cache.get(&list_id) {
                return Ok(Some(*location));
            }
        }

        let location = self.fetch_location(list_id).await?;

        {
            let mut cache = self.cache.write().await;
            cache.insert(list_id, location);
        }

        Ok(Some(location))
    }

    async fn fetch_location(&self, list_id: ListId) -> Result<StorageLocation, CheckoutError> {
        let input = getListStorageLocationCall { tokenId: list_id }.abi_encode();

        let output = self.reader.call(self.registry, Bytes::from(input)).await.map_err(|e| {
            tracing::warn!(
                target: "efp_checkout::resolver",
                %list_id,
                error = %e,
                "registry call failed"
            );
            CheckoutError::Registry { list_id, reason: e.to_string() }
        })?;

        let blob = <Bytes as SolValue>::abi_decode(&output)
            .map_err(|e| CheckoutError::Registry { list_id, reason: e.to_string() })?;

        let location = decode_location(&blob)?;

        if find_chain(&self.chains, location.chain_id).is_none() {
            return Err(CheckoutError::UnknownChain(location.chain_id));
        }

        tracing::debug!(
            target: "efp_checkout::resolver",
            %list_id,
            chain_id = location.chain_id,
            contract = %location.contract,
            nonce = %location.nonce,
            "resolved list storage location"
        );

        Ok(location)
    }
}

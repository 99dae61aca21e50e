use std::sync::Arc;

use futures::future::try_join_all;
use log::{debug, trace};

use crate::{
    errors::MulticallError,
    multicall::{codec, MulticallConfig},
    traits::RpcTransport,
    types::{AggregatorDeployment, CallRequest, CallResult, TaggedRequest, TaggedResult},
};

/// Batches read requests through the aggregator active at the target block
///
/// Results always come back 1:1 and in the same order as the requests,
/// however many aggregate calls were needed. When no deployment is active
/// every request is sent to the node on its own.
pub struct MulticallClient<T> {
    transport: Arc<T>,
    config: Arc<MulticallConfig>,
}

impl<T> Clone for MulticallClient<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport), config: Arc::clone(&self.config) }
    }
}

impl<T: RpcTransport> MulticallClient<T> {
    pub fn new(transport: Arc<T>, config: MulticallConfig) -> Self {
        Self { transport, config: Arc::new(config) }
    }

    pub fn config(&self) -> &MulticallConfig {
        &self.config
    }

    /// Executes `requests` at `block`
    ///
    /// # Returns
    /// * `Ok(Vec<CallResult>)` - One result per request, in request order
    /// * `Err(MulticallError)` - The first transport or batch decode failure;
    ///   no partial results are returned
    pub async fn multicall(
        &self,
        requests: &[CallRequest],
        block: u64,
    ) -> Result<Vec<CallResult>, MulticallError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        match self.config.deployment_for(block) {
            Some(deployment) => self.aggregate_all(deployment, requests, block).await,
            None => {
                debug!(
                    "No multicall deployment active at block {}, issuing {} direct calls",
                    block,
                    requests.len()
                );
                self.call_individually(requests, block).await
            }
        }
    }

    /// Same as [`multicall`](Self::multicall), threading each request's
    /// metadata through to its result untouched
    pub async fn multicall_with_metadata<M>(
        &self,
        requests: Vec<TaggedRequest<M>>,
        block: u64,
    ) -> Result<Vec<TaggedResult<M>>, MulticallError> {
        let (calls, metadata): (Vec<CallRequest>, Vec<M>) =
            requests.into_iter().map(|tagged| (tagged.request, tagged.metadata)).unzip();

        let results = self.multicall(&calls, block).await?;

        Ok(results
            .into_iter()
            .zip(metadata)
            .map(|(result, metadata)| TaggedResult { result, metadata })
            .collect())
    }

    async fn call_individually(
        &self,
        requests: &[CallRequest],
        block: u64,
    ) -> Result<Vec<CallResult>, MulticallError> {
        let calls = requests.iter().map(|request| async move {
            let data = self.transport.call(request.target, request.data.clone(), block).await?;
            Ok::<_, MulticallError>(CallResult::from_response(true, data))
        });
        try_join_all(calls).await
    }

    async fn aggregate_all(
        &self,
        deployment: &AggregatorDeployment,
        requests: &[CallRequest],
        block: u64,
    ) -> Result<Vec<CallResult>, MulticallError> {
        debug!(
            "Aggregating {} calls at block {} through {} multicall {} in {} batch(es)",
            requests.len(),
            block,
            deployment.protocol_version,
            deployment.address,
            requests.len().div_ceil(deployment.batch_size)
        );

        let batches = requests
            .chunks(deployment.batch_size)
            .map(|chunk| self.aggregate(deployment, chunk, block));
        let results = try_join_all(batches).await?;

        Ok(results.into_iter().flatten().collect())
    }

    async fn aggregate(
        &self,
        deployment: &AggregatorDeployment,
        chunk: &[CallRequest],
        block: u64,
    ) -> Result<Vec<CallResult>, MulticallError> {
        trace!("Dispatching batch of {} calls to {} at block {}", chunk.len(), deployment.address, block);

        let payload = codec::encode_batch(chunk, deployment.protocol_version);
        let raw = self.transport.call(deployment.address, payload, block).await?;
        Ok(codec::decode_batch(&raw, deployment.protocol_version, chunk.len())?)
    }
}

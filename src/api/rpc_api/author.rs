/*
   Copyright 2019 Supercomputing Systems AG

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

	   http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.

*/

use crate::{
	api::{Api, Error, ExtrinsicReport, Result, TransactionStatus, XtStatus},
	rpc::{HandleSubscription, Request, Subscribe},
	utils::ToHexString,
};
use async_trait::async_trait;
use log::*;
use serde::de::DeserializeOwned;
use sp_runtime::traits::Hash as HashTrait;
use tl_primitives::{rpc_params, Config};

pub type TransactionSubscriptionFor<Client, Hash> =
	<Client as Subscribe>::Subscription<TransactionStatus<Hash, Hash>>;

/// Simple extrinsic submission without any subscription.
#[async_trait(?Send)]
pub trait SubmitExtrinsic {
	type Hash;

	/// Submit an encoded extrinsic to the substrate node, without watching.
	/// Returns the extrinsic hash.
	async fn submit_extrinsic(&self, encoded_extrinsic: &[u8]) -> Result<Self::Hash>;
}

#[async_trait(?Send)]
impl<T, Client> SubmitExtrinsic for Api<T, Client>
where
	T: Config,
	Client: Request,
{
	type Hash = T::Hash;

	async fn submit_extrinsic(&self, encoded_extrinsic: &[u8]) -> Result<Self::Hash> {
		let hex_encoded_xt = encoded_extrinsic.to_hex();
		debug!("sending extrinsic: {:?}", hex_encoded_xt);
		let xt_hash: Self::Hash =
			self.client().request("author_submitExtrinsic", rpc_params![hex_encoded_xt]).await?;
		Ok(xt_hash)
	}
}

#[async_trait(?Send)]
pub trait SubmitAndWatch<Client, Hash>
where
	Client: Subscribe,
	Hash: DeserializeOwned + Send,
{
	/// Submit an extrinsic an return a websocket Subscription to watch the
	/// extrinsic progress.
	async fn submit_and_watch_extrinsic(
		&self,
		encoded_extrinsic: &[u8],
	) -> Result<TransactionSubscriptionFor<Client, Hash>>;

	/// Submit an extrinsic and watch it until the desired status is reached,
	/// if no error is encountered previously.
	async fn submit_and_watch_extrinsic_until(
		&self,
		encoded_extrinsic: &[u8],
		watch_until: XtStatus,
	) -> Result<ExtrinsicReport<Hash>>;
}

#[async_trait(?Send)]
impl<T, Client> SubmitAndWatch<Client, T::Hash> for Api<T, Client>
where
	T: Config,
	Client: Subscribe,
{
	async fn submit_and_watch_extrinsic(
		&self,
		encoded_extrinsic: &[u8],
	) -> Result<TransactionSubscriptionFor<Client, T::Hash>> {
		let subscription = self
			.client()
			.subscribe::<TransactionStatus<T::Hash, T::Hash>>(
				"author_submitAndWatchExtrinsic",
				rpc_params![encoded_extrinsic.to_hex()],
				"author_unsubmitAndWatchExtrinsic",
			)
			.await?;
		Ok(subscription)
	}

	async fn submit_and_watch_extrinsic_until(
		&self,
		encoded_extrinsic: &[u8],
		watch_until: XtStatus,
	) -> Result<ExtrinsicReport<T::Hash>> {
		let tx_hash = <T::Hasher as HashTrait>::hash(encoded_extrinsic);
		let subscription = self.submit_and_watch_extrinsic(encoded_extrinsic).await?;
		watch_extrinsic_until(subscription, tx_hash, watch_until).await
	}
}

/// Follow the status updates of an already submitted extrinsic until `watch_until`
/// is reached. The subscription is closed in any case but a broken stream.
pub async fn watch_extrinsic_until<Hash, Subscription>(
	mut subscription: Subscription,
	extrinsic_hash: Hash,
	watch_until: XtStatus,
) -> Result<ExtrinsicReport<Hash>>
where
	Hash: DeserializeOwned + Send + Clone,
	Subscription: HandleSubscription<TransactionStatus<Hash, Hash>>,
{
	while let Some(transaction_status) = subscription.next().await {
		let transaction_status = transaction_status?;
		trace!("transaction status update: {}", transaction_status.as_u8());
		if let Err(unexpected) = transaction_status.is_expected() {
			subscription.unsubscribe().await?;
			return Err(Error::UnexpectedTxStatus(unexpected))
		}
		if transaction_status.reached_status(watch_until) {
			subscription.unsubscribe().await?;
			let block_hash = transaction_status.get_maybe_block_hash().cloned();
			return Ok(ExtrinsicReport::new(extrinsic_hash, block_hash, transaction_status))
		}
	}
	Err(Error::NoStream)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		api::{
			metadata::tests::{runtime_metadata, BalancesCall},
			Metadata, UnexpectedTxStatus,
		},
		rpc::mocks::RpcClientMock,
	};
	use sp_core::H256;
	use sp_runtime::traits::BlakeTwo256;
	use sp_version::RuntimeVersion;
	use tl_primitives::DefaultRuntimeConfig;

	type Status = TransactionStatus<H256, H256>;

	const SUBMIT_AND_WATCH: &str = "author_submitAndWatchExtrinsic";

	fn api_with_notifications(statuses: &[Status]) -> Api<DefaultRuntimeConfig, RpcClientMock> {
		let client = RpcClientMock::default();
		client.set_notifications(
			SUBMIT_AND_WATCH,
			statuses.iter().map(|s| serde_json::to_string(s).unwrap()).collect(),
		);
		let metadata = Metadata::try_from(runtime_metadata::<BalancesCall>(&[])).unwrap();
		Api::new_offline(H256::zero(), metadata, RuntimeVersion::default(), client)
	}

	#[tokio::test]
	async fn watch_until_in_block_returns_report_with_block_hash() {
		let block_hash = H256::repeat_byte(0xbb);
		let api = api_with_notifications(&[
			Status::Ready,
			Status::Broadcast(vec!["peer".into()]),
			Status::InBlock(block_hash),
			Status::Finalized(block_hash),
		]);
		let encoded_xt = vec![12u8, 4, 1, 2];

		let report =
			api.submit_and_watch_extrinsic_until(&encoded_xt, XtStatus::InBlock).await.unwrap();

		assert_eq!(report.extrinsic_hash, BlakeTwo256::hash(&encoded_xt));
		assert_eq!(report.block_hash, Some(block_hash));
		assert_eq!(report.status, Status::InBlock(block_hash));
		assert_eq!(api.client().calls_to(SUBMIT_AND_WATCH), vec![Some(r#"["0x0c040102"]"#.into())]);
	}

	#[tokio::test]
	async fn watch_until_ready_stops_at_first_update() {
		let api = api_with_notifications(&[Status::Ready, Status::InBlock(H256::zero())]);

		let report = api.submit_and_watch_extrinsic_until(&[0u8], XtStatus::Ready).await.unwrap();

		assert_eq!(report.status, Status::Ready);
		assert_eq!(report.block_hash, None);
	}

	#[tokio::test]
	async fn invalid_status_aborts_watch() {
		let api = api_with_notifications(&[Status::Ready, Status::Invalid]);

		let result = api.submit_and_watch_extrinsic_until(&[0u8], XtStatus::InBlock).await;

		assert!(matches!(result, Err(Error::UnexpectedTxStatus(UnexpectedTxStatus::Invalid))));
	}

	#[tokio::test]
	async fn usurped_status_aborts_watch() {
		let api = api_with_notifications(&[Status::Usurped(H256::zero())]);

		let result = api.submit_and_watch_extrinsic_until(&[0u8], XtStatus::Finalized).await;

		assert!(matches!(result, Err(Error::UnexpectedTxStatus(UnexpectedTxStatus::Usurped))));
	}

	#[tokio::test]
	async fn closed_stream_before_target_status_is_an_error() {
		let api = api_with_notifications(&[Status::Ready]);

		let result = api.submit_and_watch_extrinsic_until(&[0u8], XtStatus::Finalized).await;

		assert!(matches!(result, Err(Error::NoStream)));
	}

	#[tokio::test]
	async fn submit_extrinsic_returns_node_hash() {
		let api = api_with_notifications(&[]);
		let xt_hash = H256::repeat_byte(3);
		api.client().update_entry("author_submitExtrinsic", serde_json::to_string(&xt_hash).unwrap());

		assert_eq!(api.submit_extrinsic(&[1u8, 2]).await.unwrap(), xt_hash);
		assert_eq!(api.client().calls_to("author_submitExtrinsic"), vec![Some(r#"["0x0102"]"#.into())]);
	}
}

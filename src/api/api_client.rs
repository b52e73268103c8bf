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
	api::{Error, Metadata, Result},
	rpc::Request,
};
use codec::{Decode, Encode};
use frame_metadata::RuntimeMetadataPrefixed;
use log::{debug, info};
use sp_version::RuntimeVersion;
use tl_primitives::{
	rpc_params, Bytes, Config, ExtrinsicParams, MetadataHashCheck, SignExtrinsic, SignedPayload,
	UncheckedExtrinsic, WithMetadataHashCheck,
};

/// Additional params of the runtime config `T`.
pub type AdditionalParamsFor<T> = <<T as Config>::ExtrinsicParams as ExtrinsicParams<
	<T as Config>::Index,
	<T as Config>::Hash,
>>::AdditionalParams;

/// Signed extrinsic as composed by an [`Api`] with runtime config `T`.
pub type UncheckedExtrinsicFor<T, Call> = UncheckedExtrinsic<
	<<T as Config>::ExtrinsicSigner as SignExtrinsic<<T as Config>::AccountId>>::ExtrinsicAddress,
	Call,
	<<T as Config>::ExtrinsicSigner as SignExtrinsic<<T as Config>::AccountId>>::Signature,
	<<T as Config>::ExtrinsicParams as ExtrinsicParams<
		<T as Config>::Index,
		<T as Config>::Hash,
	>>::SignedExtra,
>;

/// Api to talk with substrate-nodes
///
/// It is generic over the `Request` trait, so you can use any rpc-backend you like.
pub struct Api<T: Config, Client> {
	signer: Option<T::ExtrinsicSigner>,
	genesis_hash: T::Hash,
	metadata: Metadata,
	runtime_version: RuntimeVersion,
	client: Client,
	additional_extrinsic_params: Option<AdditionalParamsFor<T>>,
}

impl<T: Config, Client> Api<T, Client> {
	/// Create a new api without fetching anything from the node.
	pub fn new_offline(
		genesis_hash: T::Hash,
		metadata: Metadata,
		runtime_version: RuntimeVersion,
		client: Client,
	) -> Self {
		Self {
			signer: None,
			genesis_hash,
			metadata,
			runtime_version,
			client,
			additional_extrinsic_params: None,
		}
	}

	/// Set the api signer account.
	pub fn set_signer(&mut self, signer: T::ExtrinsicSigner) {
		self.signer = Some(signer);
	}

	/// Get the api signer.
	pub fn signer(&self) -> Option<&T::ExtrinsicSigner> {
		self.signer.as_ref()
	}

	/// Get the account id of the api signer.
	pub fn signer_account(&self) -> Option<&T::AccountId> {
		self.signer.as_ref().map(|signer| signer.public_account_id())
	}

	/// Get the cached genesis hash of the substrate node.
	pub fn genesis_hash(&self) -> T::Hash {
		self.genesis_hash
	}

	/// Get the cached metadata of the substrate node.
	pub fn metadata(&self) -> &Metadata {
		&self.metadata
	}

	/// Get the cached runtime version of the substrate node.
	pub fn runtime_version(&self) -> &RuntimeVersion {
		&self.runtime_version
	}

	/// Get the cached spec version of the substrate node.
	pub fn spec_version(&self) -> u32 {
		self.runtime_version.spec_version
	}

	/// Get the rpc client.
	pub fn client(&self) -> &Client {
		&self.client
	}

	/// Set the additional params, such as the tip.
	pub fn set_additional_params(&mut self, add_params: AdditionalParamsFor<T>) {
		self.additional_extrinsic_params = Some(add_params);
	}

	/// `CheckMetadataHash` mode matching the signed extensions of the runtime.
	pub fn metadata_hash_check(&self) -> MetadataHashCheck {
		MetadataHashCheck::from_runtime_support(self.metadata.supports_metadata_hash_check())
	}

	/// Get the extrinsic params with the set additional params. If no additional params are set,
	/// the default is taken. The `CheckMetadataHash` mode always follows the runtime.
	pub fn extrinsic_params(&self, nonce: T::Index) -> T::ExtrinsicParams {
		let additional_extrinsic_params = self
			.additional_extrinsic_params
			.clone()
			.unwrap_or_default()
			.with_metadata_hash_check(self.metadata_hash_check());
		<T::ExtrinsicParams as ExtrinsicParams<T::Index, T::Hash>>::new(
			self.runtime_version.spec_version,
			self.runtime_version.transaction_version,
			nonce,
			self.genesis_hash,
			additional_extrinsic_params,
		)
	}

	/// Sign `call` with the api signer and wrap it into a signed extrinsic.
	pub fn compose_extrinsic_offline<Call: Encode + Clone>(
		&self,
		call: Call,
		nonce: T::Index,
	) -> Result<UncheckedExtrinsicFor<T, Call>> {
		let signer = self.signer().ok_or(Error::NoSigner)?;
		let extrinsic_params = self.extrinsic_params(nonce);
		let extra = extrinsic_params.signed_extra();
		let payload =
			SignedPayload::from_raw(call.clone(), extra, extrinsic_params.additional_signed());
		let signature = payload.using_encoded(|payload| signer.sign(payload));
		Ok(UncheckedExtrinsic::new_signed(call, signer.extrinsic_address(), signature, extra))
	}
}

impl<T, Client> Api<T, Client>
where
	T: Config,
	Client: Request,
{
	/// Create a new Api client and fetch genesis hash, runtime version and metadata.
	pub async fn new(client: Client) -> Result<Self> {
		let genesis_hash = Self::get_genesis_hash(&client).await?;
		info!("Got genesis hash: {:?}", genesis_hash);

		let metadata = Self::get_metadata(&client).await?;
		debug!("Signed extensions: {:?}", metadata.signed_extensions());

		let runtime_version = Self::get_runtime_version(&client).await?;
		info!("Runtime Version: {:?}", runtime_version);

		Ok(Self::new_offline(genesis_hash, metadata, runtime_version, client))
	}

	/// Refetch the runtime version and, if the node upgraded its runtime since, the metadata.
	/// Returns whether the cached runtime changed.
	pub async fn update_runtime(&mut self) -> Result<bool> {
		let runtime_version = Self::get_runtime_version(&self.client).await?;
		if runtime_version.spec_version == self.runtime_version.spec_version
			&& runtime_version.transaction_version == self.runtime_version.transaction_version
		{
			return Ok(false)
		}
		let metadata = Self::get_metadata(&self.client).await?;
		info!(
			"Runtime upgraded from spec version {} to {}",
			self.runtime_version.spec_version, runtime_version.spec_version
		);

		self.metadata = metadata;
		self.runtime_version = runtime_version;
		Ok(true)
	}

	/// Get genesis hash from node via websocket query.
	async fn get_genesis_hash(client: &Client) -> Result<T::Hash> {
		let genesis: Option<T::Hash> =
			client.request("chain_getBlockHash", rpc_params![Some(0)]).await?;
		genesis.ok_or(Error::FetchGenesisHash)
	}

	/// Get runtime version from node via websocket query.
	async fn get_runtime_version(client: &Client) -> Result<RuntimeVersion> {
		let version: RuntimeVersion =
			client.request("state_getRuntimeVersion", rpc_params![]).await?;
		Ok(version)
	}

	/// Get metadata from node via websocket query.
	async fn get_metadata(client: &Client) -> Result<Metadata> {
		let metadata_bytes: Bytes = client.request("state_getMetadata", rpc_params![]).await?;
		let metadata = RuntimeMetadataPrefixed::decode(&mut metadata_bytes.0.as_slice())?;
		Ok(Metadata::try_from(metadata)?)
	}
}

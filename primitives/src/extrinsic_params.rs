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

use crate::config::Config;
use codec::{Decode, Encode, Output};
use sp_runtime::{
	generic::Era,
	traits::{BlakeTwo256, Hash},
};

/// The `CheckMetadataHash` transaction extension, always used in its disabled mode.
///
/// Runtimes without the extension expect neither the mode byte in the extra nor the
/// `Option<H256>` in the additional signed data, so `Absent` encodes to nothing.
/// `Disabled` encodes to a single zero byte, which is both the `Mode::Disabled`
/// extra and the `None` additional signed value.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MetadataHashCheck {
	#[default]
	Absent,
	Disabled,
}

impl MetadataHashCheck {
	pub fn from_runtime_support(supported: bool) -> Self {
		if supported {
			Self::Disabled
		} else {
			Self::Absent
		}
	}
}

impl Encode for MetadataHashCheck {
	fn size_hint(&self) -> usize {
		match self {
			Self::Absent => 0,
			Self::Disabled => 1,
		}
	}

	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		if let Self::Disabled = self {
			dest.push_byte(0);
		}
	}
}

/// Additional params that carry the `CheckMetadataHash` mode, so it can be
/// set to whatever the connected runtime expects.
pub trait WithMetadataHashCheck {
	fn with_metadata_hash_check(self, check: MetadataHashCheck) -> Self;
}

/// SignedExtra that is compatible with a default Substrate / Polkadot node.
// The SignedExtra on the client side mirrors the values actually contained in
// the node side extensions, in the same order. Extensions like CheckNonZeroSender
// hold no value and are therefore not represented here.
#[derive(Encode, Copy, Clone, Eq, PartialEq, Debug)]
pub struct GenericSignedExtra<Tip, Index> {
	pub era: Era,
	#[codec(compact)]
	pub nonce: Index,
	pub tip: Tip,
	pub check_metadata_hash: MetadataHashCheck,
}

impl<Tip, Index> GenericSignedExtra<Tip, Index> {
	pub fn new(era: Era, nonce: Index, tip: Tip, check_metadata_hash: MetadataHashCheck) -> Self {
		Self { era, nonce, tip, check_metadata_hash }
	}
}

/// Default AdditionalSigned fields of a Polkadot/Substrate node.
/// Order: (CheckNonZeroSender, CheckSpecVersion, CheckTxVersion, CheckGenesis, CheckEra,
/// CheckNonce, CheckWeight, ChargeTransactionPayment, CheckMetadataHash).
pub type GenericAdditionalSigned<Hash> =
	((), u32, u32, Hash, Hash, (), (), (), MetadataHashCheck);

/// Configures the "signed extra" and "additional signed" parameters that are
/// signed and sent along with an extrinsic.
pub trait ExtrinsicParams<Index, Hash> {
	/// Optional parameters that may change between extrinsics, such as the tip.
	type AdditionalParams: Default + Clone + Send + Sync + WithMetadataHashCheck;

	/// Extra mirroring the `SignedExtra` defined on the node side.
	/// Sent along with the extrinsic and part of the signed payload.
	type SignedExtra: Copy + Encode;

	/// Data the node derives itself. Part of the signed payload but never sent,
	/// so client and node must agree on the values.
	type AdditionalSigned: Encode;

	/// Construct a new instance.
	fn new(
		spec_version: u32,
		transaction_version: u32,
		nonce: Index,
		genesis_hash: Hash,
		additional_params: Self::AdditionalParams,
	) -> Self;

	/// Construct the signed extra needed for constructing an extrinsic.
	fn signed_extra(&self) -> Self::SignedExtra;

	/// Construct any additional data that should be in the signed payload of the extrinsic.
	fn additional_signed(&self) -> Self::AdditionalSigned;
}

/// An implementation of [`ExtrinsicParams`] for nodes with the default
/// Polkadot/Substrate transaction extensions. Transactions are always immortal.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GenericExtrinsicParams<T: Config, Tip> {
	nonce: T::Index,
	tip: Tip,
	spec_version: u32,
	transaction_version: u32,
	genesis_hash: T::Hash,
	check_metadata_hash: MetadataHashCheck,
}

/// Parameters of [`GenericExtrinsicParams`] that are not fetched from the node.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GenericAdditionalParams<Tip> {
	tip: Tip,
	check_metadata_hash: MetadataHashCheck,
}

impl<Tip: Default> GenericAdditionalParams<Tip> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the tip you'd like to give to the block author for each extrinsic.
	pub fn tip(mut self, tip: impl Into<Tip>) -> Self {
		self.tip = tip.into();
		self
	}

	/// Include the disabled `CheckMetadataHash` extension. Must match the runtime.
	pub fn check_metadata_hash(mut self, check: MetadataHashCheck) -> Self {
		self.check_metadata_hash = check;
		self
	}
}

impl<Tip> WithMetadataHashCheck for GenericAdditionalParams<Tip> {
	fn with_metadata_hash_check(mut self, check: MetadataHashCheck) -> Self {
		self.check_metadata_hash = check;
		self
	}
}

impl<Tip: Default> Default for GenericAdditionalParams<Tip> {
	fn default() -> Self {
		Self { tip: Tip::default(), check_metadata_hash: MetadataHashCheck::Absent }
	}
}

impl<T, Tip> ExtrinsicParams<T::Index, T::Hash> for GenericExtrinsicParams<T, Tip>
where
	T: Config,
	Tip: Copy + Default + Encode + Send + Sync,
{
	type AdditionalParams = GenericAdditionalParams<Tip>;
	type SignedExtra = GenericSignedExtra<Tip, T::Index>;
	type AdditionalSigned = GenericAdditionalSigned<T::Hash>;

	fn new(
		spec_version: u32,
		transaction_version: u32,
		nonce: T::Index,
		genesis_hash: T::Hash,
		additional_params: Self::AdditionalParams,
	) -> Self {
		GenericExtrinsicParams {
			nonce,
			tip: additional_params.tip,
			spec_version,
			transaction_version,
			genesis_hash,
			check_metadata_hash: additional_params.check_metadata_hash,
		}
	}

	fn signed_extra(&self) -> Self::SignedExtra {
		GenericSignedExtra::new(Era::Immortal, self.nonce, self.tip, self.check_metadata_hash)
	}

	fn additional_signed(&self) -> Self::AdditionalSigned {
		// Immortal transactions use the genesis hash as mortality checkpoint.
		(
			(),
			self.spec_version,
			self.transaction_version,
			self.genesis_hash,
			self.genesis_hash,
			(),
			(),
			(),
			self.check_metadata_hash,
		)
	}
}

/// A payload that has been signed for an unchecked extrinsic.
// https://github.com/paritytech/polkadot-sdk/blob/master/substrate/primitives/runtime/src/generic/unchecked_extrinsic.rs
#[derive(Encode, Clone, Eq, PartialEq, Debug)]
pub struct SignedPayload<Call, SignedExtra, AdditionalSigned>(
	(Call, SignedExtra, AdditionalSigned),
);

impl<Call, SignedExtra, AdditionalSigned> SignedPayload<Call, SignedExtra, AdditionalSigned>
where
	Call: Encode,
	SignedExtra: Encode,
	AdditionalSigned: Encode,
{
	/// Create new `SignedPayload` from raw components.
	pub fn from_raw(call: Call, extra: SignedExtra, additional_signed: AdditionalSigned) -> Self {
		Self((call, extra, additional_signed))
	}

	/// Get an encoded version of this payload.
	///
	/// Payloads longer than 256 bytes are going to be `blake2_256`-hashed.
	pub fn using_encoded<R, F: FnOnce(&[u8]) -> R>(&self, f: F) -> R {
		self.0.using_encoded(|payload| {
			if payload.len() > 256 {
				f(&BlakeTwo256::hash(payload)[..])
			} else {
				f(payload)
			}
		})
	}
}

/// Default tip payment for a substrate node using the balance pallet.
#[derive(Copy, Clone, Debug, Default, Decode, Encode, Eq, PartialEq)]
pub struct PlainTip<Balance> {
	#[codec(compact)]
	tip: Balance,
}

impl<Balance> PlainTip<Balance> {
	pub fn new(amount: Balance) -> Self {
		PlainTip { tip: amount }
	}
}

impl<Balance> From<Balance> for PlainTip<Balance> {
	fn from(n: Balance) -> Self {
		PlainTip::new(n)
	}
}

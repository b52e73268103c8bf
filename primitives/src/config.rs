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

//! The runtime types the load generator needs to know about.

use crate::{
	extrinsic_params::{ExtrinsicParams, GenericExtrinsicParams, PlainTip},
	signer::{ExtrinsicSigner, SignExtrinsic},
	types::{AccountBalance, AccountData},
	AccountId32, BlakeTwo256, MultiAddress, MultiSignature, H256,
};
use codec::{Decode, Encode};
use core::{
	fmt::{Debug, Display},
	str::FromStr,
};
use serde::{de::DeserializeOwned, Serialize};
use sp_core::{ed25519, sr25519, Pair};
use sp_runtime::traits::{AtLeast32Bit, AtLeast32BitUnsigned, Hash as HashTrait};

/// Runtime types.
pub trait Config {
	/// Account index (aka nonce) type. This stores the number of previous
	/// transactions associated with a sender account.
	type Index: Debug
		+ Display
		+ Copy
		+ Default
		+ Send
		+ Sync
		+ Encode
		+ Decode
		+ DeserializeOwned
		+ AtLeast32Bit;

	/// The output of the `Hasher` function.
	type Hash: Debug
		+ Copy
		+ Send
		+ Sync
		+ Decode
		+ Encode
		+ Default
		+ AsRef<[u8]>
		+ Serialize
		+ DeserializeOwned
		+ PartialEq
		+ 'static;

	/// The account ID type. Serializes to the representation the node expects
	/// as rpc parameter (ss58 for `AccountId32`).
	type AccountId: Debug
		+ Display
		+ Clone
		+ Send
		+ Sync
		+ Encode
		+ Decode
		+ Serialize
		+ FromStr
		+ From<<Self::CryptoKey as Pair>::Public>;

	/// The address type used by the runtime lookup.
	type Address: Debug + Clone + Send + Sync + Encode + From<Self::AccountId>;

	/// The signature type.
	type Signature: Debug + Encode + From<<Self::CryptoKey as Pair>::Signature>;

	/// The hashing algorithm used by the runtime (e.g. Blake2).
	type Hasher: Debug + HashTrait<Output = Self::Hash>;

	/// The balance type of the balances pallet.
	type Balance: Debug
		+ Display
		+ FromStr
		+ Copy
		+ Default
		+ Send
		+ Sync
		+ Encode
		+ Decode
		+ AtLeast32BitUnsigned;

	/// The data stored in `System.Account` next to the nonce.
	type AccountData: Debug + Default + Decode + AccountBalance<Self::Balance>;

	/// This type defines the extrinsic extra and additional parameters.
	type ExtrinsicParams: ExtrinsicParams<Self::Index, Self::Hash>;

	/// The cryptographic key pair type used to sign the extrinsic.
	type CryptoKey: Pair;

	/// The extrinsic signer.
	type ExtrinsicSigner: SignExtrinsic<Self::AccountId> + Send + Sync;
}

/// Standard runtime config for Substrate and Polkadot nodes.
#[derive(Decode, Encode, Clone, Eq, PartialEq, Debug)]
pub struct DefaultRuntimeConfig {}

impl Config for DefaultRuntimeConfig {
	type Index = u32;
	type Hash = H256;
	type AccountId = AccountId32;
	type Address = MultiAddress<Self::AccountId, u32>;
	type Signature = MultiSignature;
	type Hasher = BlakeTwo256;
	type Balance = u128;
	type AccountData = AccountData<Self::Balance>;
	type ExtrinsicParams = PlainTipExtrinsicParams<Self>;
	type CryptoKey = sr25519::Pair;
	type ExtrinsicSigner = ExtrinsicSigner<Self>;
}

/// Standard runtime config, signing with ed25519 keys instead of sr25519.
#[derive(Decode, Encode, Clone, Eq, PartialEq, Debug)]
pub struct Ed25519RuntimeConfig {}

impl Config for Ed25519RuntimeConfig {
	type Index = u32;
	type Hash = H256;
	type AccountId = AccountId32;
	type Address = MultiAddress<Self::AccountId, u32>;
	type Signature = MultiSignature;
	type Hasher = BlakeTwo256;
	type Balance = u128;
	type AccountData = AccountData<Self::Balance>;
	type ExtrinsicParams = PlainTipExtrinsicParams<Self>;
	type CryptoKey = ed25519::Pair;
	type ExtrinsicSigner = ExtrinsicSigner<Self>;
}

/// Signed extra and additional parameters of a node that pays its fees
/// in the native token.
pub type PlainTipExtrinsicParams<T> = GenericExtrinsicParams<T, PlainTip<<T as Config>::Balance>>;

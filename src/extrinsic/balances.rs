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

//! Extrinsics for `pallet-balances`.
//! https://polkadot.js.org/docs/substrate/extrinsics/#balances

use crate::api::{api_client::UncheckedExtrinsicFor, Api, Metadata, Result};
use codec::{Compact, Encode};
use log::debug;
use tl_primitives::{CallIndex, Config};

pub const BALANCES_MODULE: &str = "Balances";
pub const TRANSFER_ALLOW_DEATH: &str = "transfer_allow_death";
/// Name of `transfer_allow_death` on runtimes older than polkadot-sdk 1.0.
pub const TRANSFER: &str = "transfer";

/// Call for a balance transfer.
pub type TransferCall<Address, Balance> = (CallIndex, Address, Compact<Balance>);

pub trait BalancesExtrinsics {
	type Balance;
	type Address;
	type Index;
	type Extrinsic<Call>;

	/// Transfer some liquid free balance to another account, signed by the api signer
	/// with the given nonce.
	fn balance_transfer(
		&self,
		to: Self::Address,
		amount: Self::Balance,
		nonce: Self::Index,
	) -> Result<Self::Extrinsic<TransferCall<Self::Address, Self::Balance>>>;
}

impl<T, Client> BalancesExtrinsics for Api<T, Client>
where
	T: Config,
	Compact<T::Balance>: Encode + Clone,
{
	type Balance = T::Balance;
	type Address = T::Address;
	type Index = T::Index;
	type Extrinsic<Call> = UncheckedExtrinsicFor<T, Call>;

	fn balance_transfer(
		&self,
		to: Self::Address,
		amount: Self::Balance,
		nonce: Self::Index,
	) -> Result<Self::Extrinsic<TransferCall<Self::Address, Self::Balance>>> {
		let call_index = transfer_call_index(self.metadata())?;
		debug!("composing balance transfer of {} with nonce {}", amount, nonce);
		self.compose_extrinsic_offline((call_index, to, Compact(amount)), nonce)
	}
}

/// Index of `Balances::transfer_allow_death`, or of the legacy `Balances::transfer`
/// if the runtime does not know the former.
pub fn transfer_call_index(metadata: &Metadata) -> Result<CallIndex> {
	let call_index = metadata
		.call_index(BALANCES_MODULE, TRANSFER_ALLOW_DEATH)
		.or_else(|_| metadata.call_index(BALANCES_MODULE, TRANSFER))?;
	Ok(call_index)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		api::{
			api_client::tests::{alice, runtime_version, GENESIS_HASH},
			metadata::{
				tests::{runtime_metadata, BalancesCall, LegacyBalancesCall, SystemCall},
				MetadataError,
			},
			Error,
		},
		rpc::mocks::RpcClientMock,
	};
	use codec::Decode;
	use sp_runtime::generic::Era;
	use tl_primitives::{
		AccountId32, DefaultRuntimeConfig, MultiAddress, MultiSignature, SignExtrinsic,
		UncheckedExtrinsic,
	};

	type Address = MultiAddress<AccountId32, u32>;
	type DecodedExtrinsic = UncheckedExtrinsic<
		Address,
		TransferCall<Address, u128>,
		MultiSignature,
		(Era, Compact<u32>, Compact<u128>),
	>;

	fn api_for<Call: scale_info::TypeInfo + 'static>() -> Api<DefaultRuntimeConfig, RpcClientMock> {
		let metadata = Metadata::try_from(runtime_metadata::<Call>(&[])).unwrap();
		let mut api =
			Api::new_offline(GENESIS_HASH, metadata, runtime_version(), RpcClientMock::default());
		api.set_signer(alice());
		api
	}

	#[test]
	fn transfer_uses_transfer_allow_death() {
		let api = api_for::<BalancesCall>();
		let dest = AccountId32::new([0x11; 32]);

		let xt = api.balance_transfer(dest.clone().into(), 1_000_000_000_000_000_000, 9).unwrap();

		let (call_index, to, Compact(amount)) = xt.function.clone();
		assert_eq!(call_index, [10, 0]);
		assert_eq!(to, MultiAddress::Id(dest));
		assert_eq!(amount, 1_000_000_000_000_000_000);
		assert_eq!(xt.signature.map(|(_, _, extra)| extra.nonce), Some(9));
	}

	#[test]
	fn transfer_falls_back_to_legacy_call() {
		let api = api_for::<LegacyBalancesCall>();

		let xt = api.balance_transfer(AccountId32::new([0x11; 32]).into(), 1, 0).unwrap();

		assert_eq!(xt.function.0, [10, 5]);
	}

	#[test]
	fn transfer_fails_without_any_transfer_call() {
		let api = api_for::<SystemCall>();

		let result = api.balance_transfer(AccountId32::new([0x11; 32]).into(), 1, 0);

		assert!(matches!(
			result,
			Err(Error::Metadata(MetadataError::CallNotFound(pallet, call)))
				if pallet == BALANCES_MODULE && call == TRANSFER
		));
	}

	#[test]
	fn encoded_transfer_decodes_as_signed_v4_extrinsic() {
		let api = api_for::<BalancesCall>();
		let dest = AccountId32::new([0x11; 32]);

		let encoded = api.balance_transfer(dest.clone().into(), 42, 7).unwrap().encode();
		let decoded = DecodedExtrinsic::decode(&mut encoded.as_slice()).unwrap();

		let (address, _, (era, Compact(nonce), Compact(tip))) = decoded.signature.unwrap();
		assert_eq!(address, MultiAddress::Id(alice().public_account_id().clone()));
		assert_eq!(era, Era::Immortal);
		assert_eq!(nonce, 7);
		assert_eq!(tip, 0);
		assert_eq!(decoded.function, ([10, 0], MultiAddress::Id(dest), Compact(42u128)));
	}
}

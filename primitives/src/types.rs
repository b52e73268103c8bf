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

//! Re-definition of the account types stored on chain, so the pallets
//! themselves do not need to be pulled in.

use codec::{Decode, Encode};

/// Type used to encode the number of references an account has.
pub type RefCount = u32;

/// Information of an account.
// https://github.com/paritytech/polkadot-sdk/blob/master/substrate/frame/system/src/lib.rs
#[derive(Clone, Eq, PartialEq, Default, Debug, Encode, Decode)]
pub struct AccountInfo<Index, AccountData> {
	/// The number of transactions this account has sent.
	pub nonce: Index,
	/// The number of other modules that currently depend on this account's existence.
	pub consumers: RefCount,
	/// The number of other modules that allow this account to exist.
	pub providers: RefCount,
	/// The number of modules that allow this account to exist for their own purposes only.
	pub sufficients: RefCount,
	/// The additional data that belongs to this account. Holds the balances on most chains.
	pub data: AccountData,
}

/// Balance information of an account, as stored by `pallet-balances`.
#[derive(Clone, Eq, PartialEq, Default, Debug, Encode, Decode)]
pub struct AccountData<Balance> {
	/// Non-reserved part of the balance.
	pub free: Balance,
	/// Balance which is reserved and may not be used at all.
	pub reserved: Balance,
	/// The amount that `free` may not drop below when reducing the balance.
	pub frozen: Balance,
	pub flags: ExtraFlags,
}

#[derive(Clone, Copy, Eq, PartialEq, Default, Debug, Encode, Decode)]
pub struct ExtraFlags(pub u128);

/// Access to the free balance of whatever a runtime stores as account data.
pub trait AccountBalance<Balance> {
	fn free(&self) -> Balance;
}

impl<Balance: Copy> AccountBalance<Balance> for AccountData<Balance> {
	fn free(&self) -> Balance {
		self.free
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn account_info_decodes_from_storage_layout() {
		let info = AccountInfo {
			nonce: 7u32,
			consumers: 1,
			providers: 1,
			sufficients: 0,
			data: AccountData {
				free: 1_000_000_000_000_000_000u128,
				reserved: 5,
				frozen: 0,
				flags: ExtraFlags(1u128 << 127),
			},
		};

		// nonce (4) + 3 ref counts (12) + 4 balances (64)
		let encoded = info.encode();
		assert_eq!(encoded.len(), 80);

		let decoded = AccountInfo::<u32, AccountData<u128>>::decode(&mut encoded.as_slice()).unwrap();
		assert_eq!(decoded.nonce, 7);
		assert_eq!(decoded.data.free(), 1_000_000_000_000_000_000);
	}

	#[test]
	fn default_account_data_has_zero_free_balance() {
		let data = AccountData::<u128>::default();
		assert_eq!(data.free(), 0);
	}
}

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
	api::{Api, Error, GetStorage, Result},
	rpc::Request,
};
use async_trait::async_trait;
use tl_primitives::{rpc_params, AccountInfo, Config};

#[async_trait(?Send)]
pub trait GetAccountInformation {
	type AccountId;
	type Index;
	type AccountData;

	/// Retrieves the next accountIndex as available on the node.
	/// Unlike the nonce stored in `System.Account`, this includes the
	/// transactions of the account waiting in the pool.
	async fn get_system_account_next_index(&self, account_id: Self::AccountId)
		-> Result<Self::Index>;

	async fn get_account_info(
		&self,
		address: &Self::AccountId,
	) -> Result<Option<AccountInfo<Self::Index, Self::AccountData>>>;

	async fn get_account_data(&self, address: &Self::AccountId)
		-> Result<Option<Self::AccountData>>;
}

#[async_trait(?Send)]
impl<T, Client> GetAccountInformation for Api<T, Client>
where
	T: Config,
	Client: Request,
{
	type AccountId = T::AccountId;
	type Index = T::Index;
	type AccountData = T::AccountData;

	async fn get_system_account_next_index(
		&self,
		account_id: Self::AccountId,
	) -> Result<Self::Index> {
		let next_index: Self::Index =
			self.client().request("system_accountNextIndex", rpc_params![account_id]).await?;
		Ok(next_index)
	}

	async fn get_account_info(
		&self,
		address: &Self::AccountId,
	) -> Result<Option<AccountInfo<Self::Index, Self::AccountData>>> {
		self.get_storage_map_blake2_128_concat("System", "Account", address, None).await
	}

	async fn get_account_data(
		&self,
		address: &Self::AccountId,
	) -> Result<Option<Self::AccountData>> {
		self.get_account_info(address).await.map(|info| info.map(|i| i.data))
	}
}

/// Nonce of the api signer.
#[async_trait(?Send)]
pub trait SystemApi {
	type Index;

	async fn get_nonce(&self) -> Result<Self::Index>;
}

#[async_trait(?Send)]
impl<T, Client> SystemApi for Api<T, Client>
where
	T: Config,
	Client: Request,
{
	type Index = T::Index;

	async fn get_nonce(&self) -> Result<Self::Index> {
		let account_id = self.signer_account().ok_or(Error::NoSigner)?;
		self.get_system_account_next_index(account_id.clone()).await
	}
}

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
	api::{Api, Result},
	rpc::Request,
	utils,
};
use async_trait::async_trait;
use codec::{Decode, Encode};
use log::*;
use sp_core::storage::{StorageData, StorageKey};
use tl_primitives::{rpc_params, Config};

/// Generic interface to substrate storage.
#[async_trait(?Send)]
pub trait GetStorage {
	type Hash;

	/// Storage map entry whose key is hashed with `Blake2_128Concat`.
	async fn get_storage_map_blake2_128_concat<K: Encode, V: Decode>(
		&self,
		storage_prefix: &'static str,
		storage_key_name: &'static str,
		map_key: K,
		at_block: Option<Self::Hash>,
	) -> Result<Option<V>>;

	async fn get_storage_by_key<V: Decode>(
		&self,
		key: StorageKey,
		at_block: Option<Self::Hash>,
	) -> Result<Option<V>>;

	async fn get_opaque_storage_by_key(
		&self,
		key: StorageKey,
		at_block: Option<Self::Hash>,
	) -> Result<Option<Vec<u8>>>;
}

#[async_trait(?Send)]
impl<T, Client> GetStorage for Api<T, Client>
where
	T: Config,
	Client: Request,
{
	type Hash = T::Hash;

	async fn get_storage_map_blake2_128_concat<K: Encode, V: Decode>(
		&self,
		storage_prefix: &'static str,
		storage_key_name: &'static str,
		map_key: K,
		at_block: Option<Self::Hash>,
	) -> Result<Option<V>> {
		let storagekey = utils::storage_map_key_blake2_128_concat(
			storage_prefix,
			storage_key_name,
			&map_key.encode(),
		);
		debug!("storage key is: 0x{}", hex::encode(&storagekey));
		self.get_storage_by_key(storagekey, at_block).await
	}

	async fn get_storage_by_key<V: Decode>(
		&self,
		key: StorageKey,
		at_block: Option<Self::Hash>,
	) -> Result<Option<V>> {
		let s = self.get_opaque_storage_by_key(key, at_block).await?;
		match s {
			Some(storage) => Ok(Some(Decode::decode(&mut storage.as_slice())?)),
			None => Ok(None),
		}
	}

	async fn get_opaque_storage_by_key(
		&self,
		key: StorageKey,
		at_block: Option<Self::Hash>,
	) -> Result<Option<Vec<u8>>> {
		let storage: Option<StorageData> =
			self.client().request("state_getStorage", rpc_params![key, at_block]).await?;
		Ok(storage.map(|storage_data| storage_data.0))
	}
}

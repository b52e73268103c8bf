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

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use error::{Error, Result};
pub use jsonrpsee_client::JsonrpseeClient;
pub use tl_primitives::RpcParams;

pub mod error;
pub mod jsonrpsee_client;

#[cfg(test)]
pub mod mocks;

/// Trait to be implemented by the ws-client for sending rpc requests and extrinsic.
#[async_trait]
pub trait Request {
	/// Sends a RPC request to the substrate node and returns the deserialized result.
	async fn request<R: DeserializeOwned + Send>(&self, method: &str, params: RpcParams)
		-> Result<R>;
}

/// Trait to be implemented by the ws-client for subscribing to the substrate node.
#[async_trait]
pub trait Subscribe {
	type Subscription<Notification>: HandleSubscription<Notification>
	where
		Notification: DeserializeOwned + Send;

	async fn subscribe<Notification: DeserializeOwned + Send>(
		&self,
		sub: &str,
		params: RpcParams,
		unsub: &str,
	) -> Result<Self::Subscription<Notification>>;
}

/// Trait to use the full functionality of jsonrpseee Subscription type
/// without actually enforcing it.
#[async_trait]
pub trait HandleSubscription<Notification: DeserializeOwned + Send> {
	/// Returns the next notification from the stream.
	/// This may return `None` if the subscription has been terminated,
	/// which may happen if the channel becomes full or is dropped.
	async fn next(&mut self) -> Option<Result<Notification>>;

	/// Unsubscribe and consume the subscription.
	async fn unsubscribe(self) -> Result<()>;
}

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

//! The transfer loop.
//!
//! Every iteration logs the free balance of the sender, submits one transfer
//! signed with the locally tracked nonce, hands the status subscription to a
//! background watcher, sleeps and increments the nonce. The nonce is fetched
//! from the node once and then only ever incremented, so it stays in step with
//! the number of submitted transfers even if some of them never get included.

pub use config::{KeyScheme, LoadConfig, LoadSettings};
pub use error::{LoadError, Result};

pub mod config;
pub mod error;

use crate::{
	api::{
		watch_extrinsic_until, Api, Error as ApiError, GetAccountInformation, SubmitAndWatch,
		SystemApi, TransactionStatus, TransactionSubscriptionFor, XtStatus,
	},
	extrinsic::BalancesExtrinsics,
	rpc::{HandleSubscription, Request, Subscribe},
};
use codec::{Compact, Encode};
use core::fmt::{Debug, Display};
use log::*;
use serde::de::DeserializeOwned;
use sp_runtime::traits::Hash as HashTrait;
use tl_primitives::{AccountBalance, Config};
use tokio::task::JoinSet;

pub struct TransferLoad<T: Config, Client> {
	api: Api<T, Client>,
	settings: LoadSettings<T>,
	nonce: T::Index,
	watchers: JoinSet<()>,
}

impl<T, Client> TransferLoad<T, Client>
where
	T: Config,
	Client: Request + Subscribe,
	TransactionSubscriptionFor<Client, T::Hash>: Send + 'static,
	Compact<T::Balance>: Encode + Clone,
{
	/// Prepare the loop, starting at the next nonce of the api signer as known by the node.
	pub async fn new(api: Api<T, Client>, settings: LoadSettings<T>) -> Result<Self> {
		let nonce = api.get_nonce().await?;
		info!("[+] Starting transfer loop at nonce {}", nonce);
		Ok(Self { api, settings, nonce, watchers: JoinSet::new() })
	}

	/// Nonce the next transfer is signed with.
	pub fn nonce(&self) -> T::Index {
		self.nonce
	}

	pub fn api(&self) -> &Api<T, Client> {
		&self.api
	}

	/// Number of submitted transfers that are still being watched.
	pub fn pending_watchers(&self) -> usize {
		self.watchers.len()
	}

	/// Run until the configured number of iterations is reached, or forever.
	/// Returns on the first error of the loop itself. Failing watchers are only logged.
	pub async fn run(&mut self) -> Result<()> {
		let mut iteration: u64 = 0;
		while self.settings.iterations.map_or(true, |limit| iteration < limit) {
			self.iterate().await?;
			iteration += 1;
		}
		info!("[+] Sent {} transfers, waiting for pending inclusions", iteration);
		self.drain_watchers().await;
		Ok(())
	}

	async fn iterate(&mut self) -> Result<()> {
		self.log_balance().await?;
		// Transfers signed for an outdated spec version are rejected by the node.
		self.api.update_runtime().await?;
		self.submit_transfer().await?;
		self.reap_watchers();
		tokio::time::sleep(self.settings.delay).await;
		self.nonce += T::Index::from(1u32);
		Ok(())
	}

	async fn log_balance(&self) -> Result<()> {
		let account = self.api.signer_account().ok_or(ApiError::NoSigner)?;
		let free = self
			.api
			.get_account_data(account)
			.await?
			.map(|data| data.free())
			.unwrap_or_default();
		info!("{}", balance_line(account, free));
		Ok(())
	}

	async fn submit_transfer(&mut self) -> Result<()> {
		let xt = self.api.balance_transfer(
			self.settings.dest.clone().into(),
			self.settings.amount,
			self.nonce,
		)?;
		let encoded = xt.encode();
		let extrinsic_hash = <T::Hasher as HashTrait>::hash(&encoded);
		let subscription = self.api.submit_and_watch_extrinsic(&encoded).await?;
		debug!("Submitted transfer {:?} with nonce {}", extrinsic_hash, self.nonce);
		self.watchers.spawn(watch_inclusion(subscription, extrinsic_hash));
		Ok(())
	}

	/// Collect watchers that finished since the last iteration.
	fn reap_watchers(&mut self) {
		while let Some(result) = self.watchers.try_join_next() {
			if let Err(e) = result {
				warn!("Inclusion watcher failed: {}", e);
			}
		}
	}

	/// Wait for outstanding watchers, aborting those still pending after the drain timeout.
	async fn drain_watchers(&mut self) {
		let watchers = &mut self.watchers;
		let drain = async {
			while let Some(result) = watchers.join_next().await {
				if let Err(e) = result {
					warn!("Inclusion watcher failed: {}", e);
				}
			}
		};
		if tokio::time::timeout(self.settings.drain_timeout, drain).await.is_err() {
			warn!(
				"Gave up on {} pending inclusions after {:?}",
				self.watchers.len(),
				self.settings.drain_timeout
			);
			self.watchers.shutdown().await;
		}
	}
}

fn balance_line(account: impl Display, free: impl Display) -> String {
	format!("Balance for {account} on Substrate: {free}")
}

fn inclusion_line(block_hash: &impl Debug) -> String {
	format!("Payment included at blockHash {block_hash:?} (waiting finalization...)")
}

/// Log once the extrinsic made it into a block, then stop watching.
async fn watch_inclusion<Hash, Subscription>(subscription: Subscription, extrinsic_hash: Hash)
where
	Hash: Debug + DeserializeOwned + Send + Clone,
	Subscription: HandleSubscription<TransactionStatus<Hash, Hash>>,
{
	match watch_extrinsic_until(subscription, extrinsic_hash.clone(), XtStatus::InBlock).await {
		Ok(report) => match report.block_hash {
			Some(block_hash) => info!("{}", inclusion_line(&block_hash)),
			None => info!("Payment {:?} reached status {:?}", extrinsic_hash, report.status),
		},
		Err(e) => warn!("Stopped watching payment {:?}: {}", extrinsic_hash, e),
	}
}

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

pub use api_client::Api;
pub use error::{Error, Result};
pub use metadata::Metadata;
pub use rpc_api::*;

pub mod api_client;
pub mod error;
pub mod metadata;
pub mod rpc_api;

use serde::{Deserialize, Serialize};

/// Extrinsic report returned upon a submit_and_watch request.
/// Holds as much information as available.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrinsicReport<Hash> {
	/// Hash of the extrinsic.
	pub extrinsic_hash: Hash,
	/// Block hash of the block the extrinsic was included in.
	/// Only available if watched until at least `InBlock`.
	pub block_hash: Option<Hash>,
	/// Last known Transaction Status.
	pub status: TransactionStatus<Hash, Hash>,
}

impl<Hash> ExtrinsicReport<Hash> {
	pub fn new(
		extrinsic_hash: Hash,
		block_hash: Option<Hash>,
		status: TransactionStatus<Hash, Hash>,
	) -> Self {
		Self { extrinsic_hash, block_hash, status }
	}
}

/// Simplified TransactionStatus to allow the user to choose until when to watch
/// an extrinsic.
// Indexes must match the TransactionStatus::as_u8 from below.
#[derive(Debug, PartialEq, PartialOrd, Eq, Copy, Clone)]
pub enum XtStatus {
	Ready = 1,
	Broadcast = 2,
	InBlock = 3,
	Finalized = 6,
}

/// TransactionStatus that are not expected during the watch process.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum UnexpectedTxStatus {
	Future,
	Retracted,
	FinalityTimeout,
	Usurped,
	Dropped,
	Invalid,
}

/// Possible transaction status events.
// Copied from `sc-transaction-pool`, which is not worth the dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionStatus<Hash, BlockHash> {
	/// Transaction is part of the future queue.
	Future,
	/// Transaction is part of the ready queue.
	Ready,
	/// The transaction has been broadcast to the given peers.
	Broadcast(Vec<String>),
	/// Transaction has been included in block with given hash.
	InBlock(BlockHash),
	/// The block this transaction was included in has been retracted.
	Retracted(BlockHash),
	/// Maximum number of finality watchers has been reached,
	/// old watchers are being removed.
	FinalityTimeout(BlockHash),
	/// Transaction has been finalized by a finality-gadget, e.g GRANDPA
	Finalized(BlockHash),
	/// Transaction has been replaced in the pool, by another transaction
	/// that provides the same tags. (e.g. same (sender, nonce)).
	Usurped(Hash),
	/// Transaction has been dropped from the pool because of the limit.
	Dropped,
	/// Transaction is no longer valid in the current state.
	Invalid,
}

impl<Hash, BlockHash> TransactionStatus<Hash, BlockHash> {
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Future => 0,
			Self::Ready => 1,
			Self::Broadcast(_) => 2,
			Self::InBlock(_) => 3,
			Self::Retracted(_) => 4,
			Self::FinalityTimeout(_) => 5,
			Self::Finalized(_) => 6,
			Self::Usurped(_) => 7,
			Self::Dropped => 8,
			Self::Invalid => 9,
		}
	}

	pub fn is_expected(&self) -> core::result::Result<(), UnexpectedTxStatus> {
		match self {
			Self::Ready | Self::Broadcast(_) | Self::InBlock(_) | Self::Finalized(_) => Ok(()),
			Self::Future => Err(UnexpectedTxStatus::Future),
			Self::Retracted(_) => Err(UnexpectedTxStatus::Retracted),
			Self::FinalityTimeout(_) => Err(UnexpectedTxStatus::FinalityTimeout),
			Self::Usurped(_) => Err(UnexpectedTxStatus::Usurped),
			Self::Dropped => Err(UnexpectedTxStatus::Dropped),
			Self::Invalid => Err(UnexpectedTxStatus::Invalid),
		}
	}

	/// Returns true if the input status has been reached (or overreached)
	/// and false in case the status is not yet on the expected level.
	pub fn reached_status(&self, status: XtStatus) -> bool {
		self.as_u8() >= status as u8
	}

	pub fn get_maybe_block_hash(&self) -> Option<&BlockHash> {
		match self {
			Self::InBlock(block_hash)
			| Self::Retracted(block_hash)
			| Self::FinalityTimeout(block_hash)
			| Self::Finalized(block_hash) => Some(block_hash),
			_ => None,
		}
	}
}

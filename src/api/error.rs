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
	api::{metadata::MetadataError, UnexpectedTxStatus},
	rpc::Error as RpcClientError,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, derive_more::From)]
pub enum Error {
	/// Could not fetch the genesis hash from node.
	FetchGenesisHash,
	/// Expected a signer, but none is assigned.
	NoSigner,
	/// Rpc Client Error.
	RpcClient(RpcClientError),
	/// Metadata Error.
	Metadata(MetadataError),
	/// Encode / Decode Error.
	Codec(codec::Error),
	/// Encountered unexpected tx status during watch process.
	UnexpectedTxStatus(UnexpectedTxStatus),
	/// Could not send update because the Stream has been closed unexpectedly.
	NoStream,
	/// Any custom Error.
	Other(Box<dyn core::error::Error + Send + Sync + 'static>),
}

impl core::fmt::Display for Error {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::FetchGenesisHash => write!(f, "Could not fetch the genesis hash from node"),
			Self::NoSigner => write!(f, "Expected a signer, but none is assigned"),
			Self::RpcClient(e) => write!(f, "Rpc client error: {e}"),
			Self::Metadata(e) => write!(f, "Metadata error: {e:?}"),
			Self::Codec(e) => write!(f, "Codec error: {e}"),
			Self::UnexpectedTxStatus(status) =>
				write!(f, "Unexpected transaction status: {status:?}, stopping watch process"),
			Self::NoStream => write!(f, "Subscription stream closed unexpectedly"),
			Self::Other(e) => write!(f, "{e}"),
		}
	}
}

impl core::error::Error for Error {}

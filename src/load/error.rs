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

use crate::{api::Error as ApiError, rpc::Error as RpcClientError};

pub type Result<T> = core::result::Result<T, LoadError>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("Could not connect to node: {0}")]
	Connect(#[from] RpcClientError),
	#[error(transparent)]
	Api(#[from] ApiError),
	#[error("Invalid secret URI: {0}")]
	InvalidSeed(String),
	#[error("Invalid destination account: {0}")]
	InvalidDestination(String),
	#[error("Amount {0} does not fit into the runtime balance type")]
	InvalidAmount(u128),
}

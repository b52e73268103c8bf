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

//! Primitive types needed to compose, sign and encode balance transfers
//! for a Substrate node.

pub use config::*;
pub use extrinsic_params::*;
pub use extrinsics::*;
pub use rpc_params::RpcParams;
pub use signer::*;
pub use types::*;

pub mod config;
pub mod extrinsic_params;
pub mod extrinsics;
pub mod rpc_params;
pub mod signer;
pub mod types;

// Re-export substrate types so the runtime configs can be written without
// depending on sp-core and sp-runtime directly.
pub use sp_core::{ed25519, sr25519, Bytes, H256};
pub use sp_runtime::{traits::BlakeTwo256, AccountId32, MultiAddress, MultiSignature};

/// Build an [`RpcParams`] list out of any number of serializable values.
///
/// Insertion only fails if a value can not be serialized to json, which does
/// not happen for the parameter types used in this crate.
#[macro_export]
macro_rules! rpc_params {
	($($param:expr),*) => {
		{
			#[allow(unused_mut)]
			let mut params = $crate::RpcParams::new();
			$(
				if let Err(err) = params.insert($param) {
					panic!("Parameter `{}` cannot be serialized: {:?}", stringify!($param), err);
				}
			)*
			params
		}
	};
}

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

//! Balance transfer load generator for Substrate nodes.
//!
//! [`load::TransferLoad`] drives the loop: read the sender balance, submit a
//! transfer with a locally tracked nonce, wait, repeat. Everything it needs
//! from the node goes through [`Api`] and an [`rpc`] client.

pub use api::*;
pub use tl_primitives;

pub mod api;
pub mod extrinsic;
pub mod load;
pub mod rpc;
pub mod utils;

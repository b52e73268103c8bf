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

use sp_core::storage::StorageKey;
use sp_crypto_hashing::{blake2_128, twox_128};

/// Returns the concatenated 128 bit hash of the given module and specific storage key
/// as a full Substrate StorageKey.
pub fn storage_key(module: &str, storage_key_name: &str) -> StorageKey {
	let mut key = twox_128(module.as_bytes()).to_vec();
	key.extend(twox_128(storage_key_name.as_bytes()));
	StorageKey(key)
}

/// Storage key of a map entry whose key is hashed with `Blake2_128Concat`,
/// such as `System.Account`.
pub fn storage_map_key_blake2_128_concat(
	module: &str,
	storage_key_name: &str,
	encoded_map_key: &[u8],
) -> StorageKey {
	let StorageKey(mut key) = storage_key(module, storage_key_name);
	key.extend(blake2_128(encoded_map_key));
	key.extend(encoded_map_key);
	StorageKey(key)
}

pub trait ToHexString {
	fn to_hex(&self) -> String;
}

impl ToHexString for [u8] {
	fn to_hex(&self) -> String {
		format!("0x{}", hex::encode(self))
	}
}

impl ToHexString for Vec<u8> {
	fn to_hex(&self) -> String {
		self.as_slice().to_hex()
	}
}

pub trait FromHexString: Sized {
	fn from_hex(hex: &str) -> Result<Self, hex::FromHexError>;
}

impl FromHexString for Vec<u8> {
	fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
		hex::decode(hex.trim_start_matches("0x"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case("0x0102ff", vec![1, 2, 255] ; "prefixed")]
	#[test_case("0102ff", vec![1, 2, 255] ; "unprefixed")]
	#[test_case("0x", vec![] ; "empty")]
	fn from_hex_accepts_optional_prefix(input: &str, expected: Vec<u8>) {
		assert_eq!(Vec::<u8>::from_hex(input).unwrap(), expected);
	}

	#[test]
	fn from_hex_rejects_invalid_characters() {
		assert!(Vec::<u8>::from_hex("0xzz").is_err());
	}

	#[test]
	fn to_hex_prefixes_output() {
		assert_eq!(vec![0xde, 0xad].to_hex(), "0xdead");
	}

	#[test]
	fn system_account_key_has_well_known_prefix() {
		let key = storage_map_key_blake2_128_concat("System", "Account", &[0u8; 32]);
		let expected_prefix =
			"26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9";

		assert_eq!(key.0.len(), 16 + 16 + 16 + 32);
		assert_eq!(hex::encode(&key.0[..32]), expected_prefix);
		assert_eq!(&key.0[48..], &[0u8; 32]);
	}
}

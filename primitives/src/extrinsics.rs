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

//! Primitives for substrate extrinsics.

use codec::{Decode, Encode, Error, Input, Output};
use core::fmt;

/// Current version of the [`UncheckedExtrinsic`] encoded format.
pub const EXTRINSIC_FORMAT_VERSION: u8 = 4;

const SIGNED_BIT: u8 = 0b1000_0000;

/// Pallet index followed by the call index within that pallet.
pub type CallIndex = [u8; 2];

/// Mirrors the V4 extrinsic format of substrate, without the runtime checks.
/// The SignedExtra does not need to implement SignedExtension here.
#[derive(Clone, Eq, PartialEq)]
pub struct UncheckedExtrinsic<Address, Call, Signature, SignedExtra> {
	/// The signer address, the signature and the extra data, if this is a signed extrinsic.
	pub signature: Option<(Address, Signature, SignedExtra)>,
	/// The function that should be called.
	pub function: Call,
}

impl<Address, Call, Signature, SignedExtra> UncheckedExtrinsic<Address, Call, Signature, SignedExtra> {
	pub fn new_signed(
		function: Call,
		signed: Address,
		signature: Signature,
		extra: SignedExtra,
	) -> Self {
		Self { signature: Some((signed, signature, extra)), function }
	}

	pub fn new_unsigned(function: Call) -> Self {
		Self { signature: None, function }
	}

	pub fn is_signed(&self) -> bool {
		self.signature.is_some()
	}
}

impl<Address, Call, Signature, SignedExtra> fmt::Debug
	for UncheckedExtrinsic<Address, Call, Signature, SignedExtra>
where
	Address: fmt::Debug,
	Call: fmt::Debug,
	SignedExtra: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"UncheckedExtrinsic({:?}, {:?})",
			self.signature.as_ref().map(|x| (&x.0, &x.2)),
			self.function
		)
	}
}

// The encoding must stay binary compatible with `Vec<u8>`, hence the length prefix.
impl<Address, Call, Signature, SignedExtra> Encode
	for UncheckedExtrinsic<Address, Call, Signature, SignedExtra>
where
	Address: Encode,
	Signature: Encode,
	Call: Encode,
	SignedExtra: Encode,
{
	fn encode_to<T: Output + ?Sized>(&self, dest: &mut T) {
		let mut body = Vec::new();
		match self.signature.as_ref() {
			Some(signature) => {
				body.push(EXTRINSIC_FORMAT_VERSION | SIGNED_BIT);
				signature.encode_to(&mut body);
			},
			None => body.push(EXTRINSIC_FORMAT_VERSION),
		}
		self.function.encode_to(&mut body);
		body.encode_to(dest);
	}
}

impl<Address, Call, Signature, SignedExtra> Decode
	for UncheckedExtrinsic<Address, Call, Signature, SignedExtra>
where
	Address: Decode,
	Signature: Decode,
	Call: Decode,
	SignedExtra: Decode,
{
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		// Length prefix, only there for `Vec<u8>` compatibility.
		let _length: codec::Compact<u32> = Decode::decode(input)?;

		let version = input.read_byte()?;
		let is_signed = version & SIGNED_BIT != 0;
		if version & !SIGNED_BIT != EXTRINSIC_FORMAT_VERSION {
			return Err("Invalid transaction version".into())
		}

		Ok(Self {
			signature: if is_signed { Some(Decode::decode(input)?) } else { None },
			function: Decode::decode(input)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{AccountId32, MultiAddress, MultiSignature};
	use codec::Compact;
	use sp_core::sr25519;

	type Call = (CallIndex, MultiAddress<AccountId32, u32>, Compact<u128>);
	type Extrinsic = UncheckedExtrinsic<MultiAddress<AccountId32, u32>, Call, MultiSignature, u32>;

	fn transfer_call() -> Call {
		([5, 0], MultiAddress::Id(AccountId32::new([0x11; 32])), Compact(42))
	}

	#[test]
	fn unsigned_extrinsic_is_length_prefixed() {
		let xt = Extrinsic::new_unsigned(transfer_call());
		let encoded = xt.encode();

		let body_len = 1 + transfer_call().encode().len();
		assert_eq!(encoded[0] as usize, body_len << 2);
		assert_eq!(encoded[1], EXTRINSIC_FORMAT_VERSION);
		assert_eq!(Extrinsic::decode(&mut encoded.as_slice()).unwrap(), xt);
	}

	#[test]
	fn signed_extrinsic_sets_signed_bit() {
		let signer = MultiAddress::Id(AccountId32::new([0x22; 32]));
		let signature = MultiSignature::Sr25519(sr25519::Signature::from_raw([0x33; 64]));
		let xt = Extrinsic::new_signed(transfer_call(), signer, signature, 7);
		let encoded = xt.encode();

		// Compact length prefix takes two bytes for bodies of 64 bytes and more.
		assert_eq!(encoded[2], EXTRINSIC_FORMAT_VERSION | SIGNED_BIT);

		let decoded = Extrinsic::decode(&mut encoded.as_slice()).unwrap();
		assert!(decoded.is_signed());
		assert_eq!(decoded.signature.unwrap().2, 7);
	}

	#[test]
	fn decoding_rejects_unknown_version() {
		let mut body = vec![EXTRINSIC_FORMAT_VERSION + 1];
		body.extend(transfer_call().encode());
		let encoded = body.encode();

		assert!(Extrinsic::decode(&mut encoded.as_slice()).is_err());
	}
}

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

//! Slim view on the runtime metadata: pallet and call indices plus the
//! signed extensions the runtime expects.

use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED};
use scale_info::{form::PortableForm, PortableRegistry, TypeDef};
use std::collections::BTreeMap;
use tl_primitives::CallIndex;

/// Identifier of the signed extension committing to the metadata hash.
pub const CHECK_METADATA_HASH: &str = "CheckMetadataHash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
	/// The metadata does not start with the `meta` magic number.
	InvalidPrefix,
	/// Only V14 and V15 metadata is supported.
	InvalidVersion(u32),
	/// Type is missing from the type registry.
	MissingType(u32),
	/// Call type of a pallet is not an enum.
	TypeDefNotVariant(u32),
	/// Pallet is not in metadata.
	PalletNotFound(String),
	/// Call is not in metadata.
	CallNotFound(String, String),
}

#[derive(Debug, Clone, Default)]
struct PalletMetadata {
	index: u8,
	calls: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
	pallets: BTreeMap<String, PalletMetadata>,
	signed_extensions: Vec<String>,
}

impl Metadata {
	/// Pallet index and call index of `pallet::call`.
	pub fn call_index(&self, pallet: &str, call: &str) -> Result<CallIndex, MetadataError> {
		let pallet_metadata = self
			.pallets
			.get(pallet)
			.ok_or_else(|| MetadataError::PalletNotFound(pallet.to_string()))?;
		let call_index = pallet_metadata
			.calls
			.get(call)
			.ok_or_else(|| MetadataError::CallNotFound(pallet.to_string(), call.to_string()))?;
		Ok([pallet_metadata.index, *call_index])
	}

	pub fn pallet_index(&self, pallet: &str) -> Option<u8> {
		self.pallets.get(pallet).map(|p| p.index)
	}

	/// Identifiers of the signed extensions, in the order the runtime expects them.
	pub fn signed_extensions(&self) -> &[String] {
		&self.signed_extensions
	}

	pub fn has_signed_extension(&self, identifier: &str) -> bool {
		self.signed_extensions.iter().any(|ext| ext == identifier)
	}

	/// Whether the runtime expects the `CheckMetadataHash` extension.
	pub fn supports_metadata_hash_check(&self) -> bool {
		self.has_signed_extension(CHECK_METADATA_HASH)
	}
}

impl TryFrom<RuntimeMetadataPrefixed> for Metadata {
	type Error = MetadataError;

	fn try_from(m: RuntimeMetadataPrefixed) -> Result<Self, Self::Error> {
		if m.0 != META_RESERVED {
			return Err(MetadataError::InvalidPrefix)
		}

		match m.1 {
			RuntimeMetadata::V14(meta) => Self::from_parts(
				meta.pallets
					.iter()
					.map(|p| (p.name.as_str(), p.index, p.calls.as_ref().map(|c| c.ty.id))),
				meta.extrinsic.signed_extensions.iter().map(|ext| ext.identifier.as_str()),
				&meta.types,
			),
			RuntimeMetadata::V15(meta) => Self::from_parts(
				meta.pallets
					.iter()
					.map(|p| (p.name.as_str(), p.index, p.calls.as_ref().map(|c| c.ty.id))),
				meta.extrinsic.signed_extensions.iter().map(|ext| ext.identifier.as_str()),
				&meta.types,
			),
			other => Err(MetadataError::InvalidVersion(other.version())),
		}
	}
}

impl Metadata {
	/// Build from `(name, index, call type id)` per pallet and the signed extension identifiers.
	fn from_parts<'a>(
		pallets: impl Iterator<Item = (&'a str, u8, Option<u32>)>,
		signed_extensions: impl Iterator<Item = &'a str>,
		types: &PortableRegistry,
	) -> Result<Self, MetadataError> {
		let pallets = pallets
			.map(|(name, index, call_ty)| {
				Ok((name.to_string(), pallet_metadata(index, call_ty, types)?))
			})
			.collect::<Result<_, MetadataError>>()?;
		let signed_extensions = signed_extensions.map(str::to_string).collect();
		Ok(Self { pallets, signed_extensions })
	}
}

fn pallet_metadata(
	index: u8,
	call_ty: Option<u32>,
	types: &PortableRegistry,
) -> Result<PalletMetadata, MetadataError> {
	let calls = match call_ty {
		Some(id) => call_variants(id, types)?,
		None => BTreeMap::new(),
	};
	Ok(PalletMetadata { index, calls })
}

fn call_variants(id: u32, types: &PortableRegistry) -> Result<BTreeMap<String, u8>, MetadataError> {
	let ty = types.resolve(id).ok_or(MetadataError::MissingType(id))?;
	match &ty.type_def {
		TypeDef::<PortableForm>::Variant(variant) =>
			Ok(variant.variants.iter().map(|v| (v.name.clone(), v.index)).collect()),
		_ => Err(MetadataError::TypeDefNotVariant(id)),
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use codec::{Decode, Encode};
	use frame_metadata::{
		v14::{
			ExtrinsicMetadata, PalletCallMetadata, PalletMetadata, RuntimeMetadataV14,
			SignedExtensionMetadata,
		},
		v15,
	};
	use scale_info::{meta_type, MetaType, TypeInfo};

	// Runtime call enums name their variants after the dispatchable.
	#[allow(dead_code, non_camel_case_types)]
	#[derive(TypeInfo)]
	pub enum BalancesCall {
		#[codec(index = 0)]
		transfer_allow_death { dest: u32, value: u128 },
		#[codec(index = 3)]
		transfer_keep_alive { dest: u32, value: u128 },
	}

	#[allow(dead_code, non_camel_case_types)]
	#[derive(TypeInfo)]
	pub enum LegacyBalancesCall {
		#[codec(index = 5)]
		transfer { dest: u32, value: u128 },
	}

	#[allow(dead_code, non_camel_case_types)]
	#[derive(TypeInfo)]
	pub enum SystemCall {
		#[codec(index = 0)]
		remark { remark: Vec<u8> },
	}

	fn signed_extension(identifier: &'static str) -> SignedExtensionMetadata {
		SignedExtensionMetadata {
			identifier,
			ty: meta_type::<()>(),
			additional_signed: meta_type::<()>(),
		}
	}

	/// Runtime metadata with a `System` and a `Balances` pallet whose call
	/// enum is `Call`.
	pub fn runtime_metadata<Call: TypeInfo + 'static>(
		signed_extensions: &[&'static str],
	) -> RuntimeMetadataPrefixed {
		let pallets = vec![
			PalletMetadata {
				name: "System",
				storage: None,
				calls: Some(PalletCallMetadata { ty: meta_type::<SystemCall>() }),
				event: None,
				constants: vec![],
				error: None,
				index: 0,
			},
			PalletMetadata {
				name: "Balances",
				storage: None,
				calls: Some(PalletCallMetadata { ty: meta_type::<Call>() }),
				event: None,
				constants: vec![],
				error: None,
				index: 10,
			},
		];
		let extrinsic = ExtrinsicMetadata {
			ty: meta_type::<()>(),
			version: 4,
			signed_extensions: signed_extensions.iter().copied().map(signed_extension).collect(),
		};
		RuntimeMetadataV14::new(pallets, extrinsic, meta_type::<()>()).into()
	}

	/// Same runtime as [`runtime_metadata`], served as V15.
	fn runtime_metadata_v15<Call: TypeInfo + 'static>(
		signed_extensions: &[&'static str],
	) -> RuntimeMetadataPrefixed {
		let pallet = |name: &'static str, index: u8, ty: MetaType| v15::PalletMetadata {
			name,
			storage: None,
			calls: Some(v15::PalletCallMetadata { ty }),
			event: None,
			constants: vec![],
			error: None,
			index,
			docs: vec![],
		};
		let pallets = vec![
			pallet("System", 0, meta_type::<SystemCall>()),
			pallet("Balances", 10, meta_type::<Call>()),
		];
		let extrinsic = v15::ExtrinsicMetadata {
			version: 4,
			address_ty: meta_type::<()>(),
			call_ty: meta_type::<()>(),
			signature_ty: meta_type::<()>(),
			extra_ty: meta_type::<()>(),
			signed_extensions: signed_extensions
				.iter()
				.map(|&identifier| v15::SignedExtensionMetadata {
					identifier,
					ty: meta_type::<()>(),
					additional_signed: meta_type::<()>(),
				})
				.collect(),
		};
		let outer_enums = v15::OuterEnums {
			call_enum_ty: meta_type::<()>(),
			event_enum_ty: meta_type::<()>(),
			error_enum_ty: meta_type::<()>(),
		};
		v15::RuntimeMetadataV15::new(
			pallets,
			extrinsic,
			meta_type::<()>(),
			vec![],
			outer_enums,
			v15::CustomMetadata { map: Default::default() },
		)
		.into()
	}

	#[test]
	fn call_index_resolves_pallet_and_variant_index() {
		let metadata = Metadata::try_from(runtime_metadata::<BalancesCall>(&[])).unwrap();

		assert_eq!(metadata.call_index("Balances", "transfer_allow_death"), Ok([10, 0]));
		assert_eq!(metadata.call_index("Balances", "transfer_keep_alive"), Ok([10, 3]));
		assert_eq!(metadata.call_index("System", "remark"), Ok([0, 0]));
		assert_eq!(metadata.pallet_index("Balances"), Some(10));
	}

	#[test]
	fn missing_pallet_and_call_are_reported() {
		let metadata = Metadata::try_from(runtime_metadata::<LegacyBalancesCall>(&[])).unwrap();

		assert_eq!(
			metadata.call_index("Balances", "transfer_allow_death"),
			Err(MetadataError::CallNotFound("Balances".into(), "transfer_allow_death".into()))
		);
		assert_eq!(
			metadata.call_index("Assets", "transfer"),
			Err(MetadataError::PalletNotFound("Assets".into()))
		);
	}

	#[test]
	fn signed_extensions_keep_runtime_order() {
		let metadata = Metadata::try_from(runtime_metadata::<BalancesCall>(&[
			"CheckNonZeroSender",
			"CheckSpecVersion",
			"CheckMortality",
			"CheckNonce",
			"ChargeTransactionPayment",
			CHECK_METADATA_HASH,
		]))
		.unwrap();

		assert_eq!(metadata.signed_extensions().len(), 6);
		assert_eq!(metadata.signed_extensions()[0], "CheckNonZeroSender");
		assert!(metadata.supports_metadata_hash_check());
		assert!(metadata.has_signed_extension("CheckNonce"));
	}

	#[test]
	fn metadata_without_hash_check_extension() {
		let metadata =
			Metadata::try_from(runtime_metadata::<BalancesCall>(&["CheckNonce"])).unwrap();
		assert!(!metadata.supports_metadata_hash_check());
	}

	#[test]
	fn metadata_survives_scale_round_trip_from_node() {
		let encoded = runtime_metadata::<BalancesCall>(&[]).encode();
		let decoded = RuntimeMetadataPrefixed::decode(&mut encoded.as_slice()).unwrap();
		let metadata = Metadata::try_from(decoded).unwrap();
		assert_eq!(metadata.call_index("Balances", "transfer_keep_alive"), Ok([10, 3]));
	}

	#[test]
	fn v15_metadata_yields_call_indices_and_signed_extensions() {
		let encoded =
			runtime_metadata_v15::<LegacyBalancesCall>(&["CheckNonce", CHECK_METADATA_HASH]).encode();
		let decoded = RuntimeMetadataPrefixed::decode(&mut encoded.as_slice()).unwrap();
		assert_eq!(decoded.1.version(), 15);

		let metadata = Metadata::try_from(decoded).unwrap();

		assert_eq!(metadata.call_index("Balances", "transfer"), Ok([10, 5]));
		assert_eq!(metadata.call_index("System", "remark"), Ok([0, 0]));
		assert_eq!(metadata.signed_extensions(), ["CheckNonce", CHECK_METADATA_HASH]);
		assert!(metadata.supports_metadata_hash_check());
	}

	#[test]
	fn invalid_prefix_is_rejected() {
		let mut runtime_metadata = runtime_metadata::<BalancesCall>(&[]);
		runtime_metadata.0 = 0;
		assert_eq!(Metadata::try_from(runtime_metadata).unwrap_err(), MetadataError::InvalidPrefix);
	}
}

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

//! Sends balance transfers to a Substrate node in a fixed interval.
//!
//! ```text
//! RUST_LOG=debug transfer-load --url ws://127.0.0.1:9944 --scheme sr25519 --seed //Alice --delay-ms 1000
//! ```

use clap::Parser;
use log::{error, info};
use sp_core::crypto::{set_default_ss58_version, Ss58AddressFormat};
use tokio::signal;
use transfer_load::{
	load::{KeyScheme, LoadConfig, Result, TransferLoad},
	rpc::JsonrpseeClient,
	tl_primitives::{
		Config, DefaultRuntimeConfig, Ed25519RuntimeConfig, ExtrinsicSigner,
		GenericAdditionalParams, GenericExtrinsicParams, PlainTip,
	},
	Api, TransactionSubscriptionFor,
};

#[tokio::main]
async fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = LoadConfig::parse();
	set_default_ss58_version(Ss58AddressFormat::custom(config.ss58_prefix));
	info!("{:?}", config);

	tokio::select! {
		result = run(config) => {
			if let Err(e) = result {
				error!("{}", e);
				std::process::exit(1);
			}
		},
		_ = signal::ctrl_c() => info!("Interrupted, stopping transfers"),
	}
}

async fn run(config: LoadConfig) -> Result<()> {
	match config.scheme {
		KeyScheme::Ed25519 => run_with::<Ed25519RuntimeConfig>(config).await,
		KeyScheme::Sr25519 => run_with::<DefaultRuntimeConfig>(config).await,
	}
}

async fn run_with<T>(config: LoadConfig) -> Result<()>
where
	T: Config<
		Balance = u128,
		ExtrinsicParams = GenericExtrinsicParams<T, PlainTip<u128>>,
		ExtrinsicSigner = ExtrinsicSigner<T>,
	>,
	TransactionSubscriptionFor<JsonrpseeClient, T::Hash>: Send + 'static,
{
	let signer = ExtrinsicSigner::<T>::new(config.key_pair::<T::CryptoKey>()?);
	let settings = config.settings::<T>()?;

	let client = JsonrpseeClient::new(&config.url).await?;
	let mut api = Api::<T, _>::new(client).await?;
	api.set_signer(signer);
	api.set_additional_params(GenericAdditionalParams::new().tip(config.tip));

	let mut load = TransferLoad::<T, _>::new(api, settings).await?;
	load.run().await
}

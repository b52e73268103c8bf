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

//! Command line and environment configuration of the load generator.

use crate::load::{LoadError, Result};
use clap::{Parser, ValueEnum};
use core::{fmt, str::FromStr, time::Duration};
use sp_core::Pair;
use tl_primitives::Config;

pub const DEFAULT_URL: &str = "ws://127.0.0.1:56054";
pub const DEFAULT_SEED: &str =
	"wash pass sweet crawl purse expire carbon amazing mosquito turtle affair danger";
pub const DEFAULT_DEST: &str =
	"0x1111111111111111111111111111111111111111111111111111111111111111";
pub const DEFAULT_AMOUNT: u128 = 1_000_000_000_000_000_000;
pub const DEFAULT_DELAY_MS: u64 = 4000;
pub const DEFAULT_DRAIN_TIMEOUT_SECS: u64 = 60;

/// Signature scheme the sending account is derived with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum KeyScheme {
	/// Default of polkadot.js keyrings created without an explicit type.
	#[default]
	Ed25519,
	Sr25519,
}

/// Sends a balance transfer to a fixed destination every `delay` milliseconds.
#[derive(Clone, Parser)]
#[command(name = "transfer-load", version, about, long_about = None)]
pub struct LoadConfig {
	/// Websocket endpoint of the node.
	#[arg(short, long, env = "TRANSFER_LOAD_URL", default_value = DEFAULT_URL)]
	pub url: String,

	/// Secret URI of the sending account (mnemonic, hex seed or dev path like //Alice).
	#[arg(short, long, env = "TRANSFER_LOAD_SEED", default_value = DEFAULT_SEED, hide_default_value = true)]
	pub seed: String,

	/// Signature scheme used to derive the sending account from the seed.
	#[arg(long, value_enum, env = "TRANSFER_LOAD_SCHEME", default_value_t = KeyScheme::Ed25519)]
	pub scheme: KeyScheme,

	/// Destination account, ss58 or 0x prefixed hex.
	#[arg(short, long, env = "TRANSFER_LOAD_DEST", default_value = DEFAULT_DEST)]
	pub dest: String,

	/// Amount sent with every transfer, in the smallest unit.
	#[arg(short, long, env = "TRANSFER_LOAD_AMOUNT", default_value_t = DEFAULT_AMOUNT)]
	pub amount: u128,

	/// Pause between two transfers.
	#[arg(long = "delay-ms", env = "TRANSFER_LOAD_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
	pub delay_ms: u64,

	/// Stop after this many transfers. Runs until interrupted if omitted.
	#[arg(short = 'n', long, env = "TRANSFER_LOAD_ITERATIONS")]
	pub iterations: Option<u64>,

	/// How long to wait for pending inclusions once the iteration limit is reached.
	#[arg(
		long = "drain-timeout-secs",
		env = "TRANSFER_LOAD_DRAIN_TIMEOUT_SECS",
		default_value_t = DEFAULT_DRAIN_TIMEOUT_SECS
	)]
	pub drain_timeout_secs: u64,

	/// Tip added to every transfer.
	#[arg(long, env = "TRANSFER_LOAD_TIP", default_value_t = 0)]
	pub tip: u128,

	/// Ss58 prefix used to display addresses.
	#[arg(long, env = "TRANSFER_LOAD_SS58_PREFIX", default_value_t = 0)]
	pub ss58_prefix: u16,
}

// Keeps the seed out of the logs.
impl fmt::Debug for LoadConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadConfig")
			.field("url", &self.url)
			.field("scheme", &self.scheme)
			.field("dest", &self.dest)
			.field("amount", &self.amount)
			.field("delay_ms", &self.delay_ms)
			.field("iterations", &self.iterations)
			.field("drain_timeout_secs", &self.drain_timeout_secs)
			.field("tip", &self.tip)
			.field("ss58_prefix", &self.ss58_prefix)
			.finish_non_exhaustive()
	}
}

impl LoadConfig {
	pub fn delay(&self) -> Duration {
		Duration::from_millis(self.delay_ms)
	}

	/// Key pair of the sending account.
	pub fn key_pair<P: Pair>(&self) -> Result<P> {
		P::from_string(&self.seed, None).map_err(|e| LoadError::InvalidSeed(format!("{e:?}")))
	}

	/// Typed settings of the transfer loop for the runtime `T`.
	pub fn settings<T: Config>(&self) -> Result<LoadSettings<T>> {
		let dest = T::AccountId::from_str(&self.dest)
			.map_err(|_| LoadError::InvalidDestination(self.dest.clone()))?;
		let amount = <T::Balance as TryFrom<u128>>::try_from(self.amount)
			.map_err(|_| LoadError::InvalidAmount(self.amount))?;
		Ok(LoadSettings {
			dest,
			amount,
			delay: self.delay(),
			iterations: self.iterations,
			drain_timeout: Duration::from_secs(self.drain_timeout_secs),
		})
	}
}

/// What the transfer loop sends, where to, and how often.
pub struct LoadSettings<T: Config> {
	pub dest: T::AccountId,
	pub amount: T::Balance,
	pub delay: Duration,
	/// `None` loops forever.
	pub iterations: Option<u64>,
	/// Watchers still pending after this long are aborted.
	pub drain_timeout: Duration,
}

impl<T: Config> Clone for LoadSettings<T> {
	fn clone(&self) -> Self {
		Self {
			dest: self.dest.clone(),
			amount: self.amount,
			delay: self.delay,
			iterations: self.iterations,
			drain_timeout: self.drain_timeout,
		}
	}
}

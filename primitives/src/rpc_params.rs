// Copyright 2019-2021 Parity Technologies (UK) Ltd.
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Positional RPC parameters, serialized into a json array.
//! Kept independent of any client so the mock and the jsonrpsee
//! backend can share it.

use serde::Serialize;
use serde_json::{Result, Value};

/// Initial number of bytes for a parameter list.
const PARAM_BYTES_CAPACITY: usize = 128;

#[derive(Debug, Default)]
pub struct RpcParams {
	bytes: Vec<u8>,
}

impl RpcParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Serialize a value and append it to the list.
	pub fn insert<P: Serialize>(&mut self, value: P) -> Result<()> {
		if self.bytes.is_empty() {
			self.bytes.reserve(PARAM_BYTES_CAPACITY);
			self.bytes.push(b'[');
		}
		serde_json::to_writer(&mut self.bytes, &value)?;
		self.bytes.push(b',');
		Ok(())
	}

	/// Finish the building process and return a JSON array string,
	/// or `None` if no parameter was inserted.
	pub fn build(mut self) -> Option<String> {
		let last = self.bytes.last_mut()?;
		if *last == b',' {
			*last = b']';
		} else {
			self.bytes.push(b']');
		}
		String::from_utf8(self.bytes).ok()
	}

	pub fn to_json_value(self) -> Result<Value> {
		match self.build() {
			Some(string) => serde_json::from_str(&string),
			None => Ok(Value::Array(Vec::new())),
		}
	}
}

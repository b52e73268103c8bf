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

//! Rpc client serving canned json responses, for tests.

use crate::rpc::{Error, HandleSubscription, Request, Result, RpcParams, Subscribe};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::{
	collections::{HashMap, VecDeque},
	marker::PhantomData,
	sync::{
		atomic::{AtomicBool, Ordering},
		Mutex, RwLock,
	},
};

type MethodKey = String;
type SerializedValue = String;

/// A recorded call: method name and its json encoded params.
pub type RecordedCall = (MethodKey, Option<String>);

#[derive(Debug, Default)]
pub struct RpcClientMock {
	responses: RwLock<HashMap<MethodKey, SerializedValue>>,
	notifications: RwLock<HashMap<MethodKey, Vec<SerializedValue>>>,
	calls: Mutex<Vec<RecordedCall>>,
	hold_subscriptions_open: AtomicBool,
}

impl RpcClientMock {
	pub fn new(responses: HashMap<MethodKey, SerializedValue>) -> Self {
		Self { responses: RwLock::new(responses), ..Default::default() }
	}

	pub fn update_entry(&self, key: &str, value: SerializedValue) {
		self.responses.write().unwrap().insert(key.to_string(), value);
	}

	/// Notifications every new subscription to `sub` yields, in order.
	pub fn set_notifications(&self, sub: &str, notifications: Vec<SerializedValue>) {
		self.notifications.write().unwrap().insert(sub.to_string(), notifications);
	}

	/// Subscriptions opened from now on stay pending once their notifications ran out,
	/// like a node that never reports a final status.
	pub fn hold_subscriptions_open(&self) {
		self.hold_subscriptions_open.store(true, Ordering::SeqCst);
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().unwrap().clone()
	}

	pub fn calls_to(&self, method: &str) -> Vec<Option<String>> {
		self.calls()
			.into_iter()
			.filter(|(m, _)| m == method)
			.map(|(_, params)| params)
			.collect()
	}

	fn record(&self, method: &str, params: RpcParams) {
		self.calls.lock().unwrap().push((method.to_string(), params.build()));
	}
}

#[async_trait]
impl Request for RpcClientMock {
	async fn request<R: DeserializeOwned + Send>(
		&self,
		method: &str,
		params: RpcParams,
	) -> Result<R> {
		self.record(method, params);
		let response = self
			.responses
			.read()
			.unwrap()
			.get(method)
			.cloned()
			.ok_or_else(|| Error::Client(format!("No mocked response for {method}").into()))?;
		Ok(serde_json::from_str(&response)?)
	}
}

#[async_trait]
impl Subscribe for RpcClientMock {
	type Subscription<Notification> = SubscriptionMock<Notification> where Notification: DeserializeOwned + Send;

	async fn subscribe<Notification: DeserializeOwned + Send>(
		&self,
		sub: &str,
		params: RpcParams,
		_unsub: &str,
	) -> Result<Self::Subscription<Notification>> {
		self.record(sub, params);
		let notifications = self
			.notifications
			.read()
			.unwrap()
			.get(sub)
			.cloned()
			.ok_or_else(|| Error::Client(format!("No mocked subscription for {sub}").into()))?;
		Ok(SubscriptionMock {
			notifications: notifications.into(),
			hold_open: self.hold_subscriptions_open.load(Ordering::SeqCst),
			_phantom: PhantomData,
		})
	}
}

#[derive(Debug)]
pub struct SubscriptionMock<Notification> {
	notifications: VecDeque<SerializedValue>,
	hold_open: bool,
	_phantom: PhantomData<fn() -> Notification>,
}

#[async_trait]
impl<Notification: DeserializeOwned + Send> HandleSubscription<Notification>
	for SubscriptionMock<Notification>
{
	async fn next(&mut self) -> Option<Result<Notification>> {
		match self.notifications.pop_front() {
			Some(notification) => Some(serde_json::from_str(&notification).map_err(Error::from)),
			None if self.hold_open => std::future::pending().await,
			None => None,
		}
	}

	async fn unsubscribe(self) -> Result<()> {
		Ok(())
	}
}

// Copyright (C) 2024 Parity Technologies (UK) Ltd. (admin@parity.io)
// This file is a part of the abi-shape crate.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//         http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module provides a [`Client`], which exposes `read`, `write` and `watch_event`
//! operations over some collaborator that actually talks to the outside world. The
//! collaborators are described by the [`Transport`], [`BatchTransport`] and [`EventSource`]
//! traits; this crate provides no implementations of them.
//!
//! Every operation prepares and checks its call or subscription first, so nothing is
//! handed to a collaborator unless it agrees with the interface description.

use crate::call::{prepare_call_with, CallDescriptor};
use crate::config::ResolverConfig;
use crate::description::InterfaceDescription;
use crate::error::Error;
use crate::event::prepare_subscription_with;
use crate::mutability::CallKind;
use crate::signature::EventSignature;
use crate::value::Value;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// Something that can perform a call and decode its raw result according to
/// [`CallDescriptor::output`].
pub trait Transport {
    /// What a submitted call produces. This might be a decoded value, or a future which
    /// resolves to one.
    type Output;
    /// Submit a call.
    fn submit(&self, call: CallDescriptor) -> Self::Output;
}

/// Something that can perform several read calls as a single request.
pub trait BatchTransport {
    /// What a submitted batch produces.
    type Output;
    /// Submit some calls together. Results are expected in the same order.
    fn submit_batch(&self, calls: Vec<CallDescriptor>) -> Self::Output;
}

/// Something that receives decoded event arguments, positionally and in declared order.
pub trait EventHandler {
    /// How many arguments this handler expects.
    fn arity(&self) -> usize;
    /// Handle one emitted event.
    fn handle(&mut self, args: Vec<Value>);
}

/// Something that can decode emitted events and deliver them to handlers.
pub trait EventSource {
    /// A handle to an active subscription.
    type Subscription;
    /// Subscribe to the event described by `event`.
    fn subscribe(&self, event: EventSignature, handler: Box<dyn EventHandler>) -> Self::Subscription;
}

/// An [`EventHandler`] built from a closure. See [`listener()`].
pub struct Listener<F> {
    arity: usize,
    f: F,
}

/// Build an [`EventHandler`] that expects `arity` arguments and hands them to `f`.
pub fn listener<F: FnMut(Vec<Value>)>(arity: usize, f: F) -> Listener<F> {
    Listener { arity, f }
}

impl<F: FnMut(Vec<Value>)> EventHandler for Listener<F> {
    fn arity(&self) -> usize {
        self.arity
    }
    fn handle(&mut self, args: Vec<Value>) {
        (self.f)(args)
    }
}

/// One read in a batch given to [`Client::read_many()`].
#[derive(Debug, Clone, Copy)]
pub struct ContractRead<'a> {
    /// The interface description to resolve `name` against.
    pub description: &'a InterfaceDescription,
    /// The function name, or its qualified signature.
    pub name: &'a str,
    /// The arguments, if any.
    pub args: Option<&'a [Value]>,
}

/// Checks calls and subscriptions against interface descriptions before handing them
/// to the given collaborator.
///
/// # Example
///
/// ```rust
/// use abi_shape::{Abi, CallDescriptor, Client, InterfaceDescription, ResultShape, Shape};
/// use abi_shape::client::Transport;
///
/// // A transport that just hands back the shape it'd decode into.
/// struct Shapes;
/// impl Transport for Shapes {
///     type Output = ResultShape;
///     fn submit(&self, call: CallDescriptor) -> ResultShape {
///         call.output
///     }
/// }
///
/// let abi = Abi::from_json(r#"[
///     { "type": "function", "name": "name", "stateMutability": "view", "inputs": [], "outputs": [{ "type": "string" }] }
/// ]"#).unwrap();
///
/// let client = Client::new(Shapes);
/// let desc = InterfaceDescription::from(abi);
/// assert_eq!(client.read(&desc, "name", None).unwrap(), ResultShape::Single(Shape::String));
/// ```
#[derive(Debug, Clone)]
pub struct Client<T> {
    inner: T,
    config: ResolverConfig,
}

impl<T> Client<T> {
    /// Wrap a collaborator using the default [`ResolverConfig`].
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, ResolverConfig::default())
    }

    /// Wrap a collaborator using the given [`ResolverConfig`].
    pub fn with_config(inner: T, config: ResolverConfig) -> Self {
        Client { inner, config }
    }

    /// The wrapped collaborator.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Perform a read call of `name`.
    pub fn read(
        &self,
        description: &InterfaceDescription,
        name: &str,
        args: Option<&[Value]>,
    ) -> Result<<T as Transport>::Output, Error>
    where
        T: Transport,
    {
        let call = prepare_call_with(description, name, CallKind::Read, args, &self.config)?;
        Ok(self.inner.submit(call))
    }

    /// Perform a write call of `name`.
    pub fn write(
        &self,
        description: &InterfaceDescription,
        name: &str,
        args: Option<&[Value]>,
    ) -> Result<<T as Transport>::Output, Error>
    where
        T: Transport,
    {
        let call = prepare_call_with(description, name, CallKind::Write, args, &self.config)?;
        Ok(self.inner.submit(call))
    }

    /// Subscribe `handler` to the event `name`. The handler's arity must equal the
    /// event's parameter count.
    pub fn watch_event<H>(
        &self,
        description: &InterfaceDescription,
        name: &str,
        handler: H,
    ) -> Result<T::Subscription, Error>
    where
        T: EventSource,
        H: EventHandler + 'static,
    {
        let event = prepare_subscription_with(description, name, handler.arity(), &self.config)?;
        Ok(self.inner.subscribe(event, Box::new(handler)))
    }

    /// Prepare several reads. Fails on the first read that can't be prepared, with its
    /// position in `reads`.
    pub fn prepare_reads(&self, reads: &[ContractRead<'_>]) -> Result<Vec<CallDescriptor>, Error> {
        reads
            .iter()
            .enumerate()
            .map(|(index, read)| {
                prepare_call_with(read.description, read.name, CallKind::Read, read.args, &self.config)
                    .map_err(|e| Error::Batch { index, source: Box::new(e) })
            })
            .collect()
    }

    /// Prepare several reads and submit them together. Nothing is submitted if any one of
    /// them can't be prepared.
    pub fn read_many(
        &self,
        reads: &[ContractRead<'_>],
    ) -> Result<<T as BatchTransport>::Output, Error>
    where
        T: BatchTransport,
    {
        let calls = self.prepare_reads(reads)?;
        tracing::debug!(calls = calls.len(), "submitting batch");
        Ok(self.inner.submit_batch(calls))
    }
}

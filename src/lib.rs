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

//! This crate resolves contract interface descriptions (the JSON "ABI" format) into precise
//! call and event shapes. Given an [`Abi`] and a member name, it works out which entry is
//! meant, whether it's a read or a write, what arguments it needs and what its result will
//! look like, rejecting anything that doesn't line up before a call is ever made.
//!
//! The main entry points are:
//! - [`prepare_call()`], which produces a checked [`CallDescriptor`].
//! - [`prepare_subscription()`], which produces an [`EventSignature`] for a handler.
//! - [`Client`], which hands the above to some transport or event source.
//!
//! Underneath, [`resolve()`] maps single type tokens like `uint256[2][]` to [`Shape`]s,
//! [`signature_of()`] resolves whole entries and [`select()`] picks between overloads.
//! The [`typed`] module offers a statically typed layer which is checked against the same
//! resolver.
//!
//! # Example
//!
//! ```rust
//! use abi_shape::{prepare_call, CallKind, InterfaceDescription, ResultShape, Shape, Value};
//!
//! let desc = InterfaceDescription::from_json_literal(r#"[
//!     {
//!         "type": "function",
//!         "name": "ownerOf",
//!         "stateMutability": "view",
//!         "inputs": [{ "name": "tokenId", "type": "uint256" }],
//!         "outputs": [{ "name": "", "type": "address" }]
//!     }
//! ]"#).unwrap();
//!
//! let call = prepare_call(&desc, "ownerOf", CallKind::Read, Some(&[Value::uint(123)][..])).unwrap();
//! assert_eq!(call.output, ResultShape::Single(Shape::Address));
//!
//! // The wrong argument shape is rejected:
//! assert!(prepare_call(&desc, "ownerOf", CallKind::Read, Some(&[Value::Bool(true)][..])).is_err());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub mod abi;
pub mod call;
pub mod client;
pub mod config;
pub mod description;
pub mod error;
pub mod event;
pub mod mutability;
pub mod overload;
pub mod resolve;
pub mod shape;
pub mod signature;
pub mod type_token;
pub mod typed;
pub mod value;

#[cfg(test)]
mod test_utils;

// Export the main types here for ease of use:
pub use {
    abi::{Abi, Entry, EventParam, Function, MemberKind, Param},
    call::{prepare_call, prepare_call_with, CallDescriptor, ResultShape},
    client::Client,
    config::{OverloadPolicy, ResolverConfig},
    description::InterfaceDescription,
    error::Error,
    event::{prepare_subscription, prepare_subscription_with},
    mutability::{classify, CallKind, StateMutability},
    overload::select,
    resolve::{resolve, ResolveError, ResolveErrorKind},
    shape::{ArrayLength, Field, Shape},
    signature::{signature_of, EventSignature, FunctionSignature, Signature},
    value::{Address, Value},
};

pub use ethnum::{I256, U256};

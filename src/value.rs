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

//! This module provides a [`Value`] type, used to supply arguments to calls and to hand
//! decoded event arguments to handlers, along with the logic that checks whether some
//! value fits a given [`Shape`].

use crate::shape::{ArrayLength, Shape};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ethnum::{I256, U256};
use smallvec::SmallVec;

/// A 20 byte account address. The content is not validated here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Address = Address([0; 20]);

    /// An address made up of a single repeated byte.
    pub const fn repeat_byte(byte: u8) -> Address {
        Address([byte; 20])
    }
}

impl core::fmt::Debug for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self}")
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// An argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A non-negative integer.
    Uint(U256),
    /// A signed integer.
    Int(I256),
    /// A boolean.
    Bool(bool),
    /// An address.
    Address(Address),
    /// A fixed length byte sequence.
    FixedBytes(SmallVec<[u8; 32]>),
    /// A dynamic length byte sequence.
    Bytes(Vec<u8>),
    /// A string.
    String(String),
    /// An array of values.
    Array(Vec<Value>),
    /// A tuple whose components are given by position.
    Tuple(Vec<Value>),
    /// A tuple whose components are given by name.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// A non-negative integer.
    pub fn uint(n: u128) -> Value {
        Value::Uint(U256::new(n))
    }

    /// A signed integer.
    pub fn int(n: i128) -> Value {
        Value::Int(I256::new(n))
    }

    /// A string.
    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    /// A fixed length byte sequence.
    pub fn fixed_bytes(bytes: &[u8]) -> Value {
        Value::FixedBytes(SmallVec::from_slice(bytes))
    }

    /// A tuple whose components are given by name.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check that this value fits the given shape, returning details of the first
    /// place where it doesn't.
    pub fn conforms_to(&self, shape: &Shape) -> Result<(), Mismatch> {
        let mut path = String::new();
        check(self, shape, &mut path)
    }

    /// A short human readable description of this value, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Uint(n) => format!("unsigned integer {n}"),
            Value::Int(n) => format!("signed integer {n}"),
            Value::Bool(_) => "bool".to_string(),
            Value::Address(_) => "address".to_string(),
            Value::FixedBytes(b) => format!("bytes{}", b.len()),
            Value::Bytes(_) => "bytes".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Array(items) => format!("array of {} items", items.len()),
            Value::Tuple(items) => format!("tuple of {} items", items.len()),
            Value::Record(fields) => {
                let names: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
                format!("record {{{}}}", names.join(", "))
            }
        }
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Value::Address(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Value::Uint(value)
    }
}

impl From<I256> for Value {
    fn from(value: I256) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

/// Details about where and how a [`Value`] failed to fit a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Where in the value the problem is, like `.b[2]`. Empty for the value itself.
    pub path: String,
    /// The canonical shape that was expected at that location.
    pub expected: String,
    /// A description of what was found there instead.
    pub found: String,
}

fn check(value: &Value, shape: &Shape, path: &mut String) -> Result<(), Mismatch> {
    let fits = match (value, shape) {
        (_, Shape::Unknown) => true,
        (Value::Uint(n), Shape::Integer { bits, signed }) => {
            bits_used(n.leading_zeros()) <= available_bits(*bits, *signed)
        }
        (Value::Int(n), Shape::Integer { bits, signed }) => {
            if n.is_negative() {
                // The magnitude of a negative number needs the same bits as its complement.
                *signed && bits_used((!*n).leading_zeros()) <= available_bits(*bits, true)
            } else {
                bits_used(n.leading_zeros()) <= available_bits(*bits, *signed)
            }
        }
        (Value::Bool(_), Shape::Bool) => true,
        (Value::Address(_), Shape::Address) => true,
        (Value::FixedBytes(b), Shape::FixedBytes(len)) => b.len() == *len as usize,
        (Value::Bytes(_), Shape::Bytes) => true,
        (Value::String(_), Shape::String) => true,
        (Value::Array(items), Shape::Array { element, length }) => {
            if let ArrayLength::Fixed(n) = length {
                if items.len() != *n {
                    return Err(mismatch(value, shape, path));
                }
            }
            for (idx, item) in items.iter().enumerate() {
                with_segment(path, &format!("[{idx}]"), |path| check(item, element, path))?;
            }
            true
        }
        (Value::Tuple(items), Shape::Tuple(fields)) => {
            if items.len() != fields.len() {
                return Err(mismatch(value, shape, path));
            }
            for (idx, (item, field)) in items.iter().zip(fields).enumerate() {
                with_segment(path, &format!(".{idx}"), |path| check(item, &field.shape, path))?;
            }
            true
        }
        (Value::Record(entries), Shape::Tuple(fields)) => {
            // Records can only be matched against tuples whose components all have names.
            if fields.iter().any(|f| !f.is_named()) {
                return Err(mismatch(value, shape, path));
            }
            for field in fields {
                let segment = format!(".{}", field.name);
                let Some((_, item)) = entries.iter().find(|(k, _)| k.as_str() == &*field.name)
                else {
                    return Err(Mismatch {
                        path: format!("{path}{segment}"),
                        expected: field.shape.canonical(),
                        found: "nothing".to_string(),
                    });
                };
                with_segment(path, &segment, |path| check(item, &field.shape, path))?;
            }
            if let Some((extra, item)) =
                entries.iter().find(|(k, _)| !fields.iter().any(|f| k.as_str() == &*f.name))
            {
                return Err(Mismatch {
                    path: format!("{path}.{extra}"),
                    expected: "no such field".to_string(),
                    found: item.describe(),
                });
            }
            true
        }
        _ => false,
    };

    if fits {
        Ok(())
    } else {
        Err(mismatch(value, shape, path))
    }
}

fn mismatch(value: &Value, shape: &Shape, path: &str) -> Mismatch {
    Mismatch { path: path.to_string(), expected: shape.canonical(), found: value.describe() }
}

// Push a path segment for the duration of `f`.
fn with_segment<R>(path: &mut String, segment: &str, f: impl FnOnce(&mut String) -> R) -> R {
    let len = path.len();
    path.push_str(segment);
    let res = f(path);
    path.truncate(len);
    res
}

fn bits_used(leading_zeros: u32) -> u32 {
    256 - leading_zeros
}

fn available_bits(bits: u16, signed: bool) -> u32 {
    if signed {
        bits as u32 - 1
    } else {
        bits as u32
    }
}

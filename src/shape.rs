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

//! This module provides a [`Shape`] enum, which describes the semantic shape of a single ABI
//! value, or in other words, what a value must look like in order to be passed as an argument
//! or what a returned value will look like once decoded.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use smallstr::SmallString;

/// The name of a tuple component, parameter or output. Names are often empty.
pub type FieldName = SmallString<[u8; 16]>;

/// This describes the shape of a value, as derived from an ABI type token like
/// `uint256`, `bytes32[]` or `tuple` (with components).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// An integer of the given width in bits (a multiple of 8 from 8 to 256).
    Integer {
        /// Width in bits.
        bits: u16,
        /// Is the integer two's complement signed?
        signed: bool,
    },
    /// A fixed length byte sequence of 1 to 32 bytes.
    FixedBytes(u8),
    /// A dynamically sized byte sequence.
    Bytes,
    /// A boolean.
    Bool,
    /// A 20 byte address.
    Address,
    /// A UTF-8 string.
    String,
    /// A structured record. Component order matches declaration order.
    Tuple(Vec<Field>),
    /// An array of some element shape.
    Array {
        /// The shape of every element in the array.
        element: Box<Shape>,
        /// Fixed or dynamic length.
        length: ArrayLength,
    },
    /// An open shape whose structure was not declared. Produced only for widened
    /// interface descriptions; any value conforms to it.
    Unknown,
}

/// The length of an array shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLength {
    /// `T[N]`
    Fixed(usize),
    /// `T[]`
    Dynamic,
}

/// A named component of a tuple, or a named parameter/output of some member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The declared name. This may be empty.
    pub name: FieldName,
    /// The shape of the value.
    pub shape: Shape,
}

impl Field {
    /// Construct a new named field.
    pub fn new(name: &str, shape: Shape) -> Field {
        Field { name: FieldName::from_str(name), shape }
    }

    /// Construct a field with no name.
    pub fn unnamed(shape: Shape) -> Field {
        Field { name: FieldName::new(), shape }
    }

    /// Does this field have a non-empty name?
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Shape {
    /// `uint<bits>`.
    pub fn uint(bits: u16) -> Shape {
        Shape::Integer { bits, signed: false }
    }

    /// `int<bits>`.
    pub fn int(bits: u16) -> Shape {
        Shape::Integer { bits, signed: true }
    }

    /// A fixed length array of the given element shape.
    pub fn array(element: Shape, length: usize) -> Shape {
        Shape::Array { element: Box::new(element), length: ArrayLength::Fixed(length) }
    }

    /// A dynamic length array of the given element shape.
    pub fn dynamic_array(element: Shape) -> Shape {
        Shape::Array { element: Box::new(element), length: ArrayLength::Dynamic }
    }

    /// A tuple made up of the given fields.
    pub fn tuple(fields: impl IntoIterator<Item = Field>) -> Shape {
        Shape::Tuple(fields.into_iter().collect())
    }

    /// The canonical ABI type string for this shape, as used in function signatures.
    /// Tuples are rendered in parenthesized form, ie `(uint256,address)[]`.
    pub fn canonical(&self) -> String {
        let mut s = String::new();
        // Writing to a String never fails.
        let _ = write!(s, "{self}");
        s
    }

    /// Do these shapes describe the same type? Field names are ignored; only
    /// structure is compared.
    pub fn same_type(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Tuple(a), Shape::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.shape.same_type(&b.shape))
            }
            (
                Shape::Array { element: a, length: a_len },
                Shape::Array { element: b, length: b_len },
            ) => a_len == b_len && a.same_type(b),
            (a, b) => a == b,
        }
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Shape::Integer { bits, signed: false } => write!(f, "uint{bits}"),
            Shape::Integer { bits, signed: true } => write!(f, "int{bits}"),
            Shape::FixedBytes(len) => write!(f, "bytes{len}"),
            Shape::Bytes => f.write_str("bytes"),
            Shape::Bool => f.write_str("bool"),
            Shape::Address => f.write_str("address"),
            Shape::String => f.write_str("string"),
            Shape::Tuple(fields) => {
                f.write_char('(')?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx != 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", field.shape)?;
                }
                f.write_char(')')
            }
            Shape::Array { element, length } => write!(f, "{element}{length}"),
            Shape::Unknown => f.write_str("unknown"),
        }
    }
}

impl core::fmt::Display for ArrayLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArrayLength::Fixed(n) => write!(f, "[{n}]"),
            ArrayLength::Dynamic => f.write_str("[]"),
        }
    }
}

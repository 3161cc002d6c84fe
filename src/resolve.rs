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

//! This module resolves ABI type tokens (and, for tuples, their components) into
//! [`Shape`]s. See [`resolve()`].

use crate::abi::Param;
use crate::shape::{ArrayLength, Field, FieldName, Shape};
use crate::type_token::{ParseError, TypeToken};
use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// An error resolving an ABI type token into a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "Cannot resolve ABI type '{token}': {kind}")]
pub struct ResolveError {
    /// The offending type token.
    pub token: String,
    /// What was wrong with it.
    pub kind: ResolveErrorKind,
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}

impl ResolveError {
    fn new(token: &str, kind: ResolveErrorKind) -> Self {
        ResolveError { token: token.to_owned(), kind }
    }
}

/// The reason that a type token could not be resolved.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ResolveErrorKind {
    #[display(fmt = "{_0}")]
    Parse(ParseError),
    #[display(fmt = "not a known elementary type")]
    UnknownType,
    #[display(fmt = "integer widths must be a multiple of 8 from 8 to 256")]
    InvalidIntegerWidth,
    #[display(fmt = "fixed byte lengths must be from 1 to 32")]
    InvalidBytesLength,
    #[display(fmt = "fixed size arrays must have a non-zero length")]
    ZeroLengthArray,
    #[display(fmt = "tuple types must declare their components")]
    MissingComponents,
    #[display(fmt = "arrays and tuples may be nested at most {} levels deep", MAX_NESTING)]
    TooDeeplyNested,
}

/// The deepest that arrays and tuples may be nested inside one another. Each array
/// dimension and each tuple counts as one level.
pub const MAX_NESTING: usize = 128;

/// Resolve a type token like `uint256[]` or `tuple[2]` into a [`Shape`]. Tuple tokens
/// (including arrays of tuples) require `components`, which are resolved recursively and
/// in order. Components given for a non tuple token are ignored.
///
/// # Example
///
/// ```rust
/// use abi_shape::{resolve, Shape};
///
/// let shape = resolve("uint8[2][]", None).unwrap();
/// assert_eq!(shape, Shape::dynamic_array(Shape::array(Shape::uint(8), 2)));
///
/// assert!(resolve("uint7", None).is_err());
/// ```
pub fn resolve(token: &str, components: Option<&[Param]>) -> Result<Shape, ResolveError> {
    resolve_nested(token, components, 0)
}

fn resolve_nested(
    token: &str,
    components: Option<&[Param]>,
    depth: usize,
) -> Result<Shape, ResolveError> {
    let parsed =
        TypeToken::parse(token).map_err(|e| ResolveError::new(token, ResolveErrorKind::Parse(e)))?;

    let depth = depth + parsed.dimensions().len();
    if depth > MAX_NESTING {
        return Err(ResolveError::new(token, ResolveErrorKind::TooDeeplyNested));
    }

    let base = resolve_base(token, parsed.base(), components, depth)?;

    // Dimensions are listed innermost first, so folding wraps outwards.
    parsed.dimensions().iter().try_fold(base, |element, length| {
        if *length == ArrayLength::Fixed(0) {
            return Err(ResolveError::new(token, ResolveErrorKind::ZeroLengthArray));
        }
        Ok(Shape::Array { element: Box::new(element), length: *length })
    })
}

/// Resolve the type of a single [`Param`].
pub fn resolve_param(param: &Param) -> Result<Shape, ResolveError> {
    resolve(&param.ty, param.components.as_deref())
}

/// Resolve a list of [`Param`]s into named [`Field`]s, preserving order.
pub fn resolve_fields<'a>(
    params: impl IntoIterator<Item = &'a Param>,
) -> Result<Vec<Field>, ResolveError> {
    resolve_fields_nested(params, 0)
}

fn resolve_fields_nested<'a>(
    params: impl IntoIterator<Item = &'a Param>,
    depth: usize,
) -> Result<Vec<Field>, ResolveError> {
    params
        .into_iter()
        .map(|param| {
            let shape = resolve_nested(&param.ty, param.components.as_deref(), depth)?;
            Ok(Field { name: FieldName::from_str(&param.name), shape })
        })
        .collect()
}

fn resolve_base(
    token: &str,
    base: &str,
    components: Option<&[Param]>,
    depth: usize,
) -> Result<Shape, ResolveError> {
    let err = |kind| ResolveError::new(token, kind);

    let shape = match base {
        "address" => Shape::Address,
        "bool" => Shape::Bool,
        "string" => Shape::String,
        "bytes" => Shape::Bytes,
        "tuple" => {
            let components = components.ok_or_else(|| err(ResolveErrorKind::MissingComponents))?;
            if depth >= MAX_NESTING {
                return Err(err(ResolveErrorKind::TooDeeplyNested));
            }
            Shape::Tuple(resolve_fields_nested(components, depth + 1)?)
        }
        _ => {
            if let Some(width) = base.strip_prefix("uint") {
                Shape::Integer { bits: parse_integer_width(width).map_err(err)?, signed: false }
            } else if let Some(width) = base.strip_prefix("int") {
                Shape::Integer { bits: parse_integer_width(width).map_err(err)?, signed: true }
            } else if let Some(len) = base.strip_prefix("bytes") {
                Shape::FixedBytes(parse_bytes_length(len).map_err(err)?)
            } else {
                return Err(err(ResolveErrorKind::UnknownType));
            }
        }
    };

    Ok(shape)
}

// `uint` and `int` without a width are aliases for the 256 bit versions.
fn parse_integer_width(digits: &str) -> Result<u16, ResolveErrorKind> {
    if digits.is_empty() {
        return Ok(256);
    }
    let bits = parse_canonical_number(digits).ok_or(ResolveErrorKind::UnknownType)?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(ResolveErrorKind::InvalidIntegerWidth);
    }
    Ok(bits as u16)
}

fn parse_bytes_length(digits: &str) -> Result<u8, ResolveErrorKind> {
    let len = parse_canonical_number(digits).ok_or(ResolveErrorKind::UnknownType)?;
    if len == 0 || len > 32 {
        return Err(ResolveErrorKind::InvalidBytesLength);
    }
    Ok(len as u8)
}

// Decimal digits only, without leading zeros (so `uint08` is not an alias of `uint8`).
fn parse_canonical_number(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

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

//! This module provides a [`TypeToken`], which can be parsed from a string via
//! [`TypeToken::parse()`] and represents the syntax of a single ABI type like `uint256`,
//! `bytes32[]` or `tuple[2][]`. It says nothing about whether the base name is a
//! type that actually exists; see [`crate::resolve()`] for that.

use crate::shape::ArrayLength;
use smallvec::SmallVec;

// Re-export errors in our public interface:
pub use parser::{ParseError, ParseErrorKind};

/// A parsed ABI type token: a base name followed by zero or more array suffixes.
///
/// # Example
///
/// ```rust
/// use abi_shape::type_token::TypeToken;
/// use abi_shape::ArrayLength;
///
/// let token = TypeToken::parse("uint8[2][]").unwrap();
/// assert_eq!(token.base(), "uint8");
/// assert_eq!(token.dimensions(), &[ArrayLength::Fixed(2), ArrayLength::Dynamic]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken<'a> {
    base: &'a str,
    // Array suffixes in the order they were written. The last one
    // is the outermost array.
    dimensions: SmallVec<[ArrayLength; 2]>,
}

impl<'a> TypeToken<'a> {
    /// Parse an input string into a [`TypeToken`].
    pub fn parse(input: &'a str) -> Result<TypeToken<'a>, ParseError> {
        use yap::IntoTokens;
        let mut tokens = input.into_tokens();
        parser::parse_type_token(&mut tokens)
    }

    /// The base type name, ie `uint256` in `uint256[3][]`.
    pub fn base(&self) -> &'a str {
        self.base
    }

    /// The array suffixes, innermost first.
    pub fn dimensions(&self) -> &[ArrayLength] {
        &self.dimensions
    }

    /// Is this token an array of something?
    pub fn is_array(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// Strip the outermost array suffix, handing back the element token and the
    /// length of the stripped dimension. Returns `None` if this is not an array.
    pub fn element(&self) -> Option<(TypeToken<'a>, ArrayLength)> {
        let (outer, rest) = self.dimensions.split_last()?;
        let element = TypeToken { base: self.base, dimensions: SmallVec::from_slice(rest) };
        Some((element, *outer))
    }
}

impl<'a> core::fmt::Display for TypeToken<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.base)?;
        for dimension in &self.dimensions {
            write!(f, "{dimension}")?;
        }
        Ok(())
    }
}

// Logic for parsing strings into type tokens.
mod parser {
    use super::*;
    use alloc::string::String;
    use yap::{types::StrTokens, TokenLocation, Tokens};

    /// An error that can be emitted as the result of trying to parse a string into a [`TypeToken`].
    #[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
    #[display(fmt = "Error parsing type token at character {loc}: {err}")]
    pub struct ParseError {
        /// Index into the string denoting the position of the error.
        pub loc: usize,
        /// More information about the error.
        pub err: ParseErrorKind,
    }

    #[cfg(feature = "std")]
    impl std::error::Error for ParseError {}

    impl ParseError {
        /// Construct a new `ParseError` for tokens at the given location.
        pub fn new_at<E: Into<ParseErrorKind>>(err: E, loc: usize) -> Self {
            Self { loc, err: err.into() }
        }
    }

    /// The kind of error that happened attempting to parse a string into a [`TypeToken`].
    #[allow(missing_docs)]
    #[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
    pub enum ParseErrorKind {
        #[display(fmt = "Expected a type name starting with a letter, like 'uint256' or 'tuple'.")]
        InvalidName,
        #[display(fmt = "A closing `]` was missing when attempting to parse an array suffix.")]
        ClosingSquareBracketMissing,
        #[display(fmt = "The length of the array is invalid; expecting an unsigned integer.")]
        InvalidUnsignedInt,
        #[display(fmt = "Unexpected characters after the type.")]
        UnexpectedTrailingInput,
    }

    pub fn parse_type_token<'a>(input: &mut StrTokens<'a>) -> Result<TypeToken<'a>, ParseError> {
        let loc = input.location().offset();
        let base = parse_name(input);
        if base.is_empty() {
            return Err(ParseError::new_at(ParseErrorKind::InvalidName, loc));
        }

        let mut dimensions = SmallVec::new();
        while input.token('[') {
            dimensions.push(parse_array_length(input)?);
        }

        if input.peek().is_some() {
            let loc = input.location().offset();
            return Err(ParseError::new_at(ParseErrorKind::UnexpectedTrailingInput, loc));
        }

        Ok(TypeToken { base, dimensions })
    }

    // Parse the remainder of an array suffix like `3]` or `]`; the opening `[` is consumed.
    fn parse_array_length(input: &mut StrTokens<'_>) -> Result<ArrayLength, ParseError> {
        if input.token(']') {
            return Ok(ArrayLength::Dynamic);
        }

        let loc = input.location().offset();
        let length: usize = input
            .take_while(|c| c.is_ascii_digit())
            .parse::<usize, String>()
            .map_err(|_| ParseError::new_at(ParseErrorKind::InvalidUnsignedInt, loc))?;

        if !input.token(']') {
            let loc = input.location().offset();
            return Err(ParseError::new_at(ParseErrorKind::ClosingSquareBracketMissing, loc));
        }

        Ok(ArrayLength::Fixed(length))
    }

    // Parse a name like `uint256` or `tuple`. Empty if no name was found.
    fn parse_name<'a>(input: &mut StrTokens<'a>) -> &'a str {
        str_slice_from(input, |toks| {
            // First char should exist and be a letter.
            if toks.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
                // Rest can be letters or numbers.
                toks.skip_while(|c| c.is_ascii_alphanumeric());
            }
        })
    }

    // Return the string slice that encompasses the provided parsing function given.
    fn str_slice_from<'a, F>(input: &mut StrTokens<'a>, f: F) -> &'a str
    where
        F: FnOnce(&mut StrTokens<'a>),
    {
        let before = input.remaining();
        f(input);
        let leftover = input.remaining().len();

        &before[..before.len() - leftover]
    }
}

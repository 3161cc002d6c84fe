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

//! The error type returned when preparing calls and subscriptions. All of these are
//! permanent: the same inputs will always produce the same error.

use crate::abi::MemberKind;
use crate::mutability::{CallKind, StateMutability};
use crate::resolve::ResolveError;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// An error preparing a call or subscription.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Error {
    #[display(fmt = "{_0}")]
    UnresolvableType(ResolveError),
    #[display(fmt = "No {kind} named '{name}' exists in the interface description")]
    MemberNotFound { name: String, kind: MemberKind },
    #[display(fmt = "'{name}' is overloaded; supply arguments or a qualified name to pick one of: {candidates}")]
    AmbiguousMember { name: String, candidates: Candidates },
    #[display(fmt = "No overload of '{name}' accepts the supplied arguments; candidates are: {candidates}")]
    NoMatchingOverload { name: String, candidates: Candidates },
    #[display(fmt = "'{name}' is {mutability} and so is a {actual} member; it cannot be used for a {requested} call")]
    WrongCallKind {
        name: String,
        requested: CallKind,
        actual: CallKind,
        mutability: StateMutability,
    },
    #[display(fmt = "'{name}' expects {expected} arguments but {supplied} were supplied")]
    ArgumentCountMismatch { name: String, expected: usize, supplied: usize },
    #[display(fmt = "Argument {index}{path} of '{name}' should be {expected} but got {supplied}")]
    ArgumentShapeMismatch {
        name: String,
        index: usize,
        path: String,
        expected: String,
        supplied: String,
    },
    #[display(fmt = "Event '{name}' delivers {expected} arguments but the handler accepts {supplied}")]
    HandlerArityMismatch { name: String, expected: usize, supplied: usize },
    #[display(fmt = "More than one entry has the signature '{signature}'")]
    DuplicateSignature { signature: String },
    #[display(fmt = "'{name}' is declared to return {declared} but the description says {resolved}")]
    DeclarationMismatch { name: String, declared: String, resolved: String },
    #[display(fmt = "Call {index} in the batch failed: {source}")]
    Batch { index: usize, source: Box<Error> },
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<ResolveError> for Error {
    fn from(value: ResolveError) -> Self {
        Error::UnresolvableType(value)
    }
}

/// A list of candidate signatures, displayed comma separated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidates(pub Vec<String>);

impl core::fmt::Display for Candidates {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, candidate) in self.0.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            f.write_str(candidate)?;
        }
        Ok(())
    }
}

impl core::iter::FromIterator<String> for Candidates {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Candidates(iter.into_iter().collect())
    }
}

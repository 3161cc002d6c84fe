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

//! Classifying functions as reads or writes.

use crate::error::Error;
use alloc::borrow::ToOwned;

/// The declared state mutability of a function.
#[allow(missing_docs)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    #[display(fmt = "pure")]
    Pure,
    #[display(fmt = "view")]
    View,
    #[display(fmt = "nonpayable")]
    NonPayable,
    #[display(fmt = "payable")]
    Payable,
}

/// Whether a call reads state or writes it.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CallKind {
    #[display(fmt = "read")]
    Read,
    #[display(fmt = "write")]
    Write,
}

/// `pure` and `view` functions are reads; `nonpayable` and `payable` ones are writes.
pub fn classify(mutability: StateMutability) -> CallKind {
    match mutability {
        StateMutability::Pure | StateMutability::View => CallKind::Read,
        StateMutability::NonPayable | StateMutability::Payable => CallKind::Write,
    }
}

impl StateMutability {
    /// See [`classify()`].
    pub fn call_kind(self) -> CallKind {
        classify(self)
    }
}

/// Fail with [`Error::WrongCallKind`] if a function with the given mutability can't be
/// used for the requested kind of call.
pub(crate) fn ensure_call_kind(
    name: &str,
    mutability: StateMutability,
    requested: CallKind,
) -> Result<(), Error> {
    let actual = classify(mutability);
    if actual != requested {
        return Err(Error::WrongCallKind { name: name.to_owned(), requested, actual, mutability });
    }
    Ok(())
}

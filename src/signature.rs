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

//! This module resolves whole ABI entries into signatures: the ordered, resolved shapes
//! of every input and output. See [`signature_of()`].

use crate::abi::{CustomError, Entry, Event, Function};
use crate::call::ResultShape;
use crate::mutability::{CallKind, StateMutability};
use crate::resolve::{resolve_fields, resolve_param, ResolveError};
use crate::shape::{Field, FieldName, Shape};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// The resolved signature of any entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// A function signature.
    Function(FunctionSignature),
    /// An event signature.
    Event(EventSignature),
    /// A constructor's inputs and mutability.
    Constructor {
        /// The resolved constructor inputs.
        inputs: Vec<Field>,
        /// Either nonpayable or payable.
        mutability: StateMutability,
    },
    /// A fallback function.
    Fallback(StateMutability),
    /// A receive function.
    Receive,
    /// A custom error.
    Error(ErrorSignature),
}

impl Signature {
    /// The canonical `name(type,...)` form of named members. Constructors, fallbacks
    /// and receives have none.
    pub fn canonical(&self) -> Option<String> {
        match self {
            Signature::Function(f) => Some(f.canonical()),
            Signature::Event(e) => Some(e.canonical()),
            Signature::Error(e) => Some(e.canonical()),
            Signature::Constructor { .. } | Signature::Fallback(_) | Signature::Receive => None,
        }
    }
}

/// Resolve the signature of any entry. This is a pure function of the entry.
pub fn signature_of(entry: &Entry) -> Result<Signature, ResolveError> {
    let signature = match entry {
        Entry::Function(f) => Signature::Function(FunctionSignature::resolve(f)?),
        Entry::Event(e) => Signature::Event(EventSignature::resolve(e)?),
        Entry::Error(e) => Signature::Error(ErrorSignature::resolve(e)?),
        Entry::Constructor(c) => Signature::Constructor {
            inputs: resolve_fields(&c.inputs)?,
            mutability: c.state_mutability,
        },
        Entry::Fallback(f) => Signature::Fallback(f.state_mutability),
        Entry::Receive(_) => Signature::Receive,
    };
    Ok(signature)
}

/// The resolved signature of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// The function name.
    pub name: String,
    /// Inputs in declaration order.
    pub inputs: Vec<Field>,
    /// Outputs in declaration order.
    pub outputs: Vec<Field>,
    /// The declared mutability.
    pub mutability: StateMutability,
}

impl FunctionSignature {
    /// Resolve the signature of a function entry.
    pub fn resolve(function: &Function) -> Result<FunctionSignature, ResolveError> {
        Ok(FunctionSignature {
            name: function.name.clone(),
            inputs: resolve_fields(&function.inputs)?,
            outputs: resolve_fields(&function.outputs)?,
            mutability: function.state_mutability,
        })
    }

    /// Whether calling this function is a read or a write.
    pub fn call_kind(&self) -> CallKind {
        self.mutability.call_kind()
    }

    /// Iterate over the input shapes.
    pub fn input_shapes(&self) -> impl ExactSizeIterator<Item = &Shape> {
        self.inputs.iter().map(|f| &f.shape)
    }

    /// The shape that a call's result will be decoded into.
    pub fn result_shape(&self) -> ResultShape {
        ResultShape::from_outputs(&self.outputs)
    }

    /// The canonical signature, ie `transferFrom(address,address,uint256)`.
    pub fn canonical(&self) -> String {
        canonical(&self.name, self.input_shapes())
    }
}

/// The resolved signature of an event. This is what a subscription service needs in
/// order to decode emitted values and hand them to a handler in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSignature {
    /// The event name.
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<EventField>,
    /// Anonymous events have no topic for their signature.
    pub anonymous: bool,
}

/// A resolved event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventField {
    /// The declared name. This may be empty.
    pub name: FieldName,
    /// The shape of the value.
    pub shape: Shape,
    /// Is the value delivered as a topic?
    pub indexed: bool,
}

impl EventSignature {
    /// Resolve the signature of an event entry.
    pub fn resolve(event: &Event) -> Result<EventSignature, ResolveError> {
        let params = event
            .inputs
            .iter()
            .map(|p| {
                Ok(EventField {
                    name: FieldName::from_str(&p.param.name),
                    shape: resolve_param(&p.param)?,
                    indexed: p.indexed,
                })
            })
            .collect::<Result<_, ResolveError>>()?;

        Ok(EventSignature { name: event.name.clone(), params, anonymous: event.anonymous })
    }

    /// The number of arguments a handler for this event will be given.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Iterate over the indexed parameters.
    pub fn indexed(&self) -> impl Iterator<Item = &EventField> {
        self.params.iter().filter(|p| p.indexed)
    }

    /// Iterate over the parameters that are not indexed.
    pub fn data(&self) -> impl Iterator<Item = &EventField> {
        self.params.iter().filter(|p| !p.indexed)
    }

    /// The canonical signature, ie `Transfer(address,address,uint256)`.
    pub fn canonical(&self) -> String {
        canonical(&self.name, self.params.iter().map(|p| &p.shape))
    }
}

/// The resolved signature of a custom error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSignature {
    /// The error name.
    pub name: String,
    /// The error parameters.
    pub inputs: Vec<Field>,
}

impl ErrorSignature {
    /// Resolve the signature of an error entry.
    pub fn resolve(error: &CustomError) -> Result<ErrorSignature, ResolveError> {
        Ok(ErrorSignature { name: error.name.clone(), inputs: resolve_fields(&error.inputs)? })
    }

    /// The canonical signature, ie `Unauthorized(address)`.
    pub fn canonical(&self) -> String {
        canonical(&self.name, self.inputs.iter().map(|f| &f.shape))
    }
}

pub(crate) fn canonical<'a>(name: &str, shapes: impl IntoIterator<Item = &'a Shape>) -> String {
    let mut s = String::from(name);
    s.push('(');
    for (idx, shape) in shapes.into_iter().enumerate() {
        if idx != 0 {
            s.push(',');
        }
        // Writing to a String never fails.
        let _ = write!(s, "{shape}");
    }
    s.push(')');
    s
}

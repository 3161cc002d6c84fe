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

//! This module provides an [`Abi`], which is an ordered list of [`Entry`]s describing the
//! members of a contract. It's constructed by deserializing the standard ABI JSON format
//! into it.

use crate::error::Error;
use crate::mutability::StateMutability;
use crate::signature::signature_of;
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;

/// An interface description: the ordered list of entries that make up a contract ABI.
/// Order matters only for overload tie-breaking.
///
/// # Example
///
/// ```rust
/// use abi_shape::Abi;
///
/// let abi = Abi::from_json(r#"[
///     {
///         "type": "function",
///         "name": "name",
///         "stateMutability": "view",
///         "inputs": [],
///         "outputs": [{ "name": "", "type": "string" }]
///     }
/// ]"#).unwrap();
///
/// assert_eq!(abi.functions().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct Abi {
    entries: Vec<Entry>,
}

impl Abi {
    /// Construct an [`Abi`] from some entries.
    pub fn new(entries: Vec<Entry>) -> Abi {
        Abi { entries }
    }

    /// Deserialize an [`Abi`] from its JSON representation.
    pub fn from_json(json: &str) -> Result<Abi, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Deserialize an [`Abi`] from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Abi, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// All of the entries, in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate over the function entries.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.entries.iter().filter_map(Entry::as_function)
    }

    /// Iterate over the event entries.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().filter_map(Entry::as_event)
    }

    /// The constructor, if one is declared.
    pub fn constructor(&self) -> Option<&Constructor> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::Constructor(c) => Some(c),
            _ => None,
        })
    }

    /// Entries of the given kind that have the given name, in declaration order.
    pub fn members<'a>(
        &'a self,
        name: &'a str,
        kind: MemberKind,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.member_kind() == Some(kind) && entry.name() == Some(name))
    }

    /// Resolve every entry up front, failing if any type can't be resolved or if two
    /// entries of the same kind share a canonical signature.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let signature = signature_of(entry)?;
            let Some(canonical) = signature.canonical() else {
                continue;
            };
            if !seen.insert((entry.member_kind(), canonical.clone())) {
                return Err(Error::DuplicateSignature { signature: canonical });
            }
        }
        Ok(())
    }
}

impl core::iter::FromIterator<Entry> for Abi {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Abi { entries: iter.into_iter().collect() }
    }
}

/// A single member of a contract interface.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "RawEntry")]
pub enum Entry {
    /// A callable function.
    Function(Function),
    /// An event that can be emitted.
    Event(Event),
    /// The contract constructor.
    Constructor(Constructor),
    /// The fallback function.
    Fallback(Fallback),
    /// The receive function.
    Receive(Receive),
    /// A custom error that can be reverted with.
    Error(CustomError),
}

/// The kinds of entry that can be looked up by name.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MemberKind {
    #[display(fmt = "function")]
    Function,
    #[display(fmt = "event")]
    Event,
    #[display(fmt = "error")]
    Error,
}

impl Entry {
    /// The name of the entry. Constructors, fallbacks and receives have no name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::Function(f) => Some(&f.name),
            Entry::Event(e) => Some(&e.name),
            Entry::Error(e) => Some(&e.name),
            Entry::Constructor(_) | Entry::Fallback(_) | Entry::Receive(_) => None,
        }
    }

    /// The kind of member this is, if it is a named member.
    pub fn member_kind(&self) -> Option<MemberKind> {
        match self {
            Entry::Function(_) => Some(MemberKind::Function),
            Entry::Event(_) => Some(MemberKind::Event),
            Entry::Error(_) => Some(MemberKind::Error),
            Entry::Constructor(_) | Entry::Fallback(_) | Entry::Receive(_) => None,
        }
    }

    /// Return the function, if this is one.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Entry::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Return the event, if this is one.
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Entry::Event(e) => Some(e),
            _ => None,
        }
    }
}

/// A function entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// The function name.
    pub name: String,
    /// The input parameters.
    pub inputs: Vec<Param>,
    /// The output parameters.
    pub outputs: Vec<Param>,
    /// Whether the function reads or writes state.
    pub state_mutability: StateMutability,
}

/// An event entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The event name.
    pub name: String,
    /// The event parameters.
    pub inputs: Vec<EventParam>,
    /// Anonymous events have no topic for their signature.
    pub anonymous: bool,
}

/// A constructor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    /// The constructor parameters.
    pub inputs: Vec<Param>,
    /// Either nonpayable or payable.
    pub state_mutability: StateMutability,
}

/// A fallback entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    /// Either nonpayable or payable.
    pub state_mutability: StateMutability,
}

/// A receive entry. These are always payable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receive {
    /// Always payable.
    pub state_mutability: StateMutability,
}

/// A custom error entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomError {
    /// The error name.
    pub name: String,
    /// The error parameters.
    pub inputs: Vec<Param>,
}

/// A parameter of some function, constructor or error, or a component of a tuple.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// The parameter name. Often empty, and not guaranteed to be unique.
    #[serde(default)]
    pub name: String,
    /// The type token, like `uint256` or `tuple[]`.
    #[serde(rename = "type")]
    pub ty: String,
    /// The components of a tuple type.
    #[serde(default)]
    pub components: Option<Vec<Param>>,
    /// The compiler's name for the type, ie `struct Foo.Bar`. Informational only.
    #[serde(default)]
    pub internal_type: Option<String>,
}

impl Param {
    /// Construct a new parameter with the given name and type token.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Param {
        Param { name: name.into(), ty: ty.into(), components: None, internal_type: None }
    }

    /// Construct a new tuple typed parameter (`ty` would be `tuple`, `tuple[]` or similar).
    pub fn tuple(name: impl Into<String>, ty: impl Into<String>, components: Vec<Param>) -> Param {
        Param {
            name: name.into(),
            ty: ty.into(),
            components: Some(components),
            internal_type: None,
        }
    }
}

/// A parameter of an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct EventParam {
    /// The name, type and components.
    #[serde(flatten)]
    pub param: Param,
    /// Indexed parameters are delivered as topics.
    #[serde(default)]
    pub indexed: bool,
}

impl EventParam {
    /// Construct a new event parameter.
    pub fn new(name: impl Into<String>, ty: impl Into<String>, indexed: bool) -> EventParam {
        EventParam { param: Param::new(name, ty), indexed }
    }
}

// Dev note: Everything below relates to deserializing entries. Every entry kind shares the
// one JSON object layout, so we deserialize into a single permissive struct and then check
// that the fields line up with the declared "type".

/// An error converting a JSON object into an [`Entry`].
#[allow(missing_docs)]
#[derive(Debug, derive_more::Display)]
pub enum EntryError {
    #[display(fmt = "Entry type '{_0}' is not one of function, event, constructor, fallback, receive or error")]
    UnknownType(String),
    #[display(fmt = "A {_0} entry must have a non-empty name")]
    MissingName(&'static str),
}

#[cfg(feature = "std")]
impl std::error::Error for EntryError {}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    // The ABI format allows "type" to be omitted, in which case it defaults to "function".
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<EventParam>,
    #[serde(default)]
    outputs: Vec<Param>,
    #[serde(default)]
    state_mutability: Option<StateMutability>,
    // Older compilers emitted these instead of "stateMutability".
    #[serde(default)]
    constant: Option<bool>,
    #[serde(default)]
    payable: Option<bool>,
    #[serde(default)]
    anonymous: bool,
}

impl RawEntry {
    fn mutability(&self) -> StateMutability {
        if let Some(m) = self.state_mutability {
            return m;
        }
        match (self.constant, self.payable) {
            (Some(true), _) => StateMutability::View,
            (_, Some(true)) => StateMutability::Payable,
            _ => StateMutability::NonPayable,
        }
    }

    fn plain_inputs(&mut self) -> Vec<Param> {
        core::mem::take(&mut self.inputs).into_iter().map(|p| p.param).collect()
    }

    fn named(&self, kind: &'static str) -> Result<String, EntryError> {
        if self.name.is_empty() {
            return Err(EntryError::MissingName(kind));
        }
        Ok(self.name.clone())
    }
}

impl TryFrom<RawEntry> for Entry {
    type Error = EntryError;

    fn try_from(mut raw: RawEntry) -> Result<Self, EntryError> {
        let state_mutability = raw.mutability();
        let entry = match raw.kind.as_deref().unwrap_or("function") {
            "function" => Entry::Function(Function {
                name: raw.named("function")?,
                inputs: raw.plain_inputs(),
                outputs: core::mem::take(&mut raw.outputs),
                state_mutability,
            }),
            "event" => Entry::Event(Event {
                name: raw.named("event")?,
                inputs: core::mem::take(&mut raw.inputs),
                anonymous: raw.anonymous,
            }),
            "error" => {
                Entry::Error(CustomError { name: raw.named("error")?, inputs: raw.plain_inputs() })
            }
            "constructor" => {
                Entry::Constructor(Constructor { inputs: raw.plain_inputs(), state_mutability })
            }
            "fallback" => Entry::Fallback(Fallback { state_mutability }),
            "receive" => Entry::Receive(Receive { state_mutability: StateMutability::Payable }),
            other => return Err(EntryError::UnknownType(other.to_owned())),
        };
        Ok(entry)
    }
}

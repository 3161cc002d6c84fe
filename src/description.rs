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

//! This module provides an [`InterfaceDescription`], which is the thing handed to
//! [`crate::prepare_call()`] and [`crate::prepare_subscription()`]. A description is either
//! _literal_, meaning that every entry has been deserialized into a precisely typed
//! [`Abi`], or _widened_, meaning that entries are just generic JSON records.
//!
//! Literal descriptions are checked completely. Widened descriptions are looked up by
//! name only and produce [`crate::ResultShape::Unknown`] results, which must then be narrowed.

use crate::abi::{Abi, MemberKind};
use crate::mutability::StateMutability;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize as _;
use serde_json::{Map, Value as JsonValue};

/// An interface description in one of its two authoring forms.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceDescription {
    /// Every entry is known precisely.
    Literal(Abi),
    /// Entries are generic records; only names are relied upon.
    Widened(Vec<JsonValue>),
}

impl InterfaceDescription {
    /// A literal description.
    pub fn literal(abi: Abi) -> InterfaceDescription {
        InterfaceDescription::Literal(abi)
    }

    /// A widened description from some generic records.
    pub fn widened(records: Vec<JsonValue>) -> InterfaceDescription {
        InterfaceDescription::Widened(records)
    }

    /// Deserialize a literal description. Malformed entries are an error.
    pub fn from_json_literal(json: &str) -> Result<InterfaceDescription, serde_json::Error> {
        Ok(InterfaceDescription::Literal(Abi::from_json(json)?))
    }

    /// Deserialize a widened description. Only the outer array structure is checked.
    pub fn from_json_widened(json: &str) -> Result<InterfaceDescription, serde_json::Error> {
        Ok(InterfaceDescription::Widened(serde_json::from_str(json)?))
    }

    /// The [`Abi`], if this is a literal description.
    pub fn as_abi(&self) -> Option<&Abi> {
        match self {
            InterfaceDescription::Literal(abi) => Some(abi),
            InterfaceDescription::Widened(_) => None,
        }
    }

    /// Is this a widened description?
    pub fn is_widened(&self) -> bool {
        matches!(self, InterfaceDescription::Widened(_))
    }
}

impl From<Abi> for InterfaceDescription {
    fn from(abi: Abi) -> Self {
        InterfaceDescription::Literal(abi)
    }
}

/// A borrowed view of one generic record in a widened description.
#[derive(Debug, Clone, Copy)]
pub struct WidenedRecord<'a> {
    fields: &'a Map<String, JsonValue>,
}

impl<'a> WidenedRecord<'a> {
    /// The record's `name`, or an empty string.
    pub fn name(&self) -> &'a str {
        self.fields.get("name").and_then(JsonValue::as_str).unwrap_or("")
    }

    /// The record's `type`; `function` when absent.
    pub fn kind(&self) -> &'a str {
        self.fields.get("type").and_then(JsonValue::as_str).unwrap_or("function")
    }

    /// The declared mutability, if present and recognised.
    pub fn state_mutability(&self) -> Option<StateMutability> {
        let m = self.fields.get("stateMutability")?;
        StateMutability::deserialize(m).ok()
    }

    /// The names of the `inputs`, in order. Unnamed or malformed inputs yield "".
    pub fn input_names(&self) -> impl Iterator<Item = &'a str> {
        self.inputs().iter().map(|input| input.get("name").and_then(JsonValue::as_str).unwrap_or(""))
    }

    /// The number of `inputs`.
    pub fn input_count(&self) -> usize {
        self.inputs().len()
    }

    /// The `indexed` flags of the `inputs`, in order.
    pub fn indexed_flags(&self) -> impl Iterator<Item = bool> + 'a {
        self.inputs()
            .iter()
            .map(|input| input.get("indexed").and_then(JsonValue::as_bool).unwrap_or(false))
    }

    /// The `anonymous` flag.
    pub fn anonymous(&self) -> bool {
        self.fields.get("anonymous").and_then(JsonValue::as_bool).unwrap_or(false)
    }

    fn inputs(&self) -> &'a [JsonValue] {
        match self.fields.get("inputs") {
            Some(JsonValue::Array(inputs)) => inputs,
            _ => &[],
        }
    }
}

/// Find the record of the given kind called `name` in a widened description. When several
/// share the name, the first whose input count equals `arg_count` is preferred, falling
/// back to the first declared. A qualified name like `foo(uint256)` is looked up by its
/// base name.
pub fn find_widened<'a>(
    records: &'a [JsonValue],
    name: &str,
    kind: MemberKind,
    arg_count: Option<usize>,
) -> Option<WidenedRecord<'a>> {
    let name = name.split('(').next().unwrap_or(name);
    let kind_str = match kind {
        MemberKind::Function => "function",
        MemberKind::Event => "event",
        MemberKind::Error => "error",
    };

    let mut candidates = records
        .iter()
        .filter_map(|record| record.as_object())
        .map(|fields| WidenedRecord { fields })
        .filter(|record| record.kind() == kind_str && record.name() == name);

    let first = candidates.next()?;
    let Some(arg_count) = arg_count else {
        return Some(first);
    };
    if first.input_count() == arg_count {
        return Some(first);
    }
    Some(candidates.find(|record| record.input_count() == arg_count).unwrap_or(first))
}

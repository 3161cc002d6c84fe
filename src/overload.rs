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

//! This module picks a single [`Entry`] out of an [`Abi`] given a member name and,
//! optionally, the arguments that will be passed to it. See [`select()`].

use crate::abi::{Abi, Entry, MemberKind};
use crate::config::{OverloadPolicy, ResolverConfig};
use crate::error::{Candidates, Error};
use crate::resolve::{resolve_param, ResolveError};
use crate::shape::Shape;
use crate::signature::signature_of;
use crate::value::Value;
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

type EntryList<'a> = SmallVec<[&'a Entry; 4]>;

/// Select the entry of the given kind called `name`.
///
/// - If exactly one entry has this name, it's returned regardless of `args`.
/// - If several do, `args` are used to pick the first (in declaration order) whose inputs
///   accept them. Without `args`, this fails with [`Error::AmbiguousMember`]. With
///   [`OverloadPolicy::Strict`], more than one compatible entry also fails with
///   [`Error::AmbiguousMember`].
/// - If `name` is a qualified reference like `transferFrom(address,address,uint256)`, the
///   entry with exactly that canonical signature is returned and `args` are not consulted.
pub fn select<'a>(
    abi: &'a Abi,
    name: &str,
    kind: MemberKind,
    args: Option<&[Value]>,
    config: &ResolverConfig,
) -> Result<&'a Entry, Error> {
    if name.contains('(') {
        return select_qualified(abi, name, kind);
    }

    let candidates: EntryList<'a> = abi
        .entries()
        .iter()
        .filter(|entry| entry.member_kind() == Some(kind) && entry.name() == Some(name))
        .collect();

    tracing::debug!(member = name, %kind, candidates = candidates.len(), "selecting member");

    match candidates.as_slice() {
        [] => Err(Error::MemberNotFound { name: name.to_owned(), kind }),
        [only] => Ok(*only),
        _ => {
            let Some(args) = args else {
                return Err(Error::AmbiguousMember {
                    name: name.to_owned(),
                    candidates: canonical_list(&candidates)?,
                });
            };

            let mut compatible = EntryList::new();
            for entry in &candidates {
                if accepts(&input_shapes(entry)?, args) {
                    compatible.push(*entry);
                }
            }

            tracing::debug!(
                member = name,
                compatible = compatible.len(),
                args = args.len(),
                "disambiguating overloads"
            );

            match (compatible.as_slice(), config.overloads) {
                ([], _) => Err(Error::NoMatchingOverload {
                    name: name.to_owned(),
                    candidates: canonical_list(&candidates)?,
                }),
                ([first, ..], OverloadPolicy::FirstDeclared) | ([first], OverloadPolicy::Strict) => {
                    Ok(*first)
                }
                (_, OverloadPolicy::Strict) => Err(Error::AmbiguousMember {
                    name: name.to_owned(),
                    candidates: canonical_list(&compatible)?,
                }),
            }
        }
    }
}

/// Do the given arguments fit the given input shapes, positionally?
pub fn accepts(inputs: &[Shape], args: &[Value]) -> bool {
    inputs.len() == args.len()
        && inputs.iter().zip(args).all(|(shape, arg)| arg.conforms_to(shape).is_ok())
}

fn select_qualified<'a>(
    abi: &'a Abi,
    qualified: &str,
    kind: MemberKind,
) -> Result<&'a Entry, Error> {
    let wanted: String = qualified.chars().filter(|c| !c.is_whitespace()).collect();
    // `transferFrom(address,address,uint256)` has the base name `transferFrom`.
    let base_name = wanted.split('(').next().unwrap_or_default();

    for entry in abi.entries() {
        if entry.member_kind() != Some(kind) || entry.name() != Some(base_name) {
            continue;
        }
        if signature_of(entry)?.canonical().as_deref() == Some(wanted.as_str()) {
            tracing::debug!(member = qualified, %kind, "selected qualified member");
            return Ok(entry);
        }
    }

    Err(Error::MemberNotFound { name: qualified.to_owned(), kind })
}

fn input_shapes(entry: &Entry) -> Result<Vec<Shape>, ResolveError> {
    match entry {
        Entry::Function(f) => f.inputs.iter().map(resolve_param).collect(),
        Entry::Event(e) => e.inputs.iter().map(|p| resolve_param(&p.param)).collect(),
        Entry::Error(e) => e.inputs.iter().map(resolve_param).collect(),
        Entry::Constructor(c) => c.inputs.iter().map(resolve_param).collect(),
        Entry::Fallback(_) | Entry::Receive(_) => Ok(Vec::new()),
    }
}

fn canonical_list(entries: &[&Entry]) -> Result<Candidates, Error> {
    entries
        .iter()
        .map(|entry| Ok(signature_of(entry)?.canonical().unwrap_or_default()))
        .collect::<Result<Vec<String>, Error>>()
        .map(Candidates)
}

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

//! Preparing event subscriptions. See [`prepare_subscription()`].

use crate::abi::MemberKind;
use crate::config::ResolverConfig;
use crate::description::{find_widened, InterfaceDescription};
use crate::error::Error;
use crate::overload::select;
use crate::shape::{FieldName, Shape};
use crate::signature::{EventField, EventSignature};
use alloc::borrow::ToOwned;

/// Prepare a subscription to the event `name` using the default [`ResolverConfig`].
/// See [`prepare_subscription_with()`].
pub fn prepare_subscription(
    description: &InterfaceDescription,
    name: &str,
    handler_arity: usize,
) -> Result<EventSignature, Error> {
    prepare_subscription_with(description, name, handler_arity, &ResolverConfig::default())
}

/// Resolve the event `name` into the ordered list of parameters that a subscription
/// service will decode and hand to a handler accepting `handler_arity` arguments.
///
/// Overloaded events can't be disambiguated by arguments here, so they must be referred
/// to by their qualified name, ie `Transfer(address,address,uint256)`. For a widened
/// description, parameter shapes are [`Shape::Unknown`] but the arity is still checked.
pub fn prepare_subscription_with(
    description: &InterfaceDescription,
    name: &str,
    handler_arity: usize,
    config: &ResolverConfig,
) -> Result<EventSignature, Error> {
    let res = resolve_event(description, name, config).and_then(|signature| {
        if signature.arity() != handler_arity {
            return Err(Error::HandlerArityMismatch {
                name: signature.name,
                expected: signature.params.len(),
                supplied: handler_arity,
            });
        }
        Ok(signature)
    });

    match &res {
        Ok(signature) => {
            tracing::debug!(member = name, arity = handler_arity, selected = %signature.canonical(), "subscription prepared")
        }
        Err(e) => tracing::debug!(member = name, error = %e, "subscription rejected"),
    }
    res
}

fn resolve_event(
    description: &InterfaceDescription,
    name: &str,
    config: &ResolverConfig,
) -> Result<EventSignature, Error> {
    match description {
        InterfaceDescription::Literal(abi) => {
            let entry = select(abi, name, MemberKind::Event, None, config)?;
            let event = entry
                .as_event()
                .ok_or_else(|| Error::MemberNotFound { name: name.to_owned(), kind: MemberKind::Event })?;
            Ok(EventSignature::resolve(event)?)
        }
        InterfaceDescription::Widened(records) => {
            let record = find_widened(records, name, MemberKind::Event, None)
                .ok_or_else(|| Error::MemberNotFound { name: name.to_owned(), kind: MemberKind::Event })?;
            let params = record
                .input_names()
                .zip(record.indexed_flags())
                .map(|(name, indexed)| EventField {
                    name: FieldName::from_str(name),
                    shape: Shape::Unknown,
                    indexed,
                })
                .collect();
            Ok(EventSignature { name: record.name().to_owned(), params, anonymous: record.anonymous() })
        }
    }
}

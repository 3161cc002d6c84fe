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

//! Configuration for resolving calls and subscriptions.

/// Options that alter how members are resolved. Every field has a default, so
/// this can be deserialized from an empty object.
///
/// # Example
///
/// ```rust
/// use abi_shape::{OverloadPolicy, ResolverConfig};
///
/// let config: ResolverConfig = serde_json::from_str(r#"{ "overloads": "strict" }"#).unwrap();
/// assert_eq!(config.overloads, OverloadPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// How to pick between overloads that all accept the supplied arguments.
    pub overloads: OverloadPolicy,
}

/// What to do when more than one overload of a member accepts the supplied arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverloadPolicy {
    /// Pick the first compatible overload in declaration order.
    #[default]
    FirstDeclared,
    /// Refuse to pick; the caller must use a qualified member reference like
    /// `transferFrom(address,address,uint256)` instead.
    Strict,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let config: ResolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.overloads, OverloadPolicy::FirstDeclared);

        let config: ResolverConfig =
            serde_json::from_str(r#"{ "overloads": "firstDeclared" }"#).unwrap();
        assert_eq!(config.overloads, OverloadPolicy::FirstDeclared);

        assert!(serde_json::from_str::<ResolverConfig>(r#"{ "overloads": "loose" }"#).is_err());
    }
}

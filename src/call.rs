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

//! This module synthesizes [`CallDescriptor`]s: everything a transport needs in order to
//! perform a call and decode what comes back. See [`prepare_call()`].

use crate::abi::{Abi, MemberKind};
use crate::config::ResolverConfig;
use crate::description::{find_widened, InterfaceDescription};
use crate::error::Error;
use crate::mutability::{ensure_call_kind, CallKind, StateMutability};
use crate::overload::select;
use crate::shape::{Field, Shape};
use crate::signature::FunctionSignature;
use crate::value::Value;
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use serde_json::Value as JsonValue;

/// The shape that the raw result of a call will be decoded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    /// The function has no outputs.
    Void,
    /// The function has exactly one output.
    Single(Shape),
    /// The function has several outputs, which can be accessed by position or, where
    /// named, by name.
    Record(Vec<Field>),
    /// The description was widened, so nothing is known about the result. Use
    /// [`ResultShape::narrow()`] to obtain something concrete.
    Unknown,
}

impl ResultShape {
    /// Derive the result shape from a function's resolved outputs.
    pub fn from_outputs(outputs: &[Field]) -> ResultShape {
        match outputs {
            [] => ResultShape::Void,
            [only] => ResultShape::Single(only.shape.clone()),
            _ => ResultShape::Record(outputs.to_vec()),
        }
    }

    /// Is this [`ResultShape::Unknown`]?
    pub fn is_unknown(&self) -> bool {
        matches!(self, ResultShape::Unknown)
    }

    /// Narrow an open shape to the one the caller expects. A shape which is already
    /// concrete is returned only if it agrees with `expected`.
    pub fn narrow(&self, expected: &ResultShape) -> Option<ResultShape> {
        match self {
            ResultShape::Unknown => Some(expected.clone()),
            _ if self.same_type(expected) => Some(self.clone()),
            _ => None,
        }
    }

    /// Do these describe the same type? Output names are ignored, and [`ResultShape::Unknown`]
    /// is only the same as itself.
    pub fn same_type(&self, other: &ResultShape) -> bool {
        match (self, other) {
            (ResultShape::Void, ResultShape::Void) => true,
            (ResultShape::Unknown, ResultShape::Unknown) => true,
            (ResultShape::Single(a), ResultShape::Single(b)) => a.same_type(b),
            (ResultShape::Record(a), ResultShape::Record(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.shape.same_type(&b.shape))
            }
            _ => false,
        }
    }

    /// The shape of the output at the given position.
    pub fn at(&self, index: usize) -> Option<&Shape> {
        match self {
            ResultShape::Single(shape) if index == 0 => Some(shape),
            ResultShape::Record(fields) => fields.get(index).map(|f| &f.shape),
            _ => None,
        }
    }

    /// The shape of the output with the given name.
    pub fn field(&self, name: &str) -> Option<&Shape> {
        match self {
            ResultShape::Record(fields) => {
                fields.iter().find(|f| f.is_named() && f.name.as_str() == name).map(|f| &f.shape)
            }
            _ => None,
        }
    }
}

impl core::fmt::Display for ResultShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResultShape::Void => f.write_str("()"),
            ResultShape::Single(shape) => write!(f, "{shape}"),
            ResultShape::Record(fields) => write!(f, "{}", Shape::Tuple(fields.clone())),
            ResultShape::Unknown => f.write_str("unknown"),
        }
    }
}

/// A fully checked call, ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    /// The member name.
    pub name: String,
    /// The canonical signature of the selected entry. Absent for widened descriptions.
    pub signature: Option<String>,
    /// Whether this is a read or a write.
    pub kind: CallKind,
    /// The declared mutability, if known.
    pub mutability: Option<StateMutability>,
    /// The resolved input shapes. These are [`Shape::Unknown`] for widened descriptions.
    pub inputs: Vec<Field>,
    /// What the transport's raw result must be decoded into.
    pub output: ResultShape,
    /// The arguments, which are known to fit `inputs`.
    pub args: Vec<Value>,
}

/// Prepare a call to the function `name` using the default [`ResolverConfig`].
/// See [`prepare_call_with()`].
///
/// # Example
///
/// ```rust
/// use abi_shape::{prepare_call, CallKind, Error, InterfaceDescription, ResultShape, Shape};
///
/// let desc = InterfaceDescription::from_json_literal(r#"[
///     { "type": "function", "name": "name", "stateMutability": "view", "inputs": [], "outputs": [{ "type": "string" }] }
/// ]"#).unwrap();
///
/// let call = prepare_call(&desc, "name", CallKind::Read, None).unwrap();
/// assert_eq!(call.output, ResultShape::Single(Shape::String));
///
/// let err = prepare_call(&desc, "name", CallKind::Write, None).unwrap_err();
/// assert!(matches!(err, Error::WrongCallKind { .. }));
/// ```
pub fn prepare_call(
    description: &InterfaceDescription,
    name: &str,
    kind: CallKind,
    args: Option<&[Value]>,
) -> Result<CallDescriptor, Error> {
    prepare_call_with(description, name, kind, args, &ResolverConfig::default())
}

/// Prepare a call to the function `name`. For a literal description, this:
///
/// 1. Selects the function (see [`crate::select()`]).
/// 2. Checks that it can be used for the requested [`CallKind`].
/// 3. Resolves its signature.
/// 4. Binds `args` (none means no arguments) positionally against its inputs.
///
/// For a widened description, the function is looked up by name only, arguments are
/// accepted as they are and the output is [`ResultShape::Unknown`]. The call kind is
/// still checked whenever the record declares a known `stateMutability`.
pub fn prepare_call_with(
    description: &InterfaceDescription,
    name: &str,
    kind: CallKind,
    args: Option<&[Value]>,
    config: &ResolverConfig,
) -> Result<CallDescriptor, Error> {
    let res = match description {
        InterfaceDescription::Literal(abi) => prepare_literal(abi, name, kind, args, config),
        InterfaceDescription::Widened(records) => prepare_widened(records, name, kind, args),
    };

    if let Err(e) = &res {
        tracing::debug!(member = name, %kind, error = %e, "call rejected");
    }
    res
}

pub(crate) fn prepare_literal(
    abi: &Abi,
    name: &str,
    kind: CallKind,
    args: Option<&[Value]>,
    config: &ResolverConfig,
) -> Result<CallDescriptor, Error> {
    let entry = select(abi, name, MemberKind::Function, args, config)?;
    let function = entry
        .as_function()
        .ok_or_else(|| Error::MemberNotFound { name: name.to_owned(), kind: MemberKind::Function })?;

    ensure_call_kind(&function.name, function.state_mutability, kind)?;

    let signature = FunctionSignature::resolve(function)?;
    let args = args.unwrap_or(&[]);
    bind(&signature.name, &signature.inputs, args)?;

    let canonical = signature.canonical();
    tracing::debug!(member = name, %kind, selected = %canonical, "call prepared");

    Ok(CallDescriptor {
        output: signature.result_shape(),
        name: signature.name,
        signature: Some(canonical),
        kind,
        mutability: Some(signature.mutability),
        inputs: signature.inputs,
        args: args.to_vec(),
    })
}

fn prepare_widened(
    records: &[JsonValue],
    name: &str,
    kind: CallKind,
    args: Option<&[Value]>,
) -> Result<CallDescriptor, Error> {
    let args = args.unwrap_or(&[]);
    let record = find_widened(records, name, MemberKind::Function, Some(args.len()))
        .ok_or_else(|| Error::MemberNotFound { name: name.to_owned(), kind: MemberKind::Function })?;

    let mutability = record.state_mutability();
    if let Some(mutability) = mutability {
        ensure_call_kind(record.name(), mutability, kind)?;
    }

    tracing::debug!(member = name, %kind, "call prepared against a widened description");

    Ok(CallDescriptor {
        name: record.name().to_owned(),
        signature: None,
        kind,
        mutability,
        inputs: record.input_names().map(|n| Field::new(n, Shape::Unknown)).collect(),
        output: ResultShape::Unknown,
        args: args.to_vec(),
    })
}

/// Check that `args` line up with `inputs`: the same number of them, each fitting the
/// shape at its position.
pub fn bind(name: &str, inputs: &[Field], args: &[Value]) -> Result<(), Error> {
    if inputs.len() != args.len() {
        return Err(Error::ArgumentCountMismatch {
            name: name.to_owned(),
            expected: inputs.len(),
            supplied: args.len(),
        });
    }
    for (index, (input, arg)) in inputs.iter().zip(args).enumerate() {
        arg.conforms_to(&input.shape).map_err(|m| Error::ArgumentShapeMismatch {
            name: name.to_owned(),
            index,
            path: m.path,
            expected: m.expected,
            supplied: m.found,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{
        address, nested_tuple_array_abi, nouns_auction_house_abi, overloaded_transfer_abi,
        wagmi_mint_example_abi,
    };
    use alloc::vec;

    fn name_only() -> InterfaceDescription {
        InterfaceDescription::from_json_literal(
            r#"[{ "name": "name", "type": "function", "stateMutability": "view", "inputs": [], "outputs": [{ "type": "string" }] }]"#,
        )
        .unwrap()
    }

    #[test]
    fn reads_of_views_resolve_their_output() {
        let call = prepare_call(&name_only(), "name", CallKind::Read, None).unwrap();
        assert_eq!(
            call,
            CallDescriptor {
                name: "name".to_owned(),
                signature: Some("name()".to_owned()),
                kind: CallKind::Read,
                mutability: Some(StateMutability::View),
                inputs: vec![],
                output: ResultShape::Single(Shape::String),
                args: vec![],
            }
        );
    }

    #[test]
    fn writes_of_views_are_rejected() {
        let err = prepare_call(&name_only(), "name", CallKind::Write, None).unwrap_err();
        assert_eq!(
            err,
            Error::WrongCallKind {
                name: "name".to_owned(),
                requested: CallKind::Write,
                actual: CallKind::Read,
                mutability: StateMutability::View,
            }
        );
    }

    #[test]
    fn call_kind_is_checked_before_arguments() {
        let desc = InterfaceDescription::from(wagmi_mint_example_abi());
        // Bad args and the wrong kind; the kind is reported.
        let err = prepare_call(&desc, "mint", CallKind::Read, Some(&[Value::Bool(true)][..])).unwrap_err();
        assert!(matches!(err, Error::WrongCallKind { .. }));
    }

    #[test]
    fn tuple_array_arguments_bind_by_name() {
        let desc = InterfaceDescription::from(nested_tuple_array_abi());
        let good = vec![
            Value::Array(vec![
                Value::record([("a", Value::uint(1)), ("b", Value::Array(vec![Value::uint(2)]))]),
                Value::record([("a", Value::uint(3)), ("b", Value::Array(vec![]))]),
            ]),
            Value::record([("x", Value::uint(1)), ("y", Value::uint(2))]),
            Value::uint(3),
        ];

        let call = prepare_call(&desc, "v", CallKind::Read, Some(&good[..])).unwrap();
        assert_eq!(call.args, good);
        assert_eq!(call.signature.as_deref(), Some("v((uint256,uint256[])[],(uint256,uint256),uint256)"));

        let mut missing_b = good.clone();
        missing_b[0] = Value::Array(vec![Value::record([("a", Value::uint(1))])]);
        let err = prepare_call(&desc, "v", CallKind::Read, Some(&missing_b[..])).unwrap_err();
        assert_eq!(
            err,
            Error::ArgumentShapeMismatch {
                name: "v".to_owned(),
                index: 0,
                path: "[0].b".to_owned(),
                expected: "uint256[]".to_owned(),
                supplied: "nothing".to_owned(),
            }
        );
    }

    #[test]
    fn matching_arguments_always_bind_and_one_fewer_never_does() {
        let abi = wagmi_mint_example_abi();
        let desc = InterfaceDescription::from(abi.clone());

        for function in abi.functions() {
            let signature = FunctionSignature::resolve(function).unwrap();
            let args: Vec<Value> = signature.input_shapes().map(example_value).collect();
            let qualified = signature.canonical();

            let call = prepare_call(&desc, &qualified, signature.call_kind(), Some(&args[..])).unwrap();
            assert_eq!(call.inputs, signature.inputs);

            if let Some((_, fewer)) = args.split_last() {
                assert!(matches!(
                    prepare_call(&desc, &qualified, signature.call_kind(), Some(fewer)),
                    Err(Error::ArgumentCountMismatch { .. })
                ));
            }
        }
    }

    fn example_value(shape: &Shape) -> Value {
        match shape {
            Shape::Integer { signed: false, .. } => Value::uint(1),
            Shape::Integer { signed: true, .. } => Value::int(-1),
            Shape::FixedBytes(n) => Value::fixed_bytes(&vec![0; *n as usize]),
            Shape::Bytes => Value::Bytes(vec![1, 2, 3]),
            Shape::Bool => Value::Bool(true),
            Shape::Address => Value::Address(address(7)),
            Shape::String => Value::string("hello"),
            Shape::Tuple(fields) => Value::Tuple(fields.iter().map(|f| example_value(&f.shape)).collect()),
            Shape::Array { element, length } => {
                let n = match length {
                    crate::ArrayLength::Fixed(n) => *n,
                    crate::ArrayLength::Dynamic => 2,
                };
                Value::Array((0..n).map(|_| example_value(element)).collect())
            }
            Shape::Unknown => Value::Bool(false),
        }
    }

    #[test]
    fn overloads_are_bound_after_selection() {
        let desc = InterfaceDescription::from(overloaded_transfer_abi());
        let args = [Value::Address(address(1)), Value::Address(address(2)), Value::uint(5)];
        let call = prepare_call(&desc, "transferFrom", CallKind::Write, Some(&args[..])).unwrap();
        assert_eq!(call.signature.as_deref(), Some("transferFrom(address,address,uint256)"));
        assert_eq!(call.output, ResultShape::Void);
    }

    #[test]
    fn several_outputs_make_a_record() {
        let desc = InterfaceDescription::from(nouns_auction_house_abi());
        let call = prepare_call(&desc, "auction", CallKind::Read, None).unwrap();

        assert_eq!(call.output.at(0), Some(&Shape::uint(256)));
        assert_eq!(call.output.field("bidder"), Some(&Shape::Address));
        assert_eq!(call.output.field("settled"), Some(&Shape::Bool));
        assert_eq!(call.output.field("nope"), None);
        assert_eq!(
            call.output.to_string(),
            "(uint256,uint256,uint256,uint256,address,bool)"
        );
    }

    #[test]
    fn wrong_argument_counts_are_reported() {
        let desc = InterfaceDescription::from(wagmi_mint_example_abi());
        let err = prepare_call(&desc, "balanceOf", CallKind::Read, None).unwrap_err();
        assert_eq!(
            err,
            Error::ArgumentCountMismatch { name: "balanceOf".to_owned(), expected: 1, supplied: 0 }
        );
    }

    #[test]
    fn widened_descriptions_produce_unknown_results() {
        let desc = InterfaceDescription::from_json_widened(
            r#"[{ "type": "function", "name": "balanceOf", "stateMutability": "view", "inputs": [{ "name": "owner", "type": "address" }], "outputs": [{ "type": "uint256" }] }]"#,
        )
        .unwrap();

        let args = [Value::string("not checked")];
        let call = prepare_call(&desc, "balanceOf", CallKind::Read, Some(&args[..])).unwrap();
        assert_eq!(call.signature, None);
        assert_eq!(call.mutability, Some(StateMutability::View));
        assert_eq!(call.inputs, vec![Field::new("owner", Shape::Unknown)]);
        assert!(call.output.is_unknown());

        let expected = ResultShape::Single(Shape::uint(256));
        assert_eq!(call.output.narrow(&expected), Some(expected));

        assert!(matches!(
            prepare_call(&desc, "nope", CallKind::Read, None),
            Err(Error::MemberNotFound { .. })
        ));
    }

    #[test]
    fn widened_descriptions_still_check_the_call_kind() {
        let desc = InterfaceDescription::from_json_widened(
            r#"[
                { "name": "name", "stateMutability": "view", "outputs": [{ "type": "string" }] },
                { "name": "mint", "stateMutability": "payable" },
                { "name": "poke" },
                { "name": "burn", "stateMutability": "sometimes" }
            ]"#,
        )
        .unwrap();

        assert!(matches!(
            prepare_call(&desc, "name", CallKind::Write, None),
            Err(Error::WrongCallKind {
                requested: CallKind::Write,
                actual: CallKind::Read,
                mutability: StateMutability::View,
                ..
            })
        ));
        assert!(prepare_call(&desc, "name", CallKind::Read, None).is_ok());

        assert!(matches!(
            prepare_call(&desc, "mint", CallKind::Read, None),
            Err(Error::WrongCallKind { actual: CallKind::Write, .. })
        ));
        assert!(prepare_call(&desc, "mint", CallKind::Write, None).is_ok());

        // Without a known mutability there is nothing to check against:
        for name in ["poke", "burn"] {
            let call = prepare_call(&desc, name, CallKind::Read, None).unwrap();
            assert_eq!(call.mutability, None);
            assert!(prepare_call(&desc, name, CallKind::Write, None).is_ok());
        }
    }

    #[test]
    fn concrete_results_only_narrow_to_themselves() {
        let single = ResultShape::Single(Shape::uint(256));
        assert_eq!(single.narrow(&single), Some(single.clone()));
        assert_eq!(single.narrow(&ResultShape::Single(Shape::Bool)), None);
        assert_eq!(single.narrow(&ResultShape::Unknown), None);

        let named = ResultShape::Record(vec![Field::new("a", Shape::Bool), Field::new("b", Shape::Bool)]);
        let unnamed = ResultShape::Record(vec![Field::unnamed(Shape::Bool), Field::unnamed(Shape::Bool)]);
        assert!(named.same_type(&unnamed));
        assert!(!ResultShape::Void.same_type(&unnamed));
    }
}

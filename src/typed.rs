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

//! An optional statically typed layer over the runtime resolver.
//!
//! Functions are declared ahead of time with Rust argument and output types, usually via
//! [`abi_function!`](crate::abi_function). Such a declaration is never trusted on its
//! own: [`verify()`] checks it against an [`Abi`] using the same resolver that
//! [`crate::prepare_call()`] uses, and [`prepare()`] does so before every call.
//!
//! # Example
//!
//! ```rust
//! use abi_shape::{abi_function, typed, Abi, Address, InterfaceDescription, U256};
//!
//! abi_function! {
//!     /// Look up the balance of an account.
//!     pub struct BalanceOf = read "balanceOf"(Address) -> U256;
//! }
//!
//! let abi = Abi::from_json(r#"[{
//!     "type": "function",
//!     "name": "balanceOf",
//!     "stateMutability": "view",
//!     "inputs": [{ "name": "owner", "type": "address" }],
//!     "outputs": [{ "name": "", "type": "uint256" }]
//! }]"#).unwrap();
//!
//! typed::verify::<BalanceOf>(&abi).unwrap();
//! let desc = InterfaceDescription::from(abi);
//! let call = typed::prepare::<BalanceOf>(&desc, (Address::ZERO,)).unwrap();
//! assert_eq!(call.signature.as_deref(), Some("balanceOf(address)"));
//! ```

use crate::abi::{Abi, MemberKind};
use crate::call::{prepare_call, CallDescriptor, ResultShape};
use crate::config::ResolverConfig;
use crate::description::InterfaceDescription;
use crate::error::Error;
use crate::mutability::{ensure_call_kind, CallKind};
use crate::overload::select;
use crate::shape::{Field, Shape};
use crate::signature::{canonical, FunctionSignature};
use crate::value::{Address, Value};
use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;
use ethnum::{I256, U256};

/// A Rust type which corresponds to an ABI type.
pub trait AbiType {
    /// The shape of the corresponding ABI type.
    fn shape() -> Shape;
    /// Convert into a [`Value`] which fits [`AbiType::shape()`].
    fn into_value(self) -> Value;
}

/// The argument list of a function: `()` or a tuple of [`AbiType`]s.
pub trait AbiArgs {
    /// The shape of each argument, in order.
    fn shapes() -> Vec<Shape>;
    /// Convert into argument values.
    fn into_values(self) -> Vec<Value>;
}

/// The output of a function: `()`, a single [`AbiType`], or several of them wrapped
/// in [`Outputs`].
pub trait AbiOutput {
    /// The result shape a call will produce.
    fn result_shape() -> ResultShape;
}

/// Declares that a function has several outputs, ie `Outputs<(U256, bool)>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outputs<T>(PhantomData<T>);

/// The `bytes` ABI type. A `Vec<u8>` is `uint8[]` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

/// The `bytesN` ABI type. `N` must be between 1 and 32; any other length fails to compile
/// once the type is used as an [`AbiType`]:
///
/// ```rust,compile_fail
/// use abi_shape::typed::{AbiType, FixedBytes};
///
/// let _ = <FixedBytes<33>>::shape();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    const LEN: u8 = {
        assert!(N >= 1 && N <= 32, "FixedBytes<N> needs N between 1 and 32");
        N as u8
    };
}

/// A function declared with Rust types. See [`abi_function!`](crate::abi_function).
pub trait ContractFunction {
    /// The function name.
    const NAME: &'static str;
    /// Whether calls are reads or writes.
    const KIND: CallKind;
    /// The argument types.
    type Args: AbiArgs;
    /// The output type.
    type Output: AbiOutput;

    /// The canonical signature implied by the declaration.
    fn signature() -> String {
        let shapes = <Self::Args as AbiArgs>::shapes();
        canonical(Self::NAME, &shapes)
    }
}

/// Check that a declaration agrees with the runtime resolver: a function with exactly the
/// declared signature exists, it can be used for the declared kind of call, and its
/// outputs have the declared shape.
pub fn verify<F: ContractFunction>(abi: &Abi) -> Result<FunctionSignature, Error> {
    let qualified = F::signature();
    let entry = select(abi, &qualified, MemberKind::Function, None, &ResolverConfig::default())?;
    let function = entry
        .as_function()
        .ok_or_else(|| Error::MemberNotFound { name: qualified.clone(), kind: MemberKind::Function })?;

    ensure_call_kind(&function.name, function.state_mutability, F::KIND)?;

    let signature = FunctionSignature::resolve(function)?;
    let declared = <F::Output as AbiOutput>::result_shape();
    let resolved = signature.result_shape();
    if !declared.same_type(&resolved) {
        return Err(Error::DeclarationMismatch {
            name: qualified,
            declared: declared.to_string(),
            resolved: resolved.to_string(),
        });
    }
    Ok(signature)
}

/// Prepare a call using a declaration. Literal descriptions are verified first; the
/// unknown output of a widened description is narrowed to the declared one.
pub fn prepare<F: ContractFunction>(
    description: &InterfaceDescription,
    args: F::Args,
) -> Result<CallDescriptor, Error> {
    if let InterfaceDescription::Literal(abi) = description {
        verify::<F>(abi)?;
    }

    let values = args.into_values();
    let mut call = prepare_call(description, &F::signature(), F::KIND, Some(&values[..]))?;

    let declared = <F::Output as AbiOutput>::result_shape();
    let output = call.output.narrow(&declared).ok_or_else(|| Error::DeclarationMismatch {
        name: F::NAME.to_owned(),
        declared: declared.to_string(),
        resolved: call.output.to_string(),
    })?;
    call.output = output;
    Ok(call)
}

impl AbiType for bool {
    fn shape() -> Shape {
        Shape::Bool
    }
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl AbiType for String {
    fn shape() -> Shape {
        Shape::String
    }
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl AbiType for Address {
    fn shape() -> Shape {
        Shape::Address
    }
    fn into_value(self) -> Value {
        Value::Address(self)
    }
}

impl AbiType for Bytes {
    fn shape() -> Shape {
        Shape::Bytes
    }
    fn into_value(self) -> Value {
        Value::Bytes(self.0)
    }
}

impl<const N: usize> AbiType for FixedBytes<N> {
    fn shape() -> Shape {
        Shape::FixedBytes(Self::LEN)
    }
    fn into_value(self) -> Value {
        let _ = Self::LEN;
        Value::fixed_bytes(&self.0)
    }
}

impl AbiType for U256 {
    fn shape() -> Shape {
        Shape::uint(256)
    }
    fn into_value(self) -> Value {
        Value::Uint(self)
    }
}

impl AbiType for I256 {
    fn shape() -> Shape {
        Shape::int(256)
    }
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

macro_rules! impl_abi_type_for_ints {
    ($($ty:ident => $ctor:ident as $wide:ident, $bits:literal;)+) => {$(
        impl AbiType for $ty {
            fn shape() -> Shape {
                Shape::$ctor($bits)
            }
            fn into_value(self) -> Value {
                Value::$ctor(self as $wide)
            }
        }
    )+}
}

impl_abi_type_for_ints! {
    u8 => uint as u128, 8;
    u16 => uint as u128, 16;
    u32 => uint as u128, 32;
    u64 => uint as u128, 64;
    u128 => uint as u128, 128;
    i8 => int as i128, 8;
    i16 => int as i128, 16;
    i32 => int as i128, 32;
    i64 => int as i128, 64;
    i128 => int as i128, 128;
}

impl<T: AbiType, const N: usize> AbiType for [T; N] {
    fn shape() -> Shape {
        Shape::array(T::shape(), N)
    }
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(AbiType::into_value).collect())
    }
}

impl<T: AbiType> AbiType for Vec<T> {
    fn shape() -> Shape {
        Shape::dynamic_array(T::shape())
    }
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(AbiType::into_value).collect())
    }
}

impl AbiArgs for () {
    fn shapes() -> Vec<Shape> {
        Vec::new()
    }
    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl AbiOutput for () {
    fn result_shape() -> ResultShape {
        ResultShape::Void
    }
}

impl<T: AbiType> AbiOutput for T {
    fn result_shape() -> ResultShape {
        ResultShape::Single(T::shape())
    }
}

// Tuples are ABI tuples when used as a single type, argument lists when used as
// `ContractFunction::Args`, and output lists when wrapped in `Outputs`.
macro_rules! impl_for_tuples {
    ($($name:ident)+) => {
        impl<$($name: AbiType),+> AbiType for ($($name,)+) {
            fn shape() -> Shape {
                Shape::Tuple(vec![$(Field::unnamed(<$name as AbiType>::shape())),+])
            }
            #[allow(non_snake_case)]
            fn into_value(self) -> Value {
                let ($($name,)+) = self;
                Value::Tuple(vec![$($name.into_value()),+])
            }
        }

        impl<$($name: AbiType),+> AbiArgs for ($($name,)+) {
            fn shapes() -> Vec<Shape> {
                vec![$(<$name as AbiType>::shape()),+]
            }
            #[allow(non_snake_case)]
            fn into_values(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into_value()),+]
            }
        }

        impl<$($name: AbiType),+> AbiOutput for Outputs<($($name,)+)> {
            fn result_shape() -> ResultShape {
                ResultShape::Record(vec![$(Field::unnamed(<$name as AbiType>::shape())),+])
            }
        }
    };
}

impl_for_tuples!(A);
impl_for_tuples!(A B);
impl_for_tuples!(A B C);
impl_for_tuples!(A B C D);
impl_for_tuples!(A B C D E);
impl_for_tuples!(A B C D E F);

/// Declare a [`ContractFunction`](crate::typed::ContractFunction) as a unit struct.
///
/// ```rust
/// use abi_shape::{abi_function, Address, U256};
/// use abi_shape::typed::{Bytes, ContractFunction, Outputs};
///
/// abi_function! {
///     pub struct SafeTransferFrom = write "safeTransferFrom"(Address, Address, U256, Bytes) -> ();
/// }
/// abi_function! {
///     struct Reserves = read "getReserves"() -> Outputs<(u128, u128, u32)>;
/// }
///
/// assert_eq!(SafeTransferFrom::signature(), "safeTransferFrom(address,address,uint256,bytes)");
/// assert_eq!(Reserves::signature(), "getReserves()");
/// ```
#[macro_export]
macro_rules! abi_function {
    (@kind read) => { $crate::CallKind::Read };
    (@kind write) => { $crate::CallKind::Write };
    (
        $(#[$attr:meta])*
        $vis:vis struct $ty:ident = $kind:ident $name:literal ( $($arg:ty),* $(,)? ) -> $out:ty ;
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $ty;

        impl $crate::typed::ContractFunction for $ty {
            const NAME: &'static str = $name;
            const KIND: $crate::CallKind = $crate::abi_function!(@kind $kind);
            type Args = ($($arg,)*);
            type Output = $out;
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{
        address, ens_registry_abi, nouns_auction_house_abi, overloaded_transfer_abi,
        wagmi_mint_example_abi,
    };
    use alloc::vec;

    crate::abi_function! {
        struct BalanceOf = read "balanceOf"(Address) -> U256;
    }
    crate::abi_function! {
        struct Mint = write "mint"() -> ();
    }
    crate::abi_function! {
        struct MintAsRead = read "mint"() -> ();
    }
    crate::abi_function! {
        struct NameAsNumber = read "name"() -> U256;
    }
    crate::abi_function! {
        struct BalanceOfNumber = read "balanceOf"(U256) -> U256;
    }
    crate::abi_function! {
        struct TransferFrom = write "transferFrom"(Address, Address, U256) -> ();
    }
    crate::abi_function! {
        struct TransferFromWithData = write "transferFrom"(Address, Address, U256, Bytes,) -> ();
    }
    crate::abi_function! {
        struct Auction = read "auction"() -> Outputs<(U256, U256, U256, U256, Address, bool)>;
    }
    crate::abi_function! {
        struct Owner = read "owner"(FixedBytes<32>) -> Address;
    }

    #[test]
    fn rust_types_map_to_shapes() {
        assert_eq!(<(u8, Vec<bool>, [Address; 2])>::shape().canonical(), "(uint8,bool[],address[2])");
        assert_eq!(<FixedBytes<4>>::shape(), Shape::FixedBytes(4));
        assert_eq!(<FixedBytes<1>>::shape(), Shape::FixedBytes(1));
        assert_eq!(<FixedBytes<32>>::shape().canonical(), "bytes32");
        assert_eq!(i64::shape(), Shape::int(64));
        assert_eq!(Bytes::shape(), Shape::Bytes);
        assert_eq!(<Vec<u8>>::shape().canonical(), "uint8[]");
    }

    #[test]
    fn values_fit_their_own_shapes() {
        let value = (7u8, vec![true, false], [Address::ZERO, address(1)]).into_value();
        assert_eq!(value.conforms_to(&<(u8, Vec<bool>, [Address; 2])>::shape()), Ok(()));

        assert_eq!(i8::MIN.into_value().conforms_to(&i8::shape()), Ok(()));
        assert_eq!(u128::MAX.into_value().conforms_to(&u128::shape()), Ok(()));
        assert_eq!(FixedBytes([1u8; 32]).into_value(), Value::fixed_bytes(&[1; 32]));
    }

    #[test]
    fn declarations_that_agree_verify() {
        let abi = wagmi_mint_example_abi();
        let sig = verify::<BalanceOf>(&abi).unwrap();
        assert_eq!(sig.canonical(), "balanceOf(address)");
        assert!(verify::<Mint>(&abi).is_ok());

        assert!(verify::<Auction>(&nouns_auction_house_abi()).is_ok());
        assert!(verify::<Owner>(&ens_registry_abi()).is_ok());

        let abi = overloaded_transfer_abi();
        assert_eq!(verify::<TransferFrom>(&abi).unwrap().inputs.len(), 3);
        assert_eq!(verify::<TransferFromWithData>(&abi).unwrap().inputs.len(), 4);
    }

    #[test]
    fn declarations_that_disagree_are_rejected() {
        let abi = wagmi_mint_example_abi();

        assert!(matches!(verify::<MintAsRead>(&abi), Err(Error::WrongCallKind { .. })));
        assert_eq!(
            verify::<NameAsNumber>(&abi),
            Err(Error::DeclarationMismatch {
                name: "name()".to_owned(),
                declared: "uint256".to_owned(),
                resolved: "string".to_owned(),
            })
        );
        assert_eq!(
            verify::<BalanceOfNumber>(&abi),
            Err(Error::MemberNotFound {
                name: "balanceOf(uint256)".to_owned(),
                kind: MemberKind::Function
            })
        );
    }

    #[test]
    fn typed_and_runtime_paths_agree() {
        let desc: InterfaceDescription = overloaded_transfer_abi().into();
        let args = (address(1), address(2), U256::new(5));

        let typed_call = prepare::<TransferFrom>(&desc, args).unwrap();
        let values = args.into_values();
        let runtime_call = prepare_call(&desc, "transferFrom", CallKind::Write, Some(&values[..])).unwrap();
        assert_eq!(typed_call, runtime_call);
    }

    #[test]
    fn widened_outputs_are_narrowed_to_the_declaration() {
        let desc = InterfaceDescription::from_json_widened(
            r#"[{ "name": "balanceOf", "inputs": [{ "name": "owner" }] }]"#,
        )
        .unwrap();

        let call = prepare::<BalanceOf>(&desc, (address(1),)).unwrap();
        assert_eq!(call.output, ResultShape::Single(Shape::uint(256)));
        assert_eq!(call.signature, None);
    }
}

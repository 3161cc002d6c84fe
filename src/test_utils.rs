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

//! Interface descriptions shared by the tests.

use crate::abi::Abi;
use crate::value::Address;
use serde_json::json;

/// An address made of one repeated byte.
pub fn address(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn abi(value: serde_json::Value) -> Abi {
    Abi::from_value(value).expect("test ABI should deserialize")
}

/// An ERC-721 style contract with a free `mint()`.
pub fn wagmi_mint_example_abi() -> Abi {
    abi(json!([
        { "type": "constructor", "stateMutability": "nonpayable", "inputs": [] },
        {
            "type": "event", "name": "Approval", "anonymous": false,
            "inputs": [
                { "indexed": true, "name": "owner", "type": "address" },
                { "indexed": true, "name": "approved", "type": "address" },
                { "indexed": true, "name": "tokenId", "type": "uint256" }
            ]
        },
        {
            "type": "event", "name": "ApprovalForAll", "anonymous": false,
            "inputs": [
                { "indexed": true, "name": "owner", "type": "address" },
                { "indexed": true, "name": "operator", "type": "address" },
                { "indexed": false, "name": "approved", "type": "bool" }
            ]
        },
        {
            "type": "event", "name": "Transfer", "anonymous": false,
            "inputs": [
                { "indexed": true, "name": "from", "type": "address" },
                { "indexed": true, "name": "to", "type": "address" },
                { "indexed": true, "name": "tokenId", "type": "uint256" }
            ]
        },
        {
            "type": "function", "name": "approve", "stateMutability": "nonpayable",
            "inputs": [{ "name": "to", "type": "address" }, { "name": "tokenId", "type": "uint256" }],
            "outputs": []
        },
        {
            "type": "function", "name": "balanceOf", "stateMutability": "view",
            "inputs": [{ "name": "owner", "type": "address" }],
            "outputs": [{ "name": "", "type": "uint256" }]
        },
        {
            "type": "function", "name": "getApproved", "stateMutability": "view",
            "inputs": [{ "name": "tokenId", "type": "uint256" }],
            "outputs": [{ "name": "", "type": "address" }]
        },
        {
            "type": "function", "name": "isApprovedForAll", "stateMutability": "view",
            "inputs": [{ "name": "owner", "type": "address" }, { "name": "operator", "type": "address" }],
            "outputs": [{ "name": "", "type": "bool" }]
        },
        { "type": "function", "name": "mint", "stateMutability": "nonpayable", "inputs": [], "outputs": [] },
        {
            "type": "function", "name": "name", "stateMutability": "view",
            "inputs": [],
            "outputs": [{ "name": "", "type": "string" }]
        },
        {
            "type": "function", "name": "ownerOf", "stateMutability": "view",
            "inputs": [{ "name": "tokenId", "type": "uint256" }],
            "outputs": [{ "name": "", "type": "address" }]
        },
        {
            "type": "function", "name": "safeTransferFrom", "stateMutability": "nonpayable",
            "inputs": [
                { "name": "from", "type": "address" },
                { "name": "to", "type": "address" },
                { "name": "tokenId", "type": "uint256" }
            ],
            "outputs": []
        },
        {
            "type": "function", "name": "safeTransferFrom", "stateMutability": "nonpayable",
            "inputs": [
                { "name": "from", "type": "address" },
                { "name": "to", "type": "address" },
                { "name": "tokenId", "type": "uint256" },
                { "name": "_data", "type": "bytes" }
            ],
            "outputs": []
        },
        {
            "type": "function", "name": "setApprovalForAll", "stateMutability": "nonpayable",
            "inputs": [{ "name": "operator", "type": "address" }, { "name": "approved", "type": "bool" }],
            "outputs": []
        },
        {
            "type": "function", "name": "supportsInterface", "stateMutability": "view",
            "inputs": [{ "name": "interfaceId", "type": "bytes4" }],
            "outputs": [{ "name": "", "type": "bool" }]
        },
        {
            "type": "function", "name": "symbol", "stateMutability": "view",
            "inputs": [],
            "outputs": [{ "name": "", "type": "string" }]
        },
        {
            "type": "function", "name": "tokenURI", "stateMutability": "pure",
            "inputs": [{ "name": "tokenId", "type": "uint256" }],
            "outputs": [{ "name": "", "type": "string" }]
        },
        {
            "type": "function", "name": "totalSupply", "stateMutability": "view",
            "inputs": [],
            "outputs": [{ "name": "", "type": "uint256" }]
        },
        {
            "type": "function", "name": "transferFrom", "stateMutability": "nonpayable",
            "inputs": [
                { "name": "from", "type": "address" },
                { "name": "to", "type": "address" },
                { "name": "tokenId", "type": "uint256" }
            ],
            "outputs": []
        }
    ]))
}

/// A contract with two `transferFrom` overloads.
pub fn overloaded_transfer_abi() -> Abi {
    abi(json!([
        {
            "type": "function", "name": "transferFrom", "stateMutability": "nonpayable",
            "inputs": [
                { "name": "from", "type": "address" },
                { "name": "to", "type": "address" },
                { "name": "tokenId", "type": "uint256" }
            ],
            "outputs": []
        },
        {
            "type": "function", "name": "transferFrom", "stateMutability": "nonpayable",
            "inputs": [
                { "name": "from", "type": "address" },
                { "name": "to", "type": "address" },
                { "name": "tokenId", "type": "uint256" },
                { "name": "data", "type": "bytes" }
            ],
            "outputs": []
        }
    ]))
}

/// Functions taking tuples, arrays of tuples and tuples containing arrays of tuples.
pub fn nested_tuple_array_abi() -> Abi {
    abi(json!([
        {
            "type": "function", "name": "f", "stateMutability": "nonpayable",
            "inputs": [
                {
                    "name": "s", "type": "tuple", "internalType": "struct Contract.S",
                    "components": [
                        { "name": "a", "type": "uint8" },
                        { "name": "b", "type": "uint8[]" },
                        {
                            "name": "c", "type": "tuple[]", "internalType": "struct Contract.T[]",
                            "components": [{ "name": "x", "type": "uint8" }, { "name": "y", "type": "uint8" }]
                        }
                    ]
                },
                {
                    "name": "t", "type": "tuple", "internalType": "struct Contract.T",
                    "components": [{ "name": "x", "type": "uint256" }, { "name": "y", "type": "uint256" }]
                },
                { "name": "a", "type": "uint256" }
            ],
            "outputs": []
        },
        {
            "type": "function", "name": "v", "stateMutability": "view",
            "inputs": [
                {
                    "name": "", "type": "tuple[]", "internalType": "struct Contract.S[]",
                    "components": [{ "name": "a", "type": "uint256" }, { "name": "b", "type": "uint256[]" }]
                },
                {
                    "name": "", "type": "tuple", "internalType": "struct Contract.T",
                    "components": [{ "name": "x", "type": "uint256" }, { "name": "y", "type": "uint256" }]
                },
                { "name": "", "type": "uint256" }
            ],
            "outputs": []
        }
    ]))
}

fn writing_edition_components() -> serde_json::Value {
    json!([
        { "name": "name", "type": "string" },
        { "name": "symbol", "type": "string" },
        { "name": "description", "type": "string" },
        { "name": "imageURI", "type": "string" },
        { "name": "contentURI", "type": "string" },
        { "name": "price", "type": "uint256" },
        { "name": "limit", "type": "uint256" },
        { "name": "fundingRecipient", "type": "address" },
        { "name": "renderer", "type": "address" },
        { "name": "nonce", "type": "uint256" },
        { "name": "fee", "type": "uint16" }
    ])
}

/// A factory taking a struct argument, with a single non-indexed event.
pub fn writing_editions_factory_abi() -> Abi {
    abi(json!([
        {
            "type": "event", "name": "FactoryGuardSet", "anonymous": false,
            "inputs": [{ "indexed": false, "name": "guard", "type": "bool" }]
        },
        {
            "type": "function", "name": "create", "stateMutability": "payable",
            "inputs": [{
                "name": "edition", "type": "tuple",
                "internalType": "struct IWritingEditions.WritingEdition",
                "components": writing_edition_components()
            }],
            "outputs": [{ "name": "clone", "type": "address" }]
        },
        {
            "type": "function", "name": "getSalt", "stateMutability": "view",
            "inputs": [
                { "name": "owner", "type": "address" },
                {
                    "name": "edition", "type": "tuple",
                    "internalType": "struct IWritingEditions.WritingEdition",
                    "components": writing_edition_components()
                }
            ],
            "outputs": [{ "name": "", "type": "bytes32" }]
        },
        {
            "type": "function", "name": "predictDeterministicAddress", "stateMutability": "view",
            "inputs": [
                { "name": "implementation_", "type": "address" },
                { "name": "salt", "type": "bytes32" }
            ],
            "outputs": [{ "name": "", "type": "address" }]
        }
    ]))
}

/// An auction with a multi-output view.
pub fn nouns_auction_house_abi() -> Abi {
    abi(json!([
        {
            "type": "function", "name": "auction", "stateMutability": "view",
            "inputs": [],
            "outputs": [
                { "name": "nounId", "type": "uint256" },
                { "name": "amount", "type": "uint256" },
                { "name": "startTime", "type": "uint256" },
                { "name": "endTime", "type": "uint256" },
                { "name": "bidder", "type": "address" },
                { "name": "settled", "type": "bool" }
            ]
        },
        {
            "type": "function", "name": "createBid", "stateMutability": "payable",
            "inputs": [{ "name": "nounId", "type": "uint256" }],
            "outputs": []
        },
        { "type": "function", "name": "pause", "stateMutability": "nonpayable", "inputs": [], "outputs": [] }
    ]))
}

/// A name registry with `bytes32` node identifiers.
pub fn ens_registry_abi() -> Abi {
    abi(json!([
        {
            "type": "function", "name": "owner", "stateMutability": "view",
            "inputs": [{ "name": "node", "type": "bytes32" }],
            "outputs": [{ "name": "", "type": "address" }]
        },
        {
            "type": "function", "name": "setSubnodeOwner", "stateMutability": "nonpayable",
            "inputs": [
                { "name": "node", "type": "bytes32" },
                { "name": "label", "type": "bytes32" },
                { "name": "owner", "type": "address" }
            ],
            "outputs": [{ "name": "", "type": "bytes32" }]
        }
    ]))
}

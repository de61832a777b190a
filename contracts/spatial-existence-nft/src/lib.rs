//! The Spatial Existence NFT smart contract, built on the Concordium Token
//! Standard CIS2.
//!
//! # Description
//! The collection consists of exactly four tokens, identified by the IDs `1`
//! to `4` in the order they are minted. Anybody can mint one token by paying
//! the mint price, but every address can mint only once. The owner of a
//! token can additionally claim it once by paying the claim price.
//!
//! Every token shows one of three artwork variants. The variant is selected
//! by the current phase, which advances every `phase_duration` since the
//! contract was initialized and wraps around after the third phase. The
//! metadata URL of a token is built from the base URI, the token ID and the
//! phase suffix (`a`, `b` or `c`), e.g. `ipfs://<cid>/3b.json`.
//!
//! Only the contract owner, the account that initialized the instance, can
//! update the mint and claim prices and withdraw the collected CCD.
//!
//! Note: The word 'address' refers to either an account address or a
//! contract address.
//!
//! As follows from the CIS2 specification, the contract has a `transfer`
//! function for transferring a token from one address to another address.
//! An address can enable and disable one or more addresses as operators.
//! An operator of some address is allowed to transfer any tokens owned by
//! this address.

#![cfg_attr(not(feature = "std"), no_std)]
use crate::{constants::*, events::*, helper::*, phase::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod contract;
mod events;
mod helper;
mod impls;
mod phase;
mod structs;

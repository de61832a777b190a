//! It exposes the errors, event tags and token types shared by the
//! Spatial Existence contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{constants::*, errors::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod errors;
mod types;

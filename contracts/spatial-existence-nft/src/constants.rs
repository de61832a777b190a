use super::*;

/// Number of tokens in the collection.
pub const TOTAL_SUPPLY: u32 = 4;

/// Number of artwork phases a token cycles through.
pub const PHASE_COUNT: u64 = 3;

/// Mint price right after initialization, 0.15 CCD.
pub const DEFAULT_MINT_PRICE: Amount = Amount { micro_ccd: 150_000 };

/// Claim price right after initialization, 0.5 CCD.
pub const DEFAULT_CLAIM_PRICE: Amount = Amount { micro_ccd: 500_000 };

/// Phase length in days used when `InitParams::phase_duration` is not set:
/// four 30-day months.
pub const DEFAULT_PHASE_DURATION_DAYS: u64 = 4 * 30;

/// File extension of every metadata document.
pub const METADATA_EXTENSION: &str = ".json";

/// Standards supported by this contract.
pub const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];

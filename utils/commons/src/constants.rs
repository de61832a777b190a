// CIS-2 reserves the tags from `u8::MAX` down to `u8::MAX - 4`.

/// Tag for the Custom Token Claimed event.
pub const TOKEN_CLAIMED_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Mint Price Updated event.
pub const MINT_PRICE_UPDATED_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Claim Price Updated event.
pub const CLAIM_PRICE_UPDATED_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Withdraw event.
pub const WITHDRAW_TAG: u8 = u8::MAX - 8;

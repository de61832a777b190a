use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Tokens are numbered from 1 in mint order. A `u32` keeps queries for ids
/// that were never minted representable.
pub type ContractTokenId = TokenIdU32;

/// Contract token amount type.
/// Every token is unique, so balances are either 0 or 1.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;

/// Parameter type for the CIS-2 function `tokenMetadata` specialized to the
/// subset of TokenIDs used by this contract.
pub type ContractTokenMetadataQueryParams = TokenMetadataQueryParams<ContractTokenId>;

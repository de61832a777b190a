use super::*;

/// The parameter type for the contract function `init`.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Prefix of every metadata URL, e.g. `ipfs://<cid>/`.
    pub base_uri: String,
    /// Length of one phase. Four 30-day months if not set.
    pub phase_duration: Option<Duration>,
}

/// Lifecycle data of a single minted token.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TokenData {
    /// Current owner of the token.
    pub owner: Address,
    /// Whether the token was claimed.
    pub claimed: bool,
}

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account that initialized the contract. Sets prices and withdraws.
    pub owner: AccountAddress,
    /// Prefix of every metadata URL.
    pub base_uri: String,
    /// Slot time of the initialization.
    pub deployed_at: Timestamp,
    /// Length of one phase.
    pub phase_duration: Duration,
    /// Price of a mint.
    pub mint_price: Amount,
    /// Price of a claim.
    pub claim_price: Amount,
    /// CCD collected from mints and claims and not yet withdrawn.
    pub balance: Amount,
    /// Number of minted tokens, which is also the last assigned token ID.
    pub minted: u32,
    /// Data of every minted token.
    pub tokens: StateMap<ContractTokenId, TokenData, S>,
    /// Addresses that have minted. Transferring a token away keeps the
    /// address here.
    pub minters: StateSet<Address, S>,
    /// Operators for each address.
    pub operators: StateMap<Address, StateSet<Address, S>, S>,
    /// Implementors.
    pub implementors: StateMap<StandardIdentifierOwned, Vec<ContractAddress>, S>,
}

/// Summary of the collection returned by `view`.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewState {
    pub owner: AccountAddress,
    pub base_uri: String,
    pub deployed_at: Timestamp,
    pub phase_duration: Duration,
    pub mint_price: Amount,
    pub claim_price: Amount,
    pub balance: Amount,
    pub minted: u32,
    pub total_supply: u32,
    /// Phase at the slot time of the query.
    pub current_phase: Phase,
}

/// The parameter type for the contract function `setImplementors`.
/// Takes a standard identifier and list of contract addresses providing
/// implementations of this standard.
#[derive(Debug, Serialize, SchemaType)]
pub struct SetImplementorsParams {
    /// The identifier for the standard.
    pub id: StandardIdentifierOwned,
    /// The addresses of the implementors of the standard.
    pub implementors: Vec<ContractAddress>,
}

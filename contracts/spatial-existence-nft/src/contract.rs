use super::*;

/// Initialize the collection. The sender becomes the contract owner and the
/// slot time of the initialization starts the first phase.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The phase duration is zero.
#[init(contract = "SpatialExistenceNFT", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;

    // Construct the initial contract state.
    let state = State::new(
        state_builder,
        params,
        ctx.init_origin(),
        ctx.metadata().slot_time(),
    )?;

    Ok(state)
}

/// Mint the next token of the collection to the sender, paying the mint price.
/// Logs a `Mint` and a `TokenMetadata` event and returns the new token ID.
///
/// It rejects if:
/// - The attached amount is below the mint price.
/// - The sender has minted before.
/// - All tokens are minted.
/// - Fails to log Mint event.
/// - Fails to log TokenMetadata event.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "mint",
    return_value = "ContractTokenId",
    mutable,
    enable_logger,
    payable
)]
fn mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<ContractTokenId> {
    let sender = ctx.sender();
    let state = host.state_mut();

    let token_id = state.mint(sender, amount)?;
    let url = state.token_uri(&token_id, ctx.metadata().slot_time())?;

    // Event for minted NFT.
    logger.log(&Cis2Event::Mint(MintEvent {
        token_id: token_id.clone(),
        amount: ContractTokenAmount::from(1),
        owner: sender,
    }))?;

    // Metadata URL for the NFT.
    logger.log(&token_metadata_event(token_id.clone(), url))?;

    Ok(token_id)
}

/// Claim a token, paying the claim price. Only the current owner of the token
/// can claim it, and only once. Logs a `TokenClaimed` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
/// - The sender is not the token owner.
/// - The attached amount is below the claim price.
/// - The token is claimed already.
/// - Fails to log TokenClaimed event.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "claim",
    parameter = "ContractTokenId",
    mutable,
    enable_logger,
    payable
)]
fn claim<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    let event = host.state_mut().claim(&ctx.sender(), &token_id, amount)?;

    logger.log(&CustomEvent::TokenClaimed(event))?;

    Ok(())
}

/// Phase active at the current slot time: `0`, `1` or `2`.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "currentPhase",
    return_value = "Phase"
)]
fn current_phase<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Phase> {
    Ok(host.state().current_phase(ctx.metadata().slot_time()))
}

/// Metadata URL of a token at the current slot time.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The token does not exist.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "tokenURI",
    parameter = "ContractTokenId",
    return_value = "String"
)]
fn token_uri<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    // Parse the parameter.
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    let url = host
        .state()
        .token_uri(&token_id, ctx.metadata().slot_time())?;

    Ok(url)
}

/// Update the mint price. Logs a `MintPriceUpdated` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender is not the contract owner.
/// - Fails to log MintPriceUpdated event.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "setMintPrice",
    parameter = "Amount",
    mutable,
    enable_logger
)]
fn set_mint_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let price: Amount = ctx.parameter_cursor().get()?;

    let event = host.state_mut().set_mint_price(&ctx.sender(), price)?;

    logger.log(&CustomEvent::MintPriceUpdated(event))?;

    Ok(())
}

/// Update the claim price. Logs a `ClaimPriceUpdated` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The sender is not the contract owner.
/// - Fails to log ClaimPriceUpdated event.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "setClaimPrice",
    parameter = "Amount",
    mutable,
    enable_logger
)]
fn set_claim_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let price: Amount = ctx.parameter_cursor().get()?;

    let event = host.state_mut().set_claim_price(&ctx.sender(), price)?;

    logger.log(&CustomEvent::ClaimPriceUpdated(event))?;

    Ok(())
}

/// Send every collected CCD to the contract owner. Logs a `Withdraw` event.
///
/// It rejects if:
/// - The sender is not the contract owner.
/// - Fails to log Withdraw event.
/// - The transfer to the owner fails.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "withdraw",
    mutable,
    enable_logger
)]
fn withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let event = host.state_mut().withdraw(&ctx.sender())?;
    let (owner, amount) = (event.owner, event.amount);

    logger.log(&CustomEvent::Withdraw(event))?;

    if amount > Amount::zero() {
        host.invoke_transfer(&owner, amount)?;
    }

    Ok(())
}

/// View the collection summary.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "view",
    return_value = "ViewState"
)]
fn view<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewState> {
    Ok(host.state().view(ctx.metadata().slot_time()))
}

/// Check whether an address has minted.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "hasMinted",
    parameter = "Address",
    return_value = "bool"
)]
fn has_minted<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let address: Address = ctx.parameter_cursor().get()?;
    Ok(host.state().has_minted(&address))
}

/// Current owner of a token.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    Ok(host.state().owner_of(&token_id)?)
}

/// Check whether a token was claimed.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "isClaimed",
    parameter = "ContractTokenId",
    return_value = "bool"
)]
fn is_claimed<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    Ok(host.state().is_claimed(&token_id)?)
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer in the list.
/// Produces an action which sends a message to each contract which are the
/// receiver of a transfer.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is not the owner of the token, or an operator for the
///       `from` address.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the messages sent to contracts receiving a transfer choose to
///   reject.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    for transfer in transfers {
        let state = host.state_mut();
        // Authenticate the sender for this transfer
        ensure!(
            transfer.from == sender || state.is_operator(&transfer.from, &sender),
            ContractError::Unauthorized
        );

        let to_address = transfer.to.address();
        // Update the contract state
        state.transfer(&transfer)?;

        // Log transfer event
        logger.log(&Cis2Event::Transfer(TransferEvent {
            token_id: transfer.token_id.clone(),
            amount: transfer.amount,
            from: transfer.from,
            to: to_address,
        }))?;

        // If the receiver is a contract, send it a message.
        if let Receiver::Contract(address, entrypoint_name) = transfer.to {
            let parameter = OnReceivingCis2Params {
                token_id: transfer.token_id,
                amount: transfer.amount,
                from: transfer.from,
                data: transfer.data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                entrypoint_name.as_entrypoint_name(),
                Amount::zero(),
            )?;
        }
    }
    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    mutable,
    enable_logger
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        // Update the operator in the state.
        match param.update {
            OperatorUpdate::Add => state.add_operator(&sender, &param.operator, state_builder),
            OperatorUpdate::Remove => state.remove_operator(&sender, &param.operator),
        }

        // Log the appropriate event
        logger.log(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: sender,
                    operator: param.operator,
                    update: param.update,
                },
            ),
        )?;
    }

    Ok(())
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    // Parse the parameter.
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for address being an operator of owner.
        let is_operator = state.is_operator(&query.owner, &query.address);
        response.push(is_operator);
    }

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    // Parse the parameter.
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for balance.
        let amount = state.balance(&query.token_id, &query.address)?;
        response.push(amount);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// Get the token metadata URLs of the given token IDs at the current slot
/// time.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    // Parse the parameter.
    let params: ContractTokenMetadataQueryParams = ctx.parameter_cursor().get()?;
    let now = ctx.metadata().slot_time();
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for token_id in params.queries {
        let url = state
            .token_uri(&token_id, now)
            .map_err(|_| ContractError::InvalidTokenId)?;
        response.push(MetadataUrl { url, hash: None });
    }

    Ok(TokenMetadataQueryResponse::from(response))
}

/// Get the supported standards or addresses for an implementation given list
/// of standard identifiers.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    // Parse the parameter.
    let params: SupportsQueryParams = ctx.parameter_cursor().get()?;

    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    for std_id in params.queries {
        if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
            response.push(SupportResult::Support);
        } else {
            response.push(host.state().get_implementors(&std_id));
        }
    }

    Ok(SupportsQueryResponse::from(response))
}

/// Set the addresses for an implementation given a standard identifier and a
/// list of contract addresses.
///
/// It rejects if:
/// - Sender is not the owner of the contract instance.
/// - It fails to parse the parameter.
#[receive(
    contract = "SpatialExistenceNFT",
    name = "setImplementors",
    parameter = "SetImplementorsParams",
    mutable
)]
fn set_implementors<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let state = host.state_mut();
    ensure!(
        state.is_owner(&ctx.sender()),
        ContractError::Unauthorized
    );

    // Parse the parameter.
    let params: SetImplementorsParams = ctx.parameter_cursor().get()?;
    state.set_implementors(params.id, params.implementors);

    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([0u8; 32]);
    const OWNER_ADDR: Address = Address::Account(OWNER);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);
    const ACCOUNT_2: AccountAddress = AccountAddress([2u8; 32]);
    const ADDRESS_2: Address = Address::Account(ACCOUNT_2);
    const ADDRESS_3: Address = Address::Account(AccountAddress([3u8; 32]));

    const BASE_URI: &str = "ipfs://QmSpatialExistence/";

    fn deployed_at() -> Timestamp {
        Timestamp::from_timestamp_millis(1_700_000_000_000)
    }

    /// Slot time after `phases` full phases of the default duration.
    fn phase_time(phases: u64) -> Timestamp {
        deployed_at()
            .checked_add(Duration::from_days(DEFAULT_PHASE_DURATION_DAYS * phases))
            .expect_report("Timestamp overflow")
    }

    /// Test helper function which initializes the contract with `OWNER` as the
    /// owner and the default prices.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let params = InitParams {
            base_uri: String::from(BASE_URI),
            phase_duration: None,
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(OWNER)
            .set_parameter(&bytes)
            .set_metadata_slot_time(deployed_at());
        let mut state_builder = TestStateBuilder::new();

        // Call the init method.
        let state = init(&ctx, &mut state_builder)
            .expect_report("Failed during init_SpatialExistenceNFT");

        TestHost::new(state, state_builder)
    }

    fn call_mint(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        amount: Amount,
    ) -> ContractResult<ContractTokenId> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_metadata_slot_time(deployed_at());
        let mut logger = TestLogger::init();
        mint(&ctx, host, amount, &mut logger)
    }

    fn call_claim(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        token_id: ContractTokenId,
        amount: Amount,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&token_id);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        claim(&ctx, host, amount, &mut logger)
    }

    fn call_token_uri(
        host: &TestHost<State<TestStateApi>>,
        token_id: ContractTokenId,
        now: Timestamp,
    ) -> ContractResult<String> {
        let bytes = to_bytes(&token_id);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes).set_metadata_slot_time(now);
        token_uri(&ctx, host)
    }

    #[concordium_test]
    fn test_init() {
        let host = default_host();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_metadata_slot_time(deployed_at());
        let summary = view(&ctx, &host).expect_report("View should succeed");

        claim_eq!(
            summary,
            ViewState {
                owner: OWNER,
                base_uri: String::from(BASE_URI),
                deployed_at: deployed_at(),
                phase_duration: Duration::from_days(120),
                mint_price: Amount::from_micro_ccd(150_000),
                claim_price: Amount::from_micro_ccd(500_000),
                balance: Amount::zero(),
                minted: 0,
                total_supply: 4,
                current_phase: Phase::A,
            }
        );
    }

    #[concordium_test]
    fn test_init_rejects_zero_phase_duration() {
        let mut ctx = TestInitContext::empty();
        let params = InitParams {
            base_uri: String::from(BASE_URI),
            phase_duration: Some(Duration::from_millis(0)),
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(OWNER)
            .set_parameter(&bytes)
            .set_metadata_slot_time(deployed_at());
        let mut state_builder = TestStateBuilder::new();

        let result = init(&ctx, &mut state_builder);

        claim!(result.is_err(), "Zero phase duration should be rejected");
    }

    /// Test minting, ensuring the new token is owned by the sender and the
    /// appropriate events are logged.
    #[concordium_test]
    fn test_mint() {
        let mut host = default_host();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1)
            .set_metadata_slot_time(phase_time(1));
        let mut logger = TestLogger::init();

        let result = mint(&ctx, &mut host, DEFAULT_MINT_PRICE, &mut logger);

        claim_eq!(result, Ok(TokenIdU32(1)));

        // Check the state
        let state = host.state();
        claim_eq!(state.minted, 1);
        claim_eq!(state.balance, DEFAULT_MINT_PRICE);
        claim!(state.has_minted(&ADDRESS_1), "Sender should be recorded as minter");
        claim_eq!(
            state.balance(&TokenIdU32(1), &ADDRESS_1),
            Ok(ContractTokenAmount::from(1))
        );

        // Check the logs
        claim_eq!(logger.logs.len(), 2, "Two events should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Mint(MintEvent {
                owner: ADDRESS_1,
                token_id: TokenIdU32(1),
                amount: ContractTokenAmount::from(1),
            }))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&token_metadata_event(
                TokenIdU32(1),
                String::from("ipfs://QmSpatialExistence/1b.json")
            ))
        );
    }

    #[concordium_test]
    fn test_mint_once_per_address() {
        let mut host = default_host();

        claim_eq!(call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE), Ok(TokenIdU32(1)));
        claim_eq!(
            call_mint(&mut host, ADDRESS_1, Amount::from_ccd(100)),
            Err(CustomContractError::AlreadyMinted.into())
        );
        claim_eq!(host.state().minted, 1);
    }

    #[concordium_test]
    fn test_mint_supply_exhausted() {
        let mut host = default_host();

        for i in 1..=4u8 {
            let sender = Address::Account(AccountAddress([10 + i; 32]));
            claim_eq!(
                call_mint(&mut host, sender, DEFAULT_MINT_PRICE),
                Ok(TokenIdU32(i as u32))
            );
        }
        claim_eq!(host.state().minted, 4);

        claim_eq!(
            call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE),
            Err(CustomContractError::SupplyExhausted.into())
        );
        claim_eq!(host.state().minted, 4);
    }

    #[concordium_test]
    fn test_mint_insufficient_funds() {
        let mut host = default_host();

        claim_eq!(
            call_mint(&mut host, ADDRESS_1, Amount::from_micro_ccd(149_999)),
            Err(CustomContractError::InsufficientFunds.into())
        );
        claim!(!host.state().has_minted(&ADDRESS_1), "Failed mint leaves no record");
    }

    #[concordium_test]
    fn test_claim() {
        let mut host = default_host();
        let token_id = call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        let bytes = to_bytes(&token_id);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = claim(&ctx, &mut host, DEFAULT_CLAIM_PRICE, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().is_claimed(&token_id), Ok(true));
        claim_eq!(
            host.state().balance,
            DEFAULT_MINT_PRICE + DEFAULT_CLAIM_PRICE
        );
        claim_eq!(logger.logs.len(), 1, "One event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::TokenClaimed(TokenClaimedEvent {
                owner: ADDRESS_1,
                token_id,
            }))
        );
    }

    #[concordium_test]
    fn test_claim_rejections() {
        let mut host = default_host();
        let token_id = call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        claim_eq!(
            call_claim(&mut host, ADDRESS_1, TokenIdU32(999), DEFAULT_CLAIM_PRICE),
            Err(CustomContractError::TokenNotFound.into())
        );
        claim_eq!(
            call_claim(&mut host, ADDRESS_2, token_id.clone(), Amount::zero()),
            Err(CustomContractError::NotTokenOwner.into())
        );
        claim_eq!(
            call_claim(&mut host, ADDRESS_1, token_id.clone(), DEFAULT_MINT_PRICE),
            Err(CustomContractError::InsufficientFunds.into())
        );
        claim_eq!(
            call_claim(&mut host, ADDRESS_1, token_id.clone(), DEFAULT_CLAIM_PRICE),
            Ok(())
        );
        claim_eq!(
            call_claim(&mut host, ADDRESS_1, token_id, DEFAULT_CLAIM_PRICE),
            Err(CustomContractError::AlreadyClaimed.into())
        );
    }

    #[concordium_test]
    fn test_phase_rotation() {
        let host = default_host();

        for (phases, expected) in [(0, Phase::A), (1, Phase::B), (2, Phase::C), (3, Phase::A)] {
            let mut ctx = TestReceiveContext::empty();
            ctx.set_metadata_slot_time(phase_time(phases));
            claim_eq!(current_phase(&ctx, &host), Ok(expected));
        }

        // One millisecond before the first boundary is still the first phase.
        let mut ctx = TestReceiveContext::empty();
        let before_boundary = Timestamp::from_timestamp_millis(
            phase_time(1).timestamp_millis() - 1,
        );
        ctx.set_metadata_slot_time(before_boundary);
        claim_eq!(current_phase(&ctx, &host), Ok(Phase::A));
    }

    #[concordium_test]
    fn test_token_uri_rotates_suffix() {
        let mut host = default_host();
        for i in 1..=3u8 {
            let sender = Address::Account(AccountAddress([10 + i; 32]));
            call_mint(&mut host, sender, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");
        }

        claim_eq!(
            call_token_uri(&host, TokenIdU32(3), phase_time(0)),
            Ok(String::from("ipfs://QmSpatialExistence/3a.json"))
        );
        claim_eq!(
            call_token_uri(&host, TokenIdU32(3), phase_time(1)),
            Ok(String::from("ipfs://QmSpatialExistence/3b.json"))
        );
        claim_eq!(
            call_token_uri(&host, TokenIdU32(3), phase_time(2)),
            Ok(String::from("ipfs://QmSpatialExistence/3c.json"))
        );
        claim_eq!(
            call_token_uri(&host, TokenIdU32(4), phase_time(0)),
            Err(CustomContractError::TokenNotFound.into())
        );
    }

    /// `tokenURI` and the CIS2 `tokenMetadata` query agree at every instant.
    #[concordium_test]
    fn test_token_metadata_matches_token_uri() {
        let mut host = default_host();
        call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");

        let params = ContractTokenMetadataQueryParams {
            queries: vec![TokenIdU32(1)],
        };
        let bytes = to_bytes(&params);
        for phases in 0..4 {
            let mut ctx = TestReceiveContext::empty();
            ctx.set_parameter(&bytes)
                .set_metadata_slot_time(phase_time(phases));

            let url = call_token_uri(&host, TokenIdU32(1), phase_time(phases))
                .expect_report("Token should exist");
            let response = token_metadata(&ctx, &host).expect_report("Query should succeed");

            claim_eq!(
                to_bytes(&response),
                to_bytes(&TokenMetadataQueryResponse::from(vec![MetadataUrl {
                    url,
                    hash: None
                }]))
            );
        }

        let params = ContractTokenMetadataQueryParams {
            queries: vec![TokenIdU32(2)],
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes)
            .set_metadata_slot_time(deployed_at());
        let result = token_metadata(&ctx, &host);
        claim_eq!(result.err(), Some(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_set_prices() {
        let mut host = default_host();
        let price = Amount::from_ccd(2);
        let bytes = to_bytes(&price);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            set_mint_price(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );
        claim_eq!(
            set_claim_price(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );
        claim!(logger.logs.is_empty(), "Rejected calls log nothing");

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(OWNER_ADDR).set_parameter(&bytes);
        claim_eq!(set_mint_price(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(set_claim_price(&ctx, &mut host, &mut logger), Ok(()));

        claim_eq!(host.state().mint_price, price);
        claim_eq!(host.state().claim_price, price);
        claim_eq!(
            logger.logs,
            vec![
                to_bytes(&CustomEvent::MintPriceUpdated(PriceUpdatedEvent {
                    from: DEFAULT_MINT_PRICE,
                    to: price,
                })),
                to_bytes(&CustomEvent::ClaimPriceUpdated(PriceUpdatedEvent {
                    from: DEFAULT_CLAIM_PRICE,
                    to: price,
                })),
            ]
        );

        // The old price no longer suffices.
        claim_eq!(
            call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE),
            Err(CustomContractError::InsufficientFunds.into())
        );
    }

    #[concordium_test]
    fn test_withdraw() {
        let mut host = default_host();
        call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");
        call_mint(&mut host, ADDRESS_2, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");
        call_claim(&mut host, ADDRESS_2, TokenIdU32(2), DEFAULT_CLAIM_PRICE)
            .expect_report("Claim should succeed");

        let collected = DEFAULT_MINT_PRICE + DEFAULT_MINT_PRICE + DEFAULT_CLAIM_PRICE;
        claim_eq!(host.state().balance, collected);
        host.set_self_balance(collected);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);
        let mut logger = TestLogger::init();
        claim_eq!(
            withdraw(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(OWNER_ADDR);
        claim_eq!(withdraw(&ctx, &mut host, &mut logger), Ok(()));

        claim!(host.transfer_occurred(&OWNER, collected));
        claim_eq!(host.state().balance, Amount::zero());
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Withdraw(WithdrawEvent {
                owner: OWNER,
                amount: collected,
            }))]
        );
    }

    /// A withdraw with nothing collected logs a zero amount and sends no CCD.
    #[concordium_test]
    fn test_withdraw_empty_balance() {
        let mut host = default_host();
        call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");
        host.set_self_balance(DEFAULT_MINT_PRICE);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(OWNER_ADDR);
        let mut logger = TestLogger::init();
        claim_eq!(withdraw(&ctx, &mut host, &mut logger), Ok(()));
        claim!(host.transfer_occurred(&OWNER, DEFAULT_MINT_PRICE));

        let mut logger = TestLogger::init();
        claim_eq!(withdraw(&ctx, &mut host, &mut logger), Ok(()));
        claim!(!host.transfer_occurred(&OWNER, Amount::zero()));
        claim_eq!(host.state().balance, Amount::zero());
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Withdraw(WithdrawEvent {
                owner: OWNER,
                amount: Amount::zero(),
            }))]
        );
    }

    /// After a transfer only the new owner can claim, and the previous owner
    /// still cannot mint again.
    #[concordium_test]
    fn test_transfer_then_claim() {
        let mut host = default_host();
        let token_id = call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        let transfer = Transfer {
            token_id: token_id.clone(),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams(vec![transfer]);
        let bytes = to_bytes(&parameter);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Transfer(TransferEvent {
                from: ADDRESS_1,
                to: ADDRESS_2,
                token_id: token_id.clone(),
                amount: ContractTokenAmount::from(1),
            }))
        );

        claim_eq!(
            call_claim(&mut host, ADDRESS_1, token_id.clone(), DEFAULT_CLAIM_PRICE),
            Err(CustomContractError::NotTokenOwner.into())
        );
        claim_eq!(
            call_claim(&mut host, ADDRESS_2, token_id, DEFAULT_CLAIM_PRICE),
            Ok(())
        );
        claim_eq!(
            call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE),
            Err(CustomContractError::AlreadyMinted.into())
        );
    }

    /// Test transfer token fails, when sender is neither the owner or an
    /// operator of the owner.
    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut host = default_host();
        let token_id = call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        let transfer = Transfer {
            token_id,
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams(vec![transfer]);
        let bytes = to_bytes(&parameter);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_2).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    /// Test transfer succeeds when sender is not the owner, but is an operator
    /// of the owner.
    #[concordium_test]
    fn test_operator_transfer() {
        let mut host = default_host();
        let token_id = call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        // ADDRESS_1 makes ADDRESS_3 its operator.
        let update = UpdateOperator {
            update: OperatorUpdate::Add,
            operator: ADDRESS_3,
        };
        let bytes = to_bytes(&UpdateOperatorParams(vec![update]));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        claim_eq!(update_operator(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(
            logger.logs[0],
            to_bytes(
                &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                    UpdateOperatorEvent {
                        owner: ADDRESS_1,
                        operator: ADDRESS_3,
                        update: OperatorUpdate::Add,
                    }
                )
            )
        );

        let query = OperatorOfQuery {
            owner: ADDRESS_1,
            address: ADDRESS_3,
        };
        let bytes = to_bytes(&OperatorOfQueryParams {
            queries: vec![query],
        });
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        let response = operator_of(&ctx, &host).expect_report("Query should succeed");
        claim_eq!(
            to_bytes(&response),
            to_bytes(&OperatorOfQueryResponse::from(vec![true]))
        );

        let transfer = Transfer {
            token_id: token_id.clone(),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&TransferParams(vec![transfer]));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_3).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_2));
    }

    #[concordium_test]
    fn test_balance_of() {
        let mut host = default_host();
        call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");

        let params = ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: TokenIdU32(1),
                    address: ADDRESS_1,
                },
                BalanceOfQuery {
                    token_id: TokenIdU32(1),
                    address: ADDRESS_2,
                },
            ],
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        let response = balance_of(&ctx, &host).expect_report("Query should succeed");
        claim_eq!(
            to_bytes(&response),
            to_bytes(&ContractBalanceOfQueryResponse::from(vec![
                ContractTokenAmount::from(1),
                ContractTokenAmount::from(0)
            ]))
        );
    }

    #[concordium_test]
    fn test_supports() {
        let mut host = default_host();
        let implementor = ContractAddress {
            index: 42,
            subindex: 0,
        };

        let bytes = to_bytes(&SetImplementorsParams {
            id: StandardIdentifierOwned::new_unchecked("CIS-3".into()),
            implementors: vec![implementor],
        });
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1).set_parameter(&bytes);
        claim_eq!(
            set_implementors(&ctx, &mut host),
            Err(ContractError::Unauthorized)
        );
        ctx.set_sender(OWNER_ADDR);
        claim_eq!(set_implementors(&ctx, &mut host), Ok(()));

        let params = SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked("CIS-0".into()),
                StandardIdentifierOwned::new_unchecked("CIS-2".into()),
                StandardIdentifierOwned::new_unchecked("CIS-3".into()),
                StandardIdentifierOwned::new_unchecked("CIS-1".into()),
            ],
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        let response = supports(&ctx, &host).expect_report("Query should succeed");
        claim_eq!(
            to_bytes(&response),
            to_bytes(&SupportsQueryResponse::from(vec![
                SupportResult::Support,
                SupportResult::Support,
                SupportResult::SupportBy(vec![implementor]),
                SupportResult::NoSupport,
            ]))
        );
    }

    #[concordium_test]
    fn test_queries() {
        let mut host = default_host();
        call_mint(&mut host, ADDRESS_1, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");

        let bytes = to_bytes(&ADDRESS_1);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(has_minted(&ctx, &host), Ok(true));

        let bytes = to_bytes(&ADDRESS_2);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(has_minted(&ctx, &host), Ok(false));

        let bytes = to_bytes(&TokenIdU32(1));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(owner_of(&ctx, &host), Ok(ADDRESS_1));
        claim_eq!(is_claimed(&ctx, &host), Ok(false));

        let bytes = to_bytes(&TokenIdU32(999));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(
            owner_of(&ctx, &host),
            Err(CustomContractError::TokenNotFound.into())
        );
        claim_eq!(
            is_claimed(&ctx, &host),
            Err(CustomContractError::TokenNotFound.into())
        );
    }
}

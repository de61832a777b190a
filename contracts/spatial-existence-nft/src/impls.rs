use super::*;
use core::ops::DerefMut;

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a new state with no minted tokens and the default prices.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        params: InitParams,
        owner: AccountAddress,
        deployed_at: Timestamp,
    ) -> Result<Self, CustomContractError> {
        let phase_duration = params
            .phase_duration
            .unwrap_or_else(|| Duration::from_days(DEFAULT_PHASE_DURATION_DAYS));
        ensure!(
            phase_duration.millis() > 0,
            CustomContractError::InvalidPhaseDuration
        );

        Ok(Self {
            owner,
            base_uri: params.base_uri,
            deployed_at,
            phase_duration,
            mint_price: DEFAULT_MINT_PRICE,
            claim_price: DEFAULT_CLAIM_PRICE,
            balance: Amount::zero(),
            minted: 0,
            tokens: state_builder.new_map(),
            minters: state_builder.new_set(),
            operators: state_builder.new_map(),
            implementors: state_builder.new_map(),
        })
    }

    /// Check if `address` is the contract owner.
    pub fn is_owner(&self, address: &Address) -> bool {
        matches!(address, Address::Account(account) if *account == self.owner)
    }

    /// Mint the next token to `minter`, paying `amount`.
    ///
    /// Results in an error if
    /// - `amount` is below the mint price
    /// - `minter` has minted before
    /// - all tokens are minted
    pub fn mint(
        &mut self,
        minter: Address,
        amount: Amount,
    ) -> Result<ContractTokenId, CustomContractError> {
        ensure!(
            amount >= self.mint_price,
            CustomContractError::InsufficientFunds
        );
        ensure!(
            !self.minters.contains(&minter),
            CustomContractError::AlreadyMinted
        );
        ensure!(
            self.minted < TOTAL_SUPPLY,
            CustomContractError::SupplyExhausted
        );

        self.minted += 1;
        let token_id = TokenIdU32(self.minted);
        self.tokens.insert(
            token_id.clone(),
            TokenData {
                owner: minter,
                claimed: false,
            },
        );
        self.minters.insert(minter);
        self.balance += amount;

        Ok(token_id)
    }

    /// Claim a token as its current owner, paying `amount`.
    ///
    /// Results in an error if
    /// - the token was never minted
    /// - `sender` does not own the token
    /// - `amount` is below the claim price
    /// - the token is claimed already
    pub fn claim(
        &mut self,
        sender: &Address,
        token_id: &ContractTokenId,
        amount: Amount,
    ) -> Result<TokenClaimedEvent, CustomContractError> {
        let mut token = self.token(token_id)?;
        ensure!(token.owner == *sender, CustomContractError::NotTokenOwner);
        ensure!(
            amount >= self.claim_price,
            CustomContractError::InsufficientFunds
        );
        ensure!(!token.claimed, CustomContractError::AlreadyClaimed);

        token.claimed = true;
        self.tokens.insert(token_id.clone(), token);
        self.balance += amount;

        Ok(TokenClaimedEvent {
            owner: *sender,
            token_id: token_id.clone(),
        })
    }

    /// Phase active at `now`.
    pub fn current_phase(&self, now: Timestamp) -> Phase {
        Phase::at(self.deployed_at, self.phase_duration, now)
    }

    /// Metadata URL of a minted token at `now`.
    pub fn token_uri(
        &self,
        token_id: &ContractTokenId,
        now: Timestamp,
    ) -> Result<String, CustomContractError> {
        self.token(token_id)?;
        Ok(build_token_metadata_url(
            &self.base_uri,
            token_id,
            self.current_phase(now),
        ))
    }

    /// Replace the mint price. Returns the event describing the change.
    pub fn set_mint_price(
        &mut self,
        sender: &Address,
        price: Amount,
    ) -> Result<PriceUpdatedEvent, CustomContractError> {
        ensure!(self.is_owner(sender), CustomContractError::Unauthorized);
        let from = self.mint_price;
        self.mint_price = price;
        Ok(PriceUpdatedEvent { from, to: price })
    }

    /// Replace the claim price. Returns the event describing the change.
    pub fn set_claim_price(
        &mut self,
        sender: &Address,
        price: Amount,
    ) -> Result<PriceUpdatedEvent, CustomContractError> {
        ensure!(self.is_owner(sender), CustomContractError::Unauthorized);
        let from = self.claim_price;
        self.claim_price = price;
        Ok(PriceUpdatedEvent { from, to: price })
    }

    /// Take the whole collected balance out of the state.
    /// The caller is responsible for transferring it to the owner.
    pub fn withdraw(&mut self, sender: &Address) -> Result<WithdrawEvent, CustomContractError> {
        ensure!(self.is_owner(sender), CustomContractError::Unauthorized);
        let amount = self.balance;
        self.balance = Amount::zero();
        Ok(WithdrawEvent {
            owner: self.owner,
            amount,
        })
    }

    pub fn has_minted(&self, address: &Address) -> bool {
        self.minters.contains(address)
    }

    pub fn owner_of(&self, token_id: &ContractTokenId) -> Result<Address, CustomContractError> {
        self.token(token_id).map(|token| token.owner)
    }

    pub fn is_claimed(&self, token_id: &ContractTokenId) -> Result<bool, CustomContractError> {
        self.token(token_id).map(|token| token.claimed)
    }

    fn token(&self, token_id: &ContractTokenId) -> Result<TokenData, CustomContractError> {
        self.tokens
            .get(token_id)
            .map(|token| *token)
            .ok_or(CustomContractError::TokenNotFound)
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the state.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let token = self
            .token(token_id)
            .map_err(|_| ContractError::InvalidTokenId)?;
        let balance: u64 = if token.owner == *address { 1 } else { 0 };
        Ok(ContractTokenAmount::from(balance))
    }

    /// Check if `address` is an operator for `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }

    /// Update the state with a transfer of some token.
    /// Results in an error if the token ID does not exist in the state or if
    /// the from address does not own the token.
    pub fn transfer(
        &mut self,
        transfer: &Transfer<ContractTokenId, ContractTokenAmount>,
    ) -> ContractResult<()> {
        let mut token = self
            .token(&transfer.token_id)
            .map_err(|_| ContractError::InvalidTokenId)?;

        // A zero transfer does not modify the state.
        if transfer.amount == 0.into() {
            return Ok(());
        }

        ensure!(
            transfer.amount == 1.into() && token.owner == transfer.from,
            ContractError::InsufficientFunds
        );

        token.owner = transfer.to.address();
        self.tokens.insert(transfer.token_id.clone(), token);
        Ok(())
    }

    /// Add a new operator for the given address.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }

    /// Update the list of contracts implementing the specified standard.
    pub fn set_implementors(
        &mut self,
        id: StandardIdentifierOwned,
        contracts: Vec<ContractAddress>,
    ) {
        self.implementors.insert(id, contracts);
    }

    pub fn get_implementors(&self, id: &StandardIdentifierOwned) -> SupportResult {
        if let Some(addresses) = self.implementors.get(id) {
            SupportResult::SupportBy(addresses.to_vec())
        } else {
            SupportResult::NoSupport
        }
    }

    pub fn view(&self, now: Timestamp) -> ViewState {
        ViewState {
            owner: self.owner,
            base_uri: self.base_uri.clone(),
            deployed_at: self.deployed_at,
            phase_duration: self.phase_duration,
            mint_price: self.mint_price,
            claim_price: self.claim_price,
            balance: self.balance,
            minted: self.minted,
            total_supply: TOTAL_SUPPLY,
            current_phase: self.current_phase(now),
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([0u8; 32]);
    const OWNER_ADDR: Address = Address::Account(OWNER);
    const ALICE: Address = Address::Account(AccountAddress([1u8; 32]));
    const BOB: Address = Address::Account(AccountAddress([2u8; 32]));

    fn deployed_at() -> Timestamp {
        Timestamp::from_timestamp_millis(10_000)
    }

    fn new_state(state_builder: &mut TestStateBuilder) -> State<TestStateApi> {
        let params = InitParams {
            base_uri: String::from("ipfs://cid/"),
            phase_duration: None,
        };
        State::new(state_builder, params, OWNER, deployed_at())
            .expect_report("Failed to create state")
    }

    fn minter(i: u8) -> Address {
        Address::Account(AccountAddress([10 + i; 32]))
    }

    #[concordium_test]
    fn test_new_uses_defaults() {
        let mut state_builder = TestStateBuilder::new();
        let state = new_state(&mut state_builder);

        claim_eq!(state.mint_price, DEFAULT_MINT_PRICE);
        claim_eq!(state.claim_price, DEFAULT_CLAIM_PRICE);
        claim_eq!(state.phase_duration, Duration::from_days(120));
        claim_eq!(state.balance, Amount::zero());
        claim_eq!(state.minted, 0);
        claim!(state.is_owner(&OWNER_ADDR), "Init origin should be the owner");
        claim!(!state.is_owner(&ALICE), "Alice should not be the owner");
    }

    #[concordium_test]
    fn test_new_rejects_zero_phase_duration() {
        let mut state_builder = TestStateBuilder::new();
        let params = InitParams {
            base_uri: String::from("ipfs://cid/"),
            phase_duration: Some(Duration::from_millis(0)),
        };
        let result = State::new(&mut state_builder, params, OWNER, deployed_at());
        claim_eq!(
            result.err(),
            Some(CustomContractError::InvalidPhaseDuration)
        );
    }

    #[concordium_test]
    fn test_mint_assigns_ids_in_order_until_supply_is_exhausted() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);

        for i in 1..=TOTAL_SUPPLY {
            let token_id = state
                .mint(minter(i as u8), DEFAULT_MINT_PRICE)
                .expect_report("Mint should succeed");
            claim_eq!(token_id, TokenIdU32(i));
            claim_eq!(state.owner_of(&token_id), Ok(minter(i as u8)));
        }
        claim_eq!(state.minted, TOTAL_SUPPLY);

        claim_eq!(
            state.mint(ALICE, DEFAULT_MINT_PRICE),
            Err(CustomContractError::SupplyExhausted)
        );
        // Underpayment is reported before the exhausted supply.
        claim_eq!(
            state.mint(ALICE, Amount::zero()),
            Err(CustomContractError::InsufficientFunds)
        );
        claim_eq!(state.minted, TOTAL_SUPPLY);
    }

    #[concordium_test]
    fn test_mint_once_per_address() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);

        claim_eq!(state.mint(ALICE, DEFAULT_MINT_PRICE), Ok(TokenIdU32(1)));
        claim!(state.has_minted(&ALICE), "Alice should be recorded as minter");
        claim!(!state.has_minted(&BOB), "Bob has not minted");

        let overpaid = Amount::from_ccd(10);
        claim_eq!(
            state.mint(ALICE, overpaid),
            Err(CustomContractError::AlreadyMinted)
        );
        // Underpayment is reported before the repeated mint.
        claim_eq!(
            state.mint(ALICE, Amount::zero()),
            Err(CustomContractError::InsufficientFunds)
        );
        claim_eq!(state.minted, 1);
    }

    #[concordium_test]
    fn test_claim_checks_in_order() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);
        let token_id = state
            .mint(ALICE, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        claim_eq!(
            state.claim(&ALICE, &TokenIdU32(999), DEFAULT_CLAIM_PRICE),
            Err(CustomContractError::TokenNotFound)
        );
        // A non owner gets NotTokenOwner even when underpaying.
        claim_eq!(
            state.claim(&BOB, &token_id, Amount::zero()),
            Err(CustomContractError::NotTokenOwner)
        );
        claim_eq!(
            state.claim(&ALICE, &token_id, Amount::from_micro_ccd(499_999)),
            Err(CustomContractError::InsufficientFunds)
        );
        claim_eq!(
            state.claim(&ALICE, &token_id, DEFAULT_CLAIM_PRICE),
            Ok(TokenClaimedEvent {
                owner: ALICE,
                token_id: token_id.clone(),
            })
        );
        claim_eq!(state.is_claimed(&token_id), Ok(true));
        claim_eq!(
            state.claim(&ALICE, &token_id, DEFAULT_CLAIM_PRICE),
            Err(CustomContractError::AlreadyClaimed)
        );
        // Underpayment is reported before the repeated claim.
        claim_eq!(
            state.claim(&ALICE, &token_id, Amount::zero()),
            Err(CustomContractError::InsufficientFunds)
        );
    }

    #[concordium_test]
    fn test_balance_accumulates_payments() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);

        let paid = Amount::from_micro_ccd(200_000);
        state.mint(ALICE, DEFAULT_MINT_PRICE).expect_report("Mint should succeed");
        state.mint(BOB, paid).expect_report("Mint should succeed");
        state
            .claim(&ALICE, &TokenIdU32(1), DEFAULT_CLAIM_PRICE)
            .expect_report("Claim should succeed");

        claim_eq!(state.balance, DEFAULT_MINT_PRICE + paid + DEFAULT_CLAIM_PRICE);

        claim_eq!(
            state.withdraw(&ALICE),
            Err(CustomContractError::Unauthorized)
        );
        let event = state.withdraw(&OWNER_ADDR).expect_report("Withdraw should succeed");
        claim_eq!(event.owner, OWNER);
        claim_eq!(event.amount, DEFAULT_MINT_PRICE + paid + DEFAULT_CLAIM_PRICE);
        claim_eq!(state.balance, Amount::zero());
    }

    #[concordium_test]
    fn test_price_updates_are_owner_only() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);
        let price = Amount::from_ccd(1);

        claim_eq!(
            state.set_mint_price(&ALICE, price),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(
            state.set_claim_price(&ALICE, price),
            Err(CustomContractError::Unauthorized)
        );

        claim_eq!(
            state.set_mint_price(&OWNER_ADDR, price),
            Ok(PriceUpdatedEvent {
                from: DEFAULT_MINT_PRICE,
                to: price,
            })
        );
        claim_eq!(
            state.set_claim_price(&OWNER_ADDR, price),
            Ok(PriceUpdatedEvent {
                from: DEFAULT_CLAIM_PRICE,
                to: price,
            })
        );
        claim_eq!(
            state.mint(ALICE, DEFAULT_MINT_PRICE),
            Err(CustomContractError::InsufficientFunds)
        );
    }

    #[concordium_test]
    fn test_token_uri_follows_phase() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);
        let token_id = state
            .mint(ALICE, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        let urls = [
            "ipfs://cid/1a.json",
            "ipfs://cid/1b.json",
            "ipfs://cid/1c.json",
            "ipfs://cid/1a.json",
        ];
        for (step, expected) in urls.iter().enumerate() {
            let now = deployed_at()
                .checked_add(Duration::from_days(120 * step as u64))
                .expect_report("Timestamp overflow");
            claim_eq!(state.token_uri(&token_id, now), Ok(String::from(*expected)));
        }

        claim_eq!(
            state.token_uri(&TokenIdU32(2), deployed_at()),
            Err(CustomContractError::TokenNotFound)
        );
    }

    #[concordium_test]
    fn test_transfer_changes_owner_only() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = new_state(&mut state_builder);
        let token_id = state
            .mint(ALICE, DEFAULT_MINT_PRICE)
            .expect_report("Mint should succeed");

        let transfer = Transfer {
            token_id: token_id.clone(),
            amount: ContractTokenAmount::from(1),
            from: ALICE,
            to: Receiver::from_account(AccountAddress([2u8; 32])),
            data: AdditionalData::empty(),
        };
        claim!(state.transfer(&transfer).is_ok(), "Transfer should succeed");

        claim_eq!(state.owner_of(&token_id), Ok(BOB));
        claim_eq!(state.balance(&token_id, &ALICE), Ok(ContractTokenAmount::from(0)));
        claim_eq!(state.balance(&token_id, &BOB), Ok(ContractTokenAmount::from(1)));
        claim!(state.has_minted(&ALICE), "Minter record survives transfers");
        claim!(!state.has_minted(&BOB), "Receiving a token is not minting");

        // Alice no longer owns the token.
        claim_eq!(
            state.transfer(&transfer),
            Err(ContractError::InsufficientFunds)
        );
    }
}

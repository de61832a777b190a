use super::*;

/// An untagged event of a token being claimed.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct TokenClaimedEvent {
    /// Owner of the token at claim time.
    pub owner: Address,
    /// The ID of the claimed token.
    pub token_id: ContractTokenId,
}

/// An untagged event of a price update.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct PriceUpdatedEvent {
    /// Previous price.
    pub from: Amount,
    /// Updated price.
    pub to: Amount,
}

/// An untagged event of the collected CCD being withdrawn.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct WithdrawEvent {
    /// Receiver of the CCD.
    pub owner: AccountAddress,
    /// Withdrawn amount.
    pub amount: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    TokenClaimed(TokenClaimedEvent),
    MintPriceUpdated(PriceUpdatedEvent),
    ClaimPriceUpdated(PriceUpdatedEvent),
    Withdraw(WithdrawEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::TokenClaimed(event) => {
                out.write_u8(TOKEN_CLAIMED_TAG)?;
                event.serial(out)
            }
            CustomEvent::MintPriceUpdated(event) => {
                out.write_u8(MINT_PRICE_UPDATED_TAG)?;
                event.serial(out)
            }
            CustomEvent::ClaimPriceUpdated(event) => {
                out.write_u8(CLAIM_PRICE_UPDATED_TAG)?;
                event.serial(out)
            }
            CustomEvent::Withdraw(event) => {
                out.write_u8(WITHDRAW_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            TOKEN_CLAIMED_TAG => TokenClaimedEvent::deserial(source).map(CustomEvent::TokenClaimed),
            MINT_PRICE_UPDATED_TAG => {
                PriceUpdatedEvent::deserial(source).map(CustomEvent::MintPriceUpdated)
            }
            CLAIM_PRICE_UPDATED_TAG => {
                PriceUpdatedEvent::deserial(source).map(CustomEvent::ClaimPriceUpdated)
            }
            WITHDRAW_TAG => WithdrawEvent::deserial(source).map(CustomEvent::Withdraw),
            _ => Err(ParseError::default()),
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn custom_event_tags_do_not_clash_with_cis2() {
        let event = CustomEvent::MintPriceUpdated(PriceUpdatedEvent {
            from: Amount::from_micro_ccd(1),
            to: Amount::from_micro_ccd(2),
        });
        let bytes = to_bytes(&event);
        claim_eq!(bytes[0], u8::MAX - 6);

        let parsed: CustomEvent = from_bytes(&bytes).expect_report("Failed to parse event");
        claim_eq!(parsed, event);
    }

    #[concordium_test]
    fn unknown_tag_is_rejected() {
        let result: ParseResult<CustomEvent> = from_bytes(&[u8::MAX]);
        claim!(result.is_err(), "Tag of the CIS2 Transfer event must not parse");
    }
}

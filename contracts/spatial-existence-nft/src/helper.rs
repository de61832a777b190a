use super::*;

/// Build the metadata URL of a token: the base URI appended with the token ID
/// in decimal, the phase suffix and `.json`.
pub fn build_token_metadata_url(
    base_uri: &str,
    token_id: &ContractTokenId,
    phase: Phase,
) -> String {
    let mut token_metadata_url = String::from(base_uri);
    push_token_id(&mut token_metadata_url, token_id);
    token_metadata_url.push(phase.suffix());
    token_metadata_url.push_str(METADATA_EXTENSION);
    token_metadata_url
}

pub fn push_token_id(string: &mut String, token_id: &ContractTokenId) {
    let mut digits = [0u8; 10];
    let mut value = token_id.0;
    let mut len = 0;
    loop {
        digits[len] = (value % 10) as u8;
        len += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    for digit in digits[..len].iter().rev() {
        string.push((digit + b'0') as char);
    }
}

pub fn token_metadata_event(
    token_id: ContractTokenId,
    url: String,
) -> Cis2Event<ContractTokenId, ContractTokenAmount> {
    Cis2Event::TokenMetadata(TokenMetadataEvent {
        token_id,
        metadata_url: MetadataUrl { url, hash: None },
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn token_id_formatting() {
        for x in [0u32, 1, 4, 9, 10, 99, 999, 4_294_967_295] {
            let mut token_id_string = String::new();
            push_token_id(&mut token_id_string, &TokenIdU32(x));
            claim_eq!(token_id_string, x.to_string());
        }
    }

    #[concordium_test]
    fn metadata_url_follows_asset_naming() {
        let url = build_token_metadata_url("ipfs://cid/", &TokenIdU32(3), Phase::B);
        claim_eq!(url, "ipfs://cid/3b.json");

        let url = build_token_metadata_url("http://example.com/", &TokenIdU32(1), Phase::A);
        claim_eq!(url, "http://example.com/1a.json");
    }
}

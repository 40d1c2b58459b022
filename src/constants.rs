//! Constants and conversion helpers for the Immutable X SDK

use crate::error::{eyre, Context, Result};
use alloy::primitives::{Address, Bytes, U256};

/// Consent message signed by the L1 signer when linking an L2 wallet.
///
/// The wording is fixed so users always see identical text in their wallet's
/// signature prompt, regardless of SDK version.
pub const CONNECTION_CONSENT_MESSAGE: &str =
    "Only sign this request if you've initiated an action with Immutable X.";

/// ETH has 18 decimals
pub const ETH_DECIMALS: u8 = 18;

/// NFT transfers and withdrawals always move a quantized amount of one
pub const NFT_AMOUNT: &str = "1";

/// Parse a uint256 value from the API: decimal by default, hex with `0x`.
pub fn parse_u256(value: &str) -> Result<U256> {
    value
        .trim()
        .parse::<U256>()
        .with_context(|| format!("Invalid uint256 value: {value}"))
}

/// Parse a Stark public key (0x-prefixed hex felt) into the uint256 owner key
/// used by the on-chain registration and withdrawal entry points.
pub fn parse_stark_key(key: &str) -> Result<U256> {
    let key = key.trim();
    if !key.starts_with("0x") {
        return Err(eyre!("Stark public key must be 0x-prefixed hex: {key}"));
    }
    key.parse::<U256>()
        .with_context(|| format!("Invalid Stark public key: {key}"))
}

/// Widen an Ethereum address into the uint256 owner key used by the v4
/// registration generation.
pub fn address_to_u256(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

/// Parse 0x-prefixed hex into raw bytes (operator signatures, payloads).
pub fn parse_hex_bytes(value: &str) -> Result<Bytes> {
    let stripped = value.trim().trim_start_matches("0x");
    let bytes = hex::decode(stripped).with_context(|| format!("Invalid hex data: {value}"))?;
    Ok(Bytes::from(bytes))
}

/// Build the minting blob passed to `withdrawAndMint`: the UTF-8 bytes of
/// `{token_id}:{blueprint}`, each component wrapped in braces. The L1 contract
/// parses this blob to lazily mint the token during withdrawal.
pub fn minting_blob(client_token_id: &str, blueprint: &str) -> Bytes {
    let blob = format!("{{{}}}:{{{}}}", client_token_id.trim(), blueprint.trim());
    Bytes::from(blob.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_uint256() {
        assert_eq!(
            parse_u256("1000000000000000000").unwrap(),
            U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(parse_u256("0xff").unwrap(), U256::from(255u64));
        assert!(parse_u256("not-a-number").is_err());
    }

    #[test]
    fn stark_keys_must_be_hex() {
        assert_eq!(parse_stark_key("0x0abc").unwrap(), U256::from(0xabcu64));
        assert!(parse_stark_key("1234").is_err());
    }

    #[test]
    fn widens_address_into_owner_key() {
        let address: Address = "0x000000000000000000000000000000000000Beef"
            .parse()
            .unwrap();
        assert_eq!(address_to_u256(address), U256::from(0xbeefu64));
    }

    #[test]
    fn minting_blob_wraps_id_and_blueprint() {
        let blob = minting_blob("4512", "onchain-metadata");
        assert_eq!(blob.as_ref(), b"{4512}:{onchain-metadata}");
    }

    #[test]
    fn minting_blob_tolerates_surrounding_whitespace() {
        let blob = minting_blob(" 7 ", "");
        assert_eq!(blob.as_ref(), b"{7}:{}");
    }
}

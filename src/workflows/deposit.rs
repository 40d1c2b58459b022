//! Deposit workflows: move funds from L1 into L2
//!
//! Each variant runs the same machine — approve spend where the standard
//! requires it, fetch the signable deposit, encode the asset, execute the
//! on-chain deposit — and returns the submitted transaction hash without
//! awaiting confirmation.

use crate::api::types::{EncodeAssetRequest, GetSignableDepositRequest};
use crate::api::ImxApi;
use crate::config::ProviderConfiguration;
use crate::constants::{parse_stark_key, parse_u256, NFT_AMOUNT};
use crate::contracts::{ICore, IERC20, IERC721};
use crate::error::Result;
use crate::signer::{EthSigner, TxRequest};
use crate::types::Token;
use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolCall;
use tracing::info;

/// Dispatch a deposit by token variant.
pub async fn deposit<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    token: &Token,
    amount: U256,
) -> Result<TxHash>
where
    A: ImxApi,
    E: EthSigner,
{
    match token {
        Token::Eth => deposit_eth(api, signer, config, amount).await,
        Token::Erc20 { token_address } => {
            deposit_erc20(api, signer, config, *token_address, amount).await
        }
        Token::Erc721 {
            token_address,
            token_id,
        } => deposit_erc721(api, signer, config, *token_address, token_id).await,
    }
}

/// Deposit ETH. The amount is an integer wei value carried as the
/// transaction value of the payable deposit call.
pub async fn deposit_eth<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    amount: U256,
) -> Result<TxHash>
where
    A: ImxApi,
    E: EthSigner,
{
    let signable = api
        .get_signable_deposit(GetSignableDepositRequest {
            user: signer.address().to_string(),
            token: Token::Eth.to_signable(None),
            amount: amount.to_string(),
        })
        .await?;
    let encoded = api
        .encode_asset(EncodeAssetRequest {
            token: Token::Eth.to_encode(None),
        })
        .await?;

    let call = ICore::depositCall {
        starkKey: parse_stark_key(&signable.stark_key)?,
        assetType: parse_u256(&encoded.asset_type)?,
        vaultId: U256::from(signable.vault_id),
    };
    let tx = TxRequest::new(config.core_contract_address, call.abi_encode()).with_value(amount);
    let hash = signer.send_transaction(tx).await?;
    info!(%hash, %amount, "submitted ETH deposit");
    Ok(hash)
}

/// Deposit an ERC20 amount (integer, in the token's smallest unit).
/// Resolves the token's decimals from the API, grants the core contract an
/// allowance, then executes the deposit with the quantized amount echoed
/// from the signable response.
pub async fn deposit_erc20<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    token_address: Address,
    amount: U256,
) -> Result<TxHash>
where
    A: ImxApi,
    E: EthSigner,
{
    let details = api.get_token_details(&token_address.to_string()).await?;

    let approve = IERC20::approveCall {
        spender: config.core_contract_address,
        amount,
    };
    signer
        .send_transaction(TxRequest::new(token_address, approve.abi_encode()))
        .await?;

    let token = Token::erc20(token_address);
    let signable = api
        .get_signable_deposit(GetSignableDepositRequest {
            user: signer.address().to_string(),
            token: token.to_signable(Some(details.decimals)),
            amount: amount.to_string(),
        })
        .await?;
    let encoded = api
        .encode_asset(EncodeAssetRequest {
            token: token.to_encode(None),
        })
        .await?;

    let call = ICore::depositERC20Call {
        starkKey: parse_stark_key(&signable.stark_key)?,
        assetType: parse_u256(&encoded.asset_type)?,
        vaultId: U256::from(signable.vault_id),
        quantizedAmount: parse_u256(&signable.amount)?,
    };
    let tx = TxRequest::new(config.core_contract_address, call.abi_encode());
    let hash = signer.send_transaction(tx).await?;
    info!(%hash, %token_address, %amount, "submitted ERC20 deposit");
    Ok(hash)
}

/// Deposit a single ERC721 token. Grants the core contract operator rights
/// only when it does not hold them already.
pub async fn deposit_erc721<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    token_address: Address,
    token_id: &str,
) -> Result<TxHash>
where
    A: ImxApi,
    E: EthSigner,
{
    let approved_call = IERC721::isApprovedForAllCall {
        owner: signer.address(),
        operator: config.core_contract_address,
    };
    let data = signer
        .call(token_address, approved_call.abi_encode().into())
        .await?;
    let approved = IERC721::isApprovedForAllCall::abi_decode_returns(&data)?;

    if !approved {
        let approval = IERC721::setApprovalForAllCall {
            operator: config.core_contract_address,
            approved: true,
        };
        signer
            .send_transaction(TxRequest::new(token_address, approval.abi_encode()))
            .await?;
    }

    let token = Token::erc721(token_address, token_id);
    let signable = api
        .get_signable_deposit(GetSignableDepositRequest {
            user: signer.address().to_string(),
            token: token.to_signable(None),
            amount: NFT_AMOUNT.to_string(),
        })
        .await?;
    let encoded = api
        .encode_asset(EncodeAssetRequest {
            token: token.to_encode(None),
        })
        .await?;

    let call = ICore::depositNftCall {
        starkKey: parse_stark_key(&signable.stark_key)?,
        assetType: parse_u256(&encoded.asset_type)?,
        vaultId: U256::from(signable.vault_id),
        tokenId: parse_u256(token_id)?,
    };
    let tx = TxRequest::new(config.core_contract_address, call.abi_encode());
    let hash = signer.send_transaction(tx).await?;
    info!(%hash, %token_address, token_id, "submitted ERC721 deposit");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SignableToken;
    use crate::testutil::{MockApi, MockEthSigner};
    use alloy::sol_types::SolValue;

    fn address() -> Address {
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
            .parse()
            .unwrap()
    }

    fn token_address() -> Address {
        "0x1111111111111111111111111111111111111111"
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn eth_deposit_sends_signable_request_and_returns_tx_hash() {
        let api = MockApi::default();
        let signer = MockEthSigner::new(address(), 1);
        let config = ProviderConfiguration::sandbox();
        let amount = U256::from(10u64).pow(U256::from(18u64));

        let hash = deposit_eth(&api, &signer, &config, amount).await.unwrap();
        assert_eq!(hash, signer.tx_hash);

        let request = api.signable_deposit.lock().unwrap().clone().unwrap();
        assert_eq!(request.user, address().to_string());
        assert_eq!(request.amount, "1000000000000000000");
        assert_eq!(request.token, SignableToken::Eth { decimals: 18 });

        let sent = signer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, config.core_contract_address);
        assert_eq!(sent[0].value, amount);
        assert_eq!(&sent[0].data[..4], ICore::depositCall::SELECTOR);
    }

    #[tokio::test]
    async fn erc20_deposit_runs_steps_in_order() {
        let api = MockApi::default().with_quantized_amount("250");
        let signer = MockEthSigner::new(address(), 1).with_shared_log(api.log.clone());
        let config = ProviderConfiguration::sandbox();

        deposit_erc20(&api, &signer, &config, token_address(), U256::from(2500u64))
            .await
            .unwrap();

        assert_eq!(
            api.log.entries(),
            vec![
                "api.get_token_details",
                "eth.send_transaction", // approve
                "api.get_signable_deposit",
                "api.encode_asset",
                "eth.send_transaction", // deposit
            ]
        );

        let sent = signer.sent.lock().unwrap();
        assert_eq!(&sent[0].data[..4], IERC20::approveCall::SELECTOR);
        assert_eq!(sent[0].to, token_address());
        assert_eq!(&sent[1].data[..4], ICore::depositERC20Call::SELECTOR);
        let call = ICore::depositERC20Call::abi_decode(&sent[1].data).unwrap();
        assert_eq!(call.quantizedAmount, U256::from(250u64));
    }

    #[tokio::test]
    async fn erc721_deposit_skips_approval_when_operator_is_set() {
        let api = MockApi::default();
        let signer =
            MockEthSigner::new(address(), 1).with_call_return(Ok(true.abi_encode().into()));
        let config = ProviderConfiguration::sandbox();

        deposit_erc721(&api, &signer, &config, token_address(), "99")
            .await
            .unwrap();

        let sent = signer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(&sent[0].data[..4], ICore::depositNftCall::SELECTOR);

        let request = api.signable_deposit.lock().unwrap().clone().unwrap();
        assert_eq!(request.amount, "1");
    }

    #[tokio::test]
    async fn erc721_deposit_grants_operator_when_missing() {
        let api = MockApi::default();
        let signer =
            MockEthSigner::new(address(), 1).with_call_return(Ok(false.abi_encode().into()));
        let config = ProviderConfiguration::sandbox();

        deposit_erc721(&api, &signer, &config, token_address(), "99")
            .await
            .unwrap();

        let sent = signer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(&sent[0].data[..4], IERC721::setApprovalForAllCall::SELECTOR);
        assert_eq!(&sent[1].data[..4], ICore::depositNftCall::SELECTOR);
    }
}

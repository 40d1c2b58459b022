//! ImxClient - main entry point for the SDK

use crate::api::types::{CancelOrderResponse, CreateExchangeTransferResponse, CreateOrderResponse,
    CreateTradeResponse, CreateTransferV1Response, CreateTransferV2Response,
    CreateWithdrawalResponse, RegisterUserResponse};
use crate::api::ImxApi;
use crate::config::ProviderConfiguration;
use crate::error::{Result, WorkflowError};
use crate::signer::{EthSigner, StarkSigner};
use crate::types::{OrderParams, Token, TransferParams};
use crate::workflows;
use alloy::primitives::{Address, TxHash, U256};

/// Main client for the Immutable X network.
///
/// Composes the API client, the L1/L2 signer pair and the environment
/// configuration behind one method per workflow. Every entry point first
/// validates that the L1 signer's connected chain matches the configured
/// one; nothing is sent anywhere when it does not.
pub struct ImxClient<A: ImxApi, E: EthSigner, S: StarkSigner> {
    api: A,
    eth_signer: E,
    stark_signer: S,
    config: ProviderConfiguration,
}

impl<A: ImxApi, E: EthSigner, S: StarkSigner> ImxClient<A, E, S> {
    /// Create a new client from its parts
    pub fn new(api: A, eth_signer: E, stark_signer: S, config: ProviderConfiguration) -> Self {
        Self {
            api,
            eth_signer,
            stark_signer,
            config,
        }
    }

    /// The L1 address of this client's signer pair
    pub fn address(&self) -> Address {
        self.eth_signer.address()
    }

    /// The L2 public key of this client's signer pair
    pub fn stark_public_key(&self) -> &str {
        self.stark_signer.public_key()
    }

    /// The active configuration
    pub fn config(&self) -> &ProviderConfiguration {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn stark_signer(&self) -> &S {
        &self.stark_signer
    }

    async fn ensure_chain(&self) -> Result<()> {
        let actual = self.eth_signer.chain_id().await?;
        if actual != self.config.chain_id {
            return Err(WorkflowError::ChainMismatch {
                expected: self.config.chain_id,
                actual,
            }
            .into());
        }
        Ok(())
    }

    // ========== Registration ==========

    /// Whether the network holds a user record for this address
    pub async fn is_registered_offchain(&self) -> Result<bool> {
        self.ensure_chain().await?;
        workflows::registration::is_registered_offchain(&self.api, self.address()).await
    }

    /// Whether the Stark key is registered on the current-generation
    /// registration contract
    pub async fn is_registered_onchain(&self) -> Result<bool> {
        self.ensure_chain().await?;
        workflows::registration::is_registered_onchain(
            &self.eth_signer,
            self.config.registration_v4_contract_address,
            self.stark_public_key(),
        )
        .await
    }

    /// Register the signer pair's account off-chain
    pub async fn register_offchain(&self) -> Result<RegisterUserResponse> {
        self.ensure_chain().await?;
        workflows::registration::register_offchain(&self.api, &self.eth_signer, &self.stark_signer)
            .await
    }

    // ========== Deposits ==========

    /// Deposit any token, dispatching by variant
    pub async fn deposit(&self, token: &Token, amount: U256) -> Result<TxHash> {
        self.ensure_chain().await?;
        workflows::deposit::deposit(&self.api, &self.eth_signer, &self.config, token, amount).await
    }

    /// Deposit ETH (amount in wei)
    pub async fn deposit_eth(&self, amount: U256) -> Result<TxHash> {
        self.ensure_chain().await?;
        workflows::deposit::deposit_eth(&self.api, &self.eth_signer, &self.config, amount).await
    }

    /// Deposit an ERC20 amount (in the token's smallest unit)
    pub async fn deposit_erc20(&self, token_address: Address, amount: U256) -> Result<TxHash> {
        self.ensure_chain().await?;
        workflows::deposit::deposit_erc20(
            &self.api,
            &self.eth_signer,
            &self.config,
            token_address,
            amount,
        )
        .await
    }

    /// Deposit a single ERC721 token
    pub async fn deposit_nft(&self, token_address: Address, token_id: &str) -> Result<TxHash> {
        self.ensure_chain().await?;
        workflows::deposit::deposit_erc721(
            &self.api,
            &self.eth_signer,
            &self.config,
            token_address,
            token_id,
        )
        .await
    }

    // ========== Withdrawals ==========

    /// Request, dual-sign and submit a withdrawal (off-chain)
    pub async fn prepare_withdrawal(
        &self,
        token: &Token,
        amount: U256,
    ) -> Result<CreateWithdrawalResponse> {
        self.ensure_chain().await?;
        workflows::withdrawal::prepare_withdrawal(
            &self.api,
            &self.eth_signer,
            &self.stark_signer,
            token,
            amount,
        )
        .await
    }

    /// Execute the on-chain side of a prepared withdrawal
    pub async fn complete_withdrawal(&self, token: &Token) -> Result<TxHash> {
        self.ensure_chain().await?;
        workflows::withdrawal::complete_withdrawal(
            &self.api,
            &self.eth_signer,
            &self.config,
            self.stark_public_key(),
            token,
        )
        .await
    }

    // ========== Trading ==========

    /// Create a sell order
    pub async fn create_order(&self, params: &OrderParams) -> Result<CreateOrderResponse> {
        self.ensure_chain().await?;
        workflows::trading::create_order(&self.api, &self.eth_signer, &self.stark_signer, params)
            .await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: u64) -> Result<CancelOrderResponse> {
        self.ensure_chain().await?;
        workflows::trading::cancel_order(&self.api, &self.eth_signer, &self.stark_signer, order_id)
            .await
    }

    /// Fill a maker order
    pub async fn create_trade(&self, order_id: u64) -> Result<CreateTradeResponse> {
        self.ensure_chain().await?;
        workflows::trading::create_trade(&self.api, &self.eth_signer, &self.stark_signer, order_id)
            .await
    }

    // ========== Transfers ==========

    /// Transfer one asset to one receiver
    pub async fn transfer(&self, params: &TransferParams) -> Result<CreateTransferV1Response> {
        self.ensure_chain().await?;
        workflows::transfer::transfer(&self.api, &self.eth_signer, &self.stark_signer, params)
            .await
    }

    /// Transfer N assets in one request
    pub async fn batch_transfer(
        &self,
        transfers: &[TransferParams],
    ) -> Result<CreateTransferV2Response> {
        self.ensure_chain().await?;
        workflows::transfer::batch_transfer(
            &self.api,
            &self.eth_signer,
            &self.stark_signer,
            transfers,
        )
        .await
    }

    /// Transfer one asset into an exchange's deposit flow
    pub async fn exchange_transfer(
        &self,
        exchange_id: u64,
        params: &TransferParams,
    ) -> Result<CreateExchangeTransferResponse> {
        self.ensure_chain().await?;
        workflows::transfer::exchange_transfer(
            &self.api,
            &self.eth_signer,
            &self.stark_signer,
            exchange_id,
            params,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockApi, MockEthSigner, MockStarkSigner};

    fn address() -> Address {
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
            .parse()
            .unwrap()
    }

    fn client_on_chain(
        chain_id: u64,
    ) -> ImxClient<MockApi, MockEthSigner, MockStarkSigner> {
        let api = MockApi::default();
        let signer = MockEthSigner::new(address(), chain_id).with_shared_log(api.log.clone());
        let stark = MockStarkSigner::new("0x0abc");
        ImxClient::new(api, signer, stark, ProviderConfiguration::sandbox())
    }

    #[tokio::test]
    async fn chain_mismatch_rejects_before_any_call() {
        // Sandbox expects 11155111; the signer reports mainnet.
        let client = client_on_chain(1);
        let amount = U256::from(1u64);

        let err = client.deposit_eth(amount).await.unwrap_err();
        assert!(err.to_string().contains("chain id"));
        let err = client.prepare_withdrawal(&Token::Eth, amount).await.unwrap_err();
        assert!(err.to_string().contains("chain id"));
        let err = client.complete_withdrawal(&Token::Eth).await.unwrap_err();
        assert!(err.to_string().contains("chain id"));
        let err = client.register_offchain().await.unwrap_err();
        assert!(err.to_string().contains("chain id"));
        let err = client.cancel_order(1).await.unwrap_err();
        assert!(err.to_string().contains("chain id"));

        // Nothing reached the API or a contract.
        assert!(client.api.log.is_empty());
        assert!(client.eth_signer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deposit_eth_end_to_end_returns_the_tx_hash() {
        let client = client_on_chain(11155111);
        let amount: U256 = "1000000000000000000".parse().unwrap();

        let hash = client.deposit_eth(amount).await.unwrap();
        assert_eq!(hash, client.eth_signer.tx_hash);

        let request = client
            .api
            .signable_deposit
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "user": address().to_string(),
                "token": { "type": "ETH", "data": { "decimals": 18 } },
                "amount": "1000000000000000000",
            })
        );
    }

    #[tokio::test]
    async fn registration_queries_use_the_v4_contract_gate() {
        use alloy::sol_types::SolValue;

        let api = MockApi::default();
        let signer = MockEthSigner::new(address(), 11155111)
            .with_call_return(Ok(true.abi_encode().into()));
        let client = ImxClient::new(
            api,
            signer,
            MockStarkSigner::new("0x0abc"),
            ProviderConfiguration::sandbox(),
        );

        assert!(client.is_registered_onchain().await.unwrap());
        assert!(client.is_registered_offchain().await.unwrap());
    }
}

//! Request/response types for the Immutable X REST API
//!
//! Completion requests (`Create*Request`) are built exclusively from the
//! signable response they answer: the `from_signable` constructors consume
//! the response and echo its fields verbatim. The network recomputes the
//! payload hash from these fields and rejects any mismatch, so nothing here
//! is ever recomputed locally.

use serde::{Deserialize, Serialize};

/// Token shape embedded in signable requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SignableToken {
    #[serde(rename = "ETH")]
    Eth { decimals: u8 },
    #[serde(rename = "ERC20")]
    Erc20 {
        token_address: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        decimals: Option<u8>,
    },
    #[serde(rename = "ERC721")]
    Erc721 {
        token_id: String,
        token_address: String,
    },
}

/// Token shape accepted by the asset-encoding endpoint.
///
/// Serialized by hand because minted and mintable ERC721 tokens share the
/// `ERC721` tag while carrying different data shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeAssetToken {
    Eth,
    Erc20 {
        token_address: String,
    },
    Erc721 {
        token_id: String,
        token_address: String,
    },
    /// Mintable assets are encoded from their off-chain id and blueprint
    /// because no L1 token id exists yet.
    MintableErc721 {
        id: String,
        token_address: String,
        blueprint: Option<String>,
    },
}

impl EncodeAssetToken {
    /// Whether this token must be encoded through the mintable-asset path
    pub fn is_mintable(&self) -> bool {
        matches!(self, Self::MintableErc721 { .. })
    }
}

impl Serialize for EncodeAssetToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            Self::Eth => serde_json::json!({ "type": "ETH" }),
            Self::Erc20 { token_address } => serde_json::json!({
                "type": "ERC20",
                "data": { "token_address": token_address },
            }),
            Self::Erc721 {
                token_id,
                token_address,
            } => serde_json::json!({
                "type": "ERC721",
                "data": { "token_id": token_id, "token_address": token_address },
            }),
            Self::MintableErc721 {
                id,
                token_address,
                blueprint,
            } => {
                let mut data = serde_json::json!({ "id": id, "token_address": token_address });
                if let Some(blueprint) = blueprint {
                    data["blueprint"] = serde_json::Value::String(blueprint.clone());
                }
                serde_json::json!({ "type": "ERC721", "data": data })
            }
        };
        value.serialize(serializer)
    }
}

// ========== Users ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUsersResponse {
    pub accounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableRegistrationRequest {
    pub ether_key: String,
    pub stark_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableRegistrationOffchainResponse {
    pub signable_message: String,
    pub payload_hash: String,
}

/// On-chain variant: the network's operator co-signs the key binding so the
/// combined register-and-withdraw entry points can verify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableRegistrationResponse {
    pub operator_signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub ether_key: String,
    pub stark_key: String,
    pub eth_signature: String,
    pub stark_signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub tx_hash: String,
}

// ========== Tokens ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDetailsResponse {
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<String>,
}

// ========== Encoding ==========

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeAssetRequest {
    pub token: EncodeAssetToken,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeAssetResponse {
    pub asset_type: String,
    pub asset_id: String,
}

// ========== Mints ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintableTokenResponse {
    pub token_id: String,
    pub client_token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<String>,
}

// ========== Deposits ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableDepositRequest {
    pub user: String,
    pub token: SignableToken,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableDepositResponse {
    pub stark_key: String,
    pub vault_id: u64,
    /// Quantized amount, echoed into the on-chain deposit call
    pub amount: String,
}

// ========== Withdrawals ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableWithdrawalRequest {
    pub user: String,
    pub token: SignableToken,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableWithdrawalResponse {
    pub stark_key: String,
    pub vault_id: u64,
    pub amount: String,
    pub asset_id: String,
    pub nonce: u64,
    pub payload_hash: String,
    pub signable_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWithdrawalRequest {
    pub stark_key: String,
    pub vault_id: u64,
    pub amount: String,
    pub asset_id: String,
    pub nonce: u64,
    pub stark_signature: String,
}

impl CreateWithdrawalRequest {
    /// Echo the signable response, attaching the L2 signature.
    pub fn from_signable(
        signable: GetSignableWithdrawalResponse,
        stark_signature: String,
    ) -> Self {
        Self {
            stark_key: signable.stark_key,
            vault_id: signable.vault_id,
            amount: signable.amount,
            asset_id: signable.asset_id,
            nonce: signable.nonce,
            stark_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWithdrawalResponse {
    pub withdrawal_id: u64,
    pub status: String,
}

// ========== Orders ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableOrderRequest {
    pub user: String,
    pub amount_sell: String,
    pub token_sell: SignableToken,
    pub amount_buy: String,
    pub token_buy: SignableToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableOrderResponse {
    pub stark_key: String,
    pub vault_id_sell: u64,
    pub vault_id_buy: u64,
    pub amount_sell: String,
    pub amount_buy: String,
    pub asset_id_sell: String,
    pub asset_id_buy: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub payload_hash: String,
    pub signable_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub stark_key: String,
    pub vault_id_sell: u64,
    pub vault_id_buy: u64,
    pub amount_sell: String,
    pub amount_buy: String,
    pub asset_id_sell: String,
    pub asset_id_buy: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub stark_signature: String,
}

impl CreateOrderRequest {
    /// Echo the signable response, attaching the L2 signature.
    pub fn from_signable(signable: GetSignableOrderResponse, stark_signature: String) -> Self {
        Self {
            stark_key: signable.stark_key,
            vault_id_sell: signable.vault_id_sell,
            vault_id_buy: signable.vault_id_buy,
            amount_sell: signable.amount_sell,
            amount_buy: signable.amount_buy,
            asset_id_sell: signable.asset_id_sell,
            asset_id_buy: signable.asset_id_buy,
            nonce: signable.nonce,
            expiration_timestamp: signable.expiration_timestamp,
            stark_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: u64,
    pub status: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableCancelOrderResponse {
    pub order_id: u64,
    pub payload_hash: String,
    pub signable_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: u64,
    pub stark_signature: String,
}

impl CancelOrderRequest {
    pub fn from_signable(signable: GetSignableCancelOrderResponse, stark_signature: String) -> Self {
        Self {
            order_id: signable.order_id,
            stark_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    pub order_id: u64,
    pub status: String,
}

// ========== Trades ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableTradeRequest {
    pub user: String,
    /// Maker order this trade fills
    pub order_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableTradeResponse {
    pub stark_key: String,
    pub vault_id_sell: u64,
    pub vault_id_buy: u64,
    pub amount_sell: String,
    pub amount_buy: String,
    pub asset_id_sell: String,
    pub asset_id_buy: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub payload_hash: String,
    pub signable_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTradeRequest {
    pub order_id: u64,
    pub stark_key: String,
    pub vault_id_sell: u64,
    pub vault_id_buy: u64,
    pub amount_sell: String,
    pub amount_buy: String,
    pub asset_id_sell: String,
    pub asset_id_buy: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub stark_signature: String,
}

impl CreateTradeRequest {
    pub fn from_signable(
        signable: GetSignableTradeResponse,
        order_id: u64,
        stark_signature: String,
    ) -> Self {
        Self {
            order_id,
            stark_key: signable.stark_key,
            vault_id_sell: signable.vault_id_sell,
            vault_id_buy: signable.vault_id_buy,
            amount_sell: signable.amount_sell,
            amount_buy: signable.amount_buy,
            asset_id_sell: signable.asset_id_sell,
            asset_id_buy: signable.asset_id_buy,
            nonce: signable.nonce,
            expiration_timestamp: signable.expiration_timestamp,
            stark_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTradeResponse {
    pub trade_id: u64,
    pub status: String,
}

// ========== Transfers ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableTransferV1Request {
    pub sender: String,
    pub token: SignableToken,
    pub amount: String,
    pub receiver: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableTransferV1Response {
    pub sender_stark_key: String,
    pub sender_vault_id: u64,
    pub receiver_stark_key: String,
    pub receiver_vault_id: u64,
    pub asset_id: String,
    pub amount: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub payload_hash: String,
    pub signable_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransferV1Request {
    pub sender_stark_key: String,
    pub sender_vault_id: u64,
    pub receiver_stark_key: String,
    pub receiver_vault_id: u64,
    pub asset_id: String,
    pub amount: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub stark_signature: String,
}

impl CreateTransferV1Request {
    pub fn from_signable(
        signable: GetSignableTransferV1Response,
        stark_signature: String,
    ) -> Self {
        Self {
            sender_stark_key: signable.sender_stark_key,
            sender_vault_id: signable.sender_vault_id,
            receiver_stark_key: signable.receiver_stark_key,
            receiver_vault_id: signable.receiver_vault_id,
            asset_id: signable.asset_id,
            amount: signable.amount,
            nonce: signable.nonce,
            expiration_timestamp: signable.expiration_timestamp,
            stark_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransferV1Response {
    pub transfer_id: u64,
    pub status: String,
}

/// One item of a batch signable-transfer request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignableTransferDetails {
    pub amount: String,
    pub token: SignableToken,
    pub receiver: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableTransferV2Request {
    pub sender_ether_key: String,
    pub signable_requests: Vec<SignableTransferDetails>,
}

/// One item of a batch signable-transfer response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignableTransferResponseDetails {
    pub sender_vault_id: u64,
    pub receiver_stark_key: String,
    pub receiver_vault_id: u64,
    pub asset_id: String,
    pub amount: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub payload_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSignableTransferV2Response {
    pub sender_stark_key: String,
    /// One combined message covering the whole batch; signed once by L1
    pub signable_message: String,
    pub signable_responses: Vec<SignableTransferResponseDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequestItem {
    pub sender_vault_id: u64,
    pub receiver_stark_key: String,
    pub receiver_vault_id: u64,
    pub asset_id: String,
    pub amount: String,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub stark_signature: String,
}

impl TransferRequestItem {
    pub fn from_signable(
        signable: SignableTransferResponseDetails,
        stark_signature: String,
    ) -> Self {
        Self {
            sender_vault_id: signable.sender_vault_id,
            receiver_stark_key: signable.receiver_stark_key,
            receiver_vault_id: signable.receiver_vault_id,
            asset_id: signable.asset_id,
            amount: signable.amount,
            nonce: signable.nonce,
            expiration_timestamp: signable.expiration_timestamp,
            stark_signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransferV2Request {
    pub sender_stark_key: String,
    pub requests: Vec<TransferRequestItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransferV2Response {
    pub transfer_ids: Vec<u64>,
}

// ========== Exchanges ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExchangeTransferResponse {
    pub transfer_id: u64,
    pub status: String,
}

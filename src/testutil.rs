//! Shared test doubles: a scripted API, a scripted L1 signer and a
//! deterministic L2 signer. Both mocks can share one [`CallLog`] so tests
//! can assert the exact interleaving of API and contract activity.

use crate::api::types::*;
use crate::api::{ApiError, ApiResult, ImxApi};
use crate::signer::{EthSigner, StarkSigner, TxRequest};
use alloy::primitives::{Address, Bytes, TxHash, B256};
use eyre::{eyre, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Ordered record of mock activity.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, name: &str) {
        self.0.lock().unwrap().push(name.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

fn status_error(status: u16, path: &str) -> ApiError {
    ApiError::Status {
        method: "GET",
        path: path.to_string(),
        status,
        body: String::new(),
    }
}

/// Scripted result of the user-lookup endpoint.
pub(crate) enum UserLookup {
    Registered(Vec<String>),
    NotFound,
    ServerError,
}

/// Scripted API with canned responses and typed request capture.
pub(crate) struct MockApi {
    pub log: CallLog,
    pub user_lookup: UserLookup,
    pub stark_key: String,
    pub vault_id: u64,
    pub nonce: u64,
    pub expiration_timestamp: u64,
    pub asset_type: String,
    pub asset_id: String,
    pub payload_hash: String,
    pub signable_message: String,
    pub operator_signature: String,
    pub decimals: u8,
    pub mintable: Option<MintableTokenResponse>,
    pub quantized_amount: Option<String>,
    // typed request capture
    pub register_user: Mutex<Option<RegisterUserRequest>>,
    pub signable_deposit: Mutex<Option<GetSignableDepositRequest>>,
    pub signable_withdrawal: Mutex<Option<GetSignableWithdrawalRequest>>,
    pub create_withdrawal: Mutex<Option<CreateWithdrawalRequest>>,
    pub create_order: Mutex<Option<CreateOrderRequest>>,
    pub cancel_order: Mutex<Option<CancelOrderRequest>>,
    pub create_trade: Mutex<Option<CreateTradeRequest>>,
    pub create_transfer: Mutex<Option<CreateTransferV1Request>>,
    pub create_transfer_batch: Mutex<Option<CreateTransferV2Request>>,
    pub eth_signatures: Mutex<Vec<String>>,
    pub exchange_id: Mutex<Option<u64>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            log: CallLog::default(),
            user_lookup: UserLookup::Registered(vec!["0x0abc".to_string()]),
            stark_key: "0x0abc".to_string(),
            vault_id: 1500,
            nonce: 7,
            expiration_timestamp: 1_700_000_000,
            asset_type: "100".to_string(),
            asset_id: "200".to_string(),
            payload_hash: "0xpayload".to_string(),
            signable_message: "sign this operation".to_string(),
            operator_signature: "0x0102030405".to_string(),
            decimals: 6,
            mintable: None,
            quantized_amount: None,
            register_user: Mutex::new(None),
            signable_deposit: Mutex::new(None),
            signable_withdrawal: Mutex::new(None),
            create_withdrawal: Mutex::new(None),
            create_order: Mutex::new(None),
            cancel_order: Mutex::new(None),
            create_trade: Mutex::new(None),
            create_transfer: Mutex::new(None),
            create_transfer_batch: Mutex::new(None),
            eth_signatures: Mutex::new(Vec::new()),
            exchange_id: Mutex::new(None),
        }
    }
}

impl MockApi {
    pub fn with_user_lookup(mut self, lookup: UserLookup) -> Self {
        self.user_lookup = lookup;
        self
    }

    pub fn with_mintable_token(mut self, client_token_id: &str, blueprint: Option<&str>) -> Self {
        self.mintable = Some(MintableTokenResponse {
            token_id: "99".to_string(),
            client_token_id: client_token_id.to_string(),
            blueprint: blueprint.map(str::to_string),
        });
        self
    }

    pub fn with_quantized_amount(mut self, amount: &str) -> Self {
        self.quantized_amount = Some(amount.to_string());
        self
    }

    fn record_signature(&self, eth_signature: &str) {
        self.eth_signatures
            .lock()
            .unwrap()
            .push(eth_signature.to_string());
    }

    fn transfer_response(&self, amount: String) -> GetSignableTransferV1Response {
        GetSignableTransferV1Response {
            sender_stark_key: self.stark_key.clone(),
            sender_vault_id: self.vault_id,
            receiver_stark_key: "0x0def".to_string(),
            receiver_vault_id: self.vault_id + 1,
            asset_id: self.asset_id.clone(),
            amount,
            nonce: self.nonce,
            expiration_timestamp: self.expiration_timestamp,
            payload_hash: self.payload_hash.clone(),
            signable_message: self.signable_message.clone(),
        }
    }
}

impl ImxApi for MockApi {
    async fn get_user(&self, _eth_address: &str) -> ApiResult<GetUsersResponse> {
        self.log.record("api.get_user");
        match &self.user_lookup {
            UserLookup::Registered(accounts) => Ok(GetUsersResponse {
                accounts: accounts.clone(),
            }),
            UserLookup::NotFound => Err(status_error(404, "/v1/users")),
            UserLookup::ServerError => Err(status_error(500, "/v1/users")),
        }
    }

    async fn get_signable_registration_offchain(
        &self,
        _request: GetSignableRegistrationRequest,
    ) -> ApiResult<GetSignableRegistrationOffchainResponse> {
        self.log.record("api.get_signable_registration_offchain");
        Ok(GetSignableRegistrationOffchainResponse {
            signable_message: self.signable_message.clone(),
            payload_hash: self.payload_hash.clone(),
        })
    }

    async fn get_signable_registration_onchain(
        &self,
        _request: GetSignableRegistrationRequest,
    ) -> ApiResult<GetSignableRegistrationResponse> {
        self.log.record("api.get_signable_registration_onchain");
        Ok(GetSignableRegistrationResponse {
            operator_signature: self.operator_signature.clone(),
        })
    }

    async fn register_user(&self, request: RegisterUserRequest) -> ApiResult<RegisterUserResponse> {
        self.log.record("api.register_user");
        *self.register_user.lock().unwrap() = Some(request);
        Ok(RegisterUserResponse {
            tx_hash: "0x1111".to_string(),
        })
    }

    async fn get_token_details(&self, _token_address: &str) -> ApiResult<TokenDetailsResponse> {
        self.log.record("api.get_token_details");
        Ok(TokenDetailsResponse {
            decimals: self.decimals,
            symbol: None,
            quantum: None,
        })
    }

    async fn encode_asset(&self, _request: EncodeAssetRequest) -> ApiResult<EncodeAssetResponse> {
        self.log.record("api.encode_asset");
        Ok(EncodeAssetResponse {
            asset_type: self.asset_type.clone(),
            asset_id: self.asset_id.clone(),
        })
    }

    async fn get_mintable_token(
        &self,
        _token_address: &str,
        _token_id: &str,
    ) -> ApiResult<MintableTokenResponse> {
        self.log.record("api.get_mintable_token");
        self.mintable
            .clone()
            .ok_or_else(|| status_error(404, "/v1/mintable-token"))
    }

    async fn get_signable_deposit(
        &self,
        request: GetSignableDepositRequest,
    ) -> ApiResult<GetSignableDepositResponse> {
        self.log.record("api.get_signable_deposit");
        let amount = self
            .quantized_amount
            .clone()
            .unwrap_or_else(|| request.amount.clone());
        *self.signable_deposit.lock().unwrap() = Some(request);
        Ok(GetSignableDepositResponse {
            stark_key: self.stark_key.clone(),
            vault_id: self.vault_id,
            amount,
        })
    }

    async fn get_signable_withdrawal(
        &self,
        request: GetSignableWithdrawalRequest,
    ) -> ApiResult<GetSignableWithdrawalResponse> {
        self.log.record("api.get_signable_withdrawal");
        let amount = request.amount.clone();
        *self.signable_withdrawal.lock().unwrap() = Some(request);
        Ok(GetSignableWithdrawalResponse {
            stark_key: self.stark_key.clone(),
            vault_id: self.vault_id,
            amount,
            asset_id: self.asset_id.clone(),
            nonce: self.nonce,
            payload_hash: self.payload_hash.clone(),
            signable_message: self.signable_message.clone(),
        })
    }

    async fn create_withdrawal(
        &self,
        request: CreateWithdrawalRequest,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateWithdrawalResponse> {
        self.log.record("api.create_withdrawal");
        self.record_signature(eth_signature);
        *self.create_withdrawal.lock().unwrap() = Some(request);
        Ok(CreateWithdrawalResponse {
            withdrawal_id: 1,
            status: "success".to_string(),
        })
    }

    async fn get_signable_order(
        &self,
        request: GetSignableOrderRequest,
    ) -> ApiResult<GetSignableOrderResponse> {
        self.log.record("api.get_signable_order");
        Ok(GetSignableOrderResponse {
            stark_key: self.stark_key.clone(),
            vault_id_sell: self.vault_id,
            vault_id_buy: self.vault_id + 1,
            amount_sell: request.amount_sell,
            amount_buy: request.amount_buy,
            asset_id_sell: self.asset_id.clone(),
            asset_id_buy: "300".to_string(),
            nonce: self.nonce,
            expiration_timestamp: self.expiration_timestamp,
            payload_hash: self.payload_hash.clone(),
            signable_message: self.signable_message.clone(),
        })
    }

    async fn create_order(
        &self,
        request: CreateOrderRequest,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateOrderResponse> {
        self.log.record("api.create_order");
        self.record_signature(eth_signature);
        *self.create_order.lock().unwrap() = Some(request);
        Ok(CreateOrderResponse {
            order_id: 1,
            status: "active".to_string(),
            time: 0,
        })
    }

    async fn get_signable_cancel_order(
        &self,
        order_id: u64,
    ) -> ApiResult<GetSignableCancelOrderResponse> {
        self.log.record("api.get_signable_cancel_order");
        Ok(GetSignableCancelOrderResponse {
            order_id,
            payload_hash: self.payload_hash.clone(),
            signable_message: self.signable_message.clone(),
        })
    }

    async fn cancel_order(
        &self,
        request: CancelOrderRequest,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CancelOrderResponse> {
        self.log.record("api.cancel_order");
        self.record_signature(eth_signature);
        let order_id = request.order_id;
        *self.cancel_order.lock().unwrap() = Some(request);
        Ok(CancelOrderResponse {
            order_id,
            status: "cancelled".to_string(),
        })
    }

    async fn get_signable_trade(
        &self,
        _request: GetSignableTradeRequest,
    ) -> ApiResult<GetSignableTradeResponse> {
        self.log.record("api.get_signable_trade");
        Ok(GetSignableTradeResponse {
            stark_key: self.stark_key.clone(),
            vault_id_sell: self.vault_id,
            vault_id_buy: self.vault_id + 1,
            amount_sell: "1000".to_string(),
            amount_buy: "5".to_string(),
            asset_id_sell: self.asset_id.clone(),
            asset_id_buy: "300".to_string(),
            nonce: self.nonce,
            expiration_timestamp: self.expiration_timestamp,
            payload_hash: self.payload_hash.clone(),
            signable_message: self.signable_message.clone(),
        })
    }

    async fn create_trade(
        &self,
        request: CreateTradeRequest,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateTradeResponse> {
        self.log.record("api.create_trade");
        self.record_signature(eth_signature);
        *self.create_trade.lock().unwrap() = Some(request);
        Ok(CreateTradeResponse {
            trade_id: 1,
            status: "filled".to_string(),
        })
    }

    async fn get_signable_transfer(
        &self,
        request: GetSignableTransferV1Request,
    ) -> ApiResult<GetSignableTransferV1Response> {
        self.log.record("api.get_signable_transfer");
        Ok(self.transfer_response(request.amount))
    }

    async fn create_transfer(
        &self,
        request: CreateTransferV1Request,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateTransferV1Response> {
        self.log.record("api.create_transfer");
        self.record_signature(eth_signature);
        *self.create_transfer.lock().unwrap() = Some(request);
        Ok(CreateTransferV1Response {
            transfer_id: 1,
            status: "success".to_string(),
        })
    }

    async fn get_signable_transfer_batch(
        &self,
        request: GetSignableTransferV2Request,
    ) -> ApiResult<GetSignableTransferV2Response> {
        self.log.record("api.get_signable_transfer_batch");
        let signable_responses = request
            .signable_requests
            .iter()
            .enumerate()
            .map(|(index, item)| SignableTransferResponseDetails {
                sender_vault_id: self.vault_id,
                receiver_stark_key: "0x0def".to_string(),
                receiver_vault_id: self.vault_id + 1,
                asset_id: self.asset_id.clone(),
                amount: item.amount.clone(),
                nonce: self.nonce + index as u64,
                expiration_timestamp: self.expiration_timestamp,
                payload_hash: format!("{}-{}", self.payload_hash, index),
            })
            .collect();
        Ok(GetSignableTransferV2Response {
            sender_stark_key: self.stark_key.clone(),
            signable_message: self.signable_message.clone(),
            signable_responses,
        })
    }

    async fn create_transfer_batch(
        &self,
        request: CreateTransferV2Request,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateTransferV2Response> {
        self.log.record("api.create_transfer_batch");
        self.record_signature(eth_signature);
        let transfer_ids = (1..=request.requests.len() as u64).collect();
        *self.create_transfer_batch.lock().unwrap() = Some(request);
        Ok(CreateTransferV2Response { transfer_ids })
    }

    async fn get_signable_exchange_transfer(
        &self,
        exchange_id: u64,
        request: GetSignableTransferV1Request,
    ) -> ApiResult<GetSignableTransferV1Response> {
        self.log.record("api.get_signable_exchange_transfer");
        *self.exchange_id.lock().unwrap() = Some(exchange_id);
        Ok(self.transfer_response(request.amount))
    }

    async fn create_exchange_transfer(
        &self,
        _exchange_id: u64,
        _request: CreateTransferV1Request,
        _eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateExchangeTransferResponse> {
        self.log.record("api.create_exchange_transfer");
        self.record_signature(eth_signature);
        Ok(CreateExchangeTransferResponse {
            transfer_id: 9,
            status: "success".to_string(),
        })
    }
}

/// Scripted L1 signer: deterministic signatures, queued `eth_call` returns,
/// captured transactions.
pub(crate) struct MockEthSigner {
    pub log: CallLog,
    pub address: Address,
    pub chain_id: u64,
    pub tx_hash: TxHash,
    pub call_returns: Mutex<VecDeque<Result<Bytes, String>>>,
    pub sent: Mutex<Vec<TxRequest>>,
    pub signed_messages: Mutex<Vec<String>>,
}

impl MockEthSigner {
    pub fn new(address: Address, chain_id: u64) -> Self {
        Self {
            log: CallLog::default(),
            address,
            chain_id,
            tx_hash: B256::repeat_byte(0xab),
            call_returns: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            signed_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn with_shared_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_call_return(self, result: Result<Bytes, String>) -> Self {
        self.call_returns.lock().unwrap().push_back(result);
        self
    }

    /// The signature this mock produces over a given message
    pub fn expected_signature(&self, message: &str) -> String {
        format!("0xeth[{message}]")
    }
}

impl EthSigner for MockEthSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<String> {
        let message = String::from_utf8_lossy(message).to_string();
        let signature = self.expected_signature(&message);
        self.signed_messages.lock().unwrap().push(message);
        Ok(signature)
    }

    async fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes> {
        self.log.record("eth.call");
        match self.call_returns.lock().unwrap().pop_front() {
            Some(Ok(data)) => Ok(data),
            Some(Err(message)) => Err(eyre!(message)),
            None => Err(eyre!("no scripted return for eth call")),
        }
    }

    async fn send_transaction(&self, tx: TxRequest) -> Result<TxHash> {
        self.log.record("eth.send_transaction");
        self.sent.lock().unwrap().push(tx);
        Ok(self.tx_hash)
    }
}

/// Deterministic L2 signer.
pub(crate) struct MockStarkSigner {
    public_key: String,
}

impl MockStarkSigner {
    pub fn new(public_key: &str) -> Self {
        Self {
            public_key: public_key.to_string(),
        }
    }

    /// The signature this mock produces over a given payload hash
    pub fn expected_signature(&self, payload_hash: &str) -> String {
        format!("0xstark[{payload_hash}]")
    }
}

impl StarkSigner for MockStarkSigner {
    fn public_key(&self) -> &str {
        &self.public_key
    }

    async fn sign_message(&self, payload_hash: &str) -> Result<String> {
        Ok(self.expected_signature(payload_hash))
    }
}

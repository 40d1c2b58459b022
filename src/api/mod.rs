//! Immutable X REST API client
//!
//! The trait is the seam the workflows depend on; [`ImxApiClient`] is the
//! reqwest-backed implementation. Endpoints that finalize a signed operation
//! take the caller's Ethereum address and signature and send them as
//! `x-imx-eth-address` / `x-imx-eth-signature` headers.

pub mod types;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use types::*;

/// API failure modes. `Status` keeps the HTTP status so a 404 can be read as
/// the "not registered" / "not mintable" signal it is; every other status
/// propagates to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("api request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },
}

impl ApiError {
    /// Whether the failure was an HTTP 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The REST surface the workflows consume.
pub trait ImxApi: Send + Sync {
    /// Look up the accounts registered for an Ethereum address.
    /// Returns a 404 `Status` error when the address is unknown.
    fn get_user(&self, eth_address: &str)
        -> impl Future<Output = ApiResult<GetUsersResponse>> + Send;

    fn get_signable_registration_offchain(
        &self,
        request: GetSignableRegistrationRequest,
    ) -> impl Future<Output = ApiResult<GetSignableRegistrationOffchainResponse>> + Send;

    fn get_signable_registration_onchain(
        &self,
        request: GetSignableRegistrationRequest,
    ) -> impl Future<Output = ApiResult<GetSignableRegistrationResponse>> + Send;

    fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> impl Future<Output = ApiResult<RegisterUserResponse>> + Send;

    fn get_token_details(
        &self,
        token_address: &str,
    ) -> impl Future<Output = ApiResult<TokenDetailsResponse>> + Send;

    fn encode_asset(
        &self,
        request: EncodeAssetRequest,
    ) -> impl Future<Output = ApiResult<EncodeAssetResponse>> + Send;

    /// Look up a mintable token by collection address and client token id.
    /// Returns a 404 `Status` error when the token is a plain, already
    /// minted ERC721.
    fn get_mintable_token(
        &self,
        token_address: &str,
        token_id: &str,
    ) -> impl Future<Output = ApiResult<MintableTokenResponse>> + Send;

    fn get_signable_deposit(
        &self,
        request: GetSignableDepositRequest,
    ) -> impl Future<Output = ApiResult<GetSignableDepositResponse>> + Send;

    fn get_signable_withdrawal(
        &self,
        request: GetSignableWithdrawalRequest,
    ) -> impl Future<Output = ApiResult<GetSignableWithdrawalResponse>> + Send;

    fn create_withdrawal(
        &self,
        request: CreateWithdrawalRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CreateWithdrawalResponse>> + Send;

    fn get_signable_order(
        &self,
        request: GetSignableOrderRequest,
    ) -> impl Future<Output = ApiResult<GetSignableOrderResponse>> + Send;

    fn create_order(
        &self,
        request: CreateOrderRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CreateOrderResponse>> + Send;

    fn get_signable_cancel_order(
        &self,
        order_id: u64,
    ) -> impl Future<Output = ApiResult<GetSignableCancelOrderResponse>> + Send;

    fn cancel_order(
        &self,
        request: CancelOrderRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CancelOrderResponse>> + Send;

    fn get_signable_trade(
        &self,
        request: GetSignableTradeRequest,
    ) -> impl Future<Output = ApiResult<GetSignableTradeResponse>> + Send;

    fn create_trade(
        &self,
        request: CreateTradeRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CreateTradeResponse>> + Send;

    fn get_signable_transfer(
        &self,
        request: GetSignableTransferV1Request,
    ) -> impl Future<Output = ApiResult<GetSignableTransferV1Response>> + Send;

    fn create_transfer(
        &self,
        request: CreateTransferV1Request,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CreateTransferV1Response>> + Send;

    fn get_signable_transfer_batch(
        &self,
        request: GetSignableTransferV2Request,
    ) -> impl Future<Output = ApiResult<GetSignableTransferV2Response>> + Send;

    fn create_transfer_batch(
        &self,
        request: CreateTransferV2Request,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CreateTransferV2Response>> + Send;

    fn get_signable_exchange_transfer(
        &self,
        exchange_id: u64,
        request: GetSignableTransferV1Request,
    ) -> impl Future<Output = ApiResult<GetSignableTransferV1Response>> + Send;

    fn create_exchange_transfer(
        &self,
        exchange_id: u64,
        request: CreateTransferV1Request,
        eth_address: &str,
        eth_signature: &str,
    ) -> impl Future<Output = ApiResult<CreateExchangeTransferResponse>> + Send;
}

/// HTTP client for the public Immutable X API
pub struct ImxApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ImxApiClient {
    /// Create a new client against an API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .use_rustls_tls()
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode("GET", path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: Option<(&str, &str)>,
    ) -> ApiResult<T> {
        debug!(path, "POST");
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some((eth_address, eth_signature)) = auth {
            request = request
                .header("x-imx-eth-address", eth_address)
                .header("x-imx-eth-signature", eth_signature);
        }
        let response = request.send().await?;
        decode("POST", path, response).await
    }

    async fn delete_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: Option<(&str, &str)>,
    ) -> ApiResult<T> {
        debug!(path, "DELETE");
        let mut request = self.client.delete(self.url(path)).json(body);
        if let Some((eth_address, eth_signature)) = auth {
            request = request
                .header("x-imx-eth-address", eth_address)
                .header("x-imx-eth-signature", eth_signature);
        }
        let response = request.send().await?;
        decode("DELETE", path, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    method: &'static str,
    path: &str,
    response: reqwest::Response,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            method,
            path: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

impl ImxApi for ImxApiClient {
    async fn get_user(&self, eth_address: &str) -> ApiResult<GetUsersResponse> {
        self.get_json(&format!("/v1/users/{eth_address}")).await
    }

    async fn get_signable_registration_offchain(
        &self,
        request: GetSignableRegistrationRequest,
    ) -> ApiResult<GetSignableRegistrationOffchainResponse> {
        self.post_json("/v1/signable-registration-offchain", &request, None)
            .await
    }

    async fn get_signable_registration_onchain(
        &self,
        request: GetSignableRegistrationRequest,
    ) -> ApiResult<GetSignableRegistrationResponse> {
        self.post_json("/v1/signable-registration", &request, None)
            .await
    }

    async fn register_user(&self, request: RegisterUserRequest) -> ApiResult<RegisterUserResponse> {
        self.post_json("/v1/users", &request, None).await
    }

    async fn get_token_details(&self, token_address: &str) -> ApiResult<TokenDetailsResponse> {
        self.get_json(&format!("/v1/tokens/{token_address}")).await
    }

    async fn encode_asset(&self, request: EncodeAssetRequest) -> ApiResult<EncodeAssetResponse> {
        let path = if request.token.is_mintable() {
            "/v1/encode/mintable-asset"
        } else {
            "/v1/encode/asset"
        };
        self.post_json(path, &request, None).await
    }

    async fn get_mintable_token(
        &self,
        token_address: &str,
        token_id: &str,
    ) -> ApiResult<MintableTokenResponse> {
        self.get_json(&format!("/v1/mintable-token/{token_address}/{token_id}"))
            .await
    }

    async fn get_signable_deposit(
        &self,
        request: GetSignableDepositRequest,
    ) -> ApiResult<GetSignableDepositResponse> {
        self.post_json("/v1/signable-deposit-details", &request, None)
            .await
    }

    async fn get_signable_withdrawal(
        &self,
        request: GetSignableWithdrawalRequest,
    ) -> ApiResult<GetSignableWithdrawalResponse> {
        self.post_json("/v2/signable-withdrawal-details", &request, None)
            .await
    }

    async fn create_withdrawal(
        &self,
        request: CreateWithdrawalRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateWithdrawalResponse> {
        self.post_json("/v2/withdrawals", &request, Some((eth_address, eth_signature)))
            .await
    }

    async fn get_signable_order(
        &self,
        request: GetSignableOrderRequest,
    ) -> ApiResult<GetSignableOrderResponse> {
        self.post_json("/v3/signable-order-details", &request, None)
            .await
    }

    async fn create_order(
        &self,
        request: CreateOrderRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateOrderResponse> {
        self.post_json("/v3/orders", &request, Some((eth_address, eth_signature)))
            .await
    }

    async fn get_signable_cancel_order(
        &self,
        order_id: u64,
    ) -> ApiResult<GetSignableCancelOrderResponse> {
        self.post_json(
            "/v3/signable-cancel-order-details",
            &serde_json::json!({ "order_id": order_id }),
            None,
        )
        .await
    }

    async fn cancel_order(
        &self,
        request: CancelOrderRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CancelOrderResponse> {
        self.delete_json(
            &format!("/v3/orders/{}", request.order_id),
            &request,
            Some((eth_address, eth_signature)),
        )
        .await
    }

    async fn get_signable_trade(
        &self,
        request: GetSignableTradeRequest,
    ) -> ApiResult<GetSignableTradeResponse> {
        self.post_json("/v3/signable-trade-details", &request, None)
            .await
    }

    async fn create_trade(
        &self,
        request: CreateTradeRequest,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateTradeResponse> {
        self.post_json("/v3/trades", &request, Some((eth_address, eth_signature)))
            .await
    }

    async fn get_signable_transfer(
        &self,
        request: GetSignableTransferV1Request,
    ) -> ApiResult<GetSignableTransferV1Response> {
        self.post_json("/v1/signable-transfer-details", &request, None)
            .await
    }

    async fn create_transfer(
        &self,
        request: CreateTransferV1Request,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateTransferV1Response> {
        self.post_json("/v1/transfers", &request, Some((eth_address, eth_signature)))
            .await
    }

    async fn get_signable_transfer_batch(
        &self,
        request: GetSignableTransferV2Request,
    ) -> ApiResult<GetSignableTransferV2Response> {
        self.post_json("/v2/signable-transfer-details", &request, None)
            .await
    }

    async fn create_transfer_batch(
        &self,
        request: CreateTransferV2Request,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateTransferV2Response> {
        self.post_json("/v2/transfers", &request, Some((eth_address, eth_signature)))
            .await
    }

    async fn get_signable_exchange_transfer(
        &self,
        exchange_id: u64,
        request: GetSignableTransferV1Request,
    ) -> ApiResult<GetSignableTransferV1Response> {
        self.post_json(
            &format!("/v2/exchanges/{exchange_id}/signable-transfer-details"),
            &request,
            None,
        )
        .await
    }

    async fn create_exchange_transfer(
        &self,
        exchange_id: u64,
        request: CreateTransferV1Request,
        eth_address: &str,
        eth_signature: &str,
    ) -> ApiResult<CreateExchangeTransferResponse> {
        self.post_json(
            &format!("/v2/exchanges/{exchange_id}/transfers"),
            &request,
            Some((eth_address, eth_signature)),
        )
        .await
    }
}

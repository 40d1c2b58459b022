//! Trading workflows: orders, cancellations and trades
//!
//! Off-chain signed operations with no L1 transaction. The completion
//! request always echoes the numeric fields of the signable response
//! verbatim (vault ids, asset ids, nonce, expiration); the network
//! recomputes the payload hash from them and rejects a mismatch.

use crate::api::types::{CancelOrderRequest, CancelOrderResponse, CreateOrderRequest,
    CreateOrderResponse, CreateTradeRequest, CreateTradeResponse, GetSignableOrderRequest,
    GetSignableTradeRequest};
use crate::api::ImxApi;
use crate::error::Result;
use crate::signer::{EthSigner, StarkSigner};
use crate::types::OrderParams;
use tracing::info;

/// Create a sell order.
pub async fn create_order<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    params: &OrderParams,
) -> Result<CreateOrderResponse>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable = api
        .get_signable_order(GetSignableOrderRequest {
            user: eth_address.clone(),
            amount_sell: params.token_sell.signable_amount(params.amount_sell),
            token_sell: params.token_sell.to_signable(None),
            amount_buy: params.token_buy.signable_amount(params.amount_buy),
            token_buy: params.token_buy.to_signable(None),
            expiration_timestamp: params.expiration_timestamp,
        })
        .await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;
    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;

    let request = CreateOrderRequest::from_signable(signable, stark_signature);
    let response = api
        .create_order(request, &eth_address, &eth_signature)
        .await?;
    info!(order_id = response.order_id, "created order");
    Ok(response)
}

/// Cancel an order by id.
pub async fn cancel_order<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    order_id: u64,
) -> Result<CancelOrderResponse>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable = api.get_signable_cancel_order(order_id).await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;
    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;

    let request = CancelOrderRequest::from_signable(signable, stark_signature);
    let response = api
        .cancel_order(request, &eth_address, &eth_signature)
        .await?;
    info!(order_id = response.order_id, "cancelled order");
    Ok(response)
}

/// Fill a maker order.
pub async fn create_trade<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    order_id: u64,
) -> Result<CreateTradeResponse>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable = api
        .get_signable_trade(GetSignableTradeRequest {
            user: eth_address.clone(),
            order_id,
        })
        .await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;
    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;

    let request = CreateTradeRequest::from_signable(signable, order_id, stark_signature);
    let response = api
        .create_trade(request, &eth_address, &eth_signature)
        .await?;
    info!(trade_id = response.trade_id, "created trade");
    Ok(response)
}

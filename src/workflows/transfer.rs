//! Transfer workflows: off-chain signed asset movement
//!
//! Single transfers, batch transfers and exchange transfers share one
//! shape: fetch a signable response, sign its message with L1 and its
//! payload hash(es) with L2, submit with the response fields echoed
//! verbatim.

use crate::api::types::{CreateExchangeTransferResponse, CreateTransferV1Request,
    CreateTransferV1Response, CreateTransferV2Request, CreateTransferV2Response,
    GetSignableTransferV1Request, GetSignableTransferV2Request, SignableTransferDetails,
    TransferRequestItem};
use crate::api::ImxApi;
use crate::error::Result;
use crate::signer::{EthSigner, StarkSigner};
use crate::types::TransferParams;
use tracing::info;

/// Transfer one asset to one receiver.
pub async fn transfer<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    params: &TransferParams,
) -> Result<CreateTransferV1Response>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable = api
        .get_signable_transfer(GetSignableTransferV1Request {
            sender: eth_address.clone(),
            token: params.token.to_signable(None),
            amount: params.signable_amount(),
            receiver: params.receiver.to_string(),
        })
        .await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;
    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;

    let request = CreateTransferV1Request::from_signable(signable, stark_signature);
    let response = api
        .create_transfer(request, &eth_address, &eth_signature)
        .await?;
    info!(transfer_id = response.transfer_id, "submitted transfer");
    Ok(response)
}

/// Transfer N assets in one request. The L1 signer signs the batch's
/// combined message once; the L2 signer signs each item's payload hash in
/// request order.
pub async fn batch_transfer<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    transfers: &[TransferParams],
) -> Result<CreateTransferV2Response>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable_requests = transfers
        .iter()
        .map(|params| SignableTransferDetails {
            amount: params.signable_amount(),
            token: params.token.to_signable(None),
            receiver: params.receiver.to_string(),
        })
        .collect();

    let signable = api
        .get_signable_transfer_batch(GetSignableTransferV2Request {
            sender_ether_key: eth_address.clone(),
            signable_requests,
        })
        .await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;

    let mut requests = Vec::with_capacity(signable.signable_responses.len());
    for details in signable.signable_responses {
        let stark_signature = stark_signer.sign_message(&details.payload_hash).await?;
        requests.push(TransferRequestItem::from_signable(details, stark_signature));
    }

    let response = api
        .create_transfer_batch(
            CreateTransferV2Request {
                sender_stark_key: signable.sender_stark_key,
                requests,
            },
            &eth_address,
            &eth_signature,
        )
        .await?;
    info!(count = response.transfer_ids.len(), "submitted batch transfer");
    Ok(response)
}

/// Transfer one asset into an exchange's deposit flow.
pub async fn exchange_transfer<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    exchange_id: u64,
    params: &TransferParams,
) -> Result<CreateExchangeTransferResponse>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable = api
        .get_signable_exchange_transfer(
            exchange_id,
            GetSignableTransferV1Request {
                sender: eth_address.clone(),
                token: params.token.to_signable(None),
                amount: params.signable_amount(),
                receiver: params.receiver.to_string(),
            },
        )
        .await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;
    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;

    let request = CreateTransferV1Request::from_signable(signable, stark_signature);
    let response = api
        .create_exchange_transfer(exchange_id, request, &eth_address, &eth_signature)
        .await?;
    info!(
        transfer_id = response.transfer_id,
        exchange_id, "submitted exchange transfer"
    );
    Ok(response)
}

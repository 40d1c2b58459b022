//! Wallet signing channel
//!
//! Obtains L2 signatures from a wallet the host does not control directly.
//! In a browser build the far end is the sandboxed wallet iframe; in tests
//! and backend hosts it is any task holding the other halves of the duplex
//! channel pair.
//!
//! Every request carries a generated id, echoed by the far end in its
//! response. A correlation table maps ids to one-shot reply slots, so
//! concurrent requests of the same kind can never cross-resolve. Responses
//! with an unknown id or an unexpected payload kind are ignored and the
//! originating request stays pending. There is no timeout and no retry: a
//! request resolves when its response arrives or fails when the far end
//! hangs up.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, warn};

/// Paired request/response message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    ConnectWallet,
    SignMessage,
    GetYCoordinate,
    DisconnectWallet,
}

/// Request payloads posted to the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum RequestPayload {
    /// Link an L2 wallet to an L1 account. The signature is the L1 account's
    /// personal signature over the fixed consent message.
    #[serde(rename = "CONNECT_WALLET_REQUEST")]
    ConnectWallet {
        eth_address: String,
        signature: String,
    },
    /// Sign a payload hash with the wallet's Stark key
    #[serde(rename = "SIGN_MESSAGE_REQUEST")]
    SignMessage { message: String },
    /// Recover the y coordinate of a Stark public key
    #[serde(rename = "GET_Y_COORDINATE_REQUEST")]
    GetYCoordinate { stark_public_key: String },
    /// Tear down the wallet pairing
    #[serde(rename = "DISCONNECT_WALLET_REQUEST")]
    DisconnectWallet,
}

impl RequestPayload {
    /// The kind of response that answers this request
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ConnectWallet { .. } => EventKind::ConnectWallet,
            Self::SignMessage { .. } => EventKind::SignMessage,
            Self::GetYCoordinate { .. } => EventKind::GetYCoordinate,
            Self::DisconnectWallet => EventKind::DisconnectWallet,
        }
    }
}

/// Response payloads dispatched back by the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ResponsePayload {
    #[serde(rename = "CONNECT_WALLET_RESPONSE")]
    ConnectWallet { stark_public_key: String },
    #[serde(rename = "SIGN_MESSAGE_RESPONSE")]
    SignMessage { signature: String },
    #[serde(rename = "GET_Y_COORDINATE_RESPONSE")]
    GetYCoordinate { y_coordinate: String },
    #[serde(rename = "DISCONNECT_WALLET_RESPONSE")]
    DisconnectWallet,
}

impl ResponsePayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ConnectWallet { .. } => EventKind::ConnectWallet,
            Self::SignMessage { .. } => EventKind::SignMessage,
            Self::GetYCoordinate { .. } => EventKind::GetYCoordinate,
            Self::DisconnectWallet => EventKind::DisconnectWallet,
        }
    }
}

/// Envelope posted to the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: u64,
    #[serde(flatten)]
    pub payload: RequestPayload,
}

/// Envelope dispatched back by the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ResponsePayload>,
}

impl ResponseEnvelope {
    /// A successful response carrying a payload
    pub fn ok(id: u64, payload: ResponsePayload) -> Self {
        Self {
            id,
            success: true,
            error: None,
            payload: Some(payload),
        }
    }

    /// A failure response carrying the wallet's error message
    pub fn err(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            error: Some(message.into()),
            payload: None,
        }
    }
}

/// Channel failure modes.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The far end hung up before answering
    #[error("wallet channel closed")]
    Closed,
    /// The wallet answered `success: false`
    #[error("{0}")]
    Remote(String),
    /// The wallet answered successfully but with the wrong payload variant
    #[error("unexpected wallet response for {0:?}")]
    UnexpectedPayload(EventKind),
}

struct PendingRequest {
    expected: EventKind,
    reply: oneshot::Sender<ResponseEnvelope>,
}

type PendingTable = Arc<Mutex<HashMap<u64, PendingRequest>>>;

/// One established duplex connection to a wallet.
///
/// Constructed from the host-side halves of a channel pair; the wallet (or a
/// test double) holds the opposite halves. A background dispatcher routes
/// each inbound envelope to the request that is waiting for it.
pub struct WalletConnection {
    outbound: mpsc::UnboundedSender<RequestEnvelope>,
    pending: PendingTable,
    next_id: AtomicU64,
}

impl WalletConnection {
    /// Attach to a wallet over a duplex channel pair.
    pub fn new(
        outbound: mpsc::UnboundedSender<RequestEnvelope>,
        mut inbound: mpsc::UnboundedReceiver<ResponseEnvelope>,
    ) -> Self {
        let pending: PendingTable = Arc::new(Mutex::new(HashMap::new()));
        let table = Arc::clone(&pending);

        tokio::spawn(async move {
            while let Some(envelope) = inbound.recv().await {
                dispatch(&table, envelope).await;
            }
            // Far end hung up: fail everything still in flight.
            table.lock().await.clear();
        });

        Self {
            outbound,
            pending,
            next_id: AtomicU64::new(1),
        }
    }

    /// Post a request and wait for its correlated response payload.
    pub async fn request(&self, payload: RequestPayload) -> Result<ResponsePayload, ChannelError> {
        let kind = payload.kind();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();

        self.pending.lock().await.insert(
            id,
            PendingRequest {
                expected: kind,
                reply: reply_tx,
            },
        );

        debug!(id, ?kind, "posting wallet request");
        if self.outbound.send(RequestEnvelope { id, payload }).is_err() {
            self.pending.lock().await.remove(&id);
            return Err(ChannelError::Closed);
        }

        let envelope = reply_rx.await.map_err(|_| ChannelError::Closed)?;
        if !envelope.success {
            return Err(ChannelError::Remote(envelope.error.unwrap_or_else(|| {
                "wallet rejected the request".to_string()
            })));
        }
        envelope
            .payload
            .ok_or(ChannelError::UnexpectedPayload(kind))
    }

    /// Link the wallet to an L1 account, returning the Stark public key.
    pub async fn connect_wallet(
        &self,
        eth_address: &str,
        signature: &str,
    ) -> Result<String, ChannelError> {
        let payload = self
            .request(RequestPayload::ConnectWallet {
                eth_address: eth_address.to_string(),
                signature: signature.to_string(),
            })
            .await?;
        match payload {
            ResponsePayload::ConnectWallet { stark_public_key } => Ok(stark_public_key),
            other => Err(ChannelError::UnexpectedPayload(other.kind())),
        }
    }

    /// Sign a payload hash with the wallet's Stark key.
    pub async fn sign_message(&self, message: &str) -> Result<String, ChannelError> {
        let payload = self
            .request(RequestPayload::SignMessage {
                message: message.to_string(),
            })
            .await?;
        match payload {
            ResponsePayload::SignMessage { signature } => Ok(signature),
            other => Err(ChannelError::UnexpectedPayload(other.kind())),
        }
    }

    /// Recover the y coordinate of a Stark public key.
    pub async fn y_coordinate(&self, stark_public_key: &str) -> Result<String, ChannelError> {
        let payload = self
            .request(RequestPayload::GetYCoordinate {
                stark_public_key: stark_public_key.to_string(),
            })
            .await?;
        match payload {
            ResponsePayload::GetYCoordinate { y_coordinate } => Ok(y_coordinate),
            other => Err(ChannelError::UnexpectedPayload(other.kind())),
        }
    }

    /// Tear down the wallet pairing.
    pub async fn disconnect_wallet(&self) -> Result<(), ChannelError> {
        match self.request(RequestPayload::DisconnectWallet).await? {
            ResponsePayload::DisconnectWallet => Ok(()),
            other => Err(ChannelError::UnexpectedPayload(other.kind())),
        }
    }
}

async fn dispatch(table: &PendingTable, envelope: ResponseEnvelope) {
    let mut table = table.lock().await;
    let routable = match table.get(&envelope.id) {
        // A failure response may carry no payload; a success must carry the
        // kind the request expects.
        Some(pending) => envelope
            .payload
            .as_ref()
            .map_or(!envelope.success, |payload| {
                payload.kind() == pending.expected
            }),
        None => {
            warn!(id = envelope.id, "ignoring response for unknown request");
            return;
        }
    };

    if !routable {
        warn!(id = envelope.id, "ignoring response with mismatched kind");
        return;
    }

    // Consumed exactly once: the entry leaves the table with its response.
    if let Some(pending) = table.remove(&envelope.id) {
        let _ = pending.reply.send(envelope);
    }
}

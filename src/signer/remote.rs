//! Channel-bound Stark signer
//!
//! The L2 key stays inside the wallet; this signer only holds the public
//! key and the connection that produced it, and routes every signing call
//! through that same connection.

use super::StarkSigner;
use crate::channel::WalletConnection;
use eyre::Result;
use std::sync::Arc;
use tracing::debug;

/// L2 signer bound to an established [`WalletConnection`].
pub struct ChannelStarkSigner {
    connection: Arc<WalletConnection>,
    public_key: String,
}

impl ChannelStarkSigner {
    pub(crate) fn new(connection: Arc<WalletConnection>, public_key: String) -> Self {
        Self {
            connection,
            public_key,
        }
    }

    /// The connection this signer is bound to
    pub fn connection(&self) -> &Arc<WalletConnection> {
        &self.connection
    }

    /// Recover the y coordinate of this signer's public key from the wallet
    pub async fn y_coordinate(&self) -> Result<String> {
        Ok(self.connection.y_coordinate(&self.public_key).await?)
    }
}

impl StarkSigner for ChannelStarkSigner {
    fn public_key(&self) -> &str {
        &self.public_key
    }

    async fn sign_message(&self, payload_hash: &str) -> Result<String> {
        debug!(payload_hash, "requesting wallet signature");
        Ok(self.connection.sign_message(payload_hash).await?)
    }
}

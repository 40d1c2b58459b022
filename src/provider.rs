//! Wallet-connected provider
//!
//! Owns the connection procedure for browser-wallet setups: the caller
//! injects an L1 signer, the L2 signer is obtained over an established
//! [`WalletConnection`]. Failures during connection surface as
//! [`ProviderError::WalletConnection`]; failures on an already-connected
//! provider (signing, disconnecting) as
//! [`ProviderError::ProviderConnection`].

use crate::api::ImxApiClient;
use crate::channel::WalletConnection;
use crate::client::ImxClient;
use crate::config::{Environment, ProviderConfiguration};
use crate::constants::CONNECTION_CONSENT_MESSAGE;
use crate::error::{ProviderError, Result};
use crate::signer::{ChannelStarkSigner, EthSigner};
use std::ops::Deref;
use std::sync::Arc;
use tracing::info;

/// Provider composed of an injected L1 signer and a wallet-connected L2
/// signer. Dereferences to [`ImxClient`] for the workflow methods.
pub struct WalletProvider<E: EthSigner> {
    client: ImxClient<ImxApiClient, E, ChannelStarkSigner>,
    connection: Arc<WalletConnection>,
}

impl<E: EthSigner> std::fmt::Debug for WalletProvider<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletProvider").finish_non_exhaustive()
    }
}

impl<E: EthSigner> WalletProvider<E> {
    /// Establish a wallet connection for the given environment.
    ///
    /// Signs the fixed consent message with the L1 signer as proof of
    /// intent, exchanges it for the wallet's Stark public key, and binds an
    /// L2 signer to the connection that produced it.
    pub async fn connect(
        eth_signer: E,
        connection: Arc<WalletConnection>,
        environment: Environment,
    ) -> Result<Self, ProviderError> {
        let config = ProviderConfiguration::new(environment);
        Self::connect_with_config(eth_signer, connection, config).await
    }

    /// Establish a wallet connection against an explicit configuration
    /// (tests, custom deployments).
    pub async fn connect_with_config(
        eth_signer: E,
        connection: Arc<WalletConnection>,
        config: ProviderConfiguration,
    ) -> Result<Self, ProviderError> {
        let stark_signer = establish(&eth_signer, &connection)
            .await
            .map_err(|err| ProviderError::WalletConnection(format!("{err:#}")))?;

        let api = ImxApiClient::new(config.api_base_url.clone());
        Ok(Self {
            client: ImxClient::new(api, eth_signer, stark_signer, config),
            connection,
        })
    }

    /// The underlying client
    pub fn client(&self) -> &ImxClient<ImxApiClient, E, ChannelStarkSigner> {
        &self.client
    }

    /// Tear down the L2 pairing. Consumes the provider: afterwards the
    /// connection can no longer produce signatures.
    pub async fn disconnect(self) -> Result<(), ProviderError> {
        self.connection
            .disconnect_wallet()
            .await
            .map_err(|err| ProviderError::ProviderConnection(err.to_string()))?;
        info!("wallet disconnected");
        Ok(())
    }
}

impl<E: EthSigner> Deref for WalletProvider<E> {
    type Target = ImxClient<ImxApiClient, E, ChannelStarkSigner>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

async fn establish<E: EthSigner>(
    eth_signer: &E,
    connection: &Arc<WalletConnection>,
) -> Result<ChannelStarkSigner> {
    let signature = eth_signer
        .sign_message(CONNECTION_CONSENT_MESSAGE.as_bytes())
        .await?;
    let stark_public_key = connection
        .connect_wallet(&eth_signer.address().to_string(), &signature)
        .await?;
    info!(%stark_public_key, "wallet connected");
    Ok(ChannelStarkSigner::new(
        Arc::clone(connection),
        stark_public_key,
    ))
}

//! Local Stark-curve signer for L2

use super::StarkSigner;
use eyre::{Context, Result};
use starknet_crypto::{get_public_key, rfc6979_generate_k, sign, Felt};

/// L2 signer holding a Stark private key in-process.
///
/// Suitable for backend integrations and tests; browser-wallet setups use
/// [`crate::signer::ChannelStarkSigner`] instead so the key never leaves the
/// wallet.
pub struct LocalStarkSigner {
    private_key: Felt,
    public_key: String,
}

impl LocalStarkSigner {
    /// Create a new signer from a Stark private key hex string
    pub fn from_private_key(private_key: impl AsRef<str>) -> Result<Self> {
        let private_key = parse_felt(private_key.as_ref())?;
        let public_key = get_public_key(&private_key).to_hex_string();

        Ok(Self {
            private_key,
            public_key,
        })
    }
}

impl StarkSigner for LocalStarkSigner {
    fn public_key(&self) -> &str {
        &self.public_key
    }

    async fn sign_message(&self, payload_hash: &str) -> Result<String> {
        let hash = parse_felt(payload_hash)?;
        let k = rfc6979_generate_k(&hash, &self.private_key, None);
        let signature =
            sign(&self.private_key, &hash, &k).context("Stark signature failed")?;
        Ok(format!(
            "0x{}{}",
            hex::encode(signature.r.to_bytes_be()),
            hex::encode(signature.s.to_bytes_be())
        ))
    }
}

fn parse_felt(value: &str) -> Result<Felt> {
    let stripped = value.trim().trim_start_matches("0x");
    Felt::from_hex(&format!("0x{stripped}"))
        .with_context(|| format!("Invalid field element: {value}"))
}

//! Network configuration for the Immutable X SDK

use alloy::primitives::Address;

/// Target environment for the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Sandbox network (Sepolia).
    Sandbox,
    /// Production network (Ethereum mainnet).
    Production,
}

/// Immutable provider configuration: chain id, contract addresses and API base
/// for one environment.
#[derive(Debug, Clone)]
pub struct ProviderConfiguration {
    /// Environment this configuration was built for
    pub environment: Environment,
    /// Expected L1 chain id (1 for production, 11155111 for sandbox)
    pub chain_id: u64,
    /// Base URL of the public REST API
    pub api_base_url: String,
    /// StarkEx core contract address
    pub core_contract_address: Address,
    /// Legacy (v3 generation) registration contract address
    pub registration_contract_address: Address,
    /// Current (v4 generation) registration contract address
    pub registration_v4_contract_address: Address,
}

impl ProviderConfiguration {
    /// Resolve an environment to its address/API bundle.
    pub fn new(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self {
                environment,
                chain_id: 1,
                api_base_url: "https://api.x.immutable.com".to_string(),
                core_contract_address: "0x5FDCCA53617f4d2b9134B29090C87D01058e27e9"
                    .parse()
                    .unwrap(),
                registration_contract_address: "0x72a06bf2a1CE5e39cBA06c0CAb824960B587d64c"
                    .parse()
                    .unwrap(),
                registration_v4_contract_address: "0xac88A57943b5BBa1ecd931F8494cAd0B7F717590"
                    .parse()
                    .unwrap(),
            },
            Environment::Sandbox => Self {
                environment,
                chain_id: 11155111,
                api_base_url: "https://api.sandbox.x.immutable.com".to_string(),
                core_contract_address: "0x2d5C349fD8464DA06a3f90b4B0E9195F3d1b7F98"
                    .parse()
                    .unwrap(),
                registration_contract_address: "0xDbA6129C02E69405622fAdc3d5A7f8d23eac3b97"
                    .parse()
                    .unwrap(),
                registration_v4_contract_address: "0xd1527C65c6287EC5aB816D328eb83bB4CB690e92"
                    .parse()
                    .unwrap(),
            },
        }
    }

    /// Production mainnet configuration
    pub fn production() -> Self {
        Self::new(Environment::Production)
    }

    /// Sandbox configuration
    pub fn sandbox() -> Self {
        Self::new(Environment::Sandbox)
    }

    /// Override the API base URL
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Override the expected chain id
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Override the core contract address
    pub fn with_core_contract(mut self, address: Address) -> Self {
        self.core_contract_address = address;
        self
    }

    /// Override the legacy registration contract address
    pub fn with_registration_contract(mut self, address: Address) -> Self {
        self.registration_contract_address = address;
        self
    }

    /// Override the v4 registration contract address
    pub fn with_registration_v4_contract(mut self, address: Address) -> Self {
        self.registration_v4_contract_address = address;
        self
    }
}

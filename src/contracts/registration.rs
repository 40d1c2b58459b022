//! Registration contract bindings
//!
//! The same interface is deployed at two addresses: the legacy (v3
//! generation) contract and the current (v4 generation) one. Combined
//! register-and-withdraw entry points submit the off-chain operator
//! signature alongside the withdrawal so an unregistered account can exit
//! in a single transaction.

use alloy::sol;

sol! {
    /// Registration contract interface
    #[sol(rpc)]
    interface IRegistration {
        /// Whether a Stark key is bound to an Ethereum address.
        /// Reverts with USER_UNREGISTERED on some deployments instead of
        /// returning false.
        function isRegistered(uint256 starkKey) external view returns (bool);

        /// Register and withdraw a fungible asset in one transaction
        function registerAndWithdraw(
            address ethKey,
            uint256 starkKey,
            bytes calldata signature,
            uint256 assetType
        ) external;

        /// Register and withdraw an ERC721 token in one transaction
        function registerAndWithdrawNft(
            address ethKey,
            uint256 starkKey,
            bytes calldata signature,
            uint256 assetType,
            uint256 tokenId
        ) external;

        /// Register and withdraw a mintable token in one transaction
        function registerWithdrawAndMint(
            address ethKey,
            uint256 starkKey,
            bytes calldata signature,
            uint256 assetType,
            bytes calldata mintingBlob
        ) external;
    }
}

//! StarkEx core contract bindings

use alloy::sol;

sol! {
    /// Core contract interface: L1 entry points for moving funds in and out
    /// of the L2 state tree.
    #[sol(rpc)]
    interface ICore {
        /// Deposit ETH into the vault identified by (starkKey, assetType, vaultId).
        /// The deposited amount is the transaction value.
        function deposit(
            uint256 starkKey,
            uint256 assetType,
            uint256 vaultId
        ) external payable;

        /// Deposit a quantized ERC20 amount
        function depositERC20(
            uint256 starkKey,
            uint256 assetType,
            uint256 vaultId,
            uint256 quantizedAmount
        ) external;

        /// Deposit a single ERC721 token
        function depositNft(
            uint256 starkKey,
            uint256 assetType,
            uint256 vaultId,
            uint256 tokenId
        ) external;

        /// Withdraw the full pending balance of a fungible asset
        function withdraw(uint256 ownerKey, uint256 assetType) external;

        /// Withdraw a pending ERC721 token
        function withdrawNft(
            uint256 ownerKey,
            uint256 assetType,
            uint256 tokenId
        ) external;

        /// Withdraw a mintable token, minting it on L1 from the blob
        function withdrawAndMint(
            uint256 ownerKey,
            uint256 assetType,
            bytes calldata mintingBlob
        ) external;

        /// Pending withdrawal balance for an owner key and asset id
        function getWithdrawalBalance(
            uint256 ownerKey,
            uint256 assetId
        ) external view returns (uint256);

        /// Emitted when a withdrawal is performed
        event LogWithdrawalPerformed(
            uint256 ownerKey,
            uint256 assetType,
            uint256 nonQuantizedAmount,
            uint256 quantizedAmount,
            address recipient
        );
    }
}

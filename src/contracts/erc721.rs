//! ERC721 contract bindings

use alloy::sol;

sol! {
    /// Standard ERC721 interface (the subset the deposit flow touches)
    #[sol(rpc)]
    interface IERC721 {
        /// Whether an operator may manage all of an owner's tokens
        function isApprovedForAll(address owner, address operator) external view returns (bool);

        /// Grant or revoke an operator for all of the caller's tokens
        function setApprovalForAll(address operator, bool approved) external;

        /// Emitted when an operator is granted or revoked
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
    }
}

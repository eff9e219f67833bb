//! Contract interfaces used during checkout.

use alloy_sol_types::sol;

sol! {
    /// `EFPListRegistry.getListStorageLocation`, returns the packed location blob.
    #[derive(Debug)]
    function getListStorageLocation(uint256 tokenId) external view returns (bytes memory);

    /// `EFPListMinter.mintPrimaryListNoMeta`, mints a list pointing at `listStorageLocation`.
    #[derive(Debug)]
    function mintPrimaryListNoMeta(bytes calldata listStorageLocation) external payable;

    /// `EFPListRecords.applyListOps`, applies packed list ops to the list stored at `slot`.
    #[derive(Debug)]
    function applyListOps(uint256 slot, bytes[] calldata ops) external;
}

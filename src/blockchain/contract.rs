//! ABI bindings for the donation contract.

use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::network::TransactionBuilder;
use alloy::sol;
use alloy::sol_types::{SolCall, SolValue};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    /// Donation contract deployed per network.
    #[derive(Debug)]
    interface IFourDollar {
        /// Converts a native token amount to USD with 8 decimals.
        function calculateBaseAssetAmountInUSD(uint256 amount) external view returns (uint256);

        /// Accepts a donation of `msg.value`.
        function donate() external payable;
    }
}

/// Read-only call request for `calculateBaseAssetAmountInUSD(amount)`.
pub fn quote_call(contract: Address, amount: U256) -> TransactionRequest {
    let input = IFourDollar::calculateBaseAssetAmountInUSDCall { amount }.abi_encode();
    TransactionRequest::default()
        .with_to(contract)
        .with_input(Bytes::from(input))
}

/// Decode the `uint256` returned by the quote call.
pub fn decode_quote(output: &[u8]) -> BlockchainResult<U256> {
    U256::abi_decode(output).map_err(|e| BlockchainError::Decode(e.to_string()))
}

/// Call data for `donate()`.
pub fn donate_calldata() -> Bytes {
    Bytes::from(IFourDollar::donateCall {}.abi_encode())
}

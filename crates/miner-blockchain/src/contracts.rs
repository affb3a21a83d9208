use alloy::sol;

sol! {
    /// Staking-token surface used by the deposit pipeline: the token balance
    /// read and the stake-deposit write.
    #[sol(rpc)]
    contract StakingToken {
        function balanceOf(address account) external view returns (uint256);
        function depositStake() external;
    }
}

use anchor_lang::prelude::*;

#[error_code]
pub enum StakeError {
    #[msg("Invalid amount")]
    InvalidAmount = 1,
    #[msg("Start slot must be less than end slot")]
    InvalidWindow = 2,
    #[msg("Reward per slot must be greater than zero")]
    InvalidRewardRate = 3,
    #[msg("Unauthorized")]
    Unauthorized = 4,
    #[msg("Invalid mint provided")]
    InvalidMint = 5,
    #[msg("Invalid vault")]
    InvalidVault = 6,
    #[msg("Invalid token account")]
    InvalidTokenAccount = 7,

    #[msg("Staking config already initialized")]
    AlreadyInitialized = 8,
    #[msg("Nothing staked")]
    NothingStaked = 9,
    #[msg("Insufficient funds")]
    InsufficientFunds = 10,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow = 11,

    #[msg("Vault holdings do not cover recorded stakes")]
    CustodyInvariantViolation = 12,

    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 13,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 14,
}

use anchor_lang::prelude::*;

#[event]
pub struct StakingInitialized {
    pub owner: Pubkey,
    pub token_mint: Pubkey,
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub reward_per_slot: u64,
    pub start_slot: u64,
    pub end_slot: u64,
}

#[event]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub slot: u64,
}

#[event]
pub struct PointsClaimed {
    pub user: Pubkey,
    pub amount: u64,
    pub slot: u64,
}

#[event]
pub struct Unstaked {
    pub user: Pubkey,
    pub amount: u64,
    pub rewards: u64,
    pub total_staked: u64,
    pub slot: u64,
}

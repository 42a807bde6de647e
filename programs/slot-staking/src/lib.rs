pub mod account_structs;
/// # slot staking - Token Staking With Minted Rewards
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - The program upgrade authority, holding mint authority of the staking token,
///      initializes the program with a reward rate and a [start, end) slot window
///    - A custodial vault for the token is created, owned by the `auth` PDA
///    - Mint authority of the token moves to the `auth` PDA, permanently
///
/// 2. Staking Flow:
///    - User stakes tokens; they move from the user's token account into the vault
///    - The user's stake record is created on first stake
///    - Staking again first pays out what the existing stake has earned
///
/// 3. Rewards:
///    - A stake earns `staked_amount * reward_per_slot` for every slot inside
///      the window since its last checkpoint
///    - Claiming mints the earned amount of the staking token to the user
///
/// 4. Unstaking:
///    - Pays out earned rewards, then returns the full stake from the vault
///    - The stake record is zeroed and can be staked into again
///
/// The `auth` PDA has no private key; the program signs for it with its seeds.
/// Every instruction is atomic under Solana's transaction model.
pub mod error;
pub mod events;
mod guard;
pub mod pda;
pub mod processor;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("HfV2K6y7qyQYsucWF9jnyLDNNiAxik9AsHiftJMvh3ue");

#[program]
pub mod slot_staking {
    use super::*;

    /// Creates the config singleton and the vault for `token_mint`, and hands
    /// mint authority of `token_mint` to the program:
    /// - reward_per_slot: reward units per staked unit per slot
    /// - start_slot / end_slot: the window in which stakes accrue rewards
    pub fn initialize(
        ctx: Context<Initialize>,
        reward_per_slot: u64,
        start_slot: u64,
        end_slot: u64,
    ) -> Result<()> {
        processor::initialize(ctx, reward_per_slot, start_slot, end_slot)
    }

    /// Moves `amount` tokens from the user into the vault.
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        processor::stake(ctx, amount)
    }

    /// Mints the rewards accrued since the user's last checkpoint.
    pub fn claim_points(ctx: Context<ClaimPoints>) -> Result<()> {
        processor::claim_points(ctx)
    }

    /// Pays out accrued rewards and returns the user's whole stake.
    pub fn un_stake(ctx: Context<UnStake>) -> Result<()> {
        processor::un_stake(ctx)
    }

    /// Returns the reward ClaimPoints would mint at the current slot.
    pub fn pending_rewards(ctx: Context<PendingRewards>) -> Result<u64> {
        processor::pending_rewards(ctx)
    }
}

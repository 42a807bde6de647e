use crate::error::StakeError;
use anchor_lang::prelude::*;

pub const CONFIG_SEED: &[u8] = b"config";
pub const AUTHORITY_SEED: &[u8] = b"auth";
pub const VAULT_SEED: &[u8] = b"vault";
pub const USER_INFO_SEED: &[u8] = b"user-info";

#[account]
pub struct Config {
    pub owner: Pubkey,
    pub token_mint: Pubkey,
    pub reward_per_slot: u64,
    pub start_slot: u64,
    pub end_slot: u64,
    pub total_staked: u64,
    pub is_initialized: bool,
    pub auth_bump: u8,
    pub vault_bump: u8,
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 1 + 1 + 1 + 1;

    pub fn validate_params(reward_per_slot: u64, start_slot: u64, end_slot: u64) -> Result<()> {
        require!(start_slot < end_slot, StakeError::InvalidWindow);
        require!(reward_per_slot > 0, StakeError::InvalidRewardRate);
        Ok(())
    }

    /// Pins a slot into the reward window so accrual stops outside it.
    pub fn accrual_slot(&self, slot: u64) -> u64 {
        slot.max(self.start_slot).min(self.end_slot)
    }

    pub fn record_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakeError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_unstake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakeError::CustodyInvariantViolation)?;
        Ok(())
    }
}

/// Per-user position. A record with `staked_amount == 0` is unstaked but kept
/// around so the same address can be staked into again.
#[account]
pub struct UserStakeRecord {
    pub owner: Pubkey,
    pub staked_amount: u64,
    pub last_accrual_slot: u64,
    pub bump: u8,
}

impl UserStakeRecord {
    pub const LEN: usize = 8 + 32 + 8 + 8 + 1;

    pub fn is_staked(&self) -> bool {
        self.staked_amount > 0
    }

    /// Reward owed for the stake held since `last_accrual_slot`:
    /// `staked_amount * reward_per_slot * elapsed`, where `elapsed` only counts
    /// slots inside the config window. Fails closed on overflow.
    pub fn pending_reward(&self, config: &Config, current_slot: u64) -> Result<u64> {
        let elapsed = config
            .accrual_slot(current_slot)
            .saturating_sub(config.accrual_slot(self.last_accrual_slot));

        let reward = (self.staked_amount as u128)
            .checked_mul(config.reward_per_slot as u128)
            .and_then(|v| v.checked_mul(elapsed as u128))
            .ok_or(StakeError::ArithmeticOverflow)?;

        u64::try_from(reward).map_err(|_| error!(StakeError::ArithmeticOverflow))
    }

    fn checkpoint(&mut self, current_slot: u64) {
        self.last_accrual_slot = self.last_accrual_slot.max(current_slot);
    }

    /// Settles the reward for the current stake size and moves the checkpoint.
    fn settle(&mut self, config: &Config, current_slot: u64) -> Result<u64> {
        let reward = self.pending_reward(config, current_slot)?;
        self.checkpoint(current_slot);
        Ok(reward)
    }

    /// Adds `amount` to the position. Any reward earned by the previous stake
    /// size is settled first and returned for issuance.
    pub fn deposit(
        &mut self,
        owner: Pubkey,
        amount: u64,
        config: &Config,
        current_slot: u64,
    ) -> Result<u64> {
        require!(amount > 0, StakeError::InvalidAmount);

        let reward = if self.is_staked() {
            self.pending_reward(config, current_slot)?
        } else {
            0
        };

        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(StakeError::ArithmeticOverflow)?;
        self.owner = owner;
        self.checkpoint(current_slot);
        Ok(reward)
    }

    pub fn claim(&mut self, config: &Config, current_slot: u64) -> Result<u64> {
        require!(self.is_staked(), StakeError::NothingStaked);
        self.settle(config, current_slot)
    }

    /// Settles rewards and empties the position.
    /// Returns `(reward, withdrawn_amount)`.
    pub fn withdraw_all(&mut self, config: &Config, current_slot: u64) -> Result<(u64, u64)> {
        require!(self.is_staked(), StakeError::NothingStaked);
        let reward = self.settle(config, current_slot)?;
        let amount = self.staked_amount;
        self.staked_amount = 0;
        Ok((reward, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn config(reward_per_slot: u64, start_slot: u64, end_slot: u64) -> Config {
        Config {
            owner: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            reward_per_slot,
            start_slot,
            end_slot,
            total_staked: 0,
            is_initialized: true,
            auth_bump: 255,
            vault_bump: 254,
            bump: 253,
        }
    }

    fn empty_record() -> UserStakeRecord {
        UserStakeRecord {
            owner: Pubkey::default(),
            staked_amount: 0,
            last_accrual_slot: 0,
            bump: 255,
        }
    }

    #[test]
    fn rejects_bad_params() {
        assert_eq!(
            Config::validate_params(1, 10, 10).unwrap_err(),
            Error::from(StakeError::InvalidWindow)
        );
        assert_eq!(
            Config::validate_params(1, 11, 10).unwrap_err(),
            Error::from(StakeError::InvalidWindow)
        );
        assert_eq!(
            Config::validate_params(0, 0, 10).unwrap_err(),
            Error::from(StakeError::InvalidRewardRate)
        );
        assert!(Config::validate_params(1, 0, 1).is_ok());
    }

    #[test]
    fn stake_claim_unstake_scenario() {
        let config = config(1, 0, 1000);
        let user = Pubkey::new_unique();
        let mut record = empty_record();

        let reward = record.deposit(user, 1_000_000_000, &config, 0).unwrap();
        assert_eq!(reward, 0);
        assert_eq!(record.owner, user);
        assert_eq!(record.staked_amount, 1_000_000_000);
        assert_eq!(record.last_accrual_slot, 0);

        let reward = record.claim(&config, 10).unwrap();
        assert_eq!(reward, 10_000_000_000);
        assert_eq!(record.last_accrual_slot, 10);

        let (reward, amount) = record.withdraw_all(&config, 10).unwrap();
        assert_eq!(reward, 0);
        assert_eq!(amount, 1_000_000_000);
        assert_eq!(record.staked_amount, 0);
    }

    #[test]
    fn second_claim_in_same_slot_pays_nothing() {
        let config = config(3, 0, 1000);
        let mut record = empty_record();
        record.deposit(Pubkey::new_unique(), 50, &config, 100).unwrap();

        assert_eq!(record.claim(&config, 120).unwrap(), 50 * 3 * 20);
        assert_eq!(record.claim(&config, 120).unwrap(), 0);
        assert_eq!(record.last_accrual_slot, 120);
    }

    #[test]
    fn restake_settles_old_balance_first() {
        let config = config(2, 0, 1000);
        let user = Pubkey::new_unique();
        let mut record = empty_record();

        record.deposit(user, 100, &config, 10).unwrap();
        let reward = record.deposit(user, 400, &config, 20).unwrap();
        // only the original 100 earned over slots 10..20
        assert_eq!(reward, 100 * 2 * 10);
        assert_eq!(record.staked_amount, 500);
        assert_eq!(record.last_accrual_slot, 20);

        assert_eq!(record.claim(&config, 30).unwrap(), 500 * 2 * 10);
    }

    #[test]
    fn accrual_is_clamped_to_window() {
        let config = config(1, 100, 200);
        let mut record = empty_record();
        record.deposit(Pubkey::new_unique(), 10, &config, 50).unwrap();

        // before the window opens nothing accrues
        assert_eq!(record.pending_reward(&config, 90).unwrap(), 0);
        // only slots 100..200 count
        assert_eq!(record.pending_reward(&config, 500).unwrap(), 10 * 100);

        assert_eq!(record.claim(&config, 150).unwrap(), 10 * 50);
        assert_eq!(record.claim(&config, 900).unwrap(), 10 * 50);
        assert_eq!(record.claim(&config, 1000).unwrap(), 0);
    }

    #[test]
    fn checkpoint_never_moves_backwards() {
        let config = config(1, 0, 1000);
        let mut record = empty_record();
        record.deposit(Pubkey::new_unique(), 10, &config, 40).unwrap();

        assert_eq!(record.claim(&config, 30).unwrap(), 0);
        assert_eq!(record.last_accrual_slot, 40);
    }

    #[test]
    fn overflow_fails_closed() {
        let config = config(u64::MAX, 0, 1000);
        let mut record = empty_record();
        record.deposit(Pubkey::new_unique(), 2, &config, 0).unwrap();

        assert_eq!(
            record.claim(&config, 1).unwrap_err(),
            Error::from(StakeError::ArithmeticOverflow)
        );
        assert_eq!(record.last_accrual_slot, 0);
        assert_eq!(record.staked_amount, 2);
    }

    #[test]
    fn overflowing_reward_keeps_principal_staked() {
        let config = config(u64::MAX, 0, 1000);
        let mut record = empty_record();
        record.deposit(Pubkey::new_unique(), 2, &config, 0).unwrap();

        assert_eq!(
            record.withdraw_all(&config, 1).unwrap_err(),
            Error::from(StakeError::ArithmeticOverflow)
        );
        assert_eq!(record.staked_amount, 2);
        assert_eq!(record.last_accrual_slot, 0);
    }

    #[test]
    fn zero_elapsed_with_huge_rate_is_not_an_overflow() {
        let config = config(u64::MAX, 0, 1000);
        let mut record = empty_record();
        record.deposit(Pubkey::new_unique(), u64::MAX, &config, 5).unwrap();
        assert_eq!(record.claim(&config, 5).unwrap(), 0);
    }

    #[test]
    fn empty_record_cannot_claim_or_withdraw() {
        let config = config(1, 0, 1000);
        let mut record = empty_record();
        assert_eq!(
            record.claim(&config, 10).unwrap_err(),
            Error::from(StakeError::NothingStaked)
        );
        assert_eq!(
            record.withdraw_all(&config, 10).unwrap_err(),
            Error::from(StakeError::NothingStaked)
        );
    }

    #[test]
    fn zero_deposit_is_rejected() {
        let config = config(1, 0, 1000);
        let mut record = empty_record();
        assert_eq!(
            record.deposit(Pubkey::new_unique(), 0, &config, 1).unwrap_err(),
            Error::from(StakeError::InvalidAmount)
        );
        assert!(!record.is_staked());
    }

    #[test]
    fn unstaked_record_can_be_reused() {
        let config = config(1, 0, 1000);
        let user = Pubkey::new_unique();
        let mut record = empty_record();

        record.deposit(user, 10, &config, 0).unwrap();
        record.withdraw_all(&config, 100).unwrap();

        // time spent unstaked earns nothing
        let reward = record.deposit(user, 20, &config, 300).unwrap();
        assert_eq!(reward, 0);
        assert_eq!(record.last_accrual_slot, 300);
        assert_eq!(record.claim(&config, 310).unwrap(), 20 * 10);
    }

    #[test]
    fn total_staked_tracks_stakes_minus_unstakes() {
        let mut config = config(1, 0, 1000);
        config.record_stake(100).unwrap();
        config.record_stake(250).unwrap();
        config.record_unstake(100).unwrap();
        assert_eq!(config.total_staked, 250);

        assert_eq!(
            config.record_unstake(251).unwrap_err(),
            Error::from(StakeError::CustodyInvariantViolation)
        );
        assert_eq!(
            config.record_stake(u64::MAX).unwrap_err(),
            Error::from(StakeError::ArithmeticOverflow)
        );
    }
}

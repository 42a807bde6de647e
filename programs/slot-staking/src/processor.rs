use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::guard::{validate_mint_authority, validate_program_update_authority};
use crate::pda::authority_signer_seeds;
use crate::state::Config;
use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

pub fn initialize(
    ctx: Context<Initialize>,
    reward_per_slot: u64,
    start_slot: u64,
    end_slot: u64,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.owner)?;
    Config::validate_params(reward_per_slot, start_slot, end_slot)?;
    validate_mint_authority(
        ctx.accounts.token_mint.mint_authority.into(),
        &ctx.accounts.owner.key(),
    )?;

    let config = &mut ctx.accounts.config;
    config.owner = ctx.accounts.owner.key();
    config.token_mint = ctx.accounts.token_mint.key();
    config.reward_per_slot = reward_per_slot;
    config.start_slot = start_slot;
    config.end_slot = end_slot;
    config.total_staked = 0;
    config.is_initialized = true;
    config.auth_bump = ctx.bumps.authority;
    config.vault_bump = ctx.bumps.vault;
    config.bump = ctx.bumps.config;

    // One-way: after this only the authority PDA can mint the staking token.
    token::set_authority(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::SetAuthority {
                account_or_mint: ctx.accounts.token_mint.to_account_info(),
                current_authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        AuthorityType::MintTokens,
        Some(ctx.accounts.authority.key()),
    )?;

    msg!(
        "Staking initialized for mint {}: {} per slot over slots [{}, {})",
        ctx.accounts.token_mint.key(),
        reward_per_slot,
        start_slot,
        end_slot
    );

    emit!(StakingInitialized {
        owner: ctx.accounts.owner.key(),
        token_mint: ctx.accounts.token_mint.key(),
        vault: ctx.accounts.vault.key(),
        authority: ctx.accounts.authority.key(),
        reward_per_slot,
        start_slot,
        end_slot,
    });

    Ok(())
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakeError::InvalidAmount);
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        StakeError::InsufficientFunds
    );

    let slot = Clock::get()?.slot;
    let user = ctx.accounts.user.key();

    // Settle what the current stake earned before its size changes.
    let reward = ctx
        .accounts
        .user_info
        .deposit(user, amount, &ctx.accounts.config, slot)?;
    ctx.accounts.user_info.bump = ctx.bumps.user_info;

    if reward > 0 {
        mint_reward(
            &ctx.accounts.token_program,
            &ctx.accounts.token_mint,
            &ctx.accounts.user_token_account,
            &ctx.accounts.authority,
            ctx.accounts.config.auth_bump,
            reward,
        )?;
    }

    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )?;

    ctx.accounts.config.record_stake(amount)?;

    msg!(
        "User {} staked {} (position {}, reward settled {})",
        user,
        amount,
        ctx.accounts.user_info.staked_amount,
        reward
    );

    emit!(Staked {
        user,
        amount,
        total_staked: ctx.accounts.config.total_staked,
        slot,
    });

    Ok(())
}

pub fn claim_points(ctx: Context<ClaimPoints>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let reward = ctx.accounts.user_info.claim(&ctx.accounts.config, slot)?;

    if reward > 0 {
        mint_reward(
            &ctx.accounts.token_program,
            &ctx.accounts.token_mint,
            &ctx.accounts.user_token_account,
            &ctx.accounts.authority,
            ctx.accounts.config.auth_bump,
            reward,
        )?;
        msg!("User {} claimed {} points", ctx.accounts.user.key(), reward);
    } else {
        msg!("No points accrued for user {}", ctx.accounts.user.key());
    }

    emit!(PointsClaimed {
        user: ctx.accounts.user.key(),
        amount: reward,
        slot,
    });

    Ok(())
}

pub fn un_stake(ctx: Context<UnStake>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let (reward, amount) = ctx
        .accounts
        .user_info
        .withdraw_all(&ctx.accounts.config, slot)?;

    require!(
        ctx.accounts.vault.amount >= amount,
        StakeError::CustodyInvariantViolation
    );
    ctx.accounts.config.record_unstake(amount)?;

    if reward > 0 {
        mint_reward(
            &ctx.accounts.token_program,
            &ctx.accounts.token_mint,
            &ctx.accounts.user_token_account,
            &ctx.accounts.authority,
            ctx.accounts.config.auth_bump,
            reward,
        )?;
    }

    let bump = [ctx.accounts.config.auth_bump];
    let seeds = authority_signer_seeds(&bump);
    let signer = &[&seeds[..]];
    let transfer_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_accounts,
            signer,
        ),
        amount,
    )?;

    msg!(
        "User {} unstaked {} with {} points",
        ctx.accounts.user.key(),
        amount,
        reward
    );

    emit!(Unstaked {
        user: ctx.accounts.user.key(),
        amount,
        rewards: reward,
        total_staked: ctx.accounts.config.total_staked,
        slot,
    });

    Ok(())
}

pub fn pending_rewards(ctx: Context<PendingRewards>) -> Result<u64> {
    let slot = Clock::get()?.slot;
    let pending = ctx
        .accounts
        .user_info
        .pending_reward(&ctx.accounts.config, slot)?;

    msg!("User {} has {} pending points", ctx.accounts.user.key(), pending);

    Ok(pending)
}

fn mint_reward<'info>(
    token_program: &Program<'info, Token>,
    mint: &Account<'info, Mint>,
    to: &Account<'info, TokenAccount>,
    authority: &UncheckedAccount<'info>,
    auth_bump: u8,
    amount: u64,
) -> Result<()> {
    let bump = [auth_bump];
    let seeds = authority_signer_seeds(&bump);
    let signer = &[&seeds[..]];
    let cpi_accounts = MintTo {
        mint: mint.to_account_info(),
        to: to.to_account_info(),
        authority: authority.to_account_info(),
    };
    token::mint_to(
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer),
        amount,
    )
}

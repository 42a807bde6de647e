use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use anchor_lang::solana_program::bpf_loader_upgradeable;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Config::LEN,
        seeds = [CONFIG_SEED],
        bump,
        constraint = !config.is_initialized @ StakeError::AlreadyInitialized
    )]
    pub config: Account<'info, Config>,

    /// Mint authority is checked in the handler so a second initialize
    /// reports `AlreadyInitialized` rather than an authority mismatch.
    #[account(mut)]
    pub token_mint: Account<'info, Mint>,

    /// CHECK: Keyless PDA that becomes the mint authority of `token_mint` and
    /// the owner of `vault`. Validated by seeds; it never holds data.
    #[account(
        seeds = [AUTHORITY_SEED],
        bump
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [VAULT_SEED, token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = authority
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ StakeError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserStakeRecord::LEN,
        seeds = [USER_INFO_SEED, user.key().as_ref()],
        bump
    )]
    pub user_info: Account<'info, UserStakeRecord>,

    #[account(
        mut,
        address = config.token_mint @ StakeError::InvalidMint,
        constraint = token_mint.mint_authority == Some(authority.key()).into() @ StakeError::Unauthorized
    )]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_account.mint == config.token_mint @ StakeError::InvalidMint,
        constraint = user_token_account.owner == user.key() @ StakeError::InvalidTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, token_mint.key().as_ref()],
        bump = config.vault_bump,
        constraint = vault.owner == authority.key() @ StakeError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    /// CHECK: Authority PDA, validated by seeds. Signs reward mints.
    #[account(
        seeds = [AUTHORITY_SEED],
        bump = config.auth_bump
    )]
    pub authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimPoints<'info> {
    pub user: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [USER_INFO_SEED, user.key().as_ref()],
        bump = user_info.bump
    )]
    pub user_info: Account<'info, UserStakeRecord>,

    #[account(
        mut,
        address = config.token_mint @ StakeError::InvalidMint,
        constraint = token_mint.mint_authority == Some(authority.key()).into() @ StakeError::Unauthorized
    )]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_account.mint == config.token_mint @ StakeError::InvalidMint,
        constraint = user_token_account.owner == user.key() @ StakeError::InvalidTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// CHECK: Authority PDA, validated by seeds. Signs reward mints.
    #[account(
        seeds = [AUTHORITY_SEED],
        bump = config.auth_bump
    )]
    pub authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct UnStake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    // Zeroed, not closed: the record stays as the user's re-stakeable slot.
    #[account(
        mut,
        seeds = [USER_INFO_SEED, user.key().as_ref()],
        bump = user_info.bump
    )]
    pub user_info: Account<'info, UserStakeRecord>,

    #[account(
        mut,
        address = config.token_mint @ StakeError::InvalidMint,
        constraint = token_mint.mint_authority == Some(authority.key()).into() @ StakeError::Unauthorized
    )]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_account.mint == config.token_mint @ StakeError::InvalidMint,
        constraint = user_token_account.owner == user.key() @ StakeError::InvalidTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, token_mint.key().as_ref()],
        bump = config.vault_bump,
        constraint = vault.owner == authority.key() @ StakeError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    /// CHECK: Authority PDA, validated by seeds. Owns the vault and signs
    /// both the withdrawal transfer and reward mints.
    #[account(
        seeds = [AUTHORITY_SEED],
        bump = config.auth_bump
    )]
    pub authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct PendingRewards<'info> {
    pub user: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [USER_INFO_SEED, user.key().as_ref()],
        bump = user_info.bump
    )]
    pub user_info: Account<'info, UserStakeRecord>,
}

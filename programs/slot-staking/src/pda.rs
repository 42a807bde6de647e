//! Address derivation for the program's keyless accounts.
//!
//! None of these addresses has a private key. The program proves authority over
//! them by re-deriving the address from the same seeds and signing CPIs with
//! `[seeds.., bump]`.

use crate::state::{AUTHORITY_SEED, CONFIG_SEED, USER_INFO_SEED, VAULT_SEED};
use anchor_lang::prelude::*;

pub fn find_config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

pub fn find_authority_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AUTHORITY_SEED], program_id)
}

pub fn find_vault_address(token_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, token_mint.as_ref()], program_id)
}

pub fn find_user_info_address(user: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_INFO_SEED, user.as_ref()], program_id)
}

/// Signer seeds for CPIs authorized by the authority delegate.
pub fn authority_signer_seeds(bump: &[u8; 1]) -> [&[u8]; 2] {
    [AUTHORITY_SEED, bump]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let (a, bump_a) = find_authority_address(&crate::ID);
        let (b, bump_b) = find_authority_address(&crate::ID);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }

    #[test]
    fn singletons_do_not_collide() {
        let (config, _) = find_config_address(&crate::ID);
        let (authority, _) = find_authority_address(&crate::ID);
        assert_ne!(config, authority);
    }

    #[test]
    fn user_records_are_distinct_per_user() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        assert_ne!(
            find_user_info_address(&alice, &crate::ID).0,
            find_user_info_address(&bob, &crate::ID).0
        );
    }

    #[test]
    fn vaults_are_distinct_per_mint() {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        assert_ne!(
            find_vault_address(&mint_a, &crate::ID).0,
            find_vault_address(&mint_b, &crate::ID).0
        );
    }

    #[test]
    fn signer_seeds_rederive_the_authority() {
        let (authority, bump) = find_authority_address(&crate::ID);
        let bump = [bump];
        let seeds = authority_signer_seeds(&bump);
        let derived = Pubkey::create_program_address(&seeds, &crate::ID).unwrap();
        assert_eq!(derived, authority);
    }
}

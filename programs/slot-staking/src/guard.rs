use crate::error::StakeError;
use anchor_lang::prelude::*;

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

/// Only the upgrade authority of this program may claim the config singleton.
pub fn validate_program_update_authority(
    program_data_account: &UncheckedAccount,
    owner: &Signer,
) -> Result<()> {
    let program_data = program_data_account
        .try_borrow_data()
        .map_err(|_| StakeError::InvalidProgramData)?;

    let loader_state = bincode::deserialize::<UpgradeableLoaderState>(&program_data)
        .map_err(|_| StakeError::InvalidProgramData)?;

    match loader_state {
        UpgradeableLoaderState::ProgramData {
            upgrade_authority_address: Some(update_authority),
            ..
        } => {
            require_keys_eq!(owner.key(), update_authority, StakeError::Unauthorized);
            Ok(())
        }
        UpgradeableLoaderState::ProgramData {
            upgrade_authority_address: None,
            ..
        } => Err(StakeError::NoUpgradeAuthority.into()),
        _ => Err(StakeError::InvalidProgramData.into()),
    }
}

/// The mint's current authority must be the signer handing it over.
pub fn validate_mint_authority(mint_authority: Option<Pubkey>, owner: &Pubkey) -> Result<()> {
    match mint_authority {
        Some(authority) if authority == *owner => Ok(()),
        _ => Err(StakeError::Unauthorized.into()),
    }
}

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::{self, AssociatedToken},
    token::{self, Burn, Mint, Token, TokenAccount, Transfer},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Burn whole composite units and withdraw the proportional underlying
/// amounts from custody
///
/// Remaining accounts, in config slot order:
///   [asset_mint_0..n-1, custody_vault_0..n-1, user_token_0..n-1]
/// where user_token_i is the user's associated token account for
/// asset_mint_i, created here when missing.
#[derive(Accounts)]
pub struct RedeemAndWithdraw<'info> {
    /// User redeeming composite tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Composite token mint
    #[account(
        mut,
        address = config.composite_mint @ VaultError::WrongCompositeMint,
    )]
    pub composite_mint: Account<'info, Mint>,

    /// Basket config PDA; redeeming against an unknown composite mint fails
    /// account resolution (the ConfigNotFound case)
    #[account(
        seeds = [CONFIG_SEED, composite_mint.key().as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, BasketConfig>,

    /// Custody authority PDA that owns the custody vaults
    /// CHECK: PDA validated by seeds
    #[account(
        seeds = [CUSTODY_AUTHORITY_SEED, config.key().as_ref()],
        bump = config.custody_bump,
    )]
    pub custody_authority: UncheckedAccount<'info>,

    /// User's composite token account to burn from
    #[account(
        mut,
        constraint = user_composite_account.mint == config.composite_mint @ VaultError::InvalidMint,
        constraint = user_composite_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_composite_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, RedeemAndWithdraw<'info>>,
    units: u64,
) -> Result<()> {
    // CHECKS: validate the intent before any ledger call
    require!(units > 0, VaultError::NonPositiveAmount);

    let config = &ctx.accounts.config;
    require!(
        config.phase() == BasketPhase::Active,
        VaultError::ConfigNotFound
    );

    let n = config.num_assets as usize;
    require!(
        ctx.remaining_accounts.len() >= n * 3,
        VaultError::MissingAccounts
    );

    let asset_mint_infos = &ctx.remaining_accounts[..n];
    let custody_vault_infos = &ctx.remaining_accounts[n..n * 2];
    let user_token_infos = &ctx.remaining_accounts[n * 2..n * 3];

    let composite_amount = config.composite_amount(units)?;
    require!(
        ctx.accounts.user_composite_account.amount >= composite_amount,
        VaultError::InsufficientBalance
    );

    // Compute every payout and validate account wiring up front
    let custody_authority_key = ctx.accounts.custody_authority.key();
    let mut payouts = [0u64; MAX_ASSETS];
    for i in 0..n {
        payouts[i] = config.payout_amount(i, units)?;

        require!(
            asset_mint_infos[i].key() == config.asset_mints[i],
            VaultError::AssetSetMismatch
        );
        let expected_vault = associated_token::get_associated_token_address(
            &custody_authority_key,
            &config.asset_mints[i],
        );
        require!(
            custody_vault_infos[i].key() == expected_vault,
            VaultError::InvalidOwner
        );
    }

    // INTERACTIONS: burn the composite, then pay out each slot
    let burn_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Burn {
            mint: ctx.accounts.composite_mint.to_account_info(),
            from: ctx.accounts.user_composite_account.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    token::burn(burn_ctx, composite_amount)?;

    let config_key = ctx.accounts.config.key();
    let custody_bump = ctx.accounts.config.custody_bump;
    let custody_seeds: &[&[u8]] = &[
        CUSTODY_AUTHORITY_SEED,
        config_key.as_ref(),
        &[custody_bump],
    ];
    let signer_seeds = &[&custody_seeds[..]];

    for i in 0..n {
        associated_token::create_idempotent(CpiContext::new(
            ctx.accounts.associated_token_program.to_account_info(),
            associated_token::Create {
                payer: ctx.accounts.user.to_account_info(),
                associated_token: user_token_infos[i].to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
                mint: asset_mint_infos[i].to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
        ))?;

        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: custody_vault_infos[i].to_account_info(),
                to: user_token_infos[i].to_account_info(),
                authority: ctx.accounts.custody_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, payouts[i])?;
    }

    emit!(Redeemed {
        config: config_key,
        user: ctx.accounts.user.key(),
        composite_mint: ctx.accounts.composite_mint.key(),
        units,
        composite_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

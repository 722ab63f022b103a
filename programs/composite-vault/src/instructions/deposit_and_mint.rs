use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::{
    associated_token::{self, AssociatedToken},
    token::{self, Mint, MintTo, Token, TokenAccount, Transfer},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Deposit a basket of underlying tokens and mint the composite token
///
/// The first deposit for a composite mint creates the basket config and
/// fixes the per-unit composition; every later deposit must restate the
/// composition verbatim and supply an exact whole-unit multiple of it.
///
/// Remaining accounts, in config slot order:
///   [asset_mint_0..n-1, custody_vault_0..n-1, user_token_0..n-1]
/// where custody_vault_i is the associated token account of
/// (custody_authority, asset_mint_i), created here when missing.
#[derive(Accounts)]
#[instruction(amounts_per_unit: Vec<u64>, amounts: Vec<u64>, composite_decimals: u8)]
pub struct DepositAndMint<'info> {
    /// User depositing the basket
    #[account(mut)]
    pub user: Signer<'info>,

    /// Composite token mint, created on first deposit with the custody
    /// authority as mint and freeze authority
    #[account(
        init_if_needed,
        payer = user,
        mint::decimals = composite_decimals,
        mint::authority = custody_authority,
        mint::freeze_authority = custody_authority,
    )]
    pub composite_mint: Account<'info, Mint>,

    /// Basket config PDA, one per composite mint, created on first deposit
    #[account(
        init_if_needed,
        payer = user,
        space = CONFIG_SIZE,
        seeds = [CONFIG_SEED, composite_mint.key().as_ref()],
        bump,
    )]
    pub config: Account<'info, BasketConfig>,

    /// Custody authority PDA: mint authority for the composite mint and
    /// owner of every custody vault token account
    /// CHECK: PDA validated by seeds
    #[account(
        seeds = [CUSTODY_AUTHORITY_SEED, config.key().as_ref()],
        bump,
    )]
    pub custody_authority: UncheckedAccount<'info>,

    /// User's composite token account (created if missing)
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = composite_mint,
        associated_token::authority = user,
    )]
    pub user_composite_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, DepositAndMint<'info>>,
    amounts_per_unit: Vec<u64>,
    amounts: Vec<u64>,
    composite_decimals: u8,
) -> Result<()> {
    let is_init = ctx.accounts.config.phase() == BasketPhase::Uninitialized;

    let n = if is_init {
        amounts_per_unit.len()
    } else {
        ctx.accounts.config.num_assets as usize
    };
    require!(n >= 1 && n <= MAX_ASSETS, VaultError::InvalidAssetCount);
    require!(
        ctx.remaining_accounts.len() >= n * 3,
        VaultError::MissingAccounts
    );

    let asset_mint_infos = &ctx.remaining_accounts[..n];
    let custody_vault_infos = &ctx.remaining_accounts[n..n * 2];
    let user_token_infos = &ctx.remaining_accounts[n * 2..n * 3];

    let asset_mints: Vec<Pubkey> = asset_mint_infos.iter().map(|info| info.key()).collect();

    // CHECKS: establish or validate the composition before touching anything
    if is_init {
        BasketConfig::validate_new_composition(&asset_mints, &amounts_per_unit)?;

        // sanity checks on the newly created composite mint
        require!(
            ctx.accounts.composite_mint.mint_authority
                == COption::Some(ctx.accounts.custody_authority.key()),
            VaultError::InvalidMintAuthority
        );
        require!(
            ctx.accounts.composite_mint.decimals == composite_decimals,
            VaultError::DecimalsMismatch
        );
    } else {
        let config = &ctx.accounts.config;
        require!(
            config.composite_mint == ctx.accounts.composite_mint.key(),
            VaultError::WrongCompositeMint
        );
        config.check_asset_set(&asset_mints)?;
        config.check_composition(&amounts_per_unit)?;
    }

    // EFFECTS: record the new config before any external call
    if is_init {
        let config = &mut ctx.accounts.config;
        config.authority = ctx.accounts.user.key();
        config.composite_mint = ctx.accounts.composite_mint.key();
        config.custody_authority = ctx.accounts.custody_authority.key();
        config.num_assets = n as u8;
        config.decimals = composite_decimals;
        for i in 0..n {
            config.asset_mints[i] = asset_mints[i];
            config.amounts_per_unit[i] = amounts_per_unit[i];
        }
        config.bump = ctx.bumps.config;
        config.custody_bump = ctx.bumps.custody_authority;

        msg!(
            "basket config created: num_assets={} decimals={}",
            n,
            composite_decimals
        );
    }

    let units = ctx.accounts.config.basket_multiple(&amounts)?;
    let composite_amount = ctx.accounts.config.composite_amount(units)?;

    // Fail fast on account wiring and balances: every custody vault must be
    // the custody authority's ATA for its slot and every user account must
    // cover its deposit amount, before the first transfer is issued.
    let custody_authority_key = ctx.accounts.custody_authority.key();
    for i in 0..n {
        let expected_vault =
            associated_token::get_associated_token_address(&custody_authority_key, &asset_mints[i]);
        require!(
            custody_vault_infos[i].key() == expected_vault,
            VaultError::InvalidOwner
        );

        let user_token = Account::<TokenAccount>::try_from(&user_token_infos[i])?;
        require!(user_token.mint == asset_mints[i], VaultError::InvalidMint);
        require!(
            user_token.owner == ctx.accounts.user.key(),
            VaultError::InvalidOwner
        );
        require!(
            user_token.amount >= amounts[i],
            VaultError::InsufficientBalance
        );
    }

    // INTERACTIONS: create missing custody vaults, then move the basket in
    for i in 0..n {
        associated_token::create_idempotent(CpiContext::new(
            ctx.accounts.associated_token_program.to_account_info(),
            associated_token::Create {
                payer: ctx.accounts.user.to_account_info(),
                associated_token: custody_vault_infos[i].to_account_info(),
                authority: ctx.accounts.custody_authority.to_account_info(),
                mint: asset_mint_infos[i].to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
        ))?;
    }

    for i in 0..n {
        let transfer_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: user_token_infos[i].to_account_info(),
                to: custody_vault_infos[i].to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        );
        token::transfer(transfer_ctx, amounts[i])?;
    }

    // Mint units * 10^decimals composite smallest units to the user
    let config_key = ctx.accounts.config.key();
    let custody_bump = ctx.accounts.config.custody_bump;
    let custody_seeds: &[&[u8]] = &[
        CUSTODY_AUTHORITY_SEED,
        config_key.as_ref(),
        &[custody_bump],
    ];
    let signer_seeds = &[&custody_seeds[..]];

    let mint_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        MintTo {
            mint: ctx.accounts.composite_mint.to_account_info(),
            to: ctx.accounts.user_composite_account.to_account_info(),
            authority: ctx.accounts.custody_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::mint_to(mint_ctx, composite_amount)?;

    let timestamp = Clock::get()?.unix_timestamp;
    if is_init {
        emit!(BasketInitialized {
            config: config_key,
            authority: ctx.accounts.user.key(),
            composite_mint: ctx.accounts.composite_mint.key(),
            num_assets: n as u8,
            decimals: composite_decimals,
            timestamp,
        });
    }
    emit!(Deposited {
        config: config_key,
        user: ctx.accounts.user.key(),
        composite_mint: ctx.accounts.composite_mint.key(),
        units,
        composite_amount,
        timestamp,
    });

    Ok(())
}

// Composite Vault - fixed-composition basket token program on Solana
// The first deposit for a composite mint fixes the basket's per-unit
// composition; every later deposit must be an exact whole-unit multiple,
// and composite supply always corresponds 1:1 to custodied balances.

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod composite_vault {
    use super::*;

    /// Deposit a basket of underlying tokens and mint the composite token
    ///
    /// On the first call for a composite mint this creates the mint, the
    /// basket config, and the custody vaults, recording amounts_per_unit
    /// verbatim as the permanent composition. On later calls the caller
    /// must restate the stored composition and deposit an exact whole-unit
    /// multiple of it; the same multiple is minted in composite units.
    pub fn deposit_and_mint<'info>(
        ctx: Context<'_, '_, 'info, 'info, DepositAndMint<'info>>,
        amounts_per_unit: Vec<u64>,
        amounts: Vec<u64>,
        composite_decimals: u8,
    ) -> Result<()> {
        instructions::deposit_and_mint::handler(ctx, amounts_per_unit, amounts, composite_decimals)
    }

    /// Burn whole composite units and withdraw the proportional underlying
    /// amounts from custody
    pub fn redeem_and_withdraw<'info>(
        ctx: Context<'_, '_, '_, 'info, RedeemAndWithdraw<'info>>,
        units: u64,
    ) -> Result<()> {
        instructions::redeem_and_withdraw::handler(ctx, units)
    }

    /// Read-only basket summary for off-chain reporting (CPI composable)
    pub fn config_summary(ctx: Context<ConfigView>) -> Result<()> {
        instructions::view::config_summary(ctx)
    }
}

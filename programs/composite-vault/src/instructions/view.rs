use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;
use anchor_spl::token::Mint;

use crate::{errors::VaultError, state::BasketConfig};

#[derive(Accounts)]
pub struct ConfigView<'info> {
    pub config: Account<'info, BasketConfig>,

    #[account(address = config.composite_mint @ VaultError::WrongCompositeMint)]
    pub composite_mint: Account<'info, Mint>,
}

/// Read-only summary of one basket config for off-chain reporting.
///
/// Return data layout (little-endian): composite mint (32), asset count (1),
/// composite supply (8), decimals (1). Indexers walk program accounts for
/// the full listing; this view is not part of the transactional core.
pub fn config_summary(ctx: Context<ConfigView>) -> Result<()> {
    let config = &ctx.accounts.config;
    let composite_mint = &ctx.accounts.composite_mint;

    let mut data = Vec::with_capacity(32 + 1 + 8 + 1);
    data.extend_from_slice(config.composite_mint.as_ref());
    data.push(config.num_assets);
    data.extend_from_slice(&composite_mint.supply.to_le_bytes());
    data.push(config.decimals);

    set_return_data(&data);
    Ok(())
}

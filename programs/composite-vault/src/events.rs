use anchor_lang::prelude::*;

/// Event emitted when the first deposit creates a basket config
#[event]
pub struct BasketInitialized {
    pub config: Pubkey,
    pub authority: Pubkey,
    pub composite_mint: Pubkey,
    pub num_assets: u8,
    pub decimals: u8,
    pub timestamp: i64,
}

/// Event emitted when a basket deposit mints composite tokens
#[event]
pub struct Deposited {
    pub config: Pubkey,
    pub user: Pubkey,
    pub composite_mint: Pubkey,
    pub units: u64,
    pub composite_amount: u64,
    pub timestamp: i64,
}

/// Event emitted when composite tokens are redeemed for the underlying basket
#[event]
pub struct Redeemed {
    pub config: Pubkey,
    pub user: Pubkey,
    pub composite_mint: Pubkey,
    pub units: u64,
    pub composite_amount: u64,
    pub timestamp: i64,
}

// Constants for the Composite Vault program

/// Maximum number of underlying assets in one basket
pub const MAX_ASSETS: usize = 8;

/// Seed for basket config PDA
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed for custody authority PDA
pub const CUSTODY_AUTHORITY_SEED: &[u8] = b"custody";

/// Space for BasketConfig account (8 discriminator + 32 authority +
/// 32 composite_mint + 32 custody_authority + 1 num_assets + 1 decimals +
/// 32 * MAX_ASSETS asset_mints + 8 * MAX_ASSETS amounts_per_unit +
/// 1 bump + 1 custody_bump)
pub const CONFIG_SIZE: usize = 8 + 32 + 32 + 32 + 1 + 1 + (32 * MAX_ASSETS) + (8 * MAX_ASSETS) + 1 + 1;

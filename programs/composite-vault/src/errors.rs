use anchor_lang::prelude::*;

/// Custom error codes for the Composite Vault program
#[error_code]
pub enum VaultError {
    #[msg("No basket config exists for this composite mint")]
    ConfigNotFound,

    #[msg("A basket config already exists for this composite mint")]
    ConfigAlreadyExists,

    #[msg("Asset count must be between 1 and the supported maximum")]
    InvalidAssetCount,

    #[msg("The same asset mint is listed more than once")]
    DuplicateAsset,

    #[msg("Per-unit and deposit amounts must be greater than zero")]
    NonPositiveAmount,

    #[msg("Asset list does not match the basket composition")]
    AssetSetMismatch,

    #[msg("Deposit amounts do not reduce to one common whole-unit multiple")]
    RatioMismatch,

    #[msg("Token balance is insufficient for this operation")]
    InsufficientBalance,

    #[msg("Composite mint authority must be the custody authority")]
    InvalidMintAuthority,

    #[msg("Composite mint decimals do not match the declared precision")]
    DecimalsMismatch,

    #[msg("Wrong composite mint for this basket config")]
    WrongCompositeMint,

    #[msg("Missing per-asset accounts for this basket")]
    MissingAccounts,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Invalid token mint - does not match the basket slot")]
    InvalidMint,
}

use anchor_lang::prelude::*;

use crate::constants::MAX_ASSETS;
use crate::errors::VaultError;

/// Lifecycle phase of a basket config.
///
/// The persisted record only exists once `Active`; a freshly allocated
/// account with `num_assets == 0` stands in for `Uninitialized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasketPhase {
    Uninitialized,
    Active,
}

/// Basket config, one per composite mint
///
/// Created by the first deposit and immutable afterwards: the first
/// depositor fixes the per-unit composition for every future depositor.
/// Asset order is significant and defines slot correspondence between
/// `asset_mints`, `amounts_per_unit`, and the custody vault accounts.
#[account]
pub struct BasketConfig {
    /// User whose first deposit created this config
    pub authority: Pubkey,          // 32 bytes

    /// Composite token mint governed by this config
    pub composite_mint: Pubkey,     // 32 bytes

    /// PDA that owns the custody vault token accounts and mints the composite
    pub custody_authority: Pubkey,  // 32 bytes

    /// Number of underlying assets in the basket (0 = not yet initialized)
    pub num_assets: u8,             // 1 byte

    /// Composite mint decimals, fixed at creation
    pub decimals: u8,               // 1 byte

    /// Ordered asset mints; only the first num_assets entries are valid
    pub asset_mints: [Pubkey; MAX_ASSETS],      // 32 * MAX_ASSETS bytes

    /// Smallest units of asset_mints[i] backing one whole composite unit
    pub amounts_per_unit: [u64; MAX_ASSETS],    // 8 * MAX_ASSETS bytes

    /// Bump seed for config PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for custody authority PDA
    pub custody_bump: u8,           // 1 byte
}

impl BasketConfig {
    pub fn phase(&self) -> BasketPhase {
        if self.num_assets == 0 {
            BasketPhase::Uninitialized
        } else {
            BasketPhase::Active
        }
    }

    /// Validate a first-deposit composition before it is recorded.
    ///
    /// Checks asset count bounds, argument length agreement, strictly
    /// positive per-unit amounts, and duplicate asset mints.
    pub fn validate_new_composition(
        asset_mints: &[Pubkey],
        amounts_per_unit: &[u64],
    ) -> Result<()> {
        let n = asset_mints.len();
        require!(n >= 1 && n <= MAX_ASSETS, VaultError::InvalidAssetCount);
        require!(amounts_per_unit.len() == n, VaultError::AssetSetMismatch);

        for (i, mint) in asset_mints.iter().enumerate() {
            require!(amounts_per_unit[i] > 0, VaultError::NonPositiveAmount);
            require!(
                !asset_mints[..i].contains(mint),
                VaultError::DuplicateAsset
            );
        }

        Ok(())
    }

    /// Check a deposit's asset list against the stored composition.
    ///
    /// Identity and order must match exactly; a different length, a missing
    /// asset, or an extra asset all reject with AssetSetMismatch.
    pub fn check_asset_set(&self, asset_mints: &[Pubkey]) -> Result<()> {
        let n = self.num_assets as usize;
        require!(asset_mints.len() == n, VaultError::AssetSetMismatch);

        for (i, mint) in asset_mints.iter().enumerate() {
            require!(*mint == self.asset_mints[i], VaultError::AssetSetMismatch);
        }

        Ok(())
    }

    /// Check a restated per-unit composition against the stored one.
    ///
    /// Subsequent deposits must restate the stored composition verbatim.
    pub fn check_composition(&self, amounts_per_unit: &[u64]) -> Result<()> {
        let n = self.num_assets as usize;
        require!(amounts_per_unit.len() == n, VaultError::AssetSetMismatch);

        for (i, &per_unit) in amounts_per_unit.iter().enumerate() {
            require!(
                per_unit == self.amounts_per_unit[i],
                VaultError::RatioMismatch
            );
        }

        Ok(())
    }

    /// Compute the whole-unit multiple `k` for a deposit.
    ///
    /// Every amount must be a positive, exact integer multiple of the
    /// per-unit amount in its slot, and every slot must reduce to the same
    /// multiple. Partial or unbalanced deposits are rejected.
    pub fn basket_multiple(&self, amounts: &[u64]) -> Result<u64> {
        let n = self.num_assets as usize;
        require!(n > 0, VaultError::InvalidAssetCount);
        require!(amounts.len() == n, VaultError::AssetSetMismatch);

        let mut units: Option<u64> = None;
        for (i, &amount) in amounts.iter().enumerate() {
            require!(amount > 0, VaultError::NonPositiveAmount);

            let per_unit = self.amounts_per_unit[i];
            require!(per_unit > 0, VaultError::NonPositiveAmount);
            require!(amount % per_unit == 0, VaultError::RatioMismatch);

            let k = amount / per_unit;
            match units {
                Some(prev) => require!(prev == k, VaultError::RatioMismatch),
                None => units = Some(k),
            }
        }

        // n > 0 guarantees the loop ran; divisibility of a positive amount
        // guarantees k >= 1
        let units = units.ok_or(error!(VaultError::InvalidAssetCount))?;
        require!(units > 0, VaultError::RatioMismatch);
        Ok(units)
    }

    /// Composite smallest units minted or burned for `units` whole baskets:
    /// units * 10^decimals
    pub fn composite_amount(&self, units: u64) -> Result<u64> {
        let scale = 10u64
            .checked_pow(self.decimals as u32)
            .ok_or(error!(VaultError::MathOverflow))?;

        units
            .checked_mul(scale)
            .ok_or(error!(VaultError::MathOverflow))
    }

    /// Underlying amount owed for `units` whole baskets in slot `index`
    pub fn payout_amount(&self, index: usize, units: u64) -> Result<u64> {
        require!(index < self.num_assets as usize, VaultError::AssetSetMismatch);

        units
            .checked_mul(self.amounts_per_unit[index])
            .ok_or(error!(VaultError::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config(amounts_per_unit: &[u64]) -> BasketConfig {
        let mut config = BasketConfig {
            authority: Pubkey::default(),
            composite_mint: Pubkey::default(),
            custody_authority: Pubkey::default(),
            num_assets: amounts_per_unit.len() as u8,
            decimals: 2,
            asset_mints: [Pubkey::default(); MAX_ASSETS],
            amounts_per_unit: [0; MAX_ASSETS],
            bump: 0,
            custody_bump: 0,
        };
        for (i, &per_unit) in amounts_per_unit.iter().enumerate() {
            config.asset_mints[i] = Pubkey::new_unique();
            config.amounts_per_unit[i] = per_unit;
        }
        config
    }

    #[test]
    fn test_phase_transitions() {
        let mut config = mock_config(&[1_000]);
        assert_eq!(config.phase(), BasketPhase::Active);

        config.num_assets = 0;
        assert_eq!(config.phase(), BasketPhase::Uninitialized);
    }

    #[test]
    fn test_basket_multiple_single_unit() {
        let config = mock_config(&[1_000_000_000, 2_000_000_000]);
        let k = config
            .basket_multiple(&[1_000_000_000, 2_000_000_000])
            .unwrap();
        assert_eq!(k, 1);
    }

    #[test]
    fn test_basket_multiple_scaled() {
        let config = mock_config(&[1_000_000_000, 2_000_000_000]);
        let k = config
            .basket_multiple(&[3_000_000_000, 6_000_000_000])
            .unwrap();
        assert_eq!(k, 3);
    }

    #[test]
    fn test_basket_multiple_ratio_mismatch() {
        let config = mock_config(&[1_000_000_000, 2_000_000_000]);

        // wrong ratio for the second asset
        let result = config.basket_multiple(&[1_000_000_000, 1_000_000_000]);
        assert_eq!(result, Err(VaultError::RatioMismatch.into()));
    }

    #[test]
    fn test_basket_multiple_inexact_division() {
        let config = mock_config(&[1_000, 2_000]);

        // not a whole multiple of the first slot
        let result = config.basket_multiple(&[1_500, 3_000]);
        assert_eq!(result, Err(VaultError::RatioMismatch.into()));
    }

    #[test]
    fn test_basket_multiple_zero_amount() {
        let config = mock_config(&[1_000, 2_000]);
        let result = config.basket_multiple(&[0, 2_000]);
        assert_eq!(result, Err(VaultError::NonPositiveAmount.into()));
    }

    #[test]
    fn test_basket_multiple_length_mismatch() {
        let config = mock_config(&[1_000, 2_000]);
        let result = config.basket_multiple(&[1_000]);
        assert_eq!(result, Err(VaultError::AssetSetMismatch.into()));
    }

    #[test]
    fn test_composite_amount_scales_by_decimals() {
        let config = mock_config(&[1_000]);
        // decimals = 2, one basket = 100 smallest units
        assert_eq!(config.composite_amount(1).unwrap(), 100);
        assert_eq!(config.composite_amount(7).unwrap(), 700);
    }

    #[test]
    fn test_composite_amount_overflow() {
        let mut config = mock_config(&[1_000]);
        config.decimals = 9;
        let result = config.composite_amount(u64::MAX / 2);
        assert_eq!(result, Err(VaultError::MathOverflow.into()));
    }

    #[test]
    fn test_payout_amount() {
        let config = mock_config(&[1_000_000_000, 2_000_000_000]);
        assert_eq!(config.payout_amount(0, 3).unwrap(), 3_000_000_000);
        assert_eq!(config.payout_amount(1, 3).unwrap(), 6_000_000_000);
    }

    #[test]
    fn test_payout_amount_out_of_range_slot() {
        let config = mock_config(&[1_000]);
        let result = config.payout_amount(1, 1);
        assert_eq!(result, Err(VaultError::AssetSetMismatch.into()));
    }

    #[test]
    fn test_validate_new_composition_bounds() {
        let mints: Vec<Pubkey> = (0..MAX_ASSETS + 1).map(|_| Pubkey::new_unique()).collect();
        let per_unit = vec![1u64; MAX_ASSETS + 1];

        assert_eq!(
            BasketConfig::validate_new_composition(&[], &[]),
            Err(VaultError::InvalidAssetCount.into())
        );
        assert_eq!(
            BasketConfig::validate_new_composition(&mints, &per_unit),
            Err(VaultError::InvalidAssetCount.into())
        );
        assert!(BasketConfig::validate_new_composition(
            &mints[..MAX_ASSETS],
            &per_unit[..MAX_ASSETS]
        )
        .is_ok());
    }

    #[test]
    fn test_validate_new_composition_duplicate() {
        let mint = Pubkey::new_unique();
        let result =
            BasketConfig::validate_new_composition(&[mint, Pubkey::new_unique(), mint], &[1, 1, 1]);
        assert_eq!(result, Err(VaultError::DuplicateAsset.into()));
    }

    #[test]
    fn test_validate_new_composition_zero_per_unit() {
        let mints = [Pubkey::new_unique(), Pubkey::new_unique()];
        let result = BasketConfig::validate_new_composition(&mints, &[1_000, 0]);
        assert_eq!(result, Err(VaultError::NonPositiveAmount.into()));
    }

    #[test]
    fn test_check_asset_set_order_matters() {
        let config = mock_config(&[1_000, 2_000]);
        let in_order = [config.asset_mints[0], config.asset_mints[1]];
        let reversed = [config.asset_mints[1], config.asset_mints[0]];

        assert!(config.check_asset_set(&in_order).is_ok());
        assert_eq!(
            config.check_asset_set(&reversed),
            Err(VaultError::AssetSetMismatch.into())
        );
    }

    #[test]
    fn test_check_asset_set_length() {
        let config = mock_config(&[1_000, 2_000]);
        let result = config.check_asset_set(&[config.asset_mints[0]]);
        assert_eq!(result, Err(VaultError::AssetSetMismatch.into()));
    }

    #[test]
    fn test_check_composition_verbatim() {
        let config = mock_config(&[1_000, 2_000]);
        assert!(config.check_composition(&[1_000, 2_000]).is_ok());

        // scaled restatements of the same ratio are rejected
        assert_eq!(
            config.check_composition(&[2_000, 4_000]),
            Err(VaultError::RatioMismatch.into())
        );
    }
}

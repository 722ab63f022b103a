pub mod deposit_and_mint;
pub mod redeem_and_withdraw;
pub mod view;

pub use deposit_and_mint::*;
pub use redeem_and_withdraw::*;
pub use view::*;

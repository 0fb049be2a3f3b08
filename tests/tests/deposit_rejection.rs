//! Rejected deposits never reach the rollup and are returned to their depositor once.

use alloy_primitives::{B256, U256};
use eyre::Result;
use settlement_liquidity::{LiquidityError, TokenVault};
use settlement_primitives::Deposit;
use settlement_tree::DepositTree;
use tests::{TwoDomainEnv, ANALYZER, GAS_LIMIT, LIQUIDITY, TOKEN, USER};

#[test]
fn test_rejected_deposit_is_reclaimed_once() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    let accepted = Deposit::new(B256::repeat_byte(1), 3, U256::from(10));
    let rejected = Deposit::new(B256::repeat_byte(2), 3, U256::from(20));
    for deposit in [accepted, rejected] {
        env.liquidity.deposit_erc20(
            &env.ctx(USER),
            TOKEN,
            deposit.recipient_salt_hash,
            deposit.amount,
        )?;
    }
    assert_eq!(env.liquidity.vault().erc20_balance_of(TOKEN, LIQUIDITY), U256::from(30));

    env.liquidity.analyze_and_relay_deposits(&env.ctx(ANALYZER), 2, &[2], GAS_LIMIT)?;
    env.relay_to_rollup()?;

    let mut expected_tree = DepositTree::new();
    expected_tree.deposit(accepted.hash())?;
    assert_eq!(env.rollup.read().deposit_tree_root(), expected_tree.root());
    assert_eq!(env.rollup.read().last_processed_deposit_id(), 2);

    env.liquidity.claim_rejected_deposit(&env.ctx(USER), 2, &rejected)?;
    assert_eq!(env.liquidity.vault().erc20_balance_of(TOKEN, USER), U256::from(1_000_000 - 10));
    assert_eq!(env.liquidity.vault().erc20_balance_of(TOKEN, LIQUIDITY), U256::from(10));

    assert_eq!(
        env.liquidity.claim_rejected_deposit(&env.ctx(USER), 2, &rejected),
        Err(LiquidityError::OnlySenderCanCancelDeposit(2))
    );
    assert_eq!(env.liquidity.vault().erc20_balance_of(TOKEN, USER), U256::from(1_000_000 - 10));

    Ok(())
}

//! Deposits travel from the liquidity domain into the rollup deposit tree.

use alloy_primitives::{B256, U256};
use eyre::Result;
use settlement_liquidity::LiquidityEvent;
use settlement_messenger::RelayStatus;
use settlement_primitives::Deposit;
use settlement_rollup::RollupEvent;
use settlement_tree::DepositTree;
use tests::{TwoDomainEnv, ANALYZER, GAS_LIMIT, TOKEN, USER};

#[test]
fn test_deposit_round_trip() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    let recipient_salt_hash = B256::repeat_byte(0x5a);
    let amount = U256::from(100);

    let deposit_id =
        env.liquidity.deposit_erc20(&env.ctx(USER), TOKEN, recipient_salt_hash, amount)?;
    assert_eq!(deposit_id, 1);

    // the first unknown token follows the two tokens registered at deployment
    let deposit = Deposit::new(recipient_salt_hash, 3, amount);
    assert_eq!(
        env.liquidity.take_events()[0],
        LiquidityEvent::Deposited {
            deposit_id,
            sender: USER,
            recipient_salt_hash,
            token_index: 3,
            amount,
            deposited_at: env.timestamp(),
        }
    );
    assert!(env.liquidity.is_deposit_valid(deposit_id, &deposit, USER));

    env.liquidity.analyze_and_relay_deposits(&env.ctx(ANALYZER), deposit_id, &[], GAS_LIMIT)?;
    let statuses = env.relay_to_rollup()?;
    assert!(matches!(statuses[..], [RelayStatus::Executed(_)]));

    let mut expected_tree = DepositTree::new();
    let expected_root = expected_tree.deposit(deposit.hash())?;
    {
        let mut rollup = env.rollup.write();
        assert_eq!(rollup.deposit_tree_root(), expected_root);
        assert_eq!(rollup.last_processed_deposit_id(), deposit_id);
        assert_eq!(
            rollup.take_events(),
            vec![
                RollupEvent::DepositLeafInserted { deposit_index: 0, deposit_hash: deposit.hash() },
                RollupEvent::DepositsProcessed {
                    last_processed_deposit_id: deposit_id,
                    deposit_tree_root: expected_root,
                },
            ]
        );
    }

    // the next block commits to the updated deposit tree
    let posted = env.post_block()?;
    assert_eq!(posted.block.deposit_tree_root, expected_root);
    assert_eq!(posted.block.block_number, 1);

    Ok(())
}

#[test]
fn test_deposits_are_inserted_in_acceptance_order() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    let deposits: Vec<_> = (1..=4u8)
        .map(|salt| Deposit::new(B256::repeat_byte(salt), 3, U256::from(salt)))
        .collect();
    for deposit in &deposits {
        env.liquidity.deposit_erc20(
            &env.ctx(USER),
            TOKEN,
            deposit.recipient_salt_hash,
            deposit.amount,
        )?;
    }

    env.liquidity.analyze_and_relay_deposits(&env.ctx(ANALYZER), 2, &[], GAS_LIMIT)?;
    env.liquidity.analyze_and_relay_deposits(&env.ctx(ANALYZER), 4, &[3], GAS_LIMIT)?;
    let statuses = env.relay_to_rollup()?;
    assert!(statuses.iter().all(RelayStatus::is_executed));

    let mut expected_tree = DepositTree::new();
    for index in [0, 1, 3] {
        expected_tree.deposit(deposits[index].hash())?;
    }
    let rollup = env.rollup.read();
    assert_eq!(rollup.deposit_tree_root(), expected_tree.root());
    assert_eq!(rollup.deposit_tree().deposit_count(), 3);
    assert_eq!(rollup.last_processed_deposit_id(), 4);

    Ok(())
}

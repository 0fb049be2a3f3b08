//! Messages between the domains execute in the order they were sent.

use alloy_primitives::{Address, B256, U256};
use eyre::Result;
use settlement_liquidity::TokenVault;
use settlement_messenger::{MessengerError, RelayStatus};
use settlement_primitives::{chain_hash, ChainedWithdrawal, Deposit, WithdrawalProofPublicInputs};
use settlement_tree::DepositTree;
use tests::{TwoDomainEnv, AGGREGATOR, ANALYZER, GAS_LIMIT, LIQUIDITY, TOKEN, USER};

#[test]
fn test_deposit_batches_execute_in_send_order() -> Result<()> {
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
    env.liquidity.analyze_and_relay_deposits(&env.ctx(ANALYZER), 4, &[], GAS_LIMIT)?;
    let messages = env.l1_outbox.messages();
    assert_eq!(messages.len(), 2);

    // the second batch cannot overtake the first
    assert_eq!(
        env.relay_message_to_rollup(&messages[1]),
        Err(MessengerError::MessageOutOfOrder { expected: U256::ZERO, got: U256::from(1) })
    );
    assert_eq!(env.rollup.read().deposit_tree().deposit_count(), 0);
    assert_eq!(env.rollup.read().last_processed_deposit_id(), 0);

    let statuses = env.relay_to_rollup()?;
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(RelayStatus::is_executed));

    let mut expected_tree = DepositTree::new();
    for deposit in &deposits {
        expected_tree.deposit(deposit.hash())?;
    }
    let rollup = env.rollup.read();
    assert_eq!(rollup.deposit_tree_root(), expected_tree.root());
    assert_eq!(rollup.deposit_tree().deposit_count(), 4);
    assert_eq!(rollup.last_processed_deposit_id(), 4);

    Ok(())
}

#[test]
fn test_withdrawal_batches_execute_in_send_order() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    env.liquidity.vault_mut().mint_native(LIQUIDITY, U256::from(1_000));
    let posted = env.post_block()?;
    let chained = |recipient: u8, amount: u64| ChainedWithdrawal {
        recipient: Address::repeat_byte(recipient),
        token_index: 0,
        amount: U256::from(amount),
        nullifier: B256::repeat_byte(recipient),
        block_hash: posted.block_hash,
        block_number: posted.block.block_number,
    };

    let batches = [[chained(0x51, 100)], [chained(0x52, 200)]];
    for withdrawals in &batches {
        let public_inputs = WithdrawalProofPublicInputs {
            last_withdrawal_hash: chain_hash(withdrawals),
            withdrawal_aggregator: AGGREGATOR,
        };
        let sent = env.withdrawal.submit_withdrawal_proof(
            &env.ctx(AGGREGATOR),
            withdrawals,
            public_inputs,
            &[],
        )?;
        assert!(sent.is_some());
    }
    let messages = env.l2_outbox.messages();
    assert_eq!(messages.len(), 2);

    // the later payout batch cannot skip the earlier one
    assert_eq!(
        env.relay_message_to_liquidity(&messages[1]),
        Err(MessengerError::MessageOutOfOrder { expected: U256::ZERO, got: U256::from(1) })
    );
    assert_eq!(env.liquidity.last_direct_withdrawal_id(), 0);

    let statuses = env.relay_to_liquidity()?;
    assert!(statuses.iter().all(RelayStatus::is_executed));
    assert_eq!(env.liquidity.last_direct_withdrawal_id(), 2);
    for (withdrawals, amount) in batches.iter().zip([100u64, 200]) {
        let recipient = withdrawals[0].recipient;
        assert_eq!(env.liquidity.vault().native_balance(recipient), U256::from(amount));
    }

    Ok(())
}

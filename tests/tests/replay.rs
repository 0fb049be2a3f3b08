//! Replayed proofs and redelivered messages leave every contract unchanged.

use alloy_primitives::{Address, B256, U256};
use eyre::Result;
use settlement_liquidity::TokenVault;
use settlement_messenger::RelayStatus;
use settlement_primitives::{chain_hash, ChainedWithdrawal, WithdrawalProofPublicInputs};
use tests::{TwoDomainEnv, AGGREGATOR, ANALYZER, GAS_LIMIT, LIQUIDITY, TOKEN, USER};

#[test]
fn test_withdrawal_proof_replay_is_a_noop() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    env.liquidity.vault_mut().mint_native(LIQUIDITY, U256::from(1_000));
    let posted = env.post_block()?;
    let withdrawals = [ChainedWithdrawal {
        recipient: Address::repeat_byte(0x51),
        token_index: 0,
        amount: U256::from(100),
        nullifier: B256::repeat_byte(0x51),
        block_hash: posted.block_hash,
        block_number: posted.block.block_number,
    }];
    let public_inputs = WithdrawalProofPublicInputs {
        last_withdrawal_hash: chain_hash(&withdrawals),
        withdrawal_aggregator: AGGREGATOR,
    };
    let ctx = env.ctx(AGGREGATOR);

    env.withdrawal.submit_withdrawal_proof(&ctx, &withdrawals, public_inputs, &[])?;
    env.withdrawal.take_events();
    let replayed = env.withdrawal.submit_withdrawal_proof(&ctx, &withdrawals, public_inputs, &[])?;
    assert_eq!(replayed, None);
    assert!(env.withdrawal.take_events().is_empty());
    assert_eq!(env.l2_outbox.len(), 1);

    env.relay_to_liquidity()?;
    let recipient = withdrawals[0].recipient;
    assert_eq!(env.liquidity.vault().native_balance(recipient), U256::from(100));

    // the transport delivers the payout message a second time
    let message = env.l2_outbox.messages()[0].clone();
    let status = env.redeliver_to_liquidity(&message)?;
    assert!(status.is_executed());
    assert_eq!(env.liquidity.vault().native_balance(recipient), U256::from(100));
    assert_eq!(env.liquidity.last_direct_withdrawal_id(), 1);

    Ok(())
}

#[test]
fn test_redelivered_deposit_batch_is_rejected() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    env.liquidity.deposit_erc20(&env.ctx(USER), TOKEN, B256::repeat_byte(1), U256::from(10))?;
    env.liquidity.analyze_and_relay_deposits(&env.ctx(ANALYZER), 1, &[], GAS_LIMIT)?;
    env.relay_to_rollup()?;
    let root = env.rollup.read().deposit_tree_root();
    env.rollup.write().take_events();

    let message = env.l1_outbox.messages()[0].clone();
    let status = env.redeliver_to_rollup(&message)?;
    assert!(matches!(status, RelayStatus::Failed { .. }), "unexpected status {status:?}");

    let mut rollup = env.rollup.write();
    assert_eq!(rollup.deposit_tree_root(), root);
    assert_eq!(rollup.deposit_tree().deposit_count(), 1);
    assert!(rollup.take_events().is_empty());

    Ok(())
}

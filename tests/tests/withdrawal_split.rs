//! Direct withdrawals are paid on relay while claimable withdrawals wait for their recipient.

use alloy_primitives::{Address, B256, U256};
use eyre::Result;
use settlement_liquidity::{LiquidityError, LiquidityEvent, TokenVault};
use settlement_primitives::{chain_hash, ChainedWithdrawal, WithdrawalProofPublicInputs};
use settlement_rollup::PostedBlock;
use settlement_withdrawal::WithdrawalEvent;
use tests::{TwoDomainEnv, AGGREGATOR, INITIAL_TOKENS, LIQUIDITY, TOKEN};

fn chained(
    posted: &PostedBlock,
    recipient: u8,
    token_index: u32,
    amount: u64,
) -> ChainedWithdrawal {
    ChainedWithdrawal {
        recipient: Address::repeat_byte(recipient),
        token_index,
        amount: U256::from(amount),
        nullifier: B256::repeat_byte(recipient),
        block_hash: posted.block_hash,
        block_number: posted.block.block_number,
    }
}

fn submit(env: &mut TwoDomainEnv, withdrawals: &[ChainedWithdrawal]) -> Result<()> {
    let public_inputs = WithdrawalProofPublicInputs {
        last_withdrawal_hash: chain_hash(withdrawals),
        withdrawal_aggregator: AGGREGATOR,
    };
    let ctx = env.ctx(AGGREGATOR);
    let sent = env.withdrawal.submit_withdrawal_proof(&ctx, withdrawals, public_inputs, &[])?;
    assert!(sent.is_some(), "the direct withdrawal triggers a relay");
    Ok(())
}

#[test]
fn test_direct_and_claimable_withdrawals() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    let direct_token = INITIAL_TOKENS[0];
    env.liquidity.vault_mut().mint_erc20(direct_token, LIQUIDITY, U256::from(1_000));
    env.withdrawal.take_events();

    // token index 1 is withdrawn directly, token index 1000 is not
    let posted = env.post_block()?;
    let withdrawals = [chained(&posted, 0x51, 1, 100), chained(&posted, 0x52, 1000, 200)];
    submit(&mut env, &withdrawals)?;

    let [direct, claimable] = withdrawals.map(|withdrawal| withdrawal.withdrawal());
    let events = env.withdrawal.take_events();
    assert_eq!(
        events[..2],
        [
            WithdrawalEvent::DirectWithdrawalQueued {
                withdrawal_hash: direct.hash(),
                recipient: direct.recipient,
                withdrawal: direct,
            },
            WithdrawalEvent::ClaimableWithdrawalQueued {
                withdrawal_hash: claimable.hash(),
                recipient: claimable.recipient,
                withdrawal: claimable,
            },
        ]
    );
    assert!(matches!(
        events[2..],
        [WithdrawalEvent::WithdrawalsRelayed {
            last_direct_withdrawal_id: 1,
            last_claimable_withdrawal_id: 1,
            ..
        }]
    ));

    env.relay_to_liquidity()?;
    assert_eq!(env.liquidity.last_direct_withdrawal_id(), 1);
    assert_eq!(env.liquidity.last_claimable_withdrawal_id(), 1);
    assert_eq!(
        env.liquidity.vault().erc20_balance_of(direct_token, direct.recipient),
        U256::from(100)
    );
    assert!(env.liquidity.is_claimable(&claimable.hash()));

    // the liquidity domain knows no token at index 1000, so the claim cannot pay out yet
    assert_eq!(
        env.liquidity.claim_withdrawals(&[claimable]),
        Err(LiquidityError::TransferFailed(1000))
    );
    assert!(env.liquidity.is_claimable(&claimable.hash()));

    Ok(())
}

#[test]
fn test_claimable_withdrawal_is_paid_on_claim() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    env.liquidity.vault_mut().mint_native(LIQUIDITY, U256::from(1_000));
    env.liquidity.vault_mut().mint_erc20(TOKEN, LIQUIDITY, U256::from(1_000));
    // registers the token at index 3, which is not withdrawn directly
    env.liquidity.deposit_erc20(
        &env.ctx(tests::USER),
        TOKEN,
        B256::repeat_byte(1),
        U256::from(1),
    )?;

    let posted = env.post_block()?;
    let withdrawals = [chained(&posted, 0x51, 0, 100), chained(&posted, 0x52, 3, 200)];
    submit(&mut env, &withdrawals)?;
    env.relay_to_liquidity()?;

    let [direct, claimable] = withdrawals.map(|withdrawal| withdrawal.withdrawal());
    assert_eq!(env.liquidity.vault().native_balance(direct.recipient), U256::from(100));
    assert_eq!(env.liquidity.vault().erc20_balance_of(TOKEN, claimable.recipient), U256::ZERO);

    env.liquidity.take_events();
    env.liquidity.claim_withdrawals(&[claimable])?;
    assert_eq!(env.liquidity.vault().erc20_balance_of(TOKEN, claimable.recipient), U256::from(200));
    assert_eq!(
        env.liquidity.take_events(),
        vec![LiquidityEvent::ClaimedWithdrawal {
            recipient: claimable.recipient,
            withdrawal_hash: claimable.hash(),
        }]
    );

    Ok(())
}

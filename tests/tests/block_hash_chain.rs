//! The rollup block hash chain matches an independently computed reference.

use alloy_primitives::B256;
use eyre::Result;
use settlement_primitives::block_hash;
use settlement_tree::DepositTree;
use tests::TwoDomainEnv;

#[test]
fn test_block_hash_chain_matches_reference() -> Result<()> {
    let mut env = TwoDomainEnv::new()?;
    let empty_root = DepositTree::new().root();

    let genesis = block_hash(B256::ZERO, empty_root, B256::ZERO, 0);
    let mut reference = vec![genesis];
    for _ in 0..3 {
        let posted = env.post_block()?;
        let block = &posted.block;
        assert!(block.is_consistent());
        let expected = block_hash(
            reference[reference.len() - 1],
            empty_root,
            block.signature_hash,
            reference.len() as u32,
        );
        assert_eq!(posted.block_hash, expected);
        assert_eq!(block.prev_block_hash, reference[reference.len() - 1]);
        reference.push(expected);
    }

    let rollup = env.rollup.read();
    assert_eq!(rollup.block_number()?, 4);
    for (block_number, expected) in reference.iter().enumerate() {
        assert_eq!(rollup.get_block_hash(block_number as u32)?, *expected);
    }
    assert_eq!(rollup.latest_block_hash()?, reference[3]);

    Ok(())
}

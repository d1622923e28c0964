//! Build airdrop transaction batches.
//!
//! Each batch is one transaction: compute-budget prelude plus a single
//! compress instruction paying every recipient in the chunk. Batches
//! rotate across the public state trees so output accounts spread over
//! the forest.

use ctoken_cookbook::{
    actions::build_compress_instruction,
    trees::{StateTreeInfo, PUBLIC_STATE_TREES},
};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, instruction::Instruction, pubkey::Pubkey,
};

use crate::error::Result;

/// Recipients per transaction. A compress with five outputs stays within
/// a legacy transaction without address lookup tables.
pub const DEFAULT_RECIPIENTS_PER_BATCH: usize = 5;

const COMPUTE_UNIT_LIMIT: u32 = 500_000;
/// Lamports to spend on priority fees per transaction.
const PRIORITY_FEE_LAMPORTS: u64 = 10_000;

/// Micro-lamports per compute unit so that `units` at this price cost
/// `target_lamports` in priority fees.
pub fn compute_unit_price(target_lamports: u64, units: u32) -> u64 {
    target_lamports.saturating_mul(1_000_000) / units as u64
}

#[derive(Debug, Clone)]
pub struct AirdropPlan {
    pub payer: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub source_token_account: Pubkey,
    pub amount_per_recipient: u64,
    pub recipients_per_batch: usize,
}

/// Chunk `recipients` and build one transaction's instructions per chunk.
pub fn build_airdrop_batches(
    plan: &AirdropPlan,
    recipients: &[Pubkey],
) -> Result<Vec<Vec<Instruction>>> {
    build_airdrop_batches_with_trees(plan, recipients, &PUBLIC_STATE_TREES)
}

fn build_airdrop_batches_with_trees(
    plan: &AirdropPlan,
    recipients: &[Pubkey],
    trees: &[StateTreeInfo],
) -> Result<Vec<Vec<Instruction>>> {
    let price = compute_unit_price(PRIORITY_FEE_LAMPORTS, COMPUTE_UNIT_LIMIT);
    let mut batches = Vec::new();
    for (index, chunk) in recipients.chunks(plan.recipients_per_batch.max(1)).enumerate() {
        let tree = &trees[index % trees.len()];
        let chunk: Vec<(Pubkey, u64)> = chunk
            .iter()
            .map(|recipient| (*recipient, plan.amount_per_recipient))
            .collect();
        let [approve_ix, compress_ix] = build_compress_instruction(
            &plan.payer,
            &plan.owner,
            &plan.mint,
            &plan.source_token_account,
            &chunk,
            &tree.tree,
        )?;
        batches.push(vec![
            ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT),
            ComputeBudgetInstruction::set_compute_unit_price(price),
            approve_ix,
            compress_ix,
        ]);
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(recipients_per_batch: usize) -> AirdropPlan {
        AirdropPlan {
            payer: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            source_token_account: Pubkey::new_unique(),
            amount_per_recipient: 1_000_000,
            recipients_per_batch,
        }
    }

    #[test]
    fn chunks_every_recipient_exactly_once() {
        let recipients: Vec<Pubkey> = (0..12).map(|_| Pubkey::new_unique()).collect();
        let batches = build_airdrop_batches(&plan(5), &recipients).unwrap();
        assert_eq!(batches.len(), 3);
        // 2 compute budget instructions + approve + compress per batch.
        assert!(batches.iter().all(|batch| batch.len() == 4));
    }

    #[test]
    fn single_batch_when_under_chunk_size() {
        let recipients: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let batches = build_airdrop_batches(&plan(5), &recipients).unwrap();
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let recipients: Vec<Pubkey> = (0..2).map(|_| Pubkey::new_unique()).collect();
        let batches = build_airdrop_batches(&plan(0), &recipients).unwrap();
        assert_eq!(batches.len(), 2);
    }

    #[test]
    fn priority_price_matches_budget() {
        // 10_000 lamports over 500_000 units -> 20_000 micro-lamports/unit.
        assert_eq!(compute_unit_price(10_000, 500_000), 20_000);
        assert_eq!(compute_unit_price(0, 500_000), 0);
    }
}

use light_client::rpc::RpcConnection;
use light_compressed_token::{transfer_sdk::create_transfer_instruction, TokenTransferOutputData};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    actions::dedupe_signers,
    error::{CookbookError, Result},
    indexer::PhotonClient,
};

/// Inputs per merge transaction. Bounded by proof size in a legacy
/// transaction without lookup tables.
pub const MERGE_CHUNK_SIZE: usize = 4;

/// Consolidate all of the owner's compressed accounts for a mint by
/// transferring them to the owner in chunks. Returns one signature per
/// chunk; an empty result means there was nothing to merge.
pub async fn merge_token_accounts<R: RpcConnection>(
    rpc: &mut R,
    indexer: &PhotonClient,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Keypair,
) -> Result<Vec<Signature>> {
    let accounts = indexer
        .get_compressed_token_accounts_by_owner(&owner.pubkey(), Some(mint))
        .await?;
    if accounts.len() <= 1 {
        return Ok(Vec::new());
    }

    let mut signatures = Vec::new();
    for chunk in accounts.chunks(MERGE_CHUNK_SIZE) {
        if chunk.len() < 2 && !signatures.is_empty() {
            // A trailing single account is already consolidated.
            break;
        }
        let hashes: Vec<[u8; 32]> = chunk.iter().map(|a| a.hash).collect();
        let proof = indexer.get_validity_proof(&hashes).await?;

        let total: u64 = chunk.iter().map(|a| a.token.amount).sum();
        let output = TokenTransferOutputData {
            owner: owner.pubkey(),
            amount: total,
            lamports: None,
            merkle_tree: chunk[0].merkle_context.merkle_tree_pubkey,
        };

        let merkle_contexts: Vec<_> = chunk.iter().map(|a| a.merkle_context).collect();
        let token_data: Vec<_> = chunk.iter().map(|a| a.token.clone()).collect();

        let instruction = create_transfer_instruction(
            &payer.pubkey(),
            &owner.pubkey(),
            &merkle_contexts,
            &[output],
            &proof.root_indices,
            &Some(proof.proof),
            &token_data,
            *mint,
            None,
            false,
            None,
            None,
            None,
        )
        .map_err(|e| CookbookError::Instruction(e.to_string()))?;

        let signers = dedupe_signers(payer, owner);
        let signature = rpc
            .create_and_send_transaction(&[instruction], &payer.pubkey(), &signers)
            .await?;
        signatures.push(signature);
    }
    Ok(signatures)
}

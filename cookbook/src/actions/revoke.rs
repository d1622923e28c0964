use light_client::rpc::RpcConnection;
use light_compressed_token::delegation::sdk::{
    create_revoke_instruction, CreateRevokeInstructionInputs,
};
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

/// Revoke a delegation: merge all of the owner's accounts delegated to
/// `delegate` back into a single undelegated account.
pub async fn revoke<R: RpcConnection>(
    rpc: &mut R,
    indexer: &PhotonClient,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Keypair,
    delegate: &Pubkey,
) -> Result<Signature> {
    let accounts = indexer
        .get_compressed_token_accounts_by_delegate(delegate, Some(mint))
        .await?;
    let delegated: Vec<_> = accounts
        .into_iter()
        .filter(|a| a.token.owner == owner.pubkey())
        .collect();
    if delegated.is_empty() {
        return Err(CookbookError::NoTokenAccounts {
            owner: owner.pubkey(),
            mint: *mint,
        });
    }

    let hashes: Vec<[u8; 32]> = delegated.iter().map(|a| a.hash).collect();
    let proof = indexer.get_validity_proof(&hashes).await?;

    let instruction = create_revoke_instruction(CreateRevokeInstructionInputs {
        fee_payer: payer.pubkey(),
        authority: owner.pubkey(),
        input_merkle_contexts: delegated.iter().map(|a| a.merkle_context).collect(),
        input_token_data: delegated.iter().map(|a| a.token.clone()).collect(),
        input_compressed_accounts: delegated.iter().map(|a| a.compressed_account()).collect(),
        mint: *mint,
        output_account_merkle_tree: delegated[0].merkle_context.merkle_tree_pubkey,
        root_indices: proof.root_indices,
        proof: proof.proof,
    })
    .map_err(|e| CookbookError::Instruction(format!("{e:?}")))?;

    let signers = dedupe_signers(payer, owner);
    let signature = rpc
        .create_and_send_transaction(&[instruction], &payer.pubkey(), &signers)
        .await?;
    Ok(signature)
}

use light_client::rpc::RpcConnection;
use light_compressed_token::delegation::sdk::{
    create_approve_instruction, CreateApproveInstructionInputs,
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
    selection::select_min_token_accounts,
};

/// Delegate `delegated_amount` of the owner's compressed tokens to
/// `delegate`. The covering input accounts are re-created with the
/// delegate set; change stays undelegated with the owner.
pub async fn approve<R: RpcConnection>(
    rpc: &mut R,
    indexer: &PhotonClient,
    payer: &Keypair,
    mint: &Pubkey,
    delegated_amount: u64,
    owner: &Keypair,
    delegate: &Pubkey,
) -> Result<Signature> {
    let accounts = indexer
        .get_compressed_token_accounts_by_owner(&owner.pubkey(), Some(mint))
        .await?;
    if accounts.is_empty() {
        return Err(CookbookError::NoTokenAccounts {
            owner: owner.pubkey(),
            mint: *mint,
        });
    }

    let (inputs, _) = select_min_token_accounts(&accounts, delegated_amount)?;
    let hashes: Vec<[u8; 32]> = inputs.iter().map(|a| a.hash).collect();
    let proof = indexer.get_validity_proof(&hashes).await?;

    let tree = inputs[0].merkle_context.merkle_tree_pubkey;
    let instruction = create_approve_instruction(CreateApproveInstructionInputs {
        fee_payer: payer.pubkey(),
        authority: owner.pubkey(),
        input_merkle_contexts: inputs.iter().map(|a| a.merkle_context).collect(),
        input_token_data: inputs.iter().map(|a| a.token.clone()).collect(),
        input_compressed_accounts: inputs.iter().map(|a| a.compressed_account()).collect(),
        mint: *mint,
        delegated_amount,
        delegate_lamports: None,
        delegated_compressed_account_merkle_tree: tree,
        change_compressed_account_merkle_tree: tree,
        delegate: *delegate,
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

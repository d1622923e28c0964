//! Sequential batch submission with per-batch outcome reporting.

use light_client::rpc::RpcConnection;
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::error::Result;

#[derive(Debug)]
pub enum BatchResult {
    Confirmed { index: usize, signature: Signature },
    Failed { index: usize, error: String },
}

/// Sign and send each batch in order. A failed batch is reported and the
/// remaining batches still go out; the caller decides what to do with the
/// failures.
pub async fn sign_and_send_batches<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    owner: &Keypair,
    batches: Vec<Vec<Instruction>>,
) -> Result<Vec<BatchResult>> {
    let mut signers = vec![payer];
    if owner.pubkey() != payer.pubkey() {
        signers.push(owner);
    }

    let mut results = Vec::with_capacity(batches.len());
    for (index, batch) in batches.into_iter().enumerate() {
        match rpc
            .create_and_send_transaction(&batch, &payer.pubkey(), &signers)
            .await
        {
            Ok(signature) => {
                tracing::info!(index, %signature, "batch confirmed");
                results.push(BatchResult::Confirmed { index, signature });
            }
            Err(error) => {
                tracing::warn!(index, %error, "batch failed");
                results.push(BatchResult::Failed {
                    index,
                    error: error.to_string(),
                });
            }
        }
    }
    Ok(results)
}

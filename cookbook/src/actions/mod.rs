//! One action per cookbook script. Each action builds its instructions via
//! the SDK builders, signs with the provided keypairs and submits through
//! the RPC connection. Failures abort the operation; nothing is retried
//! here.

mod approve;
mod compress;
mod compress_spl_account;
mod create_mint;
mod create_token_pool;
mod decompress;
mod merge;
mod mint_to;
mod revoke;
mod token_account;
mod transfer;

pub use approve::approve;
pub use compress::{build_compress_instruction, compress};
pub use compress_spl_account::compress_spl_token_account;
pub use create_mint::{create_mint, CreatedMint};
pub use create_token_pool::create_token_pool;
pub use decompress::{build_decompress_instruction, decompress};
pub use merge::{merge_token_accounts, MERGE_CHUNK_SIZE};
pub use mint_to::{mint_to, mint_to_many};
pub use revoke::revoke;
pub use token_account::get_or_create_associated_token_account;
pub use transfer::{build_transfer_instruction, transfer};

use solana_sdk::{signature::Keypair, signer::Signer};

/// Collect transaction signers, skipping duplicates of the payer.
pub(crate) fn dedupe_signers<'a>(payer: &'a Keypair, other: &'a Keypair) -> Vec<&'a Keypair> {
    let mut signers = vec![payer];
    if other.pubkey() != payer.pubkey() {
        signers.push(other);
    }
    signers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_payer_as_authority() {
        let payer = Keypair::new();
        let signers = dedupe_signers(&payer, &payer);
        assert_eq!(signers.len(), 1);

        let other = Keypair::new();
        let signers = dedupe_signers(&payer, &other);
        assert_eq!(signers.len(), 2);
    }
}

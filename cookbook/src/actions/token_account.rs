use light_client::rpc::RpcConnection;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};

use crate::error::Result;

/// Return the owner's associated token account for `mint`, creating it if
/// it does not exist yet.
pub async fn get_or_create_associated_token_account<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey> {
    let address = get_associated_token_address(owner, mint);
    if rpc.get_account(address).await?.is_none() {
        let instruction =
            create_associated_token_account(&payer.pubkey(), owner, mint, &spl_token::ID);
        rpc.create_and_send_transaction(&[instruction], &payer.pubkey(), &[payer])
            .await?;
    }
    Ok(address)
}

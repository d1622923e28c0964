use light_client::rpc::RpcConnection;
use light_compressed_token::{get_token_pool_pda, mint_sdk::create_create_token_pool_instruction};
use solana_sdk::{
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction,
};
use spl_token::state::Mint;

use crate::error::{CookbookError, Result};

#[derive(Debug)]
pub struct CreatedMint {
    pub mint: Pubkey,
    pub pool: Pubkey,
    pub signature: Signature,
}

/// Create an SPL mint and register its compression token pool in one
/// transaction.
///
/// The mint account is created and initialized by the token program; the
/// pool registration makes the mint usable for compression. Both
/// instructions land in the same transaction so a half-registered mint
/// cannot be observed.
pub async fn create_mint<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> Result<CreatedMint> {
    let mint = Keypair::new();
    let rent = rpc
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await?;

    let create_account_ix = system_instruction::create_account(
        &payer.pubkey(),
        &mint.pubkey(),
        rent,
        Mint::LEN as u64,
        &spl_token::ID,
    );
    let init_mint_ix = spl_token::instruction::initialize_mint(
        &spl_token::ID,
        &mint.pubkey(),
        mint_authority,
        freeze_authority,
        decimals,
    )
    .map_err(|e| CookbookError::Instruction(e.to_string()))?;
    let pool_ix = create_create_token_pool_instruction(&payer.pubkey(), &mint.pubkey());

    let signature = rpc
        .create_and_send_transaction(
            &[create_account_ix, init_mint_ix, pool_ix],
            &payer.pubkey(),
            &[payer, &mint],
        )
        .await?;

    Ok(CreatedMint {
        mint: mint.pubkey(),
        pool: get_token_pool_pda(&mint.pubkey()),
        signature,
    })
}

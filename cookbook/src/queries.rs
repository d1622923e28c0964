//! Read-only queries backing the wallet-integration examples: balances per
//! mint and compression transaction history.

use light_client::rpc::RpcConnection;
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token::state::Mint;

use crate::{
    amount::format_token_amount,
    error::{CookbookError, Result},
    indexer::{PhotonClient, SignatureWithMetadata},
};

/// A per-mint balance with the mint's decimals applied for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTokenBalance {
    pub mint: Pubkey,
    pub base_units: u64,
    pub decimals: u8,
    pub ui_amount: String,
}

/// An owner's compressed holdings: lamports plus per-mint token balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerBalances {
    pub lamports: u64,
    pub tokens: Vec<FormattedTokenBalance>,
}

/// Fetch compressed SOL and token balances for `owner`. Each mint account
/// is read once to scale the raw balance by its decimals.
pub async fn owner_balances<R: RpcConnection>(
    rpc: &mut R,
    indexer: &PhotonClient,
    owner: &Pubkey,
) -> Result<OwnerBalances> {
    let lamports = indexer.get_compressed_balance_by_owner(owner).await?;
    let balances = indexer.get_compressed_token_balances_by_owner(owner).await?;

    let mut tokens = Vec::with_capacity(balances.len());
    for balance in balances {
        let decimals = mint_decimals(rpc, &balance.mint).await?;
        tokens.push(FormattedTokenBalance {
            mint: balance.mint,
            base_units: balance.balance,
            decimals,
            ui_amount: format_token_amount(balance.balance, decimals),
        });
    }
    Ok(OwnerBalances { lamports, tokens })
}

/// Compression transaction signatures for a token owner, newest first.
pub async fn transaction_history(
    indexer: &PhotonClient,
    owner: &Pubkey,
) -> Result<Vec<SignatureWithMetadata>> {
    indexer
        .get_compression_signatures_for_token_owner(owner)
        .await
}

/// Read a mint account and return its decimals.
pub async fn mint_decimals<R: RpcConnection>(rpc: &mut R, mint: &Pubkey) -> Result<u8> {
    let account = rpc
        .get_account(*mint)
        .await?
        .ok_or(CookbookError::AccountNotFound(*mint))?;
    let mint_state = Mint::unpack(&account.data)
        .map_err(|e| CookbookError::Instruction(format!("failed to unpack mint: {e}")))?;
    Ok(mint_state.decimals)
}

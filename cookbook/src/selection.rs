//! Selection of spendable compressed accounts.
//!
//! Every transfer-shaped operation repeats the same step: pick the fewest
//! input accounts whose amounts cover the requested total. Largest-first
//! greedy, the same policy as the JS SDK's selection helper.

use crate::{
    error::{CookbookError, Result},
    indexer::CompressedTokenAccount,
};

/// Pick input accounts covering `amount`, largest balances first. Returns
/// the selected accounts and their total. At least one account is selected
/// even for a zero amount, since an instruction needs an input to spend.
pub fn select_min_token_accounts(
    accounts: &[CompressedTokenAccount],
    amount: u64,
) -> Result<(Vec<CompressedTokenAccount>, u64)> {
    let available = accounts.iter().map(|a| a.token.amount).sum::<u64>();
    if available < amount {
        return Err(CookbookError::InsufficientBalance {
            available,
            requested: amount,
        });
    }

    let mut sorted: Vec<&CompressedTokenAccount> = accounts.iter().collect();
    sorted.sort_by(|a, b| b.token.amount.cmp(&a.token.amount));

    let mut selected = Vec::new();
    let mut total: u64 = 0;
    for account in sorted {
        if total >= amount && !selected.is_empty() {
            break;
        }
        total += account.token.amount;
        selected.push(account.clone());
    }

    if selected.is_empty() {
        return Err(CookbookError::InsufficientBalance {
            available,
            requested: amount,
        });
    }
    Ok((selected, total))
}

#[cfg(test)]
mod tests {
    use light_compressed_token::token_data::{AccountState, TokenData};
    use light_system_program::sdk::compressed_account::MerkleContext;
    use solana_sdk::pubkey::Pubkey;

    use super::*;

    fn account(amount: u64) -> CompressedTokenAccount {
        CompressedTokenAccount {
            token: TokenData {
                mint: Pubkey::new_unique(),
                owner: Pubkey::new_unique(),
                amount,
                delegate: None,
                state: AccountState::Initialized,
                tlv: None,
            },
            merkle_context: MerkleContext {
                merkle_tree_pubkey: Pubkey::new_unique(),
                nullifier_queue_pubkey: Pubkey::new_unique(),
                leaf_index: 0,
            },
            lamports: 0,
            hash: [0u8; 32],
        }
    }

    #[test]
    fn selects_single_covering_account() {
        let accounts = vec![account(100), account(50)];
        let (selected, total) = select_min_token_accounts(&accounts, 75).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].token.amount, 100);
        assert_eq!(total, 100);
    }

    #[test]
    fn accumulates_largest_first_until_covered() {
        let accounts = vec![account(30), account(20), account(60)];
        let (selected, total) = select_min_token_accounts(&accounts, 80).unwrap();
        assert_eq!(
            selected.iter().map(|a| a.token.amount).collect::<Vec<_>>(),
            vec![60, 30]
        );
        assert_eq!(total, 90);
    }

    #[test]
    fn exact_cover() {
        let accounts = vec![account(40), account(60)];
        let (selected, total) = select_min_token_accounts(&accounts, 100).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(total, 100);
    }

    #[test]
    fn total_always_covers_requested_amount() {
        let accounts = vec![account(13), account(7), account(29), account(1)];
        for amount in 0..=50u64 {
            let (_, total) = select_min_token_accounts(&accounts, amount).unwrap();
            assert!(total >= amount, "amount {amount} not covered by {total}");
        }
    }

    #[test]
    fn shortfall_reports_available_and_requested() {
        let accounts = vec![account(10), account(5)];
        match select_min_token_accounts(&accounts, 100) {
            Err(CookbookError::InsufficientBalance {
                available,
                requested,
            }) => {
                assert_eq!(available, 15);
                assert_eq!(requested, 100);
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
    }

    #[test]
    fn zero_amount_selects_one_account() {
        let accounts = vec![account(10), account(5)];
        let (selected, _) = select_min_token_accounts(&accounts, 0).unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn empty_account_set_is_insufficient() {
        match select_min_token_accounts(&[], 1) {
            Err(CookbookError::InsufficientBalance { available, .. }) => {
                assert_eq!(available, 0)
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
    }
}

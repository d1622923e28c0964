//! Thin client for the Photon compression indexer.
//!
//! Wraps the generated `photon-api` bindings and converts the wire records
//! (base58 strings, JSON integers) into the SDK types the instruction
//! builders take. Fetch, convert, hand over; nothing is cached.

use light_compressed_token::token_data::{AccountState, TokenData};
use light_system_program::{
    invoke::processor::CompressedProof,
    sdk::compressed_account::{CompressedAccount, MerkleContext},
};
use photon_api::apis::configuration::{ApiKey, Configuration};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::{CookbookError, Result},
    trees,
};

/// A compressed token account as reported by the indexer: the token data
/// plus everything needed to spend it (merkle context and account hash).
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedTokenAccount {
    pub token: TokenData,
    pub merkle_context: MerkleContext,
    pub lamports: u64,
    pub hash: [u8; 32],
}

impl CompressedTokenAccount {
    /// The generic compressed-account view of this token account, used by
    /// builders that account for lamports held alongside the token data.
    pub fn compressed_account(&self) -> CompressedAccount {
        CompressedAccount {
            owner: light_compressed_token::ID,
            lamports: self.lamports,
            address: None,
            data: None,
        }
    }
}

/// Aggregated balance for one mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub mint: Pubkey,
    pub balance: u64,
}

/// One entry of an owner's compression transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureWithMetadata {
    pub signature: String,
    pub slot: u64,
    pub block_time: u64,
}

/// Validity proof over a set of input account hashes.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidityProofResult {
    pub proof: CompressedProof,
    pub root_indices: Vec<u16>,
}

pub struct PhotonClient {
    configuration: Configuration,
}

impl std::fmt::Debug for PhotonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotonClient")
            .field("base_path", &self.configuration.base_path)
            .finish()
    }
}

impl PhotonClient {
    pub fn new(url: String, api_key: Option<String>) -> Self {
        let configuration = Configuration {
            base_path: url,
            api_key: api_key.map(|key| ApiKey {
                prefix: Some("api-key".to_string()),
                key,
            }),
            ..Default::default()
        };
        PhotonClient { configuration }
    }

    /// All compressed token accounts of `owner`, optionally filtered by
    /// mint.
    pub async fn get_compressed_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        mint: Option<&Pubkey>,
    ) -> Result<Vec<CompressedTokenAccount>> {
        let request = photon_api::models::GetCompressedTokenAccountsByOwnerPostRequest {
            params: Box::new(
                photon_api::models::GetCompressedTokenAccountsByOwnerPostRequestParams {
                    owner: owner.to_string(),
                    mint: mint.map(|m| m.to_string()),
                    cursor: None,
                    limit: None,
                },
            ),
            ..Default::default()
        };

        let response =
            photon_api::apis::default_api::get_compressed_token_accounts_by_owner_post(
                &self.configuration,
                request,
            )
            .await
            .map_err(|e| CookbookError::Indexer(e.to_string()))?;

        let result = extract_result("getCompressedTokenAccountsByOwner", response.result)?;
        result.value.items.iter().map(parse_token_account).collect()
    }

    /// All compressed token accounts delegated to `delegate`, optionally
    /// filtered by mint.
    pub async fn get_compressed_token_accounts_by_delegate(
        &self,
        delegate: &Pubkey,
        mint: Option<&Pubkey>,
    ) -> Result<Vec<CompressedTokenAccount>> {
        let request = photon_api::models::GetCompressedTokenAccountsByDelegatePostRequest {
            params: Box::new(
                photon_api::models::GetCompressedTokenAccountsByDelegatePostRequestParams {
                    delegate: delegate.to_string(),
                    mint: mint.map(|m| m.to_string()),
                    cursor: None,
                    limit: None,
                },
            ),
            ..Default::default()
        };

        let response =
            photon_api::apis::default_api::get_compressed_token_accounts_by_delegate_post(
                &self.configuration,
                request,
            )
            .await
            .map_err(|e| CookbookError::Indexer(e.to_string()))?;

        let result = extract_result("getCompressedTokenAccountsByDelegate", response.result)?;
        result.value.items.iter().map(parse_token_account).collect()
    }

    /// Compressed token balances of `owner`, aggregated per mint.
    pub async fn get_compressed_token_balances_by_owner(
        &self,
        owner: &Pubkey,
    ) -> Result<Vec<TokenBalance>> {
        let request = photon_api::models::GetCompressedTokenBalancesByOwnerPostRequest {
            params: Box::new(
                photon_api::models::GetCompressedTokenBalancesByOwnerPostRequestParams {
                    owner: owner.to_string(),
                    mint: None,
                    cursor: None,
                    limit: None,
                },
            ),
            ..Default::default()
        };

        let response = photon_api::apis::default_api::get_compressed_token_balances_by_owner_post(
            &self.configuration,
            request,
        )
        .await
        .map_err(|e| CookbookError::Indexer(e.to_string()))?;

        let result = extract_result("getCompressedTokenBalancesByOwner", response.result)?;
        result
            .value
            .token_balances
            .iter()
            .map(|balance| {
                Ok(TokenBalance {
                    mint: decode_pubkey(&balance.mint)?,
                    balance: balance.balance as u64,
                })
            })
            .collect()
    }

    /// Compressed SOL balance of `owner` in lamports.
    pub async fn get_compressed_balance_by_owner(&self, owner: &Pubkey) -> Result<u64> {
        let request = photon_api::models::GetCompressedBalanceByOwnerPostRequest {
            params: Box::new(
                photon_api::models::GetCompressedBalanceByOwnerPostRequestParams {
                    owner: owner.to_string(),
                },
            ),
            ..Default::default()
        };

        let response = photon_api::apis::default_api::get_compressed_balance_by_owner_post(
            &self.configuration,
            request,
        )
        .await
        .map_err(|e| CookbookError::Indexer(e.to_string()))?;

        let result = extract_result("getCompressedBalanceByOwner", response.result)?;
        Ok(result.value as u64)
    }

    /// Signatures of the transactions that touched `owner`'s compressed
    /// token accounts, newest first.
    pub async fn get_compression_signatures_for_token_owner(
        &self,
        owner: &Pubkey,
    ) -> Result<Vec<SignatureWithMetadata>> {
        let request = photon_api::models::GetCompressionSignaturesForTokenOwnerPostRequest {
            params: Box::new(
                photon_api::models::GetCompressionSignaturesForTokenOwnerPostRequestParams {
                    owner: owner.to_string(),
                    cursor: None,
                    limit: None,
                },
            ),
            ..Default::default()
        };

        let response =
            photon_api::apis::default_api::get_compression_signatures_for_token_owner_post(
                &self.configuration,
                request,
            )
            .await
            .map_err(|e| CookbookError::Indexer(e.to_string()))?;

        let result = extract_result("getCompressionSignaturesForTokenOwner", response.result)?;
        Ok(result
            .value
            .items
            .iter()
            .map(|info| SignatureWithMetadata {
                signature: info.signature.clone(),
                slot: info.slot as u64,
                block_time: info.block_time as u64,
            })
            .collect())
    }

    /// Validity proof that the accounts with the given hashes exist in
    /// their state trees. Proof generation itself happens on the indexer.
    pub async fn get_validity_proof(&self, hashes: &[[u8; 32]]) -> Result<ValidityProofResult> {
        let request = photon_api::models::GetValidityProofPostRequest {
            params: Box::new(photon_api::models::GetValidityProofPostRequestParams {
                hashes: Some(hashes.iter().map(|h| bs58::encode(h).into_string()).collect()),
                new_addresses: None,
                new_addresses_with_trees: None,
            }),
            ..Default::default()
        };

        let response = photon_api::apis::default_api::get_validity_proof_post(
            &self.configuration,
            request,
        )
        .await
        .map_err(|e| CookbookError::Indexer(e.to_string()))?;

        let result = extract_result("getValidityProof", response.result)?;
        let value = result.value;
        Ok(ValidityProofResult {
            proof: decode_proof(&value.compressed_proof)?,
            root_indices: value.root_indices.iter().map(|i| *i as u16).collect(),
        })
    }
}

fn extract_result<T>(method: &str, result: Option<Box<T>>) -> Result<Box<T>> {
    result.ok_or_else(|| CookbookError::Indexer(format!("{method} returned no result")))
}

fn parse_token_account(
    item: &photon_api::models::TokenAccount,
) -> Result<CompressedTokenAccount> {
    let account = &item.account;
    let token_data = &item.token_data;

    let merkle_tree_pubkey = decode_pubkey(&account.tree)?;
    let nullifier_queue_pubkey = trees::nullifier_queue_for_tree(&merkle_tree_pubkey)
        .ok_or_else(|| {
            CookbookError::Indexer(format!("unknown state tree {merkle_tree_pubkey}"))
        })?;

    Ok(CompressedTokenAccount {
        token: TokenData {
            mint: decode_pubkey(&token_data.mint)?,
            owner: decode_pubkey(&token_data.owner)?,
            amount: token_data.amount as u64,
            delegate: token_data
                .delegate
                .as_ref()
                .map(|d| decode_pubkey(d))
                .transpose()?,
            state: match token_data.state {
                photon_api::models::AccountState::Initialized => AccountState::Initialized,
                photon_api::models::AccountState::Frozen => AccountState::Frozen,
            },
            tlv: None,
        },
        merkle_context: MerkleContext {
            merkle_tree_pubkey,
            nullifier_queue_pubkey,
            leaf_index: account.leaf_index as u32,
        },
        lamports: account.lamports as u64,
        hash: decode_hash(&account.hash)?,
    })
}

fn decode_proof(proof: &photon_api::models::CompressedProof) -> Result<CompressedProof> {
    Ok(CompressedProof {
        a: decode_proof_part(&proof.a)?,
        b: decode_proof_part(&proof.b)?,
        c: decode_proof_part(&proof.c)?,
    })
}

fn decode_proof_part<const N: usize>(encoded: &str) -> Result<[u8; N]> {
    let bytes = base64::decode(encoded)
        .map_err(|e| CookbookError::Indexer(format!("invalid proof encoding: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        CookbookError::Indexer(format!(
            "proof part has {} bytes, expected {N}",
            bytes.len()
        ))
    })
}

pub(crate) fn decode_hash(value: &str) -> Result<[u8; 32]> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|e| CookbookError::Indexer(format!("invalid base58 hash {value:?}: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        CookbookError::Indexer(format!("hash {value:?} has {} bytes, expected 32", bytes.len()))
    })
}

pub(crate) fn decode_pubkey(value: &str) -> Result<Pubkey> {
    value
        .parse()
        .map_err(|_| CookbookError::Indexer(format!("invalid pubkey {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base58_hashes() {
        let hash = [7u8; 32];
        let encoded = bs58::encode(hash).into_string();
        assert_eq!(decode_hash(&encoded).unwrap(), hash);
    }

    #[test]
    fn rejects_wrong_length_hashes() {
        let encoded = bs58::encode([1u8; 16]).into_string();
        assert!(decode_hash(&encoded).is_err());
        assert!(decode_hash("not-base58!").is_err());
    }

    #[test]
    fn decodes_pubkeys() {
        let pubkey = Pubkey::new_unique();
        assert_eq!(decode_pubkey(&pubkey.to_string()).unwrap(), pubkey);
        assert!(decode_pubkey("garbage").is_err());
    }

    #[test]
    fn decodes_proof_parts() {
        let a = [3u8; 32];
        let decoded: [u8; 32] = decode_proof_part(&base64::encode(a)).unwrap();
        assert_eq!(decoded, a);

        let b = [4u8; 64];
        let decoded: [u8; 64] = decode_proof_part(&base64::encode(b)).unwrap();
        assert_eq!(decoded, b);

        // 32 bytes fed into a 64-byte slot must fail, not truncate.
        assert!(decode_proof_part::<64>(&base64::encode(a)).is_err());
    }
}

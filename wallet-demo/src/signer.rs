//! The signing seam of the demo.
//!
//! Instruction building and submission are identical whether the key
//! lives in a local file or behind a custodial wallet API, so the demo
//! talks to a trait. The remote implementation posts the serialized
//! unsigned transaction and gets the signed bytes back; custody stays
//! with the service.

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Keypair, signer::Signer, transaction::Transaction,
};

use crate::{
    config::WalletServiceConfig,
    error::{Result, WalletDemoError},
};

#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// The wallet's public key; used as fee payer and token owner.
    fn address(&self) -> Pubkey;

    /// Sign `transaction` (its blockhash already set) and return the
    /// fully signed transaction.
    async fn sign_transaction(
        &self,
        transaction: Transaction,
        blockhash: Hash,
    ) -> Result<Transaction>;
}

/// Signs with a keypair loaded from disk. Used for local development.
pub struct LocalSigner {
    keypair: Keypair,
}

impl LocalSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl TransactionSigner for LocalSigner {
    fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
        blockhash: Hash,
    ) -> Result<Transaction> {
        transaction
            .try_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletDemoError::Signer(e.to_string()))?;
        Ok(transaction)
    }
}

#[derive(serde::Serialize)]
struct SignRequest {
    /// Base64-encoded serialized transaction, unsigned.
    transaction: String,
    authorization_key: String,
}

#[derive(serde::Deserialize)]
struct SignResponse {
    /// Base64-encoded serialized transaction, signed.
    signed_transaction: String,
}

/// Signs through a custodial wallet service over HTTP.
pub struct RemoteSigner {
    config: WalletServiceConfig,
    client: reqwest::Client,
}

impl RemoteSigner {
    pub fn new(config: WalletServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn sign_url(&self) -> String {
        format!(
            "{}/wallets/{}/sign",
            self.config.api_url.trim_end_matches('/'),
            self.config.wallet_id
        )
    }
}

#[async_trait]
impl TransactionSigner for RemoteSigner {
    fn address(&self) -> Pubkey {
        self.config.wallet_address
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
        blockhash: Hash,
    ) -> Result<Transaction> {
        transaction.message.recent_blockhash = blockhash;
        let serialized = bincode::serialize(&transaction)
            .map_err(|e| WalletDemoError::Signer(format!("serialize: {e}")))?;

        let response = self
            .client
            .post(self.sign_url())
            .basic_auth(&self.config.app_id, Some(&self.config.app_secret))
            .json(&SignRequest {
                transaction: base64::encode(serialized),
                authorization_key: self.config.authorization_key.clone(),
            })
            .send()
            .await
            .map_err(|e| WalletDemoError::Signer(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WalletDemoError::Signer(format!(
                "wallet service returned {status}: {body}"
            )));
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| WalletDemoError::Signer(e.to_string()))?;
        let bytes = base64::decode(&signed.signed_transaction)
            .map_err(|e| WalletDemoError::Signer(format!("invalid base64: {e}")))?;
        bincode::deserialize(&bytes)
            .map_err(|e| WalletDemoError::Signer(format!("invalid transaction: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::{message::Message, system_instruction};

    use super::*;

    #[tokio::test]
    async fn local_signer_produces_a_valid_signature() {
        let keypair = Keypair::new();
        let signer = LocalSigner::new(keypair.insecure_clone());
        let instruction =
            system_instruction::transfer(&keypair.pubkey(), &Pubkey::new_unique(), 1);
        let transaction =
            Transaction::new_unsigned(Message::new(&[instruction], Some(&keypair.pubkey())));

        let blockhash = Hash::new_unique();
        let signed = signer.sign_transaction(transaction, blockhash).await.unwrap();
        assert_eq!(signed.message.recent_blockhash, blockhash);
        signed.verify().unwrap();
    }

    #[test]
    fn transaction_survives_the_wire_encoding() {
        let payer = Pubkey::new_unique();
        let instruction = system_instruction::transfer(&payer, &Pubkey::new_unique(), 42);
        let transaction = Transaction::new_unsigned(Message::new(&[instruction], Some(&payer)));

        let encoded = base64::encode(bincode::serialize(&transaction).unwrap());
        let decoded: Transaction = bincode::deserialize(&base64::decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, transaction);
    }
}

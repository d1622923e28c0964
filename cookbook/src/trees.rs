//! Registry of the public state trees and their nullifier queues.
//!
//! The protocol rotates writes across a set of public state trees. Scripts
//! pick one at random for outputs, the same policy the JS SDK's
//! `selectStateTreeInfo` applies. The indexer only reports the tree a
//! compressed account lives in, so the tree -> nullifier queue mapping is
//! kept here.

use rand::seq::SliceRandom;
use solana_sdk::{pubkey, pubkey::Pubkey};

use crate::error::{CookbookError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTreeInfo {
    pub tree: Pubkey,
    pub queue: Pubkey,
    pub cpi_context: Option<Pubkey>,
}

// TODO: keep updated with new trees.
pub const PUBLIC_STATE_TREES: [StateTreeInfo; 10] = [
    StateTreeInfo {
        tree: pubkey!("smt1NamzXdq4AMqS2fS2F1i5KTYPZRhoHgWx38d8WsT"),
        queue: pubkey!("nfq1NvQDJ2GEgnS8zt9prAe8rjjpAW1zFkrvZoBR148"),
        cpi_context: Some(pubkey!("cpi1uHzrEhBG733DoEJNgHCyRS3XmmyVNZx5fonubE4")),
    },
    StateTreeInfo {
        tree: pubkey!("smt2rJAFdyJJupwMKAqTNAJwvjhmiZ4JYGZmbVRw1Ho"),
        queue: pubkey!("nfq2hgS7NYemXsFaFUCe3EMXSDSfnZnAe27jC6aPP1X"),
        cpi_context: Some(pubkey!("cpi2cdhkH5roePvcudTgUL8ppEBfTay1desGh8G8QxK")),
    },
    StateTreeInfo {
        tree: pubkey!("smt3AFtReRGVcrP11D6bSLEaKdUmrGfaTNowMVccJeu"),
        queue: pubkey!("nfq3de4qt9d3wHxXWy1wcge3EXhid25mCr12bNWFdtV"),
        cpi_context: Some(pubkey!("cpi3Ycq5qZzFEwZSWgwMhMi1M9KG4KVx4T9GUmb58gk")),
    },
    StateTreeInfo {
        tree: pubkey!("smt4vjXvdjDFzvRMUxwTWnSy4c7cKkMaHuPrGsdDH7V"),
        queue: pubkey!("nfq4Ncp1vk3mFnCQ9cvwidp9k2L6fxEyCo2nerYD25A"),
        cpi_context: Some(pubkey!("cpi4yJqDt4SjPXaxKkvhXRowqiFxv1jKgoq6jDMfc2c")),
    },
    StateTreeInfo {
        tree: pubkey!("smt5uPaQT9n6b1qAkgyonmzRxtuazA53Rddwntqistc"),
        queue: pubkey!("nfq5b5xEguPtdD6uPetZduyrB5EUqad7gcUE46rALau"),
        cpi_context: Some(pubkey!("cpi5ryT8ULH2aLs8u1V6vG1uA71d52tRqHrDUxiVn8A")),
    },
    StateTreeInfo {
        tree: pubkey!("smt6ukQDSPPYHSshQovmiRUjG9jGFq2hW9vgrDFk5Yz"),
        queue: pubkey!("nfq6uzaNZ5n3EWF4t64M93AWzLGt5dXTikEA9fFRktv"),
        cpi_context: Some(pubkey!("cpi6maYjfu2TGbRu4dzsjzs4BHDGKdTyy4bhPNCmRmV")),
    },
    StateTreeInfo {
        tree: pubkey!("smt7onMFkvi3RbyhQCMajudYQkB1afAFt9CDXBQTLz6"),
        queue: pubkey!("nfq7yytdKkkLabu1KpvLsa5VPkvCT4jPWus5Yi74HTH"),
        cpi_context: Some(pubkey!("cpi7qnzKBpzhzVfGXyaabXyhGJVTaNQSKh4x4jffLLa")),
    },
    StateTreeInfo {
        tree: pubkey!("smt8TYxNy8SuhAdKJ8CeLtDkr2w6dgDmdz5ruiDw9Y9"),
        queue: pubkey!("nfq8vExDykci3VUSpj9R1totVst87hJfFWevNK4hiFb"),
        cpi_context: Some(pubkey!("cpi8GBR819DvLLWmiVgYmjLAhYX6j9bnBXaYXCHEA7i")),
    },
    StateTreeInfo {
        tree: pubkey!("smt9ReAYRF5eFjTd5gBJMn5aKwNRcmp3ub2CQr2vW7j"),
        queue: pubkey!("nfq9KFpNQL45ppP6ZG7zBpUeN18LZrNGkKyvV1kjTX2"),
        cpi_context: Some(pubkey!("cpi9CEV5DdCA5pyizmqv2Tk2aFBFwD32WSv6qaSN4Vb")),
    },
    StateTreeInfo {
        tree: pubkey!("smtAvYA5UbTRyKAkAj5kHs1CmrA42t6WkVLi4c6mA1f"),
        queue: pubkey!("nfqAroCRkcZBgsAJDNkptKpsSWyM6cgB9XpWNNiCEC4"),
        cpi_context: Some(pubkey!("cpiAb2eNFf6MQeqMWEyEjSN3VJcD5hghujhmtdcMuZp")),
    },
];

/// Pick a state tree for transaction outputs.
pub fn select_state_tree(infos: &[StateTreeInfo]) -> Result<StateTreeInfo> {
    infos
        .choose(&mut rand::thread_rng())
        .copied()
        .ok_or(CookbookError::NoStateTree)
}

/// The nullifier queue paired with a state tree, if the tree is known.
pub fn nullifier_queue_for_tree(tree: &Pubkey) -> Option<Pubkey> {
    PUBLIC_STATE_TREES
        .iter()
        .find(|info| info.tree == *tree)
        .map(|info| info.queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_draws_from_the_registry() {
        for _ in 0..32 {
            let info = select_state_tree(&PUBLIC_STATE_TREES).unwrap();
            assert!(PUBLIC_STATE_TREES.contains(&info));
        }
    }

    #[test]
    fn empty_registry_is_an_error() {
        assert!(matches!(
            select_state_tree(&[]),
            Err(CookbookError::NoStateTree)
        ));
    }

    #[test]
    fn queue_lookup_matches_pairing() {
        for info in PUBLIC_STATE_TREES {
            assert_eq!(nullifier_queue_for_tree(&info.tree), Some(info.queue));
        }
        assert_eq!(nullifier_queue_for_tree(&Pubkey::new_unique()), None);
    }
}

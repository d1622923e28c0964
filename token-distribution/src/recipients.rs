//! Recipient list parsing: one base58 pubkey per line, `#` comments and
//! blank lines skipped.

use std::{fs, path::Path};

use solana_sdk::pubkey::Pubkey;

use crate::error::{DistributionError, Result};

pub fn read_recipients_file(path: &Path) -> Result<Vec<Pubkey>> {
    parse_recipients(&fs::read_to_string(path)?)
}

pub fn parse_recipients(contents: &str) -> Result<Vec<Pubkey>> {
    let mut recipients = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let pubkey = line
            .parse()
            .map_err(|_| DistributionError::Recipients {
                line: index + 1,
                reason: format!("{line:?} is not a valid pubkey"),
            })?;
        recipients.push(pubkey);
    }
    if recipients.is_empty() {
        return Err(DistributionError::NoRecipients);
    }
    Ok(recipients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_with_comments_and_blanks() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let contents = format!("# airdrop targets\n{a}\n\n  {b}  \n");
        assert_eq!(parse_recipients(&contents).unwrap(), vec![a, b]);
    }

    #[test]
    fn reports_bad_line_number() {
        let contents = format!("{}\nnot-a-pubkey\n", Pubkey::new_unique());
        match parse_recipients(&contents) {
            Err(DistributionError::Recipients { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Recipients error, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_an_error() {
        assert!(matches!(
            parse_recipients("# nothing here\n"),
            Err(DistributionError::NoRecipients)
        ));
    }
}

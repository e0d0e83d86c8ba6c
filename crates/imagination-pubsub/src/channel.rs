//! Channel names, which are NATS subjects.

use crate::{Error, Result};

/// Checks that `channel` is a subject a message can be published to.
///
/// Subjects are dot-separated tokens. Tokens must be non-empty, contain no
/// whitespace, and may not be the `*` or `>` wildcards, which are only valid
/// when subscribing.
pub(crate) fn check_channel(channel: &str) -> Result<()> {
    if channel.is_empty() {
        return Err(Error::invalid_channel(channel, "channel must not be empty"));
    }
    if channel.chars().any(char::is_whitespace) {
        return Err(Error::invalid_channel(channel, "channel must not contain whitespace"));
    }

    for token in channel.split('.') {
        match token {
            "" => return Err(Error::invalid_channel(channel, "channel has an empty token")),
            "*" | ">" => {
                return Err(Error::invalid_channel(
                    channel,
                    "wildcards cannot be published to",
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_subjects() {
        for channel in ["orders", "orders.placed", "billing.invoices.v2", "a-b_c.D9"] {
            check_channel(channel).unwrap();
        }
    }

    #[test]
    fn rejects_malformed_subjects() {
        for channel in ["", "orders placed", "orders.", ".orders", "orders..placed", "orders.*", ">"] {
            match check_channel(channel).unwrap_err() {
                Error::InvalidChannel { channel: got, .. } => assert_eq!(got, channel),
                other => panic!("unexpected error for {channel:?}: {other:?}"),
            }
        }
    }
}

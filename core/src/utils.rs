//! Utility functions and types.

use std::fmt::Debug;
use std::fmt::Display;

/// Redacts a string so it can be logged or printed in `Debug` output.
///
/// Identifiers such as an access key keep their first and last three
/// characters when they are at least 12 characters long, so two keys can
/// still be told apart. Secrets built with [`Redact::secret`] never reveal
/// any character.
#[derive(Clone, Copy)]
pub struct Redact<'a> {
    value: &'a str,
    secret: bool,
}

impl<'a> Redact<'a> {
    /// Redact a secret value: only emptiness is ever revealed.
    pub fn secret(value: &'a str) -> Self {
        Self {
            value,
            secret: true,
        }
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Self {
            value,
            secret: false,
        }
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Self::from(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Self::from(value.as_deref().unwrap_or_default())
    }
}

impl Display for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if self.secret || length < 12 || !self.value.is_ascii() {
            f.write_str("***")
        } else {
            write!(
                f,
                "{}***{}",
                &self.value[..3],
                &self.value[length - 3..]
            )
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

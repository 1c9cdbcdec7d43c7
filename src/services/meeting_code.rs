// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meeting codes participants use to find each other in person.

use crate::services::matching::MatchingError;
use ring::rand::{SecureRandom, SystemRandom};

pub const MEETING_CODE_PREFIX: &str = "BILGI-";
/// Uppercase alphanumerics without 0/O and 1/I.
pub const MEETING_CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MEETING_CODE_LEN: usize = 4;

/// Source of meeting codes for newly committed matches.
pub trait MeetingCodes {
    fn next_code(&mut self) -> Result<String, MatchingError>;
}

/// Random codes from the system CSPRNG. Collisions are not checked here.
pub struct RandomMeetingCodes {
    rng: SystemRandom,
}

impl RandomMeetingCodes {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for RandomMeetingCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingCodes for RandomMeetingCodes {
    fn next_code(&mut self) -> Result<String, MatchingError> {
        let mut bytes = [0u8; MEETING_CODE_LEN];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| MatchingError::CodeGeneration)?;

        let mut code = String::with_capacity(MEETING_CODE_PREFIX.len() + MEETING_CODE_LEN);
        code.push_str(MEETING_CODE_PREFIX);
        // 32 symbols, so masking keeps the distribution uniform.
        code.extend(
            bytes
                .iter()
                .map(|b| MEETING_CODE_ALPHABET[usize::from(b & 0x1f)] as char),
        );
        Ok(code)
    }
}

/// True if `code` has the shape of a generated meeting code.
pub fn is_meeting_code(code: &str) -> bool {
    code.strip_prefix(MEETING_CODE_PREFIX).is_some_and(|suffix| {
        suffix.len() == MEETING_CODE_LEN
            && suffix.bytes().all(|b| MEETING_CODE_ALPHABET.contains(&b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_codes_have_expected_shape() {
        let mut codes = RandomMeetingCodes::new();
        for _ in 0..200 {
            let code = codes.next_code().unwrap();
            assert!(is_meeting_code(&code), "unexpected code {code}");
        }
    }

    #[test]
    fn test_alphabet_excludes_confusables() {
        for c in [b'0', b'O', b'1', b'I'] {
            assert!(!MEETING_CODE_ALPHABET.contains(&c));
        }
    }

    #[test]
    fn test_is_meeting_code_rejects_bad_input() {
        assert!(is_meeting_code("BILGI-AB2C"));
        assert!(!is_meeting_code("BILGI-AB0C"));
        assert!(!is_meeting_code("BILGI-ABC"));
        assert!(!is_meeting_code("SANTA-AB2C"));
        assert!(!is_meeting_code("BILGI-ab2c"));
    }
}

use crate::error::ApiError;

pub const MAX_CHIRP_LENGTH: usize = 140;

const PROFANE_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];
const MASK: &str = "****";

/// Enforce the length limit and mask profanity. Returns the body to store.
///
/// Length is counted in characters, not bytes.
pub fn validate_chirp(body: &str) -> Result<String, ApiError> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ApiError::BadRequest("Chirp is too long".into()));
    }
    Ok(mask_profanity(body))
}

/// Replace whole space-separated words from the block list, ignoring case.
/// Words with attached punctuation are left alone.
pub fn mask_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            if PROFANE_WORDS.contains(&lower.as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_boundary() {
        let exact = "a".repeat(MAX_CHIRP_LENGTH);
        assert_eq!(validate_chirp(&exact).unwrap(), exact);

        let over = "a".repeat(MAX_CHIRP_LENGTH + 1);
        assert!(matches!(validate_chirp(&over), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn length_counts_characters() {
        // 140 two-byte characters is 280 bytes but still a valid chirp.
        let wide = "é".repeat(MAX_CHIRP_LENGTH);
        assert!(validate_chirp(&wide).is_ok());
        assert!(validate_chirp(&format!("{wide}é")).is_err());
    }

    #[test]
    fn masks_profanity_case_insensitively() {
        assert_eq!(
            mask_profanity("I had something interesting for breakfast"),
            "I had something interesting for breakfast"
        );
        assert_eq!(
            mask_profanity("I hear Mastodon is better than Chirpy. sharbert I need to migrate"),
            "I hear Mastodon is better than Chirpy. **** I need to migrate"
        );
        assert_eq!(
            mask_profanity("I really need a kerfuffle to go to bed sooner, Fornax !"),
            "I really need a **** to go to bed sooner, **** !"
        );
    }

    #[test]
    fn punctuation_keeps_word_intact() {
        assert_eq!(mask_profanity("Sharbert!"), "Sharbert!");
    }

    #[test]
    fn spacing_is_preserved() {
        assert_eq!(mask_profanity("  fornax  "), "  ****  ");
    }
}

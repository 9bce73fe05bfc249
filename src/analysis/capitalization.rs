use serde::{Deserialize, Serialize};

/// Capitalization class attached to indexed terms as a one-byte payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalizationClass {
    /// No lowercase characters, at least one uppercase (`NASA`)
    AllCap,
    /// Exactly one uppercase character, at position 0 (`Trump`)
    FirstCap,
    /// Mixed case that is not the first-cap pattern (`McDonald`, `iPhone`)
    Cap,
}

impl CapitalizationClass {
    pub const ALL: [CapitalizationClass; 3] = [
        CapitalizationClass::FirstCap,
        CapitalizationClass::AllCap,
        CapitalizationClass::Cap,
    ];

    /// Payload byte stored alongside the indexed term
    pub const fn code(self) -> u8 {
        match self {
            CapitalizationClass::AllCap => b'A',
            CapitalizationClass::FirstCap => b'F',
            CapitalizationClass::Cap => b'C',
        }
    }

    /// Lowercase operator keyword used in `keyword(term)` expressions
    pub const fn keyword(self) -> &'static str {
        match self {
            CapitalizationClass::AllCap => "allcap",
            CapitalizationClass::FirstCap => "firstcap",
            CapitalizationClass::Cap => "cap",
        }
    }

    /// Case-insensitive keyword lookup
    pub fn from_keyword(keyword: &str) -> Option<CapitalizationClass> {
        Self::ALL
            .into_iter()
            .find(|class| class.keyword().eq_ignore_ascii_case(keyword))
    }

    pub fn from_code(code: u8) -> Option<CapitalizationClass> {
        Self::ALL.into_iter().find(|class| class.code() == code)
    }

    /// Class the index-time payload filter assigns to a raw token.
    ///
    /// Any character that is not uppercase counts as lowercase here, so
    /// digits and punctuation break the all-cap pattern. Tokens without an
    /// uppercase character carry no payload.
    pub fn of_token(token: &str) -> Option<CapitalizationClass> {
        let mut upper_count = 0usize;
        let mut some_lower = false;
        let mut first_is_upper = false;

        for (i, ch) in token.chars().enumerate() {
            if ch.is_uppercase() {
                upper_count += 1;
                if i == 0 {
                    first_is_upper = true;
                }
            } else {
                some_lower = true;
            }
        }

        if upper_count == 0 {
            None
        } else if !some_lower {
            Some(CapitalizationClass::AllCap)
        } else if first_is_upper && upper_count == 1 {
            Some(CapitalizationClass::FirstCap)
        } else {
            Some(CapitalizationClass::Cap)
        }
    }
}

impl std::fmt::Display for CapitalizationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

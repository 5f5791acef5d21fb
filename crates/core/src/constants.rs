/// Currency assigned to a user whose settings are created lazily
pub const DEFAULT_CURRENCY: &str = "USD";

/// Language assigned to newly created settings
pub const DEFAULT_LANGUAGE: &str = "en";

/// Theme assigned to newly created settings
pub const DEFAULT_THEME: &str = "system";

/// Fractional digits of every monetary amount
pub const MONEY_SCALE: u32 = 2;

/// Fractional digits of every percentage
pub const PERCENT_SCALE: u32 = 2;

/// Default target split (needs / wants / savings)
pub const DEFAULT_NEEDS_PERCENTAGE: i64 = 50;
pub const DEFAULT_WANTS_PERCENTAGE: i64 = 30;
pub const DEFAULT_SAVINGS_PERCENTAGE: i64 = 20;

/// Maximum length of a record name
pub const MAX_RECORD_NAME_LEN: usize = 120;

/// Maximum length of a language tag
pub const MAX_LANGUAGE_LEN: usize = 16;

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Cheapest cost bcrypt accepts; used by tests to keep hashing fast.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// What `follow` does when the edge already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateFollowPolicy {
    /// Fail with `IntegrityKind::DuplicateFollow`.
    Reject,
    /// Leave the existing edge in place and succeed.
    Ignore,
}

impl FromStr for DuplicateFollowPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(AppError::config(format!(
                "WARBLER_DUPLICATE_FOLLOW must be 'reject' or 'ignore', got '{other}'"
            ))),
        }
    }
}

/// Tunables for the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub bcrypt_cost: u32,
    pub duplicate_follow: DuplicateFollowPolicy,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            duplicate_follow: DuplicateFollowPolicy::Reject,
        }
    }
}

impl DirectoryConfig {
    /// Reads `WARBLER_BCRYPT_COST` and `WARBLER_DUPLICATE_FOLLOW`; unset means default.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = optional_var("WARBLER_BCRYPT_COST") {
            let cost = raw.trim().parse::<u32>().map_err(|_| {
                AppError::config(format!("WARBLER_BCRYPT_COST must be an integer, got '{raw}'"))
            })?;
            config = config.with_bcrypt_cost(cost)?;
        }

        if let Some(raw) = optional_var("WARBLER_DUPLICATE_FOLLOW") {
            config.duplicate_follow = raw.parse()?;
        }

        Ok(config)
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Result<Self, AppError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(AppError::config(format!(
                "bcrypt cost must be within {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}, got {cost}"
            )));
        }
        self.bcrypt_cost = cost;
        Ok(self)
    }

    pub fn with_duplicate_follow(mut self, policy: DuplicateFollowPolicy) -> Self {
        self.duplicate_follow = policy;
        self
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

use std::env;

pub const REGION_ENV: &str = "PARAMSTORE_REGION";
pub const PAGE_SIZE_ENV: &str = "PARAMSTORE_PAGE_SIZE";

/// Largest `MaxResults` SSM accepts on `GetParametersByPath`.
pub const MAX_PAGE_SIZE: i32 = 10;

/// Settings for building a [`crate::ParameterStore`] against the real service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreConfig {
    /// Overrides the region resolved by the AWS default provider chain.
    pub region: Option<String>,
    /// Forwarded as `MaxResults` on every list request.
    pub page_size: Option<i32>,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Read `PARAMSTORE_REGION` and `PARAMSTORE_PAGE_SIZE`.
    ///
    /// Empty or unparsable values are ignored.
    pub fn from_env() -> Self {
        let region = env::var(REGION_ENV)
            .ok()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        let page_size = env::var(PAGE_SIZE_ENV)
            .ok()
            .and_then(|p| p.trim().parse::<i32>().ok());

        Self { region, page_size }
    }

    /// Fill unset fields from `other`.
    pub fn or(self, other: StoreConfig) -> Self {
        Self {
            region: self.region.or(other.region),
            page_size: self.page_size.or(other.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = StoreConfig::new().region("eu-west-1").page_size(5);
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.page_size, Some(5));
    }

    #[test]
    fn test_or_prefers_explicit_values() {
        let explicit = StoreConfig::new().region("us-east-2");
        let fallback = StoreConfig::new().region("eu-west-1").page_size(3);

        let merged = explicit.or(fallback);
        assert_eq!(merged.region.as_deref(), Some("us-east-2"));
        assert_eq!(merged.page_size, Some(3));
    }

    #[test]
    fn test_from_env() {
        // SAFETY: this is the only test touching these variables.
        unsafe {
            env::set_var(REGION_ENV, " ap-south-1 ");
            env::set_var(PAGE_SIZE_ENV, "not-a-number");
        }
        let config = StoreConfig::from_env();
        assert_eq!(config.region.as_deref(), Some("ap-south-1"));
        assert_eq!(config.page_size, None);

        unsafe {
            env::set_var(PAGE_SIZE_ENV, "7");
        }
        assert_eq!(StoreConfig::from_env().page_size, Some(7));

        unsafe {
            env::remove_var(REGION_ENV);
            env::remove_var(PAGE_SIZE_ENV);
        }
        assert_eq!(StoreConfig::from_env(), StoreConfig::default());
    }
}

//! Shopee Open Platform regions.
//!
//! Each region maps to the partner API host that serves it. Sandbox regions
//! point at Shopee's `test-stable` environment.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Shopee Open Platform deployment.
///
/// # Example
///
/// ```rust
/// use shopee_api::ShopeeRegion;
///
/// let region: ShopeeRegion = "china".parse().unwrap();
/// assert_eq!(region, ShopeeRegion::China);
/// assert_eq!(region.base_url(), "https://openplatform.shopee.cn/api/v2");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShopeeRegion {
    /// Global production platform.
    #[default]
    Global,
    /// Mainland China production platform.
    China,
    /// Brazil production platform.
    Brazil,
    /// Global sandbox.
    TestGlobal,
    /// China sandbox.
    TestChina,
}

impl ShopeeRegion {
    /// Returns the partner API base URL for this region, including `/api/v2`.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Global => "https://partner.shopeemobile.com/api/v2",
            Self::China => "https://openplatform.shopee.cn/api/v2",
            Self::Brazil => "https://openplatform.shopee.com.br/api/v2",
            Self::TestGlobal => "https://partner.test-stable.shopeemobile.com/api/v2",
            Self::TestChina => "https://openplatform.test-stable.shopee.cn/api/v2",
        }
    }

    /// Returns `true` for sandbox regions.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::TestGlobal | Self::TestChina)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::China => "china",
            Self::Brazil => "brazil",
            Self::TestGlobal => "test_global",
            Self::TestChina => "test_china",
        }
    }
}

impl fmt::Display for ShopeeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShopeeRegion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "global" => Ok(Self::Global),
            "china" | "cn" => Ok(Self::China),
            "brazil" | "br" => Ok(Self::Brazil),
            "test_global" => Ok(Self::TestGlobal),
            "test_china" => Ok(Self::TestChina),
            _ => Err(ConfigError::UnknownRegion {
                region: s.to_string(),
            }),
        }
    }
}

//! Project entity and identifiers

use serde::{Deserialize, Serialize};

/// Identifier of a tracked brand project (the scan subject)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of the account that owns projects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A brand being tracked (Entity)
///
/// Carries the metadata the prompt builder interpolates: the brand name,
/// alternative spellings, the brand's web domain and an optional free-text
/// description of the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub brand_name: String,
    #[serde(default)]
    pub brand_variants: Vec<String>,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_context: Option<String>,
}

impl Project {
    pub fn new(
        id: impl Into<ProjectId>,
        owner_id: impl Into<UserId>,
        brand_name: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            brand_name: brand_name.into(),
            brand_variants: Vec::new(),
            domain: domain.into(),
            business_context: None,
        }
    }

    pub fn with_variants(mut self, variants: Vec<String>) -> Self {
        self.brand_variants = variants;
        self
    }

    pub fn with_business_context(mut self, context: impl Into<String>) -> Self {
        self.business_context = Some(context.into());
        self
    }

    /// Ownership check used by the authorization step of every use case
    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

//! Shared helpers for scan use cases.

use crate::ports::repository::{ProjectLookup, RepositoryError};
use brandlens_domain::{DomainError, Project, ProjectId, UserId};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum AuthorizeError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Load the project and check that `user_id` owns it.
pub(crate) async fn authorize(
    projects: &dyn ProjectLookup,
    project_id: &ProjectId,
    user_id: &UserId,
) -> Result<Project, AuthorizeError> {
    let project = projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| DomainError::ProjectNotFound(project_id.to_string()))?;

    if !project.belongs_to(user_id) {
        warn!(project = %project_id, user = %user_id, "Ownership check failed");
        return Err(DomainError::Forbidden {
            project_id: project_id.to_string(),
            user_id: user_id.to_string(),
        }
        .into());
    }

    Ok(project)
}

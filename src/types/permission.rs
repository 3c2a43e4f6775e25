use std::fmt;

use serde::{Deserialize, Serialize};

use super::Pipeline;
use crate::error::{Error, Result};

/// Role stored against every issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PowerUser,
    RegularUser,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::PowerUser => "power_user",
            Role::RegularUser => "regular_user",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "power_user" => Some(Role::PowerUser),
            "regular_user" => Some(Role::RegularUser),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pipelines a principal may act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    Pipeline { pipeline: Pipeline },
    Unscoped,
}

/// Resolved authorization for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub requestor_id: String,
    pub role: Role,
    pub scope: Scope,
}

impl Permission {
    /// Power users are never pipeline-scoped.
    #[must_use]
    pub fn power_user(requestor_id: impl Into<String>) -> Self {
        Self {
            requestor_id: requestor_id.into(),
            role: Role::PowerUser,
            scope: Scope::Unscoped,
        }
    }

    #[must_use]
    pub fn regular_user(requestor_id: impl Into<String>, pipeline: Option<Pipeline>) -> Self {
        Self {
            requestor_id: requestor_id.into(),
            role: Role::RegularUser,
            scope: match pipeline {
                Some(pipeline) => Scope::Pipeline { pipeline },
                None => Scope::Unscoped,
            },
        }
    }

    #[must_use]
    pub fn is_power_user(&self) -> bool {
        self.role == Role::PowerUser
    }

    /// The pipeline this permission is restricted to, if any.
    #[must_use]
    pub fn pipeline(&self) -> Option<&Pipeline> {
        match &self.scope {
            Scope::Pipeline { pipeline } => Some(pipeline),
            Scope::Unscoped => None,
        }
    }

    /// Power users may act on any pipeline. Regular users only on the pipeline
    /// they are scoped to; an unscoped regular user may act on none.
    #[must_use]
    pub fn allows_pipeline(&self, pipeline: &Pipeline) -> bool {
        match self.role {
            Role::PowerUser => true,
            Role::RegularUser => self
                .pipeline()
                .is_some_and(|scoped| scoped.same_release(pipeline)),
        }
    }

    pub fn require_pipeline(&self, pipeline: &Pipeline) -> Result<()> {
        if self.allows_pipeline(pipeline) {
            Ok(())
        } else {
            Err(Error::Forbidden(format!(
                "Token is not authorized for pipeline '{}' version '{}'",
                pipeline.name, pipeline.version
            )))
        }
    }

    pub fn require_power_user(&self) -> Result<()> {
        if self.is_power_user() {
            Ok(())
        } else {
            Err(Error::Forbidden("Power user token required".to_string()))
        }
    }
}

//! GraphQL execution settings

use super::{parse_env, ConfigResult};
use crate::graphql::loaders::LoaderSettings;

/// Default maximum selection depth accepted by validation
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// GraphQL execution configuration
#[derive(Debug, Clone)]
pub struct GraphQLConfig {
    /// Deepest selection tree accepted; deeper documents fail validation
    pub max_depth: usize,

    /// Split a batch into repository calls of at most this many keys.
    /// `None` sends every key of a batch in one call.
    pub max_batch_size: Option<usize>,

    /// Serve the GraphQL playground page on `GET /graphql`
    pub playground: bool,
}

impl GraphQLConfig {
    /// Load GraphQL configuration from environment variables
    ///
    /// `GRAPHQL_MAX_BATCH_SIZE=0` behaves like leaving it unset.
    pub fn from_env(playground_default: bool) -> ConfigResult<Self> {
        let max_batch_size: usize = parse_env("GRAPHQL_MAX_BATCH_SIZE", 0)?;

        Ok(Self {
            max_depth: parse_env("GRAPHQL_MAX_DEPTH", DEFAULT_MAX_DEPTH)?,
            max_batch_size: (max_batch_size > 0).then_some(max_batch_size),
            playground: parse_env("GRAPHQL_PLAYGROUND", playground_default)?,
        })
    }

    /// Batching parameters handed to every request's loader registry
    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            max_batch_size: self.max_batch_size,
        }
    }
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_batch_size: None,
            playground: true,
        }
    }
}

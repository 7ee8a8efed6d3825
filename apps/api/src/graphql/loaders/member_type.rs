//! Member type batch loader

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;

use super::RelationLoader;
use crate::models::{MemberType, MemberTypeId};
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for member type queries (`Profile.memberType`)
#[derive(Clone)]
pub struct MemberTypeLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<MemberTypeId> for MemberTypeLoader {
    const NAME: &'static str = "member_type";

    type Record = MemberType;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        vec![value]
    }
}

impl Loader<MemberTypeId> for MemberTypeLoader {
    type Value = MemberType;
    type Error = Arc<RepositoryError>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Self::Value>, Self::Error> {
        let member_types = self
            .repository
            .member_types_by_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(member_types.into_iter().map(|m| (m.id, m)).collect())
    }
}

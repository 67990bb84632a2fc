use crate::{
    abstract_trait::{DynApiClient, DynAuthService, DynResourceService},
    service::{AuthService, ResourceService},
};
use shared::abstract_trait::DynSessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub resource_service: DynResourceService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("resource_service", &"DynResourceService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(client: DynApiClient, session: DynSessionStore) -> Self {
        let auth_service: DynAuthService = Arc::new(AuthService::new(client.clone(), session));

        let resource_service: DynResourceService = Arc::new(ResourceService::new(client));

        Self {
            auth_service,
            resource_service,
        }
    }
}

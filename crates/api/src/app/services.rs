//! Service wiring: inventory adapter, assembler, guard and link builder.

use std::sync::Arc;

use serde_json::Value;

use plugboard_auth::{DeploymentMode, PluginAccessGuard};
use plugboard_catalog::{
    CollectionAssembler, FilterChain, InventorySource, ItemFilterChain, ItemSchema,
    StatusAnnotation, ViewContext,
};
use plugboard_core::PluginId;
use plugboard_infra::inventory::FsInventory;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::links::LinkBuilder;
use crate::authz;
use crate::config::ApiConfig;
use crate::context::PrincipalContext;

/// Shared, read-only request services.
pub struct AppServices {
    assembler: CollectionAssembler<Arc<dyn InventorySource>>,
    guard: PluginAccessGuard,
    deployment: DeploymentMode,
    links: LinkBuilder,
}

impl AppServices {
    pub fn new(
        inventory: Arc<dyn InventorySource>,
        deployment: DeploymentMode,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            assembler: CollectionAssembler::new(inventory),
            guard: PluginAccessGuard::new(),
            deployment,
            links: LinkBuilder::new(public_url),
        }
    }

    /// Filesystem-backed services for the binary.
    pub fn from_config(config: &ApiConfig) -> Self {
        let inventory = FsInventory::new(&config.content_dir)
            .with_plugin_dir(&config.plugin_dir)
            .with_mu_plugin_dir(&config.mu_plugin_dir)
            .with_network_dropins(config.deployment.is_network());

        tracing::info!(
            content_dir = %config.content_dir.display(),
            plugin_dir = %config.plugin_dir.display(),
            mu_plugin_dir = %config.mu_plugin_dir.display(),
            deployment = ?config.deployment,
            "filesystem inventory configured"
        );

        Self::new(Arc::new(inventory), config.deployment, config.public_url.clone())
            .with_annotation(config.status_annotation)
    }

    pub fn with_filters(self, filters: FilterChain) -> Self {
        let assembler = self.assembler.with_filters(filters);
        Self { assembler, ..self }
    }

    /// Per-item response stages, run after shaping and before links are added.
    pub fn with_item_filters(self, item_filters: ItemFilterChain) -> Self {
        let assembler = self.assembler.with_item_filters(item_filters);
        Self { assembler, ..self }
    }

    pub fn with_annotation(self, annotation: StatusAnnotation) -> Self {
        let assembler = self.assembler.with_annotation(annotation);
        Self { assembler, ..self }
    }

    pub fn deployment(&self) -> DeploymentMode {
        self.deployment
    }

    pub fn guard(&self) -> &PluginAccessGuard {
        &self.guard
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn schema(&self) -> &ItemSchema {
        self.assembler.schema()
    }

    /// The full listing, with links, for an authorized caller.
    pub fn list_plugins(
        &self,
        principal: &PrincipalContext,
        context: ViewContext,
    ) -> Result<Vec<Value>, ApiError> {
        authz::authorize_plugin_read(&self.guard, self.deployment, principal)?;

        let shaped = self.assembler.list(context).inspect_err(|e| {
            tracing::error!(error = %e, "plugin inventory read failed");
        })?;

        tracing::debug!(count = shaped.len(), context = %context, "plugin listing assembled");

        Ok(shaped
            .into_iter()
            .map(|p| dto::plugin_to_json(p, &self.links))
            .collect())
    }

    /// One plugin, with links, for an authorized caller.
    pub fn get_plugin(
        &self,
        principal: &PrincipalContext,
        id: &PluginId,
        context: ViewContext,
    ) -> Result<Value, ApiError> {
        authz::authorize_plugin_read(&self.guard, self.deployment, principal)?;

        let found = self.assembler.find(id, context).inspect_err(|e| {
            tracing::error!(error = %e, plugin = %id, "plugin inventory read failed");
        })?;

        found
            .map(|p| dto::plugin_to_json(p, &self.links))
            .ok_or(ApiError::PluginNotFound)
    }
}

#[cfg(test)]
mod tests {
    use plugboard_auth::{PrincipalId, Role};
    use plugboard_catalog::{BucketKind, RawPluginRecord, raw::fields};
    use plugboard_infra::inventory::InMemoryInventory;

    use super::*;

    fn principal(roles: &[&'static str]) -> PrincipalContext {
        PrincipalContext::new(PrincipalId::new(), roles.iter().map(|r| Role::new(*r)).collect())
    }

    fn seeded() -> Arc<InMemoryInventory> {
        let inventory = Arc::new(InMemoryInventory::new());
        inventory.upsert(
            BucketKind::All,
            "hello.php",
            RawPluginRecord::new().with(fields::NAME, "Hello Dolly"),
        );
        inventory
    }

    #[test]
    fn denied_callers_never_reach_the_inventory() {
        let inventory = seeded();
        let services = AppServices::new(inventory.clone(), DeploymentMode::SingleSite, "http://h");

        let err = services
            .list_plugins(&principal(&["subscriber"]), ViewContext::View)
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = services
            .get_plugin(&principal(&[]), &PluginId::new("hello.php"), ViewContext::View)
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        assert_eq!(inventory.reads(), 0);
    }

    #[test]
    fn network_deployment_requires_network_capability() {
        let inventory = seeded();
        let services = AppServices::new(inventory.clone(), DeploymentMode::Network, "http://h");

        assert!(matches!(
            services.list_plugins(&principal(&["site_admin"]), ViewContext::View),
            Err(ApiError::Forbidden(_))
        ));
        assert_eq!(inventory.reads(), 0);

        let listing = services
            .list_plugins(&principal(&["network_admin"]), ViewContext::View)
            .unwrap();
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn get_plugin_misses_are_not_found() {
        let services = AppServices::new(seeded(), DeploymentMode::SingleSite, "http://h");

        let found = services
            .get_plugin(&principal(&["admin"]), &PluginId::new("hello.php"), ViewContext::View)
            .unwrap();
        assert_eq!(found["name"], "Hello Dolly");
        assert_eq!(found["_links"]["self"][0]["href"], "http://h/plugins/hello.php");

        assert!(matches!(
            services.get_plugin(
                &principal(&["admin"]),
                &PluginId::new("nope.php"),
                ViewContext::View
            ),
            Err(ApiError::PluginNotFound)
        ));
    }

    #[test]
    fn legacy_annotation_is_configurable() {
        let inventory = Arc::new(InMemoryInventory::new());
        inventory.upsert(BucketKind::MustUse, "loader.php", RawPluginRecord::new());
        let services = AppServices::new(inventory, DeploymentMode::SingleSite, "http://h")
            .with_annotation(StatusAnnotation::Legacy);

        let listing = services
            .list_plugins(&principal(&["admin"]), ViewContext::View)
            .unwrap();
        assert_eq!(listing[0]["status"], "");
    }

    #[test]
    fn item_filters_run_before_links_are_attached() {
        let services = AppServices::new(seeded(), DeploymentMode::SingleSite, "http://h")
            .with_item_filters(ItemFilterChain::new().with(|mut item, _| {
                item.fields.insert("_links".into(), serde_json::json!("overwritten"));
                item.fields.insert("name".into(), serde_json::json!("Renamed"));
                item
            }));
        let admin = principal(&["admin"]);

        let listing = services.list_plugins(&admin, ViewContext::View).unwrap();
        assert_eq!(listing[0]["name"], "Renamed");
        assert_eq!(listing[0]["_links"]["self"][0]["href"], "http://h/plugins/hello.php");

        let found = services
            .get_plugin(&admin, &PluginId::new("hello.php"), ViewContext::View)
            .unwrap();
        assert_eq!(found["name"], "Renamed");
    }
}

// ── Cascading selection state machine ──
//
// Drives a creation form where each parent choice narrows the next list:
// site → environment → cluster. Every event validates against the current
// snapshot and leaves the form untouched when it is rejected.

mod policy;

use serde::Serialize;
use thiserror::Error;

pub use policy::{FieldPolicy, FieldSet, FormField, FormMode};

use crate::command::{
    Command, CreateClusterRequest, CreateEnvironmentRequest, CreateSiteRequest,
    CreateSyncClusterRequest,
};
use crate::model::{ClusterId, ClusterTypeId, EnvironmentId, EnvironmentTypeId, SiteId};
use crate::store::TopologySnapshot;

/// Errors raised by form events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("the {0} field is disabled")]
    FieldDisabled(FormField),

    #[error("{id} is not a valid {field} option")]
    UnknownOption { field: FormField, id: String },

    #[error("the {0} field is required")]
    MissingField(FormField),
}

/// Where the cascade currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionState {
    NoSiteSelected,
    SiteSelected(SiteId),
    EnvSelected(SiteId, EnvironmentId),
    ClusterSelected(SiteId, EnvironmentId, ClusterId),
}

/// One entry of a picker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice<I> {
    pub id: I,
    pub name: String,
}

// ── CreationForm ─────────────────────────────────────────────────────

/// Form state for creating one entity of the given [`FormMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationForm {
    mode: FormMode,
    enabled: FieldSet,
    required: FieldSet,
    site: Option<SiteId>,
    environment: Option<EnvironmentId>,
    cluster: Option<ClusterId>,
    name: String,
    environment_type: Option<EnvironmentTypeId>,
    cluster_type: Option<ClusterTypeId>,
    environment_options: Vec<Choice<EnvironmentId>>,
    cluster_options: Vec<Choice<ClusterId>>,
}

impl CreationForm {
    pub fn new(mode: FormMode) -> Self {
        let policy = FieldPolicy::for_mode(mode);
        Self {
            mode,
            enabled: policy.enabled,
            required: policy.required,
            site: None,
            environment: None,
            cluster: None,
            name: String::new(),
            environment_type: None,
            cluster_type: None,
            environment_options: Vec::new(),
            cluster_options: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_enabled(&self, field: FormField) -> bool {
        self.enabled.contains(field)
    }

    pub fn is_required(&self, field: FormField) -> bool {
        self.required.contains(field)
    }

    pub fn state(&self) -> SelectionState {
        match (self.site, self.environment, self.cluster) {
            (Some(s), Some(e), Some(c)) => SelectionState::ClusterSelected(s, e, c),
            (Some(s), Some(e), None) => SelectionState::EnvSelected(s, e),
            (Some(s), _, _) => SelectionState::SiteSelected(s),
            (None, _, _) => SelectionState::NoSiteSelected,
        }
    }

    pub fn site(&self) -> Option<SiteId> {
        self.site
    }

    pub fn environment(&self) -> Option<EnvironmentId> {
        self.environment
    }

    pub fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment_type(&self) -> Option<EnvironmentTypeId> {
        self.environment_type
    }

    pub fn cluster_type(&self) -> Option<ClusterTypeId> {
        self.cluster_type
    }

    /// Sites the user may pick. Sync-clusters only target the local site.
    pub fn site_options(&self, snapshot: &TopologySnapshot) -> Vec<Choice<SiteId>> {
        let sites = match self.mode {
            FormMode::SyncCluster => snapshot.local_sites(),
            _ => snapshot.all_sites(),
        };
        sites
            .into_iter()
            .map(|s| Choice {
                id: s.id,
                name: s.name.clone(),
            })
            .collect()
    }

    /// Environments of the selected site.
    pub fn environment_options(&self) -> &[Choice<EnvironmentId>] {
        &self.environment_options
    }

    /// Clusters of the selected environment.
    pub fn cluster_options(&self) -> &[Choice<ClusterId>] {
        &self.cluster_options
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Pick (or clear) the site. Always resets environment and cluster.
    pub fn select_site(
        &mut self,
        snapshot: &TopologySnapshot,
        site: Option<SiteId>,
    ) -> Result<SelectionState, SelectionError> {
        self.ensure_enabled(FormField::Site)?;

        let Some(id) = site else {
            self.site = None;
            self.clear_environment();
            self.enabled.remove(FormField::Environment);
            return Ok(self.state());
        };

        if !self.site_options(snapshot).iter().any(|c| c.id == id) {
            return Err(unknown(FormField::Site, id));
        }

        self.site = Some(id);
        self.clear_environment();
        self.environment_options = snapshot
            .environments_for_site(id)
            .into_iter()
            .map(|e| Choice {
                id: e.id,
                name: e.name.clone(),
            })
            .collect();
        self.enabled
            .set(FormField::Environment, self.mode != FormMode::Site);
        Ok(self.state())
    }

    /// Pick (or clear) the environment. Always resets the cluster.
    pub fn select_environment(
        &mut self,
        snapshot: &TopologySnapshot,
        environment: Option<EnvironmentId>,
    ) -> Result<SelectionState, SelectionError> {
        self.ensure_enabled(FormField::Environment)?;

        let Some(id) = environment else {
            self.environment = None;
            self.clear_cluster();
            return Ok(self.state());
        };

        if !self.environment_options.iter().any(|c| c.id == id) {
            return Err(unknown(FormField::Environment, id));
        }

        self.environment = Some(id);
        self.clear_cluster();
        self.cluster_options = snapshot
            .clusters_for_environment(id)
            .into_iter()
            .map(|c| Choice {
                id: c.id,
                name: c.name.clone(),
            })
            .collect();
        self.enabled
            .set(FormField::Cluster, self.mode == FormMode::SyncCluster);
        Ok(self.state())
    }

    pub fn select_cluster(
        &mut self,
        cluster: Option<ClusterId>,
    ) -> Result<SelectionState, SelectionError> {
        self.ensure_enabled(FormField::Cluster)?;
        if let Some(id) = cluster {
            if !self.cluster_options.iter().any(|c| c.id == id) {
                return Err(unknown(FormField::Cluster, id));
            }
        }
        self.cluster = cluster;
        Ok(self.state())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_environment_type(
        &mut self,
        snapshot: &TopologySnapshot,
        environment_type: Option<EnvironmentTypeId>,
    ) -> Result<(), SelectionError> {
        self.ensure_enabled(FormField::EnvironmentType)?;
        if let Some(id) = environment_type {
            if !snapshot.environment_types.iter().any(|t| t.id == id) {
                return Err(unknown(FormField::EnvironmentType, id));
            }
        }
        self.environment_type = environment_type;
        Ok(())
    }

    pub fn set_cluster_type(
        &mut self,
        snapshot: &TopologySnapshot,
        cluster_type: Option<ClusterTypeId>,
    ) -> Result<(), SelectionError> {
        self.ensure_enabled(FormField::ClusterType)?;
        if let Some(id) = cluster_type {
            if !snapshot.cluster_types.iter().any(|t| t.id == id) {
                return Err(unknown(FormField::ClusterType, id));
            }
        }
        self.cluster_type = cluster_type;
        Ok(())
    }

    /// Switch modes. Clears every field and re-applies the mode's policy.
    pub fn set_mode(&mut self, mode: FormMode) {
        *self = Self::new(mode);
    }

    /// Re-initialize in the current mode, e.g. after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Required fields that are still empty, in field order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        self.required
            .iter()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Build the create command for this form. The form is left as-is so
    /// a failed create can be retried.
    pub fn submission(&self) -> Result<Command, SelectionError> {
        if let Some(field) = self.missing_fields().into_iter().next() {
            return Err(SelectionError::MissingField(field));
        }
        let name = self.name.trim().to_owned();

        let cmd = match self.mode {
            FormMode::Site => Command::CreateSite(CreateSiteRequest { name }),
            FormMode::Environment => Command::CreateEnvironment(CreateEnvironmentRequest {
                site_id: required(self.site, FormField::Site)?,
                name,
                environment_type_id: required(
                    self.environment_type,
                    FormField::EnvironmentType,
                )?,
            }),
            FormMode::Cluster => Command::CreateCluster(CreateClusterRequest {
                env_id: required(self.environment, FormField::Environment)?,
                name,
                cluster_type_id: required(self.cluster_type, FormField::ClusterType)?,
            }),
            FormMode::SyncCluster => Command::CreateSyncCluster(CreateSyncClusterRequest {
                cluster_id: required(self.cluster, FormField::Cluster)?,
                name,
            }),
        };
        Ok(cmd)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn ensure_enabled(&self, field: FormField) -> Result<(), SelectionError> {
        if self.is_enabled(field) {
            Ok(())
        } else {
            Err(SelectionError::FieldDisabled(field))
        }
    }

    fn is_filled(&self, field: FormField) -> bool {
        match field {
            FormField::Site => self.site.is_some(),
            FormField::Environment => self.environment.is_some(),
            FormField::Cluster => self.cluster.is_some(),
            FormField::Name => !self.name.trim().is_empty(),
            FormField::EnvironmentType => self.environment_type.is_some(),
            FormField::ClusterType => self.cluster_type.is_some(),
        }
    }

    fn clear_environment(&mut self) {
        self.environment = None;
        self.environment_options.clear();
        self.clear_cluster();
    }

    fn clear_cluster(&mut self) {
        self.cluster = None;
        self.cluster_options.clear();
        self.enabled.remove(FormField::Cluster);
    }
}

fn unknown(field: FormField, id: impl ToString) -> SelectionError {
    SelectionError::UnknownOption {
        field,
        id: id.to_string(),
    }
}

fn required<T>(value: Option<T>, field: FormField) -> Result<T, SelectionError> {
    value.ok_or(SelectionError::MissingField(field))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use topo_api::{ClusterRecord, EnvironmentRecord, SiteRecord, SyncClusterRecord};

    use super::*;
    use crate::aggregate::aggregate;
    use crate::model::{ClusterType, EnvironmentType};

    fn snapshot() -> TopologySnapshot {
        let sites = vec![
            SiteRecord {
                id: 1,
                name: "HQ".into(),
                physical_location: "Y".into(),
            },
            SiteRecord {
                id: 2,
                name: "DR".into(),
                physical_location: "N".into(),
            },
        ];
        let envs = vec![
            EnvironmentRecord {
                id: 10,
                name: "prod".into(),
                site_id: 1,
                environment_type_id: 1,
            },
            EnvironmentRecord {
                id: 11,
                name: "qa".into(),
                site_id: 1,
                environment_type_id: 2,
            },
            EnvironmentRecord {
                id: 20,
                name: "dr".into(),
                site_id: 2,
                environment_type_id: 1,
            },
        ];
        let clusters = vec![
            ClusterRecord {
                id: 100,
                name: "c1".into(),
                env_id: 10,
                cluster_type_id: 3,
            },
            ClusterRecord {
                id: 200,
                name: "c2".into(),
                env_id: 20,
                cluster_type_id: 3,
            },
        ];
        let syncs: Vec<SyncClusterRecord> = Vec::new();
        TopologySnapshot {
            generation: 1,
            environment_types: vec![
                EnvironmentType {
                    id: 1.into(),
                    name: "production".into(),
                },
                EnvironmentType {
                    id: 2.into(),
                    name: "staging".into(),
                },
            ],
            cluster_types: vec![ClusterType {
                id: 3.into(),
                name: "kafka".into(),
            }],
            ..TopologySnapshot::from_parts(
                1,
                aggregate(&sites, &envs, &clusters, &syncs),
                Vec::new(),
                Vec::new(),
                chrono::Utc::now(),
            )
        }
    }

    #[test]
    fn new_form_applies_policy() {
        let form = CreationForm::new(FormMode::Environment);
        assert_eq!(form.state(), SelectionState::NoSiteSelected);
        assert!(form.is_enabled(FormField::Site));
        assert!(form.is_enabled(FormField::EnvironmentType));
        assert!(!form.is_enabled(FormField::Environment));
        assert!(!form.is_enabled(FormField::Cluster));
        assert!(!form.is_enabled(FormField::ClusterType));
    }

    #[test]
    fn sync_cluster_cascade() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::SyncCluster);

        let state = form.select_site(&snap, Some(SiteId::new(1))).unwrap();
        assert_eq!(state, SelectionState::SiteSelected(SiteId::new(1)));
        assert!(form.is_enabled(FormField::Environment));
        let env_names: Vec<&str> = form
            .environment_options()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(env_names, vec!["prod", "qa"]);

        form.select_environment(&snap, Some(EnvironmentId::new(10)))
            .unwrap();
        assert!(form.is_enabled(FormField::Cluster));
        assert_eq!(form.cluster_options().len(), 1);

        let state = form.select_cluster(Some(ClusterId::new(100))).unwrap();
        assert_eq!(
            state,
            SelectionState::ClusterSelected(
                SiteId::new(1),
                EnvironmentId::new(10),
                ClusterId::new(100)
            )
        );

        form.set_name(" sync-a ");
        let cmd = form.submission().unwrap();
        assert_eq!(
            cmd,
            Command::CreateSyncCluster(CreateSyncClusterRequest {
                cluster_id: ClusterId::new(100),
                name: "sync-a".into(),
            })
        );
        // Submission keeps the values for a retry.
        assert_eq!(form.cluster(), Some(ClusterId::new(100)));
    }

    #[test]
    fn sync_cluster_mode_offers_only_local_site() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::SyncCluster);
        let options = form.site_options(&snap);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, SiteId::new(1));

        let err = form.select_site(&snap, Some(SiteId::new(2))).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownOption { field: FormField::Site, .. }));
        assert_eq!(form.state(), SelectionState::NoSiteSelected);
    }

    #[test]
    fn cluster_mode_never_enables_cluster_field() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Cluster);
        form.select_site(&snap, Some(SiteId::new(2))).unwrap();
        form.select_environment(&snap, Some(EnvironmentId::new(20)))
            .unwrap();
        assert!(!form.is_enabled(FormField::Cluster));
        assert_eq!(
            form.select_cluster(Some(ClusterId::new(200))),
            Err(SelectionError::FieldDisabled(FormField::Cluster))
        );

        form.set_cluster_type(&snap, Some(ClusterTypeId::new(3)))
            .unwrap();
        form.set_name("c9");
        assert_eq!(
            form.submission().unwrap(),
            Command::CreateCluster(CreateClusterRequest {
                env_id: EnvironmentId::new(20),
                name: "c9".into(),
                cluster_type_id: ClusterTypeId::new(3),
            })
        );
    }

    #[test]
    fn site_mode_keeps_environment_disabled() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Site);
        assert_eq!(
            form.select_site(&snap, Some(SiteId::new(1))),
            Err(SelectionError::FieldDisabled(FormField::Site))
        );
        form.set_name("edge");
        assert_eq!(
            form.submission().unwrap(),
            Command::CreateSite(CreateSiteRequest {
                name: "edge".into()
            })
        );
    }

    #[test]
    fn reselecting_site_resets_children() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::SyncCluster);
        form.select_site(&snap, Some(SiteId::new(1))).unwrap();
        form.select_environment(&snap, Some(EnvironmentId::new(10)))
            .unwrap();
        form.select_cluster(Some(ClusterId::new(100))).unwrap();

        form.select_site(&snap, Some(SiteId::new(1))).unwrap();
        assert_eq!(form.environment(), None);
        assert_eq!(form.cluster(), None);
        assert!(form.cluster_options().is_empty());
        assert!(!form.is_enabled(FormField::Cluster));

        form.select_site(&snap, None).unwrap();
        assert_eq!(form.state(), SelectionState::NoSiteSelected);
        assert!(!form.is_enabled(FormField::Environment));
        assert!(form.environment_options().is_empty());
    }

    #[test]
    fn clearing_environment_disables_cluster() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::SyncCluster);
        form.select_site(&snap, Some(SiteId::new(1))).unwrap();
        form.select_environment(&snap, Some(EnvironmentId::new(10)))
            .unwrap();
        form.select_environment(&snap, None).unwrap();
        assert!(!form.is_enabled(FormField::Cluster));
        assert_eq!(form.state(), SelectionState::SiteSelected(SiteId::new(1)));
    }

    #[test]
    fn environment_from_other_site_is_rejected() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Environment);
        form.select_site(&snap, Some(SiteId::new(1))).unwrap();
        let err = form
            .select_environment(&snap, Some(EnvironmentId::new(20)))
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownOption {
                field: FormField::Environment,
                id: "20".into(),
            }
        );
    }

    #[test]
    fn missing_fields_reported_in_order() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Environment);
        assert_eq!(
            form.missing_fields(),
            vec![FormField::Site, FormField::Name, FormField::EnvironmentType]
        );
        assert_eq!(
            form.submission(),
            Err(SelectionError::MissingField(FormField::Site))
        );

        form.select_site(&snap, Some(SiteId::new(2))).unwrap();
        form.set_name("   ");
        form.set_environment_type(&snap, Some(EnvironmentTypeId::new(2)))
            .unwrap();
        assert_eq!(
            form.submission(),
            Err(SelectionError::MissingField(FormField::Name))
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Environment);
        assert!(matches!(
            form.set_environment_type(&snap, Some(EnvironmentTypeId::new(99))),
            Err(SelectionError::UnknownOption { .. })
        ));
        assert_eq!(form.environment_type(), None);
    }

    #[test]
    fn mode_switch_resets_and_applies_new_policy() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Environment);
        form.select_site(&snap, Some(SiteId::new(2))).unwrap();
        form.set_name("qa");
        form.set_environment_type(&snap, Some(EnvironmentTypeId::new(1)))
            .unwrap();

        form.set_mode(FormMode::SyncCluster);
        assert_eq!(form, CreationForm::new(FormMode::SyncCluster));
        assert_eq!(form.state(), SelectionState::NoSiteSelected);
        assert!(!form.is_enabled(FormField::EnvironmentType));
        assert_eq!(form.site_options(&snap).len(), 1);
    }

    #[test]
    fn reset_keeps_mode() {
        let snap = snapshot();
        let mut form = CreationForm::new(FormMode::Cluster);
        form.select_site(&snap, Some(SiteId::new(1))).unwrap();
        form.set_name("x");
        form.reset();
        assert_eq!(form, CreationForm::new(FormMode::Cluster));
    }
}

//! In-process implementations of the collaborator traits.
//!
//! [`StaticAuth`] and [`StaticPreview`] hold fixed state and suit hosts that
//! resolve the session elsewhere. [`MemoryEntitlementStore`] keeps the
//! entitlement catalog and a user's grants, and exposes only slugs that are
//! both active in the catalog and unexpired.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use tracing::{debug, info, warn};

use crate::error::AccessError;
use crate::traits::{AuthProvider, EntitlementStore, PreviewModeProvider};
use crate::types::{Entitlement, EntitlementGrant, EntitlementSlug};

/// Fixed sign-in state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticAuth {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl StaticAuth {
    pub fn signed_in() -> Self {
        StaticAuth {
            is_authenticated: true,
            is_loading: false,
        }
    }

    pub fn signed_out() -> Self {
        StaticAuth::default()
    }

    pub fn loading() -> Self {
        StaticAuth {
            is_authenticated: false,
            is_loading: true,
        }
    }
}

impl AuthProvider for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    fn is_loading(&self) -> bool {
        self.is_loading
    }
}

/// Fixed preview override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPreview {
    pub is_preview_mode: bool,
    pub entitlements: BTreeSet<EntitlementSlug>,
}

impl StaticPreview {
    pub fn new<I>(entitlements: I) -> Self
    where
        I: IntoIterator<Item = EntitlementSlug>,
    {
        StaticPreview {
            is_preview_mode: true,
            entitlements: entitlements.into_iter().collect(),
        }
    }
}

impl PreviewModeProvider for StaticPreview {
    fn is_preview_mode(&self) -> bool {
        self.is_preview_mode
    }

    fn preview_entitlements(&self) -> BTreeSet<EntitlementSlug> {
        self.entitlements.clone()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    catalog: BTreeMap<EntitlementSlug, Entitlement>,
    grants: Vec<EntitlementGrant>,
}

/// An entitlement store holding the catalog and one user's grants.
///
/// Cloneable and thread-safe; clones share state, so a host can hand one
/// clone to an [`AccessEvaluator`](crate::AccessEvaluator) and keep another to
/// push updates through.
#[derive(Debug, Clone)]
pub struct MemoryEntitlementStore {
    inner: Arc<RwLock<StoreState>>,
    loading: Arc<AtomicBool>,
}

impl MemoryEntitlementStore {
    /// Create a store with `catalog` and no grants. The store starts loading
    /// until the first [`replace_grants`](Self::replace_grants).
    pub fn new<I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = Entitlement>,
    {
        let catalog = catalog
            .into_iter()
            .map(|e| (e.slug.clone(), e))
            .collect();
        MemoryEntitlementStore {
            inner: Arc::new(RwLock::new(StoreState {
                catalog,
                grants: Vec::new(),
            })),
            loading: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Load a catalog from a JSON array of [`Entitlement`] records.
    pub fn from_catalog_json(json: &str) -> Result<Self, AccessError> {
        let catalog: Vec<Entitlement> = serde_json::from_str(json)?;
        Ok(MemoryEntitlementStore::new(catalog))
    }

    /// Replace the user's grants and mark the store as loaded.
    ///
    /// Grants for slugs missing from the catalog are kept but never exposed.
    pub fn replace_grants<I>(&self, grants: I) -> Result<(), AccessError>
    where
        I: IntoIterator<Item = EntitlementGrant>,
    {
        let grants: Vec<EntitlementGrant> = grants.into_iter().collect();
        let count = grants.len();
        {
            let mut state = self.inner.write()?;
            state.grants = grants;
        }
        self.loading.store(false, Ordering::Release);

        info!(event = "Store", phase = "Grants", grants = count);

        #[cfg(feature = "observability")]
        crate::metrics::record_reload(count);

        Ok(())
    }

    /// Mark the store as (re)fetching, e.g. after a sign-in change.
    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::Release);
    }

    /// Add or replace a catalog entry.
    pub fn upsert_entitlement(&self, entitlement: Entitlement) -> Result<(), AccessError> {
        let mut state = self.inner.write()?;
        debug!(
            event = "Store",
            phase = "Catalog",
            slug = entitlement.slug.as_str(),
            active = entitlement.is_active
        );
        state.catalog.insert(entitlement.slug.clone(), entitlement);
        Ok(())
    }

    /// The catalog, ordered by slug.
    pub fn catalog(&self) -> Result<Vec<Entitlement>, AccessError> {
        let state = self.inner.read()?;
        Ok(state.catalog.values().cloned().collect())
    }

    /// Slugs that are active in the catalog and granted and live at `now`.
    pub fn active_slugs_at(&self, now: SystemTime) -> BTreeSet<EntitlementSlug> {
        let state = match self.inner.read() {
            Ok(state) => state,
            Err(poisoned) => {
                warn!(
                    event = "Store",
                    phase = "Grants",
                    "Entitlement store lock poisoned, reading the last written grants"
                );
                poisoned.into_inner()
            }
        };
        state
            .grants
            .iter()
            .filter(|grant| grant.is_live_at(now))
            .filter(|grant| {
                state
                    .catalog
                    .get(&grant.slug)
                    .is_some_and(|entitlement| entitlement.is_active)
            })
            .map(|grant| grant.slug.clone())
            .collect()
    }
}

impl EntitlementStore for MemoryEntitlementStore {
    fn entitlement_slugs(&self) -> BTreeSet<EntitlementSlug> {
        self.active_slugs_at(SystemTime::now())
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

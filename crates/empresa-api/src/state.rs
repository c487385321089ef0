//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds:
//! - **Profiles**: company profile records behind a [`ProfileStore`]
//! - **Default profile**: the record the `/empresa/*` pages show and edit
//! - **Configuration**: [`AppConfig`]

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// -- Profile Records ----------------------------------------------------------

/// Social network links shown on a company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialLinks {
    pub instagram: String,
    pub facebook: String,
    pub linkedin: String,
}

/// A company's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyProfile {
    pub id: Uuid,
    /// Display name.
    pub nome: String,
    /// Free-text description.
    pub descricao: String,
    /// Path of the profile picture.
    pub profilepicture: String,
    /// Public contact email.
    pub emailempresa: String,
    /// Industry sector (e.g. "Setor Industrial").
    #[serde(rename = "type")]
    pub company_type: String,
    /// Area of activity (e.g. "Cosméticos").
    pub area: String,
    /// Company website.
    pub siteempresa: String,
    #[serde(rename = "redesSociais")]
    pub redes_sociais: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyProfile {
    /// The profile shown before anyone has edited it.
    pub fn seed() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            nome: "Natura cosméticos".to_string(),
            descricao: "A Natura é uma multinacional brasileira líder em beleza e cuidados \
                pessoais na América Latina, e referência em Venda Direta. Guiada pela crença \
                de que é possível fazer beleza com propósito, a Companhia oferece produtos e \
                serviços de beleza e bem-estar com inovação, sustentabilidade e impacto \
                positivo. Com operações em 14 países na América Latina e um modelo de negócios \
                omnicanal, seus produtos podem ser adquiridos através das mais de 3 milhões de \
                consultoras de beleza na região, via e-commerce, aplicativo, ou nas mais de \
                1.000 lojas"
                .to_string(),
            profilepicture: "/img/naturafoto1.png".to_string(),
            emailempresa: String::new(),
            company_type: "Setor Industrial".to_string(),
            area: "Cosméticos".to_string(),
            siteempresa: String::new(),
            redes_sociais: SocialLinks::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

// -- Profile Store ------------------------------------------------------------

/// Thread-safe, cloneable in-memory profile store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// The first profile ever inserted becomes the default profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    inner: Arc<RwLock<ProfileTable>>,
}

#[derive(Debug, Default)]
struct ProfileTable {
    records: HashMap<Uuid, CompanyProfile>,
    default_id: Option<Uuid>,
}

impl ProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding [`CompanyProfile::seed`] as its default profile.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.insert(CompanyProfile::seed());
        store
    }

    /// Insert a record, returning the previous value if the id existed.
    pub fn insert(&self, profile: CompanyProfile) -> Option<CompanyProfile> {
        let mut table = self.inner.write();
        table.default_id.get_or_insert(profile.id);
        table.records.insert(profile.id, profile)
    }

    /// Retrieve a record by id.
    pub fn get(&self, id: &Uuid) -> Option<CompanyProfile> {
        self.inner.read().records.get(id).cloned()
    }

    /// List all records, oldest first.
    pub fn list(&self) -> Vec<CompanyProfile> {
        let mut profiles: Vec<_> = self.inner.read().records.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        profiles
    }

    /// Update a record in place. Returns the updated record, or `None` if not found.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut CompanyProfile)) -> Option<CompanyProfile> {
        let mut table = self.inner.write();
        let entry = table.records.get_mut(id)?;
        f(entry);
        Some(entry.clone())
    }

    /// Apply `update` to the default profile, or insert `create()` as the
    /// default when there is none. Returns the stored profile and whether
    /// it was created. The check and the write happen under one lock.
    pub fn upsert_default(
        &self,
        create: impl FnOnce() -> CompanyProfile,
        update: impl FnOnce(&mut CompanyProfile),
    ) -> (CompanyProfile, bool) {
        let mut table = self.inner.write();
        if let Some(id) = table.default_id {
            if let Some(entry) = table.records.get_mut(&id) {
                update(entry);
                return (entry.clone(), false);
            }
        }
        let profile = create();
        table.default_id = Some(profile.id);
        table.records.insert(profile.id, profile.clone());
        (profile, true)
    }

    /// Id of the default profile, if any profile exists.
    pub fn default_id(&self) -> Option<Uuid> {
        self.inner.read().default_id
    }

    /// The default profile.
    pub fn default_profile(&self) -> Option<CompanyProfile> {
        let table = self.inner.read();
        table.default_id.and_then(|id| table.records.get(&id).cloned())
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -- Configuration ------------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Insert the default company profile at startup.
    pub seed_default_profile: bool,
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// - `EMPRESA_PORT`, falling back to `PORT` (default 8080)
    /// - `EMPRESA_SEED_PROFILE`: `false`/`0`/`no` disables seeding
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("EMPRESA_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let seed_default_profile = lookup("EMPRESA_SEED_PROFILE")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(defaults.seed_default_profile);
        Self {
            port,
            seed_default_profile,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            seed_default_profile: true,
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub profiles: ProfileStore,
    pub config: AppConfig,
}

impl AppState {
    /// Create a new application state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let profiles = if config.seed_default_profile {
            ProfileStore::seeded()
        } else {
            ProfileStore::new()
        };
        Self { profiles, config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

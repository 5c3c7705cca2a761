//! Facade crate for the Plint intake platform.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `plint` with the desired feature flags (`server`/`client`).
//! - Server: run [`migrations`] through the database builder, then call [`init`] and
//!   mount [`server::router`].
//! - Client: build a [`features::binder::FormBinder`] for the landing page.

pub use plint_domain as domain;
pub use plint_kernel as kernel;

/// Feature registry for runtime introspection.
pub mod features {
    pub use plint_binder as binder;
    pub use plint_contact as contact;
    pub use plint_waitlist as waitlist;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
        #[cfg(feature = "server")]
        "waitlist",
        #[cfg(feature = "server")]
        "contact",
        "binder",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[cfg(feature = "server")]
pub use server::{init, migrations};

#[cfg(feature = "server")]
pub mod server {
    use crate::domain::registry::InitializedSlice;
    use crate::features;
    use plint_database::{Database, Migration};
    use plint_kernel::server::state::ApiState;
    use utoipa_axum::router::OpenApiRouter;

    /// Every slice's schema scripts, in application order.
    pub fn migrations() -> impl Iterator<Item = Migration> {
        features::waitlist::MIGRATIONS
            .iter()
            .chain(features::contact::MIGRATIONS)
            .copied()
    }

    /// Initialize all enabled features for server mode.
    ///
    /// # Errors
    /// Returns an error if any feature initialization fails.
    pub fn init(
        database: &Database,
    ) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(vec![features::waitlist::init(database)?, features::contact::init(database)?])
    }

    /// System routes plus every slice's routes.
    pub fn router() -> OpenApiRouter<ApiState> {
        OpenApiRouter::new()
            .merge(plint_kernel::server::router::system_router())
            .merge(features::waitlist::router())
            .merge(features::contact::router())
    }
}

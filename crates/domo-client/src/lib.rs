//! Client for Eti/Domo home-automation controllers
//!
//! # Example
//!
//! ```ignore
//! use domo_client::Session;
//! use domo_config::DomoConfig;
//! use domo_core::SwitchKind;
//!
//! let config = DomoConfig::load("/etc/domo")?;
//! let mut session = Session::open(&config).await?;
//!
//! let act_id = session.resolve_light_id("Piano terra", "Cucina", "Lampadario").await?;
//! session.switch(SwitchKind::Light, act_id, true).await?;
//!
//! // The switch refreshed the item catalog
//! println!("{:?}", session.items().get("lights"));
//! ```

mod http;
mod items;
mod session;
mod transport;

pub use http::{HttpTransport, CONNECTION_KEEP_ALIVE};
pub use items::ItemCatalog;
pub use session::{Session, SharedSession};
pub use transport::Transport;

// Protocol types callers need alongside the session
pub use domo_core::{
    entities, ActId, Command, DomoError, DomoResult, Season, SwitchKind, ThermoMode,
};

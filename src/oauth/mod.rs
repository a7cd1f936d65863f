//! Provider OAuth Module
//!
//! The two redirect legs of the provider's three-legged authorization.
//! `/oauth/request` obtains a request token and sends the user to the
//! consent page; `/oauth/access_token` trades the approved request token
//! for an access token and hands it to the front-end in the redirect URL.
//!
//! # Architecture
//!
//! - The gateway stores nothing between the legs
//! - The request token rides through the redirect chain as a query parameter
//! - The access token ends up with the caller, never in this process
//!
//! # Usage
//!
//! ```rust,ignore
//! use triage::oauth;
//!
//! let app = Router::new()
//!     .nest("/oauth", oauth::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;

pub use routes::routes;

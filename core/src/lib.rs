//! Client core for the holiday planner service.
//!
//! # Overview
//! Keeps a local copy of the planner collection served by a REST backend and
//! drives create/update/delete against it. Reads flow from the store to the
//! view; writes go view -> form -> store -> backend, then the store refetches
//! the whole list.
//!
//! # Design
//! - `PlannerClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values (host-does-IO). A `Transport` executes them.
//! - `PlannerStore` is the only component that performs requests. It is an
//!   explicit value owned by the application, not global state, and every
//!   operation returns a `Result`.
//! - `PlannerForm` owns the single editable draft.
//! - `print` and `prefs` are side collaborators: printable markup and
//!   persisted preferences.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod prefs;
pub mod print;
pub mod store;
pub mod types;

pub use client::PlannerClient;
pub use config::ClientConfig;
pub use error::{ApiError, FormError, PreferenceError};
pub use form::{Field, FormMode, PlannerForm, Submission};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use prefs::Preferences;
pub use print::{format_date, printable_content};
pub use store::{Operation, PlannerStore, Refresh};
pub use types::{DraftForm, PlannerId, PlannerRecord};

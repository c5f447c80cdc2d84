//! Form designer core: field registry, element store, drag/drop editing and
//! submission validation.
//!
//! This crate owns everything stateful about building and filling a form.
//! The host UI is responsible only for measuring drop zones, forwarding
//! pointer/focus events to an [`session::EditSession`] or
//! [`session::FillSession`], and painting the view models the registry
//! produces. Persistence and user-facing notifications are reached through
//! the [`backend::FormBackend`] and [`backend::Notifier`] seams.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`field`] | Field type tags and their typed attribute records |
//! | [`fields`] | Per-type descriptors (defaults, schema, validation, views) |
//! | [`registry`] | Tag → descriptor lookup table |
//! | [`element`] | Element instances, ids, and the wire encoding |
//! | [`store`] | Ordered element store with insert/remove/move/update |
//! | [`hit`] | Drop-zone geometry and half-zone hit-testing |
//! | [`input`] | Pointer activation sensors (mouse distance, touch delay) |
//! | [`drag`] | Drag session state machine |
//! | [`properties`] | Deferred-commit properties editor |
//! | [`submission`] | Fill-time validation and the submission record |
//! | [`view`] | Render-agnostic view models |
//! | [`session`] | Edit and fill sessions, the host-facing entry points |
//! | [`backend`] | Persistence and notification collaborator traits |
//! | [`net`] | HTTP implementation of the persistence collaborator |
//! | [`consts`] | Schema limits and activation thresholds |

pub mod backend;
pub mod consts;
pub mod drag;
pub mod element;
pub mod field;
pub mod fields;
pub mod hit;
pub mod input;
pub mod net;
pub mod properties;
pub mod registry;
pub mod session;
pub mod store;
pub mod submission;
pub mod view;

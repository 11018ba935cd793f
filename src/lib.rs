//! # ASD Rust Backend
//!
//! Backend for the Area Statement Dashboard.
//!
//! This crate provides a Rust backend for reviewing construction area
//! statement documents: parsing and validating uploaded JSON, projecting the
//! nested document into a flat editable field table, applying immutable
//! single-field edits, computing derived analytics, synthesizing a
//! deterministic construction schedule (locally or via an AI generator), and
//! exporting the document to JSON or CSV. The backend exposes a REST API via
//! Axum for the React frontend.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: The `AreaStatement` document model, parsing and checksums
//! - [`services`]: Flattening/editing, schedule synthesis, analytics,
//!   validation, export, and schedule generators
//! - [`store`]: In-memory session store holding the current statement
//!   version per upload
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Design
//!
//! The service core is pure and synchronous: every operation is a single-pass
//! transformation over a small, already-validated document. The only
//! asynchronous work in the system is the optional outbound chat-completions
//! call, kept behind the [`services::generator::ScheduleGenerator`] trait so
//! the local synthesizer and the AI-backed generator are interchangeable.

pub mod models;

pub mod services;

pub mod store;

#[cfg(feature = "http-server")]
pub mod http;

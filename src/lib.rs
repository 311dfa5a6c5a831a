// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Script Strategist - Backend API Service
//!
//! HTTP backend of the AI Script Strategist, built to run as a container
//! behind a periodic health probe.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification
//! - `config` - Environment configuration
//! - `probe` - Container health probe client
//! - `server` - Serve loop and graceful shutdown
//! - `telemetry` - Logging setup

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod server;
pub mod state;
pub mod telemetry;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token verification for the Script Strategist API.
//!
//! ## Auth Flow
//!
//! 1. The frontend obtains an access token from the account service
//! 2. The frontend sends `Authorization: Bearer <JWT>`
//! 3. This service:
//!    - Verifies the HMAC signature with `JWT_SECRET_KEY` / `JWT_ALGORITHM`
//!    - Checks expiry with 60 seconds of clock skew tolerance
//!    - Extracts `sub` (user id), `email` and `role`
//!
//! Tokens are never issued here.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod roles;
pub mod verifier;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use roles::Role;
pub use verifier::TokenVerifier;

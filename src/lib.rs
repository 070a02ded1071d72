//! # Credence - Account Identity Service Library
//!
//! This is a facade crate that re-exports all public APIs from the identity
//! service components. Use this crate to get access to registration,
//! activation, sign-in, and profile functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! credence = { path = "../credence" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `Principal`, etc.
//! - **Repository traits**: `AccountStore`
//! - **Use cases**: `RegisterUseCase`, `SignInUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `PostmarkEmailClient`, session tokens, etc.
//! - **Service**: `IdentityService` - The main entry point for the identity service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use credence_core::*;
}

// Re-export most commonly used core types at the root level
pub use credence_core::{
    Account, ActivationCode, Channel, DomainError, Email, FORM_CHANNEL, Password, Principal,
    ProfilePatch, Role, StoredPasswordHash,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use credence_core::{AccountStore, AccountStoreError};
}

// Re-export repository traits at root level
pub use credence_core::{
    AccountStore, AccountStoreError, CredentialHasher, EmailClient, HasherError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use credence_application::*;
}

// Re-export use cases at root level
pub use credence_application::{
    ActivateAccountUseCase, EditProfileUseCase, RegisterOutcome, RegisterUseCase, SignInUseCase,
    SignOutUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use credence_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use credence_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use credence_adapters::email::*;
    }

    /// Session token utilities
    pub mod auth {
        pub use credence_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use credence_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use credence_adapters::{
    Argon2CredentialHasher, SessionConfig,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{InMemoryAccountStore, PostgresAccountStore},
};

// ============================================================================
// Identity Service (Main Entry Point)
// ============================================================================

/// Main identity service
pub use credence_service::{IdentityService, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;

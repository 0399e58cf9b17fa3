//! Waba Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the WhatsApp
//! Business message-template client, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             waba-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (TemplateService)            │
//! │    Builds requests, maps responses      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: ApiClient, Logger, Validator) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      waba-adapters (Infrastructure)     │
//! │     (HttpApiClient, TracingLogger)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Template, TemplateComponent, results) │
//! │             No I/O, no async            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use waba_core::{
//!     application::TemplateService,
//!     domain::{Parameter, TemplateComponent},
//! };
//!
//! # async fn run(client: Box<dyn waba_core::application::ports::ApiClient>,
//! #              logger: Box<dyn waba_core::application::ports::Logger>) {
//! // 1. Inject adapters
//! let service = TemplateService::new(client, "1234567890", logger);
//!
//! // 2. Send a template message
//! let body = TemplateComponent::body(vec![Parameter::text("Ada")]);
//! let sent = service
//!     .send_template("15551234567", "order_ready", "en_US", vec![body])
//!     .await
//!     .unwrap();
//! println!("{:?}", sent.message_id);
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod constants;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApiError, ClientError, CreatedTemplate, FailureOrigin, Operation, TemplateFailure,
        TemplateResponse, TemplateService,
        ports::{ApiClient, Logger, TemplateValidator},
    };
    pub use crate::domain::{
        ButtonSubType, JsonObject, MediaRef, MessageResponse, Parameter, Template,
        TemplateCategory, TemplateComponent,
    };
    pub use crate::error::{ErrorCategory, MessageError, MessageResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod chat;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod goal;
pub mod maintenance;
pub mod session;
pub mod showcase;
pub mod user;
pub mod viewer;

// Re-export all services for convenience
pub use auth::AuthService;
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use goal::GoalService;
pub use maintenance::MaintenanceService;
pub use session::SessionService;
pub use showcase::ShowcaseService;
pub use user::UserService;
pub use viewer::ViewerService;

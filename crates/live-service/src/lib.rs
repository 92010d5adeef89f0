//! # live-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::requests::*;
pub use dto::responses::*;
pub use services::{
    AuthService, ChatService, DashboardService, GoalService, MaintenanceService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SessionService, ShowcaseService,
    UserService, ViewerService,
};

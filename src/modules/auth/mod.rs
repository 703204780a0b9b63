//! Login, registration, logout and session lookup under `/api/auth`.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub mod app;
pub mod config;
pub mod dto;
pub mod handler;
pub mod kpi;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;
pub mod util;

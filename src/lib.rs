pub mod configuration;
pub mod db;
pub mod forms;
pub mod guard;
pub mod helpers;
mod middleware;
pub mod models;
pub mod plans;
pub mod repository;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod views;

pub mod calendar;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod histogram;
pub mod majors;
pub mod models;
pub mod report;

pub mod cli;
pub mod clients;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod migrations;
pub mod models;
pub mod repositories;

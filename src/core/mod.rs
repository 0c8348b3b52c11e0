pub mod app;
pub mod builtin_models;
pub mod completion;
pub mod config;
pub mod credentials;
pub mod keyring;
pub mod message;
pub mod session;
pub mod settings;
pub mod transcript;

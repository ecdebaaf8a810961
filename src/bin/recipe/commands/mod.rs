//! Command implementations

pub mod add;
pub mod check;
pub mod completions;
pub mod evaluate;
pub mod init;
pub mod layout;
pub mod new;
pub mod remove;
pub mod settings;

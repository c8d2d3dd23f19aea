pub mod action;
pub mod bulk;
pub mod cache;
pub mod delete;
pub mod dispatch;
pub mod get;
pub mod health;
pub mod list;
pub mod mode;
pub mod schema;
pub mod serve;
pub mod settings;
pub mod shared;
pub mod stats;
pub mod token;

#[cfg(test)]
pub mod test_support;

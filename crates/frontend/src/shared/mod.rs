pub mod api_utils;
pub mod config;
pub mod dom;
pub mod notification;
pub mod scheduler;
pub mod storage;
pub mod styles;

#[cfg(test)]
pub mod test_support;

pub mod error;
pub mod types;

#[cfg(test)]
pub mod log_capture;

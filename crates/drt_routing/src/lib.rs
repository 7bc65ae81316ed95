pub mod config;
pub mod error;
pub mod local_estimate;
pub mod osrm;
pub mod remote_route;
pub mod route;
pub mod route_assembler;
pub mod route_service;
pub mod schedule;
pub mod schedule_time;
pub mod stop;
pub mod units;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

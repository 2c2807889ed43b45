pub mod config;
pub mod markets;
pub mod profile;
pub mod sync;
mod main_lib;

pub use main_lib::{
    build_job, build_providers, build_router, build_store, init_tracing, load_profile,
    StoreHandle,
};

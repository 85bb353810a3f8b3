pub mod client;
pub mod provider;
pub mod subscription;

mod dtos {
    pub(crate) mod auth;
}

pub mod stored_key_repo;

pub use stored_key_repo::StoredKeyRepo;

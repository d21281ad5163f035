pub mod stored_key;

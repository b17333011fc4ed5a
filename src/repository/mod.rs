pub mod mongo_client;
pub mod order_repo;
pub mod quotation_repo;
pub mod repository_error;

pub mod batch_file;
pub mod card_service;
pub mod ingest_actor;
pub mod user_service;

pub use batch_file::{BatchFileParser, UploadedFile};
pub use card_service::CardService;
pub use ingest_actor::IngestHandle;
pub use user_service::UserService;

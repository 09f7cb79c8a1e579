pub mod auth;
pub mod params;
pub mod request_log;
pub mod upload;
pub mod validated_json;

pub use auth::AuthenticatedUser;
pub use params::{PageParams, PathParam};
pub use request_log::log_requests;
pub use upload::MultipartUpload;
pub use validated_json::ValidatedJson;

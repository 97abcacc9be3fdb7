pub mod envelope;
pub mod error;
pub mod params;

pub use envelope::{build_response, ResponseEnvelope, ResponseType, UnknownResponseType};
pub use error::CommandError;
pub use params::Params;

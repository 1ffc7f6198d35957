pub mod captions;
pub mod frontend;
pub mod model;

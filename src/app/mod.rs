pub mod dispatcher;
pub mod params;
pub mod registry;

pub use dispatcher::{render, Dispatcher};
pub use registry::{CallContext, Category};

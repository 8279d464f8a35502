mod config;
mod mapping;
mod notification;

pub use config::reduce_config;
pub use mapping::reduce_mapping;
pub use notification::reduce_notification;

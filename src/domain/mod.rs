// Domain layer: core models and ports (interfaces) to the directory, preference store and notification channel.

pub mod model;
pub mod notification;
pub mod ports;

pub mod catalog;
pub mod notifier;
pub mod runtime;
pub mod validator;

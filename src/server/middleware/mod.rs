//! Request middleware: session wrappers and the authorization guard.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;

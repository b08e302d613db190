//! Console front end for the archive Q-app: stdin commands in, rendered view
//! model out.
pub mod platform;
